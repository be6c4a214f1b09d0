//! Monthly Report API Handlers
//!
//! 报表从预订历史即时重算，不做增量维护。

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{MonthlyStats, MonthlySummary};

use crate::core::ServerState;
use crate::store::reports;
use crate::utils::{AppResult, time};

/// GET /api/reports/monthly - 全部月份汇总
pub async fn monthly_list(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<MonthlySummary>>> {
    let history = state.reservations.list_all();
    Ok(Json(reports::monthly_summaries(&history)))
}

/// GET /api/reports/monthly/:month - 单月完整统计
pub async fn monthly_detail(
    State(state): State<ServerState>,
    Path(month): Path<String>,
) -> AppResult<Json<MonthlyStats>> {
    time::parse_month(&month)?;
    let history = state.reservations.list_all();
    Ok(Json(reports::monthly_stats(&month, &history)))
}
