//! Health Check Handler

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (ok | error)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 桌台总数
    tables: usize,
    /// 预订总数
    reservations: usize,
}

/// GET /health - 健康检查
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        tables: state.tables.get_all().len(),
        reservations: state.reservations.list_all().len(),
    })
}
