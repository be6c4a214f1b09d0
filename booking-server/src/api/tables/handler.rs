//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::{Table, TableAvailabilityUpdate};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Table>>> {
    Ok(Json(state.tables.get_all()))
}

/// GET /api/tables/available - 获取当前可用桌台
pub async fn available(State(state): State<ServerState>) -> AppResult<Json<Vec<Table>>> {
    Ok(Json(state.tables.get_available()))
}

/// GET /api/tables/:number - 按编号获取桌台
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> AppResult<Json<Table>> {
    let table = state
        .tables
        .get_by_number(&number)
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", number)))?;
    Ok(Json(table))
}

/// PATCH /api/tables/:number/availability - 设置桌台可用性 (管理员)
///
/// 常规路径下可用性由预订存储维护；该接口是管理端的人工修正入口。
pub async fn set_availability(
    State(state): State<ServerState>,
    Path(number): Path<String>,
    Json(payload): Json<TableAvailabilityUpdate>,
) -> AppResult<Json<Table>> {
    let table = state.tables.set_availability(&number, payload.is_available)?;
    tracing::info!(
        table = %table.number,
        is_available = table.is_available,
        "Table availability overridden"
    );
    Ok(Json(table))
}
