//! Reservation API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::{
    Reservation, ReservationCreate, ReservationStatus, ReservationStatusUpdate, ReservationUpdate,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::filter::{self, ReservationQuery, Viewer};
use crate::utils::{AppError, AppResult};

/// GET /api/reservations - 过滤后的可见预订列表
///
/// 过滤条件 (search/status/date) 与查看者可见性取与；
/// 普通用户永远只看到自己的预订。
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ReservationQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let all = state.reservations.list_all();
    let viewer = Viewer::from(&user);
    Ok(Json(filter::apply(&all, &viewer, &query)))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .reservations
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    if !user.can_access(&reservation.user_id) {
        return Err(AppError::forbidden("Not your reservation"));
    }

    Ok(Json(reservation))
}

/// GET /api/reservations/user/:user_id - 指定用户的预订
pub async fn for_user(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    if !user.can_access(&user_id) {
        return Err(AppError::forbidden("Not your reservations"));
    }

    Ok(Json(state.reservations.list_for_user(&user_id)))
}

/// POST /api/reservations - 创建预订
///
/// 预订归属当前登录用户。
pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservations.create(&user.id, payload)?;
    Ok(Json(reservation))
}

/// PATCH /api/reservations/:id - 修改预订
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let existing = state
        .reservations
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    if !user.can_access(&existing.user_id) {
        return Err(AppError::forbidden("Not your reservation"));
    }

    let reservation = state.reservations.update(&id, payload)?;
    Ok(Json(reservation))
}

/// PATCH /api/reservations/:id/status - 状态流转
///
/// 取消允许本人或管理员；确认/完成仅管理员。
/// 非法流转由存储层拒绝 (422)。
pub async fn set_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> AppResult<Json<Reservation>> {
    let existing = state
        .reservations
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let allowed = match payload.status {
        ReservationStatus::Cancelled => user.can_access(&existing.user_id),
        _ => user.is_admin(),
    };
    if !allowed {
        return Err(AppError::forbidden(format!(
            "Changing status to {} requires admin role",
            payload.status
        )));
    }

    let reservation = state.reservations.set_status(&id, payload.status)?;
    Ok(Json(reservation))
}

/// DELETE /api/reservations/:id - 永久删除 (管理员)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.reservations.delete(&id)?;
    Ok(Json(true))
}
