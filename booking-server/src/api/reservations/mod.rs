//! Reservation API 模块
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /api/reservations | GET, POST | 需要 |
//! | /api/reservations/{id} | GET, PATCH | 本人或管理员 |
//! | /api/reservations/{id} | DELETE | 管理员 |
//! | /api/reservations/{id}/status | PATCH | 取消: 本人或管理员；其余: 管理员 |
//! | /api/reservations/user/{user_id} | GET | 本人或管理员 |

mod handler;

use axum::{Router, middleware, routing::get, routing::patch};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).patch(handler::update))
        .route("/{id}/status", patch(handler::set_status))
        .route("/user/{user_id}", get(handler::for_user));

    let admin_routes = Router::new()
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(admin_routes)
}
