//! Dining Table API 模块
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /api/tables | GET | 需要 |
//! | /api/tables/available | GET | 需要 |
//! | /api/tables/{number} | GET | 需要 |
//! | /api/tables/{number}/availability | PATCH | 管理员 |

mod handler;

use axum::{Router, middleware, routing::get, routing::patch};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/available", get(handler::available))
        .route("/{number}", get(handler::get_by_number));

    let manage_routes = Router::new()
        .route("/{number}/availability", patch(handler::set_availability))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
