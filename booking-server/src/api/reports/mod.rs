//! Monthly Report API 模块 (管理员)
//!
//! | 路径 | 方法 | 认证 |
//! |------|------|------|
//! | /api/reports/monthly | GET | 管理员 |
//! | /api/reports/monthly/{month} | GET | 管理员 |

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/monthly", get(handler::monthly_list))
        .route("/monthly/{month}", get(handler::monthly_detail))
        .layer(middleware::from_fn(require_admin))
}
