//! Chico Booking Server - 餐厅订座服务端
//!
//! # 架构概述
//!
//! 本模块是 Booking Server 的主入口，提供以下核心功能：
//!
//! - **预订存储** (`store`): 预订/桌台/用户的权威内存集合与一致性规则
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//! - **报表** (`store::reports`): 按月聚合统计
//!
//! # 模块结构
//!
//! ```text
//! booking-server/src/
//! ├── core/          # 配置、状态、错误
//! ├── auth/          # JWT 认证、权限
//! ├── store/         # 预订、桌台、用户、过滤、报表
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use crate::core::server::build_router;
pub use crate::core::{Config, Server, ServerState};
pub use store::{ReservationEvent, ReservationStore, TableRegistry, UserStore};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 缺失不是错误
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ________    _
  / ____/ /_  (_)________
 / /   / __ \/ / ___/ __ \
/ /___/ / / / / /__/ /_/ /
\____/_/ /_/_/\___/\____/
    "#
    );
}
