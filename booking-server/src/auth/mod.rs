//! 认证模块
//!
//! - [`jwt`] - JWT 令牌生成与验证
//! - [`middleware`] - 认证/授权中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
