//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`reservations`] - 预订管理接口
//! - [`tables`] - 桌台查询与可用性接口
//! - [`reports`] - 按月报表接口 (管理员)

pub mod auth;
pub mod health;
pub mod reports;
pub mod reservations;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
