//! 预订存储层
//!
//! 权威的内存集合与一致性规则：
//!
//! - [`ReservationStore`] - 预订集合、状态流转、桌台占用耦合
//! - [`TableRegistry`] - 桌台集合与可用性
//! - [`UserStore`] - 用户集合 (argon2 密码哈希)
//! - [`filter`] - 预订过滤 (纯函数)
//! - [`reports`] - 按月聚合统计 (只读派生)
//!
//! 所有读取返回克隆，外部持有者无法绕过一致性规则。

pub mod filter;
pub mod reports;
pub mod reservations;
pub mod tables;
pub mod users;

pub use filter::{ReservationQuery, Viewer};
pub use reservations::{ReservationEvent, ReservationStore};
pub use tables::TableRegistry;
pub use users::UserStore;
