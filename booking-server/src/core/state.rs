use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::store::{ReservationStore, TableRegistry, UserStore};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是订座服务的核心数据结构，持有所有集合的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | tables | Arc<TableRegistry> | 桌台可用性服务 |
/// | reservations | Arc<ReservationStore> | 预订存储 (权威) |
/// | users | Arc<UserStore> | 用户存储 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 桌台可用性服务
    pub tables: Arc<TableRegistry>,
    /// 预订存储
    pub reservations: Arc<ReservationStore>,
    /// 用户存储
    pub users: Arc<UserStore>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config.environment)
            .field("tables", &"<TableRegistry>")
            .field("reservations", &"<ReservationStore>")
            .field("users", &"<UserStore>")
            .finish()
    }
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 桌台注册表 (默认平面图)
    /// 2. 预订存储 (绑定桌台注册表)
    /// 3. 用户存储 (种子管理员)
    /// 4. JWT 服务
    pub fn initialize(config: &Config) -> Self {
        let tables = Arc::new(TableRegistry::with_default_floor_plan());
        let reservations = Arc::new(ReservationStore::new(tables.clone()));

        let users = Arc::new(UserStore::new());
        if let Err(e) = users.seed_admin(&config.admin_email, &config.admin_password) {
            // 种子管理员失败说明密码哈希不可用，服务无法正常工作
            panic!("Failed to seed admin user: {}", e);
        }

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        tracing::info!(
            tables = tables.get_all().len(),
            admin = %config.admin_email,
            "Server state initialized"
        );

        Self {
            config: config.clone(),
            tables,
            reservations,
            users,
            jwt_service,
        }
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
