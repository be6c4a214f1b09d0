use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8081 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | ADMIN_EMAIL | admin@restaurant.com | 种子管理员邮箱 |
/// | ADMIN_PASSWORD | admin123 (仅开发环境) | 种子管理员密码 |
/// | LOG_DIR | (无) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 ADMIN_PASSWORD=secret cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 种子管理员邮箱
    pub admin_email: String,
    /// 种子管理员密码
    pub admin_password: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let admin_password = match std::env::var("ADMIN_PASSWORD") {
            Ok(p) => p,
            Err(_) => {
                if environment == "production" {
                    panic!("ADMIN_PASSWORD must be set in production!");
                }
                tracing::warn!("ADMIN_PASSWORD not set, using development default");
                "admin123".into()
            }
        };

        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8081),
            jwt: JwtConfig::default(),
            environment,
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@restaurant.com".into()),
            admin_password,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(http_port: u16, admin_password: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.http_port = http_port;
        config.admin_password = admin_password.into();
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
