//! User Store
//!
//! 内存用户集合，argon2 密码哈希。
//! 登录失败统一返回 "Invalid email or password"，防止邮箱枚举。

use chrono::Utc;
use parking_lot::RwLock;
use shared::{RegisterRequest, User, UserRole};

use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// 用户记录 (内部形态，携带密码哈希)
#[derive(Debug, Clone)]
struct UserRecord {
    user: User,
    password_hash: String,
}

/// 用户存储
pub struct UserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    /// 种子管理员账号
    ///
    /// 幂等：邮箱已存在时不做任何事。
    pub fn seed_admin(&self, email: &str, password: &str) -> AppResult<()> {
        let mut users = self.users.write();
        if users
            .iter()
            .any(|r| r.user.email.eq_ignore_ascii_case(email))
        {
            return Ok(());
        }

        let password_hash = hash_password(password)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

        users.push(UserRecord {
            user: User {
                id: uuid::Uuid::new_v4().to_string(),
                email: email.to_string(),
                name: "Administrator".to_string(),
                phone: String::new(),
                role: UserRole::Admin,
                created_at: Utc::now(),
            },
            password_hash,
        });

        Ok(())
    }

    /// 注册新用户
    ///
    /// 邮箱唯一 (不区分大小写)，重复返回 Conflict。
    pub fn register(&self, req: &RegisterRequest) -> AppResult<User> {
        validate_required_text(&req.email, "email", MAX_NAME_LEN)?;
        validate_email(&req.email, "email")?;
        validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
        if req.password.chars().count() < MIN_PASSWORD_LEN || req.password.len() > MAX_PASSWORD_LEN
        {
            return Err(AppError::validation(format!(
                "password must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"
            )));
        }

        let mut users = self.users.write();
        if users
            .iter()
            .any(|r| r.user.email.eq_ignore_ascii_case(&req.email))
        {
            return Err(AppError::conflict(format!(
                "Email {} is already registered",
                req.email
            )));
        }

        let password_hash = hash_password(&req.password)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: req.email.clone(),
            name: req.name.clone(),
            phone: req.phone.clone(),
            role: UserRole::User,
            created_at: Utc::now(),
        };

        users.push(UserRecord {
            user: user.clone(),
            password_hash,
        });

        Ok(user)
    }

    /// 校验登录凭证
    ///
    /// 未知邮箱与错误密码返回同一错误。
    pub fn verify_login(&self, email: &str, password: &str) -> AppResult<User> {
        let users = self.users.read();
        let record = users
            .iter()
            .find(|r| r.user.email.eq_ignore_ascii_case(email))
            .ok_or_else(AppError::invalid_credentials)?;

        let valid = verify_password(&record.password_hash, password)
            .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::invalid_credentials());
        }

        Ok(record.user.clone())
    }

    /// 按 ID 查找用户
    pub fn get(&self, id: &str) -> Option<User> {
        self.users
            .read()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone())
    }

    /// 按邮箱查找用户
    pub fn get_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .iter()
            .find(|r| r.user.email.eq_ignore_ascii_case(email))
            .map(|r| r.user.clone())
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash password using argon2
fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify password using argon2
fn verify_password(hash: &str, password: &str) -> Result<bool, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "secret123".to_string(),
            name: "Test User".to_string(),
            phone: "+380 67 987 6543".to_string(),
        }
    }

    #[test]
    fn register_then_login_round_trip() {
        let store = UserStore::new();
        let user = store.register(&register_request("user@example.com")).unwrap();
        assert_eq!(user.role, UserRole::User);

        let logged_in = store.verify_login("user@example.com", "secret123").unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn duplicate_email_conflicts_case_insensitively() {
        let store = UserStore::new();
        store.register(&register_request("user@example.com")).unwrap();
        let err = store
            .register(&register_request("USER@example.com"))
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn wrong_password_and_unknown_email_share_one_error() {
        let store = UserStore::new();
        store.register(&register_request("user@example.com")).unwrap();

        let bad_password = store
            .verify_login("user@example.com", "wrong")
            .unwrap_err()
            .to_string();
        let unknown_email = store
            .verify_login("ghost@example.com", "secret123")
            .unwrap_err()
            .to_string();
        assert_eq!(bad_password, unknown_email);
    }

    #[test]
    fn seeded_admin_is_idempotent() {
        let store = UserStore::new();
        store.seed_admin("admin@restaurant.com", "admin123").unwrap();
        store.seed_admin("admin@restaurant.com", "other-pass").unwrap();

        let admin = store.get_by_email("admin@restaurant.com").unwrap();
        assert!(admin.role.is_admin());
        // First seed wins
        assert!(store.verify_login("admin@restaurant.com", "admin123").is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let store = UserStore::new();
        let mut req = register_request("user@example.com");
        req.password = "abc".to_string();
        assert!(matches!(
            store.register(&req).unwrap_err(),
            AppError::Validation(_)
        ));
    }
}
