//! 统一客户端实现
//!
//! [`Client`] trait 定义完整的 API 面；[`NetworkClient`] 走网络，
//! [`InProcessClient`] 直接驱动 axum Router (零网络开销)。
//! 两个适配器共享同一套状态码→错误映射。

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{
    ErrorBody, LoginRequest, LoginResponse, MonthlyStats, MonthlySummary, RegisterRequest,
    Reservation, ReservationCreate, ReservationStatus, ReservationStatusUpdate,
    ReservationUpdate, Table, TableAvailabilityUpdate, User,
};

use crate::{ClientConfig, ClientError, ClientResult};

/// 预订列表查询参数
///
/// 缺省字段不出现在查询串中；服务端将其视为 "不过滤"。
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReservationListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ReservationListParams {
    fn to_path(&self, base: &str) -> ClientResult<String> {
        let query = serde_urlencoded::to_string(self)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        if query.is_empty() {
            Ok(base.to_string())
        } else {
            Ok(format!("{}?{}", base, query))
        }
    }
}

// ============================================================================
// Client Trait
// ============================================================================

/// 统一客户端接口
#[async_trait]
pub trait Client: Send + Sync {
    // ----- Auth -----

    /// 注册并自动登录
    async fn register(&mut self, req: &RegisterRequest) -> ClientResult<LoginResponse>;

    /// 登录
    async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse>;

    /// 获取当前用户信息
    async fn me(&self) -> ClientResult<User>;

    /// 登出 (丢弃本地令牌)
    async fn logout(&mut self) -> ClientResult<()>;

    /// 获取当前 token
    fn token(&self) -> Option<&str>;

    // ----- Reservations -----

    /// 过滤后的可见预订列表
    async fn reservations(
        &self,
        params: &ReservationListParams,
    ) -> ClientResult<Vec<Reservation>>;

    /// 单个预订
    async fn reservation(&self, id: &str) -> ClientResult<Reservation>;

    /// 指定用户的预订
    async fn user_reservations(&self, user_id: &str) -> ClientResult<Vec<Reservation>>;

    /// 创建预订
    async fn create_reservation(&self, draft: &ReservationCreate) -> ClientResult<Reservation>;

    /// 修改预订
    async fn update_reservation(
        &self,
        id: &str,
        patch: &ReservationUpdate,
    ) -> ClientResult<Reservation>;

    /// 状态流转
    async fn set_reservation_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> ClientResult<Reservation>;

    /// 永久删除预订 (管理员)
    async fn delete_reservation(&self, id: &str) -> ClientResult<bool>;

    // ----- Tables -----

    /// 所有桌台
    async fn tables(&self) -> ClientResult<Vec<Table>>;

    /// 当前可用桌台
    async fn available_tables(&self) -> ClientResult<Vec<Table>>;

    /// 设置桌台可用性 (管理员)
    async fn set_table_availability(
        &self,
        number: &str,
        is_available: bool,
    ) -> ClientResult<Table>;

    // ----- Reports -----

    /// 全部月份汇总 (管理员)
    async fn monthly_reports(&self) -> ClientResult<Vec<MonthlySummary>>;

    /// 单月完整统计 (管理员)
    async fn monthly_report(&self, month: &str) -> ClientResult<MonthlyStats>;
}

/// 状态码 + 错误响应体 → 客户端错误
///
/// 服务端错误体为 `{ code, message }`；解析失败时退回原始文本。
fn error_from_parts(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string());

    tracing::debug!(status = %status, message = %message, "API request failed");

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Rule(message),
        StatusCode::BAD_REQUEST => ClientError::Validation(message),
        _ => ClientError::Internal(message),
    }
}

// ============================================================================
// ChicoClient Factory
// ============================================================================

/// 客户端工厂
pub struct ChicoClient;

impl ChicoClient {
    /// 创建网络客户端
    pub fn network(base_url: &str) -> NetworkClient {
        NetworkClient::new(&ClientConfig::new(base_url))
    }

    /// 按配置创建网络客户端
    pub fn with_config(config: &ClientConfig) -> NetworkClient {
        NetworkClient::new(config)
    }

    /// 创建同进程客户端 (需要传入 Router)
    #[cfg(feature = "in-process")]
    pub fn in_process(router: axum::Router) -> InProcessClient {
        InProcessClient::new(router)
    }
}

// ============================================================================
// NetworkClient - HTTP 网络客户端
// ============================================================================

/// 网络客户端 (HTTP)
#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkClient {
    /// 创建新的网络客户端
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// 设置 token (恢复已持久化的会话)
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.post(&url);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.patch(&url).json(body);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.delete(&url);

        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let resp = req.send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(error_from_parts(status, &text));
        }

        resp.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl Client for NetworkClient {
    async fn register(&mut self, req: &RegisterRequest) -> ClientResult<LoginResponse> {
        let resp: LoginResponse = self.post("/api/auth/register", req).await?;
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let resp: LoginResponse = self.post("/api/auth/login", &req).await?;
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    async fn me(&self) -> ClientResult<User> {
        self.get("/api/auth/me").await
    }

    async fn logout(&mut self) -> ClientResult<()> {
        let _: () = self.post_empty("/api/auth/logout").await?;
        self.token = None;
        Ok(())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn reservations(
        &self,
        params: &ReservationListParams,
    ) -> ClientResult<Vec<Reservation>> {
        self.get(&params.to_path("/api/reservations")?).await
    }

    async fn reservation(&self, id: &str) -> ClientResult<Reservation> {
        self.get(&format!("/api/reservations/{}", id)).await
    }

    async fn user_reservations(&self, user_id: &str) -> ClientResult<Vec<Reservation>> {
        self.get(&format!("/api/reservations/user/{}", user_id)).await
    }

    async fn create_reservation(&self, draft: &ReservationCreate) -> ClientResult<Reservation> {
        self.post("/api/reservations", draft).await
    }

    async fn update_reservation(
        &self,
        id: &str,
        patch: &ReservationUpdate,
    ) -> ClientResult<Reservation> {
        self.patch(&format!("/api/reservations/{}", id), patch).await
    }

    async fn set_reservation_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> ClientResult<Reservation> {
        self.patch(
            &format!("/api/reservations/{}/status", id),
            &ReservationStatusUpdate { status },
        )
        .await
    }

    async fn delete_reservation(&self, id: &str) -> ClientResult<bool> {
        self.delete(&format!("/api/reservations/{}", id)).await
    }

    async fn tables(&self) -> ClientResult<Vec<Table>> {
        self.get("/api/tables").await
    }

    async fn available_tables(&self) -> ClientResult<Vec<Table>> {
        self.get("/api/tables/available").await
    }

    async fn set_table_availability(
        &self,
        number: &str,
        is_available: bool,
    ) -> ClientResult<Table> {
        self.patch(
            &format!("/api/tables/{}/availability", number),
            &TableAvailabilityUpdate { is_available },
        )
        .await
    }

    async fn monthly_reports(&self) -> ClientResult<Vec<MonthlySummary>> {
        self.get("/api/reports/monthly").await
    }

    async fn monthly_report(&self, month: &str) -> ClientResult<MonthlyStats> {
        self.get(&format!("/api/reports/monthly/{}", month)).await
    }
}

// ============================================================================
// InProcessClient - 同进程客户端 (tower oneshot)
// ============================================================================

/// 同进程客户端 (直接调用 Router，零网络开销)
#[cfg(feature = "in-process")]
#[derive(Clone)]
pub struct InProcessClient {
    router: axum::Router,
    token: Option<String>,
}

#[cfg(feature = "in-process")]
impl InProcessClient {
    /// 创建同进程客户端
    pub fn new(router: axum::Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    /// 设置 token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: http::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<T> {
        use axum::body::Body;
        use tower::ServiceExt;

        let mut builder = http::Request::builder().method(method).uri(path);

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }

        let req = builder
            .body(Body::from(body.unwrap_or_default()))
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
            .await
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).to_string();
            return Err(error_from_parts(status, &text));
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(http::Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_vec(body)?;
        self.request(http::Method::POST, path, Some(body)).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_vec(body)?;
        self.request(http::Method::PATCH, path, Some(body)).await
    }
}

#[cfg(feature = "in-process")]
#[async_trait]
impl Client for InProcessClient {
    async fn register(&mut self, req: &RegisterRequest) -> ClientResult<LoginResponse> {
        let resp: LoginResponse = self.post("/api/auth/register", req).await?;
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let resp: LoginResponse = self.post("/api/auth/login", &req).await?;
        self.token = Some(resp.token.clone());
        Ok(resp)
    }

    async fn me(&self) -> ClientResult<User> {
        self.get("/api/auth/me").await
    }

    async fn logout(&mut self) -> ClientResult<()> {
        let _: () = self
            .request(http::Method::POST, "/api/auth/logout", None)
            .await?;
        self.token = None;
        Ok(())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    async fn reservations(
        &self,
        params: &ReservationListParams,
    ) -> ClientResult<Vec<Reservation>> {
        self.get(&params.to_path("/api/reservations")?).await
    }

    async fn reservation(&self, id: &str) -> ClientResult<Reservation> {
        self.get(&format!("/api/reservations/{}", id)).await
    }

    async fn user_reservations(&self, user_id: &str) -> ClientResult<Vec<Reservation>> {
        self.get(&format!("/api/reservations/user/{}", user_id)).await
    }

    async fn create_reservation(&self, draft: &ReservationCreate) -> ClientResult<Reservation> {
        self.post("/api/reservations", draft).await
    }

    async fn update_reservation(
        &self,
        id: &str,
        patch: &ReservationUpdate,
    ) -> ClientResult<Reservation> {
        self.patch(&format!("/api/reservations/{}", id), patch).await
    }

    async fn set_reservation_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> ClientResult<Reservation> {
        self.patch(
            &format!("/api/reservations/{}/status", id),
            &ReservationStatusUpdate { status },
        )
        .await
    }

    async fn delete_reservation(&self, id: &str) -> ClientResult<bool> {
        self.request(
            http::Method::DELETE,
            &format!("/api/reservations/{}", id),
            None,
        )
        .await
    }

    async fn tables(&self) -> ClientResult<Vec<Table>> {
        self.get("/api/tables").await
    }

    async fn available_tables(&self) -> ClientResult<Vec<Table>> {
        self.get("/api/tables/available").await
    }

    async fn set_table_availability(
        &self,
        number: &str,
        is_available: bool,
    ) -> ClientResult<Table> {
        self.patch(
            &format!("/api/tables/{}/availability", number),
            &TableAvailabilityUpdate { is_available },
        )
        .await
    }

    async fn monthly_reports(&self) -> ClientResult<Vec<MonthlySummary>> {
        self.get("/api/reports/monthly").await
    }

    async fn monthly_report(&self, month: &str) -> ClientResult<MonthlyStats> {
        self.get(&format!("/api/reports/monthly/{}", month)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_build_query_strings() {
        let empty = ReservationListParams::default();
        assert_eq!(empty.to_path("/api/reservations").unwrap(), "/api/reservations");

        let full = ReservationListParams {
            status: Some(ReservationStatus::Confirmed),
            date: Some("2025-10-04".to_string()),
            search: Some("olena".to_string()),
        };
        assert_eq!(
            full.to_path("/api/reservations").unwrap(),
            "/api/reservations?status=confirmed&date=2025-10-04&search=olena"
        );
    }

    #[test]
    fn search_terms_are_url_encoded() {
        let params = ReservationListParams {
            search: Some("Olena K".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.to_path("/api/reservations").unwrap(),
            "/api/reservations?search=Olena+K"
        );
    }

    #[test]
    fn error_mapping_follows_status_codes() {
        let body = r#"{"code":"E0004","message":"Table 5 is not available"}"#;
        assert!(matches!(
            error_from_parts(StatusCode::CONFLICT, body),
            ClientError::Conflict(msg) if msg == "Table 5 is not available"
        ));
        assert!(matches!(
            error_from_parts(StatusCode::UNAUTHORIZED, "{}"),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            error_from_parts(StatusCode::UNPROCESSABLE_ENTITY, "plain text"),
            ClientError::Rule(msg) if msg == "plain text"
        ));
    }
}
