//! 后端 API 客户端
//!
//! 携带令牌的显式客户端：登录后构造一次，经 Context 传给各视图，
//! 不存在进程级的默认请求头。传输层抽象成 [`Transport`]，
//! 生产环境走 gloo-net fetch，测试里换成记录请求的 Mock。

use std::collections::HashMap;

use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use enginerent_shared::{
    API_PREFIX, CheckoutRequest, CheckoutSession, CompleteMaintenanceRequest, CreateUserRequest,
    DashboardStats, Engine, EnginePayload, FaqEntry, FaqPayload, Feedback, LoginRequest,
    MaintenancePayload, MaintenanceStatus, MaintenanceTask, Payment, RegisterRequest, Reservation,
    ReservationPayload, SupportTicket, TicketPayload, TicketStatus, TokenResponse, User,
};

// =========================================================
// 配置 (Configuration)
// =========================================================

/// 默认后端地址，构建时可用 ENGINERENT_BACKEND_URL 覆盖
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// 解析本次构建使用的后端地址
pub fn backend_url() -> String {
    option_env!("ENGINERENT_BACKEND_URL")
        .unwrap_or(DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

// =========================================================
// 传输抽象层 (Transport Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// 通用 HTTP 请求结构
#[derive(Debug)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

/// 通用 HTTP 响应结构，body 保持字节以支持二进制下载
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, String> {
        serde_json::from_slice(&self.body).map_err(|e| e.to_string())
    }

    /// 从失败响应中提取用户可读的错误信息
    ///
    /// 后端统一用 `{"detail": "..."}` 携带错误说明；
    /// 解析不出来时退回状态码。
    pub fn error_detail(&self) -> String {
        self.json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("detail")?.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("Request failed with status {}", self.status))
    }
}

/// 传输层特性 (Trait)
/// 使用 async_trait 以支持异步调用，(?Send) 是因为浏览器环境下的类型不是 Send 的
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, String>;
}

/// 生产实现：浏览器 fetch (gloo-net)
#[derive(Clone, Debug, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, String> {
        let mut builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };

        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(|e| e.to_string())?,
            None => builder.build().map_err(|e| e.to_string())?,
        };

        let res = request.send().await.map_err(|e| e.to_string())?;
        let status = res.status();
        let body = res.binary().await.map_err(|e| e.to_string())?;

        Ok(HttpResponse { status, body })
    }
}

// =========================================================
// 设备筛选 (Engine Filter)
// =========================================================

/// 设备列表的查询参数，空字段不参与编码
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineFilter {
    pub search: String,
    pub category: String,
    pub brand: String,
    pub status: String,
    pub location: String,
}

impl EngineFilter {
    /// 只取可出租设备，预约对话框使用
    pub fn available_only() -> Self {
        Self {
            status: "available".to_string(),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> String {
        let fields = [
            ("search", &self.search),
            ("category", &self.category),
            ("brand", &self.brand),
            ("status", &self.status),
            ("location", &self.location),
        ];

        let pairs: Vec<String> = fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect();

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

// =========================================================
// API 客户端 (Client)
// =========================================================

/// 携带令牌的后端客户端
///
/// 未登录阶段不带令牌（login/register），登录成功后用
/// [`ApiClient::with_token`] 重建并放进认证上下文。
#[derive(Clone, Debug)]
pub struct ApiClient<T: Transport = FetchTransport> {
    base_url: String,
    token: Option<String>,
    transport: T,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, FetchTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            transport,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}{}", self.base_url, API_PREFIX, path)
        } else {
            format!("{}{}/{}", self.base_url, API_PREFIX, path)
        }
    }

    /// 附加认证头、发送并检查状态码
    async fn dispatch(&self, mut req: HttpRequest) -> Result<HttpResponse, String> {
        if let Some(token) = &self.token {
            req = req.with_header("Authorization", &format!("Bearer {token}"));
        }

        let res = self.transport.send(req).await?;
        if res.is_ok() {
            Ok(res)
        } else {
            Err(res.error_detail())
        }
    }

    fn json_body<B: serde::Serialize>(payload: &B) -> Result<serde_json::Value, String> {
        serde_json::to_value(payload).map_err(|e| e.to_string())
    }

    // =========================================================
    // 认证 (Auth)
    // =========================================================

    /// 提交凭据换取令牌
    pub async fn login(&self, payload: &LoginRequest) -> Result<TokenResponse, String> {
        let req = HttpRequest::new(&self.url("/auth/login"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    /// 注册新账户，成功与否都不建立会话
    pub async fn register(&self, payload: &RegisterRequest) -> Result<(), String> {
        let req = HttpRequest::new(&self.url("/auth/register"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await.map(|_| ())
    }

    /// 解析当前令牌对应的账户
    pub async fn current_user(&self) -> Result<User, String> {
        let req = HttpRequest::new(&self.url("/auth/me"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    // =========================================================
    // 设备 (Engines)
    // =========================================================

    pub async fn list_engines(&self, filter: &EngineFilter) -> Result<Vec<Engine>, String> {
        let path = format!("/engines{}", filter.to_query());
        let req = HttpRequest::new(&self.url(&path), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    pub async fn create_engine(&self, payload: &EnginePayload) -> Result<Engine, String> {
        let req = HttpRequest::new(&self.url("/engines"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn update_engine(&self, id: i64, payload: &EnginePayload) -> Result<Engine, String> {
        let req = HttpRequest::new(&self.url(&format!("/engines/{id}")), HttpMethod::Put)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn delete_engine(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(&self.url(&format!("/engines/{id}")), HttpMethod::Delete);
        self.dispatch(req).await.map(|_| ())
    }

    // =========================================================
    // 预约 (Reservations)
    // =========================================================

    /// 管理员拿到全部预约，普通用户拿到自己的
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, String> {
        let req = HttpRequest::new(&self.url("/reservations"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    pub async fn create_reservation(
        &self,
        payload: &ReservationPayload,
    ) -> Result<Reservation, String> {
        let req = HttpRequest::new(&self.url("/reservations"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn approve_reservation(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(
            &self.url(&format!("/reservations/{id}/approve")),
            HttpMethod::Put,
        );
        self.dispatch(req).await.map(|_| ())
    }

    pub async fn reject_reservation(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(
            &self.url(&format!("/reservations/{id}/reject")),
            HttpMethod::Put,
        );
        self.dispatch(req).await.map(|_| ())
    }

    // =========================================================
    // 维护 (Maintenance)
    // =========================================================

    pub async fn list_maintenance(&self) -> Result<Vec<MaintenanceTask>, String> {
        let req = HttpRequest::new(&self.url("/maintenance"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    pub async fn create_maintenance(
        &self,
        payload: &MaintenancePayload,
    ) -> Result<MaintenanceTask, String> {
        let req = HttpRequest::new(&self.url("/maintenance"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn update_maintenance(
        &self,
        id: i64,
        payload: &MaintenancePayload,
    ) -> Result<MaintenanceTask, String> {
        let req = HttpRequest::new(&self.url(&format!("/maintenance/{id}")), HttpMethod::Put)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn delete_maintenance(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(&self.url(&format!("/maintenance/{id}")), HttpMethod::Delete);
        self.dispatch(req).await.map(|_| ())
    }

    /// 管理员直接推进任务状态
    pub async fn set_maintenance_status(
        &self,
        id: i64,
        status: MaintenanceStatus,
    ) -> Result<(), String> {
        let path = format!("/maintenance/{id}/status?status={}", status.as_str());
        let req = HttpRequest::new(&self.url(&path), HttpMethod::Put);
        self.dispatch(req).await.map(|_| ())
    }

    /// 技师完成任务并附工作记录
    pub async fn complete_maintenance(&self, id: i64, notes: &str) -> Result<(), String> {
        let payload = CompleteMaintenanceRequest {
            notes: notes.to_string(),
        };
        let req = HttpRequest::new(
            &self.url(&format!("/maintenance/{id}/complete")),
            HttpMethod::Put,
        )
        .with_body(Self::json_body(&payload)?);
        self.dispatch(req).await.map(|_| ())
    }

    // =========================================================
    // 支持工单 (Support)
    // =========================================================

    /// 管理员拿到全部工单，普通用户拿到自己的
    pub async fn list_tickets(&self) -> Result<Vec<SupportTicket>, String> {
        let req = HttpRequest::new(&self.url("/support"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    pub async fn create_ticket(&self, payload: &TicketPayload) -> Result<SupportTicket, String> {
        let req = HttpRequest::new(&self.url("/support"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn set_ticket_status(&self, id: i64, status: TicketStatus) -> Result<(), String> {
        let path = format!("/support/{id}/status?status={}", status.as_str());
        let req = HttpRequest::new(&self.url(&path), HttpMethod::Put);
        self.dispatch(req).await.map(|_| ())
    }

    // =========================================================
    // 支付 (Payments)
    // =========================================================

    pub async fn list_payments(&self) -> Result<Vec<Payment>, String> {
        let req = HttpRequest::new(&self.url("/payments"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    /// 请求托管收银台地址，拿到后整页跳转
    pub async fn create_checkout_session(
        &self,
        reservation_id: i64,
    ) -> Result<CheckoutSession, String> {
        let payload = CheckoutRequest { reservation_id };
        let req = HttpRequest::new(
            &self.url("/payments/create-checkout-session"),
            HttpMethod::Post,
        )
        .with_body(Self::json_body(&payload)?);
        self.dispatch(req).await?.json()
    }

    /// 下载发票 PDF 的原始字节
    pub async fn download_invoice(&self, id: i64) -> Result<Vec<u8>, String> {
        let req = HttpRequest::new(&self.url(&format!("/payments/{id}/invoice")), HttpMethod::Get);
        Ok(self.dispatch(req).await?.body)
    }

    // =========================================================
    // FAQ
    // =========================================================

    pub async fn list_faq(&self) -> Result<Vec<FaqEntry>, String> {
        let req = HttpRequest::new(&self.url("/faq"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    pub async fn create_faq(&self, payload: &FaqPayload) -> Result<FaqEntry, String> {
        let req = HttpRequest::new(&self.url("/faq"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn update_faq(&self, id: i64, payload: &FaqPayload) -> Result<FaqEntry, String> {
        let req = HttpRequest::new(&self.url(&format!("/faq/{id}")), HttpMethod::Put)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn delete_faq(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(&self.url(&format!("/faq/{id}")), HttpMethod::Delete);
        self.dispatch(req).await.map(|_| ())
    }

    // =========================================================
    // 账户管理 (Admin Users)
    // =========================================================

    pub async fn list_users(&self) -> Result<Vec<User>, String> {
        let req = HttpRequest::new(&self.url("/admin/users"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    pub async fn create_user(&self, payload: &CreateUserRequest) -> Result<User, String> {
        let req = HttpRequest::new(&self.url("/admin/users"), HttpMethod::Post)
            .with_body(Self::json_body(payload)?);
        self.dispatch(req).await?.json()
    }

    pub async fn toggle_user_verify(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(
            &self.url(&format!("/admin/users/{id}/toggle-verify")),
            HttpMethod::Put,
        );
        self.dispatch(req).await.map(|_| ())
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(&self.url(&format!("/admin/users/{id}")), HttpMethod::Delete);
        self.dispatch(req).await.map(|_| ())
    }

    // =========================================================
    // 反馈与统计 (Feedbacks / Dashboard)
    // =========================================================

    pub async fn list_feedbacks(&self) -> Result<Vec<Feedback>, String> {
        let req = HttpRequest::new(&self.url("/feedbacks"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }

    pub async fn delete_feedback(&self, id: i64) -> Result<(), String> {
        let req = HttpRequest::new(&self.url(&format!("/feedbacks/{id}")), HttpMethod::Delete);
        self.dispatch(req).await.map(|_| ())
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, String> {
        let req = HttpRequest::new(&self.url("/dashboard/stats"), HttpMethod::Get);
        self.dispatch(req).await?.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// 记录请求并按队列回放响应的 Mock 传输层
    struct MockTransport {
        requests: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<HttpResponse>>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                requests: RefCell::new(Vec::new()),
                responses: RefCell::new(VecDeque::new()),
            }
        }

        fn push_response(&self, status: u16, body: &str) {
            self.responses.borrow_mut().push_back(HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            });
        }

        fn push_binary_response(&self, status: u16, body: Vec<u8>) {
            self.responses
                .borrow_mut()
                .push_back(HttpResponse { status, body });
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(&self, req: HttpRequest) -> Result<HttpResponse, String> {
            self.requests.borrow_mut().push(req);
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| "MockTransport: no response queued".to_string())
        }
    }

    fn client() -> ApiClient<MockTransport> {
        ApiClient::with_transport("http://backend.test", MockTransport::new())
    }

    #[tokio::test]
    async fn login_posts_credentials_without_auth_header() {
        let api = client();
        api.transport
            .push_response(200, r#"{"access_token": "tok_1", "token_type": "bearer"}"#);

        let payload = LoginRequest {
            email: "admin@enginerent.com".to_string(),
            password: "admin123".to_string(),
        };
        let token = api.login(&payload).await.unwrap();
        assert_eq!(token.access_token, "tok_1");

        let requests = api.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://backend.test/api/auth/login");
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert!(!requests[0].headers.contains_key("Authorization"));
        assert!(requests[0].body.as_deref().unwrap().contains("admin@enginerent.com"));
    }

    #[tokio::test]
    async fn bearer_header_attached_when_token_present() {
        let api = client().with_token("tok_abc");
        api.transport.push_response(200, "[]");

        api.list_engines(&EngineFilter::default()).await.unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer tok_abc")
        );
        // 无筛选时不携带查询串
        assert_eq!(requests[0].url, "http://backend.test/api/engines");
    }

    #[tokio::test]
    async fn engine_filter_encodes_query_parameters() {
        let filter = EngineFilter {
            search: "cat 320".to_string(),
            category: "excavator".to_string(),
            ..EngineFilter::default()
        };
        assert_eq!(filter.to_query(), "?search=cat%20320&category=excavator");

        let api = client().with_token("t");
        api.transport.push_response(200, "[]");
        api.list_engines(&filter).await.unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(
            requests[0].url,
            "http://backend.test/api/engines?search=cat%20320&category=excavator"
        );
    }

    #[tokio::test]
    async fn server_detail_message_surfaces_in_error() {
        let api = client();
        api.transport
            .push_response(401, r#"{"detail": "Invalid credentials"}"#);

        let payload = LoginRequest {
            email: "x@y.z".to_string(),
            password: "nope".to_string(),
        };
        let err = api.login(&payload).await.unwrap_err();
        assert_eq!(err, "Invalid credentials");
    }

    #[tokio::test]
    async fn non_json_error_body_falls_back_to_status() {
        let api = client().with_token("t");
        api.transport.push_response(500, "upstream exploded");

        let err = api.list_reservations().await.unwrap_err();
        assert_eq!(err, "Request failed with status 500");
    }

    #[tokio::test]
    async fn reservation_actions_hit_documented_subroutes() {
        let api = client().with_token("t");
        api.transport.push_response(200, "{}");
        api.transport.push_response(200, "{}");

        api.approve_reservation(9).await.unwrap();
        api.reject_reservation(11).await.unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(requests[0].url, "http://backend.test/api/reservations/9/approve");
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[1].url, "http://backend.test/api/reservations/11/reject");
    }

    #[tokio::test]
    async fn complete_maintenance_sends_notes_payload() {
        let api = client().with_token("t");
        api.transport.push_response(200, "{}");

        api.complete_maintenance(3, "Replaced filter").await.unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(
            requests[0].url,
            "http://backend.test/api/maintenance/3/complete"
        );
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["notes"], "Replaced filter");
    }

    #[tokio::test]
    async fn status_transitions_use_query_parameter() {
        let api = client().with_token("t");
        api.transport.push_response(200, "{}");
        api.transport.push_response(200, "{}");

        api.set_ticket_status(5, TicketStatus::Resolved).await.unwrap();
        api.set_maintenance_status(8, MaintenanceStatus::InProgress)
            .await
            .unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(
            requests[0].url,
            "http://backend.test/api/support/5/status?status=resolved"
        );
        assert_eq!(
            requests[1].url,
            "http://backend.test/api/maintenance/8/status?status=in_progress"
        );
    }

    #[tokio::test]
    async fn invoice_download_returns_raw_bytes() {
        let api = client().with_token("t");
        api.transport
            .push_binary_response(200, b"%PDF-1.7 fake".to_vec());

        let bytes = api.download_invoice(4).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.7 fake");

        let requests = api.transport.requests.borrow();
        assert_eq!(requests[0].url, "http://backend.test/api/payments/4/invoice");
        assert_eq!(requests[0].method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn toggle_verify_targets_admin_subroute() {
        let api = client().with_token("t");
        api.transport.push_response(200, "{}");

        api.toggle_user_verify(2).await.unwrap();

        let requests = api.transport.requests.borrow();
        assert_eq!(
            requests[0].url,
            "http://backend.test/api/admin/users/2/toggle-verify"
        );
        assert_eq!(requests[0].method, HttpMethod::Put);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::with_transport("http://backend.test/", MockTransport::new());
        assert_eq!(api.url("/engines"), "http://backend.test/api/engines");
        assert_eq!(api.url("engines"), "http://backend.test/api/engines");
    }
}
