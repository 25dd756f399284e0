//! 请求载荷 (Request Payloads)
//!
//! 客户端发往后端的表单载荷。编辑与新建共用同一载荷类型，
//! 由 HTTP 方法区分语义 (POST 新建 / PUT 覆盖更新)。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EngineStatus, Role};

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/login` 的返回体
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// 注册成功后不建立会话，用户仍需登录
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// =========================================================
// 资源载荷 (Resource Payloads)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EnginePayload {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub brand: String,
    pub daily_rate: f64,
    pub status: EngineStatus,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub specifications: serde_json::Map<String, serde_json::Value>,
}

/// 预约载荷：总价由服务端按日单价与天数计算，客户端不传
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReservationPayload {
    pub engine_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MaintenancePayload {
    pub engine_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub scheduled_date: DateTime<Utc>,
    pub technician_id: Option<i64>,
}

/// 技师完成任务时附带的工作记录
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompleteMaintenanceRequest {
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TicketPayload {
    pub subject: String,
    pub message: String,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FaqPayload {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub position: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
}

// =========================================================
// 支付 (Payments)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckoutRequest {
    pub reservation_id: i64,
}

/// 服务端返回的托管收银台地址，客户端整页跳转
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckoutSession {
    pub checkout_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_payload_serializes_type_field() {
        let payload = MaintenancePayload {
            engine_id: 7,
            kind: "corrective".to_string(),
            description: "Hydraulic leak".to_string(),
            scheduled_date: "2024-05-01T00:00:00Z".parse().unwrap(),
            technician_id: Some(2),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "corrective");
        assert_eq!(value["engine_id"], 7);
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn engine_payload_wire_shape() {
        let payload = EnginePayload {
            name: "CAT 320".to_string(),
            description: None,
            category: "excavator".to_string(),
            brand: "Caterpillar".to_string(),
            daily_rate: 450.0,
            status: EngineStatus::Available,
            location: Some("Lyon".to_string()),
            images: vec![],
            specifications: serde_json::Map::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["status"], "available");
        assert_eq!(value["daily_rate"], 450.0);
        assert!(value["description"].is_null());
    }

    #[test]
    fn checkout_session_parses_redirect_url() {
        let session: CheckoutSession =
            serde_json::from_str(r#"{"checkout_url": "https://pay.example/cs_123"}"#).unwrap();
        assert_eq!(session.checkout_url, "https://pay.example/cs_123");
    }
}
