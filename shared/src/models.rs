//! 服务端领域模型 (Server-owned Records)
//!
//! 客户端只持有这些记录的临时副本，展示后即弃。
//! 所有派生业务状态（预约总价、可用性、统计计数）一律由服务端计算，
//! 客户端在每次变更成功后重新拉取。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

// =========================================================
// 状态枚举 (Status Enums)
// =========================================================

/// 设备状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    Available,
    Rented,
    Maintenance,
}

impl Default for EngineStatus {
    fn default() -> Self {
        EngineStatus::Available
    }
}

impl EngineStatus {
    pub const ALL: [EngineStatus; 3] = [
        EngineStatus::Available,
        EngineStatus::Rented,
        EngineStatus::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EngineStatus::Available => "available",
            EngineStatus::Rented => "rented",
            EngineStatus::Maintenance => "maintenance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngineStatus::Available => "Available",
            EngineStatus::Rented => "Rented",
            EngineStatus::Maintenance => "In maintenance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(EngineStatus::Available),
            "rented" => Some(EngineStatus::Rented),
            "maintenance" => Some(EngineStatus::Maintenance),
            _ => None,
        }
    }
}

/// 预约状态，由管理员推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
            ReservationStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReservationStatus::Pending => "Pending",
            ReservationStatus::Approved => "Approved",
            ReservationStatus::Rejected => "Rejected",
            ReservationStatus::Completed => "Completed",
        }
    }
}

/// 维护任务状态
///
/// 技师完成任务即进入 `Validated`；`scheduled` 是技师工作台唯一可操作的状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Validated,
    Cancelled,
}

impl MaintenanceStatus {
    pub const ALL: [MaintenanceStatus; 4] = [
        MaintenanceStatus::Scheduled,
        MaintenanceStatus::InProgress,
        MaintenanceStatus::Validated,
        MaintenanceStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "scheduled",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Validated => "validated",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaintenanceStatus::Scheduled => "Scheduled",
            MaintenanceStatus::InProgress => "In progress",
            MaintenanceStatus::Validated => "Validated",
            MaintenanceStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(MaintenanceStatus::Scheduled),
            "in_progress" => Some(MaintenanceStatus::InProgress),
            "validated" => Some(MaintenanceStatus::Validated),
            "cancelled" => Some(MaintenanceStatus::Cancelled),
            _ => None,
        }
    }
}

/// 支持工单状态，由管理员推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 4] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(TicketStatus::Open),
            "in_progress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }
}

/// 支付状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
        }
    }
}

// =========================================================
// 记录类型 (Records)
// =========================================================

/// 账户记录，`GET /api/auth/me` 的返回体
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// 可出租设备
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Engine {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub brand: String,
    pub daily_rate: f64,
    pub status: EngineStatus,
    pub location: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    // 自由格式规格表，键值均由服务端定义
    #[serde(default)]
    pub specifications: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// 预约记录，total_amount 由服务端按天数计算
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub engine_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_amount: f64,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// 维护任务
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MaintenanceTask {
    pub id: i64,
    pub engine_id: i64,
    // `type` 是保留字，内部用 kind
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub scheduled_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    pub technician_id: Option<i64>,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 支持工单
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SupportTicket {
    pub id: i64,
    pub user_id: i64,
    pub subject: String,
    pub message: String,
    pub category: String,
    pub status: TicketStatus,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

/// 支付记录
///
/// `user_email` / `reservation_label` 是服务端为管理员列表附加的展示字段，
/// 普通用户查询时可能缺省。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub reservation_id: i64,
    pub amount: f64,
    pub status: PaymentStatus,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub reservation_label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// FAQ 条目，按 category 分组、组内按 position 升序展示
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FaqEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    #[serde(default)]
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// 用户反馈，管理员只能删除
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Feedback {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub user_email: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

// =========================================================
// 仪表盘统计 (Dashboard Stats)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct EngineCounters {
    pub total: u32,
    pub available: u32,
    pub rented: u32,
    pub maintenance: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ReservationCounters {
    pub total: u32,
    pub pending: u32,
    pub approved: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RevenueSummary {
    pub total: f64,
    pub this_month: f64,
}

/// `GET /api/dashboard/stats` 的返回体，仅管理员可见
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DashboardStats {
    pub engines: EngineCounters,
    pub reservations: ReservationCounters,
    pub revenue: RevenueSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_enums_use_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&EngineStatus::Available).unwrap(),
            "\"available\""
        );
        assert_eq!(
            serde_json::to_string(&MaintenanceStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in MaintenanceStatus::ALL {
            assert_eq!(MaintenanceStatus::parse(status.as_str()), Some(status));
        }
        for status in TicketStatus::ALL {
            assert_eq!(TicketStatus::parse(status.as_str()), Some(status));
        }
        for status in EngineStatus::ALL {
            assert_eq!(EngineStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(MaintenanceStatus::parse("done"), None);
    }

    #[test]
    fn user_deserializes_from_me_payload() {
        let json = r#"{
            "id": 1,
            "name": "Admin",
            "email": "admin@enginerent.com",
            "phone": null,
            "address": null,
            "role": "admin",
            "is_verified": true,
            "created_at": "2024-01-15T09:30:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.email, "admin@enginerent.com");
        assert!(user.role.is_admin());
        assert!(user.is_verified);
    }

    #[test]
    fn engine_defaults_images_and_specifications() {
        let json = r#"{
            "id": 7,
            "name": "CAT 320",
            "description": "20t excavator",
            "category": "excavator",
            "brand": "Caterpillar",
            "daily_rate": 450.0,
            "status": "available",
            "location": "Lyon",
            "created_at": "2024-03-01T08:00:00Z"
        }"#;
        let engine: Engine = serde_json::from_str(json).unwrap();
        assert!(engine.images.is_empty());
        assert!(engine.specifications.is_empty());
        assert_eq!(engine.status, EngineStatus::Available);
    }

    #[test]
    fn maintenance_type_field_maps_to_kind() {
        let json = r#"{
            "id": 3,
            "engine_id": 7,
            "type": "preventive",
            "description": "Oil change",
            "scheduled_date": "2024-04-10T00:00:00Z",
            "completed_date": null,
            "technician_id": 2,
            "status": "scheduled",
            "notes": null,
            "created_at": "2024-04-01T10:00:00Z"
        }"#;
        let task: MaintenanceTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, "preventive");
        let back = serde_json::to_value(&task).unwrap();
        assert_eq!(back["type"], "preventive");
        assert!(back.get("kind").is_none());
    }

    #[test]
    fn dashboard_stats_parse() {
        let json = r#"{
            "engines": {"total": 12, "available": 5, "rented": 4, "maintenance": 3},
            "reservations": {"total": 40, "pending": 3, "approved": 30},
            "revenue": {"total": 152400.5, "this_month": 9800.0}
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.engines.total, 12);
        assert_eq!(stats.reservations.pending, 3);
        assert!((stats.revenue.this_month - 9800.0).abs() < f64::EPSILON);
    }
}
