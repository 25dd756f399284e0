//! EngineRent Pro 前后端共享的线上契约：常量、领域模型、请求载荷。
//!
//! 本 crate 不含任何 IO，纯数据定义，前端与后端协作方共同遵守。

mod models;
mod requests;
mod role;

pub use models::*;
pub use requests::*;
pub use role::Role;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 浏览器持久化存储里唯一的会话键，值为裸 token 字符串
pub const TOKEN_STORAGE_KEY: &str = "token";

/// 所有后端路由的统一前缀
pub const API_PREFIX: &str = "/api";

/// 设备分类的固定词表，筛选栏与编辑表单共用
pub const ENGINE_CATEGORIES: [&str; 4] = ["excavator", "bulldozer", "crane", "backhoe"];

/// 设备品牌的固定词表
pub const ENGINE_BRANDS: [&str; 4] = ["Caterpillar", "Komatsu", "Liebherr", "Volvo"];

/// 支持工单分类
pub const SUPPORT_CATEGORIES: [&str; 3] = ["technical", "billing", "other"];
