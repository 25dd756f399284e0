//! 用户角色与能力模型
//!
//! 路由层与页面动作守卫共用的唯一角色判定来源，
//! 禁止在视图里散落字符串比较。

use serde::{Deserialize, Serialize};

/// 账户角色，与后端 `role` 字段一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    Technician,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Client
    }
}

impl Role {
    /// 用户管理表单的可选角色列表
    pub const ALL: [Role; 3] = [Role::Client, Role::Technician, Role::Admin];

    /// 线上传输值 (snake_case)
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Technician => "technician",
            Role::Admin => "admin",
        }
    }

    /// 界面展示名
    pub fn label(self) -> &'static str {
        match self {
            Role::Client => "Client",
            Role::Technician => "Technician",
            Role::Admin => "Administrator",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "client" => Some(Role::Client),
            "technician" => Some(Role::Technician),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    // =========================================================
    // 能力判定 (Capabilities)
    // =========================================================

    /// 管理员：机队、预约审批、账户、FAQ、工单、反馈、统计
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// 技师：维护工单完成
    pub fn is_technician(self) -> bool {
        matches!(self, Role::Technician)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn parse_accepts_wire_names_only() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("technician"), Some(Role::Technician));
        assert_eq!(Role::parse("client"), Some(Role::Client));
        assert_eq!(Role::parse("Administrator"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn capability_matrix() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Admin.is_technician());
        assert!(Role::Technician.is_technician());
        assert!(!Role::Technician.is_admin());
        assert!(!Role::Client.is_admin());
        assert!(!Role::Client.is_technician());
    }
}
