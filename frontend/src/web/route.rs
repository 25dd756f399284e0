//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 路由的访问级别在这里集中声明，路由服务与侧边栏共用同一份判定。

use std::fmt::Display;

use enginerent_shared::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录/注册页 (默认路由)
    #[default]
    Login,
    /// 统计面板 (仅管理员)
    Dashboard,
    /// 设备列表
    Engines,
    /// 预约列表
    Reservations,
    /// 维护任务管理 (仅管理员)
    Maintenance,
    /// 技师工作台 (仅技师)
    Technician,
    /// 我的支持工单
    Support,
    /// 工单收件箱 (仅管理员)
    Tickets,
    /// 支付记录
    Payments,
    /// FAQ 浏览
    Faq,
    /// FAQ 管理 (仅管理员)
    FaqManager,
    /// 账户管理 (仅管理员)
    Users,
    /// 用户反馈 (仅管理员)
    Feedbacks,
    /// 页面未找到
    NotFound,
}

/// 路由访问级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// 无需会话
    Public,
    /// 任意已登录用户
    SignedIn,
    /// 仅管理员
    AdminOnly,
    /// 仅技师
    TechnicianOnly,
}

/// 导航守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// 放行目标路由
    Allow,
    /// 重定向到给定路由
    Redirect(AppRoute),
}

impl AppRoute {
    /// 侧边栏导航顺序，按当前角色过滤后渲染
    pub const NAV: [AppRoute; 12] = [
        AppRoute::Dashboard,
        AppRoute::Engines,
        AppRoute::Reservations,
        AppRoute::Maintenance,
        AppRoute::Technician,
        AppRoute::Support,
        AppRoute::Tickets,
        AppRoute::Payments,
        AppRoute::Faq,
        AppRoute::FaqManager,
        AppRoute::Users,
        AppRoute::Feedbacks,
    ];

    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/admin" => Self::Dashboard,
            "/admin/engines" => Self::Engines,
            "/admin/reservations" => Self::Reservations,
            "/admin/maintenance" => Self::Maintenance,
            "/admin/technician" => Self::Technician,
            "/admin/support" => Self::Support,
            "/admin/tickets" => Self::Tickets,
            "/admin/payments" => Self::Payments,
            "/admin/faq" => Self::Faq,
            "/admin/faq/manage" => Self::FaqManager,
            "/admin/users" => Self::Users,
            "/admin/feedbacks" => Self::Feedbacks,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/admin",
            Self::Engines => "/admin/engines",
            Self::Reservations => "/admin/reservations",
            Self::Maintenance => "/admin/maintenance",
            Self::Technician => "/admin/technician",
            Self::Support => "/admin/support",
            Self::Tickets => "/admin/tickets",
            Self::Payments => "/admin/payments",
            Self::Faq => "/admin/faq",
            Self::FaqManager => "/admin/faq/manage",
            Self::Users => "/admin/users",
            Self::Feedbacks => "/admin/feedbacks",
            Self::NotFound => "/404",
        }
    }

    /// 侧边栏展示名
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Engines => "Engines",
            Self::Reservations => "Reservations",
            Self::Maintenance => "Maintenance",
            Self::Technician => "Worksheet",
            Self::Support => "Support",
            Self::Tickets => "Tickets",
            Self::Payments => "Payments",
            Self::Faq => "FAQ",
            Self::FaqManager => "FAQ Manager",
            Self::Users => "Users",
            Self::Feedbacks => "Feedbacks",
            Self::NotFound => "Not found",
        }
    }

    /// **核心守卫逻辑：路由的访问级别声明**
    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login | Self::NotFound => RouteAccess::Public,
            Self::Dashboard
            | Self::Maintenance
            | Self::Tickets
            | Self::FaqManager
            | Self::Users
            | Self::Feedbacks => RouteAccess::AdminOnly,
            Self::Technician => RouteAccess::TechnicianOnly,
            Self::Engines | Self::Reservations | Self::Support | Self::Payments | Self::Faq => {
                RouteAccess::SignedIn
            }
        }
    }

    /// 当前角色能否访问此路由
    pub fn allows(&self, role: Option<Role>) -> bool {
        match self.access() {
            RouteAccess::Public => true,
            RouteAccess::SignedIn => role.is_some(),
            RouteAccess::AdminOnly => role.is_some_and(Role::is_admin),
            RouteAccess::TechnicianOnly => role.is_some_and(Role::is_technician),
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 导航守卫：目标路由 + 当前角色 -> 放行或重定向
    ///
    /// 未登录访问受限路由一律回登录页；已登录但角色不足回本角色落地页；
    /// 已登录访问登录页回本角色落地页。
    pub fn guard(&self, role: Option<Role>) -> GuardDecision {
        if self.should_redirect_when_authenticated() {
            if let Some(role) = role {
                return GuardDecision::Redirect(Self::landing(role));
            }
        }
        if self.allows(role) {
            return GuardDecision::Allow;
        }
        match role {
            None => GuardDecision::Redirect(Self::auth_failure_redirect()),
            Some(role) => GuardDecision::Redirect(Self::landing(role)),
        }
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 各角色登录后的落地页
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Admin => Self::Dashboard,
            Role::Technician => Self::Technician,
            Role::Client => Self::Engines,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_roundtrip_for_every_route() {
        for route in AppRoute::NAV {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/admin/unknown"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path(""), AppRoute::NotFound);
    }

    #[test]
    fn unauthenticated_always_lands_on_login() {
        for route in AppRoute::NAV {
            assert_eq!(
                route.guard(None),
                GuardDecision::Redirect(AppRoute::Login),
                "{route:?} must redirect unauthenticated visitors"
            );
        }
        assert_eq!(AppRoute::Login.guard(None), GuardDecision::Allow);
        assert_eq!(AppRoute::NotFound.guard(None), GuardDecision::Allow);
    }

    #[test]
    fn admin_reaches_every_admin_route() {
        let role = Some(Role::Admin);
        for route in [
            AppRoute::Dashboard,
            AppRoute::Maintenance,
            AppRoute::Tickets,
            AppRoute::FaqManager,
            AppRoute::Users,
            AppRoute::Feedbacks,
            AppRoute::Engines,
            AppRoute::Reservations,
            AppRoute::Support,
            AppRoute::Payments,
            AppRoute::Faq,
        ] {
            assert_eq!(route.guard(role), GuardDecision::Allow, "{route:?}");
        }
    }

    #[test]
    fn insufficient_role_redirects_to_landing() {
        assert_eq!(
            AppRoute::Users.guard(Some(Role::Client)),
            GuardDecision::Redirect(AppRoute::Engines)
        );
        assert_eq!(
            AppRoute::Dashboard.guard(Some(Role::Technician)),
            GuardDecision::Redirect(AppRoute::Technician)
        );
        assert_eq!(
            AppRoute::Technician.guard(Some(Role::Admin)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
    }

    #[test]
    fn login_page_redirects_signed_in_users_to_their_landing() {
        assert_eq!(
            AppRoute::Login.guard(Some(Role::Admin)),
            GuardDecision::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(
            AppRoute::Login.guard(Some(Role::Technician)),
            GuardDecision::Redirect(AppRoute::Technician)
        );
        assert_eq!(
            AppRoute::Login.guard(Some(Role::Client)),
            GuardDecision::Redirect(AppRoute::Engines)
        );
    }

    #[test]
    fn sidebar_visibility_follows_access_level() {
        let admin_visible: Vec<_> = AppRoute::NAV
            .iter()
            .filter(|r| r.allows(Some(Role::Admin)))
            .collect();
        assert_eq!(admin_visible.len(), 11);

        let client_visible: Vec<_> = AppRoute::NAV
            .iter()
            .filter(|r| r.allows(Some(Role::Client)))
            .collect();
        assert_eq!(client_visible.len(), 5);
        assert!(client_visible.iter().all(|r| r.access() == RouteAccess::SignedIn));

        let tech_visible: Vec<_> = AppRoute::NAV
            .iter()
            .filter(|r| r.allows(Some(Role::Technician)))
            .collect();
        assert_eq!(tech_visible.len(), 6);
    }
}
