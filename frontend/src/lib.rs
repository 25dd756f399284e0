//! EngineRent Pro 管理前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型，含角色访问级别）
//! - `web::router`: 路由服务（核心引擎，角色守卫）
//! - `auth`: 会话状态管理（令牌持久化 + 用户恢复）
//! - `api`: 携带令牌的后端客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    mod engine_dialog;
    pub mod engines;
    pub mod faq;
    pub mod faq_manager;
    pub mod feedbacks;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod maintenance;
    pub mod payments;
    mod reservation_dialog;
    pub mod reservations;
    pub mod support;
    pub mod technician;
    pub mod tickets;
    pub mod toast;
    pub mod users;
}
mod format;

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::engines::EnginesPage;
use crate::components::faq::FaqPage;
use crate::components::faq_manager::FaqManagerPage;
use crate::components::feedbacks::FeedbacksPage;
use crate::components::layout::AdminShell;
use crate::components::login::LoginPage;
use crate::components::maintenance::MaintenancePage;
use crate::components::payments::PaymentsPage;
use crate::components::reservations::ReservationsPage;
use crate::components::support::SupportPage;
use crate::components::technician::TechnicianPage;
use crate::components::tickets::TicketsPage;
use crate::components::toast::provide_toast;
use crate::components::users::UsersPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装：令牌存储、确认框、
// 文件下载与 History 路由，避免为这些小能力引入额外依赖。
pub(crate) mod web {
    pub mod confirm;
    pub mod download;
    pub mod route;
    pub mod router;
    mod storage;

    pub use storage::TokenStore;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 受保护页面统一套上管理外壳（侧边栏 + 顶栏 + toast）
fn shell(content: AnyView) -> AnyView {
    view! { <AdminShell>{content}</AdminShell> }.into_any()
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => shell(view! { <DashboardPage /> }.into_any()),
        AppRoute::Engines => shell(view! { <EnginesPage /> }.into_any()),
        AppRoute::Reservations => shell(view! { <ReservationsPage /> }.into_any()),
        AppRoute::Maintenance => shell(view! { <MaintenancePage /> }.into_any()),
        AppRoute::Technician => shell(view! { <TechnicianPage /> }.into_any()),
        AppRoute::Support => shell(view! { <SupportPage /> }.into_any()),
        AppRoute::Tickets => shell(view! { <TicketsPage /> }.into_any()),
        AppRoute::Payments => shell(view! { <PaymentsPage /> }.into_any()),
        AppRoute::Faq => shell(view! { <FaqPage /> }.into_any()),
        AppRoute::FaqManager => shell(view! { <FaqManagerPage /> }.into_any()),
        AppRoute::Users => shell(view! { <UsersPage /> }.into_any()),
        AppRoute::Feedbacks => shell(view! { <FeedbacksPage /> }.into_any()),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证与提示上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    provide_toast();

    // 2. 初始化会话（从 TokenStore 恢复令牌并拉取当前用户）
    init_auth(&auth_ctx);

    // 3. 会话信号注入路由服务，角色守卫与视图解耦
    let role = auth_ctx.role_signal();
    let is_loading = auth_ctx.is_loading_signal();

    view! {
        // 4. 会话恢复完成前不渲染路由，避免守卫误判跳回登录页
        <Show
            when=move || !is_loading.get()
            fallback=|| {
                view! {
                    <div class="flex items-center justify-center min-h-screen bg-base-200">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            }
        >
            <Router role=role>
                <RouterOutlet matcher=route_matcher />
            </Router>
        </Show>
    }
}
