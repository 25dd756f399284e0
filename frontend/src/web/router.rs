//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 守卫 -> 处理 -> 加载"的导航流程，
//! 守卫判定本身是纯函数，见 [`AppRoute::guard`]。

use leptos::logging;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use enginerent_shared::Role;

use super::route::{AppRoute, GuardDecision};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入当前角色信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前会话角色（注入的信号；None 表示未认证）
    role: Signal<Option<Role>>,
}

impl RouterService {
    fn new(role: Signal<Option<Role>>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            role,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 守卫判定 -> 处理 -> 加载
    pub fn navigate(&self, route: AppRoute) {
        let role = self.role.get_untracked();

        let resolved = match route.guard(role) {
            GuardDecision::Allow => route,
            GuardDecision::Redirect(redirect) => {
                logging::log!("[Router] Access denied for {route:?}, redirecting to {redirect:?}.");
                redirect
            }
        };

        push_history_state(resolved.to_path());
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let role = self.role;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);

            // popstate 时也执行守卫逻辑
            match target_route.guard(role.get_untracked()) {
                GuardDecision::Allow => set_route.set(target_route),
                GuardDecision::Redirect(redirect) => {
                    replace_history_state(redirect.to_path());
                    set_route.set(redirect);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    ///
    /// 登录成功把登录页换成落地页，登出把受限页换回登录页，
    /// 两种情况共用同一份守卫判定。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let role = self.role;

        Effect::new(move |_| {
            let role = role.get();
            let route = current_route.get_untracked();

            if let GuardDecision::Redirect(redirect) = route.guard(role) {
                logging::log!("[Router] Session changed on {route:?}, moving to {redirect:?}.");
                push_history_state(redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(role);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 当前会话角色信号
    role: Signal<Option<Role>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(role);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
