//! 管理后台布局组件
//!
//! 所有受保护页面共用的外壳：侧边栏 + 顶栏 + 内容区。
//! 侧边栏由 [`AppRoute::NAV`] 驱动，按当前角色过滤，
//! 与路由守卫共用同一份 `allows` 判定。

use leptos::prelude::*;

use crate::auth::{logout, use_auth};
use crate::components::icons::*;
use crate::components::toast::ToastHost;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 侧边栏条目图标
fn nav_icon(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Dashboard => view! { <LayoutDashboard attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Engines => view! { <Truck attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Reservations => view! { <CalendarDays attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Maintenance => view! { <Wrench attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Technician => view! { <HardHat attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Support => view! { <LifeBuoy attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Tickets => view! { <Inbox attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Payments => view! { <CreditCard attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Faq => view! { <CircleHelp attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::FaqManager => view! { <BookOpen attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Users => view! { <UsersRound attr:class="h-5 w-5" /> }.into_any(),
        AppRoute::Feedbacks => view! { <MessageSquare attr:class="h-5 w-5" /> }.into_any(),
        _ => view! { <CircleHelp attr:class="h-5 w-5" /> }.into_any(),
    }
}

/// 后台外壳组件
///
/// 包裹所有已登录页面，未登录页面（登录页、404）不经过这里。
#[component]
pub fn AdminShell(children: Children) -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();

    let role = ctx.role_signal();
    let current = router.current_route();

    let user_name = move || {
        ctx.state
            .get()
            .user
            .map(|u| u.name)
            .unwrap_or_default()
    };
    let role_label = move || {
        ctx.state
            .get()
            .user
            .map(|u| u.role.label())
            .unwrap_or("")
    };

    let on_logout = move |_| {
        logout(&ctx);
    };

    view! {
        <div class="flex min-h-screen bg-base-200">
            // 侧边栏
            <aside class="w-64 bg-base-100 shadow-xl flex flex-col shrink-0">
                <div class="flex items-center gap-2 p-4">
                    <Truck attr:class="text-primary h-7 w-7" />
                    <span class="text-xl font-bold">"EngineRent Pro"</span>
                </div>
                <ul class="menu grow gap-1 px-2">
                    <For
                        each=move || {
                            AppRoute::NAV
                                .into_iter()
                                .filter(|r| r.allows(role.get()))
                                .collect::<Vec<_>>()
                        }
                        key=|route| route.to_path()
                        children=move |route| {
                            view! {
                                <li>
                                    <a
                                        class=move || {
                                            if current.get() == route { "active" } else { "" }
                                        }
                                        on:click=move |_| router.navigate(route)
                                    >
                                        {nav_icon(route)}
                                        {route.label()}
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </aside>

            // 主内容列
            <div class="flex min-w-0 grow flex-col">
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1">
                        <span class="text-lg font-semibold px-2">
                            {move || current.get().label()}
                        </span>
                    </div>
                    <div class="flex-none items-center gap-3">
                        <span class="hidden md:inline">"Hello, " {user_name}</span>
                        <span class="badge badge-neutral">{role_label}</span>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Sign out"
                        </button>
                    </div>
                </div>

                <main class="grow p-6">{children()}</main>
            </div>

            <ToastHost />
        </div>
    }
}
