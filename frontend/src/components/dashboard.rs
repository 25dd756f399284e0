//! 统计面板页（仅管理员）
//!
//! 展示设备、预约与营收的汇总数字，数据来自 `/api/dashboard/stats`。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::DashboardStats;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::format::format_money;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_auth();

    let (stats, set_stats) = signal(Option::<DashboardStats>::None);
    let (is_loading, set_is_loading) = signal(true);

    let load_stats = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.dashboard_stats().await {
                    Ok(data) => set_stats.set(Some(data)),
                    Err(e) => logging::error!("[Dashboard] Failed to load stats: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载
    Effect::new(move |_| load_stats());

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Overview"</h2>
                <button class="btn btn-ghost btn-sm" on:click=move |_| load_stats()>
                    <RefreshCw attr:class=move || {
                        if is_loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                    } />
                </button>
            </div>

            <Show
                when=move || stats.get().is_some()
                fallback=move || {
                    if is_loading.get() {
                        view! {
                            <div class="flex items-center justify-center h-64">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <div class="text-center py-8 text-base-content/70">
                                "Statistics are unavailable right now."
                            </div>
                        }
                            .into_any()
                    }
                }
            >
                {move || {
                    let data = stats.get().unwrap();
                    view! {
                        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                            <div class="stat">
                                <div class="stat-figure text-primary">
                                    <Truck attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Fleet size"</div>
                                <div class="stat-value text-primary">{data.engines.total}</div>
                            </div>

                            <div class="stat">
                                <div class="stat-figure text-success">
                                    <Check attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Available"</div>
                                <div class="stat-value text-success">{data.engines.available}</div>
                            </div>

                            <div class="stat">
                                <div class="stat-figure text-warning">
                                    <CalendarDays attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Reservations"</div>
                                <div class="stat-value text-warning">{data.reservations.total}</div>
                            </div>

                            <div class="stat">
                                <div class="stat-figure text-secondary">
                                    <CreditCard attr:class="h-8 w-8" />
                                </div>
                                <div class="stat-title">"Revenue"</div>
                                <div class="stat-value text-secondary text-2xl">
                                    {format_money(data.revenue.total)}
                                </div>
                                <div class="stat-desc">
                                    {format_money(data.revenue.this_month)} " this month"
                                </div>
                            </div>
                        </div>

                        <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h3 class="card-title">"Fleet status"</h3>
                                    <div class="space-y-3">
                                        <div class="flex justify-between items-center">
                                            <span class="text-base-content/70">"Available"</span>
                                            <span class="font-semibold text-success">
                                                {data.engines.available}
                                            </span>
                                        </div>
                                        <div class="flex justify-between items-center">
                                            <span class="text-base-content/70">"Rented out"</span>
                                            <span class="font-semibold text-warning">
                                                {data.engines.rented}
                                            </span>
                                        </div>
                                        <div class="flex justify-between items-center">
                                            <span class="text-base-content/70">"In maintenance"</span>
                                            <span class="font-semibold text-error">
                                                {data.engines.maintenance}
                                            </span>
                                        </div>
                                    </div>
                                </div>
                            </div>

                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h3 class="card-title">"Reservations"</h3>
                                    <div class="space-y-3">
                                        <div class="flex justify-between items-center">
                                            <span class="text-base-content/70">"Pending"</span>
                                            <span class="font-semibold text-warning">
                                                {data.reservations.pending}
                                            </span>
                                        </div>
                                        <div class="flex justify-between items-center">
                                            <span class="text-base-content/70">"Approved"</span>
                                            <span class="font-semibold text-success">
                                                {data.reservations.approved}
                                            </span>
                                        </div>
                                        <div class="flex justify-between items-center">
                                            <span class="text-base-content/70">"Total"</span>
                                            <span class="font-semibold">
                                                {data.reservations.total}
                                            </span>
                                        </div>
                                    </div>
                                </div>
                            </div>
                        </div>
                    }
                }}
            </Show>
        </div>
    }
}
