//! 预约列表页
//!
//! 客户看自己的预约并可新建；管理员看全量列表，
//! 对 `pending` 状态的预约执行批准/拒绝。服务端按角色过滤数据。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{Reservation, ReservationStatus};

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::reservation_dialog::ReservationDialog;
use crate::components::toast::use_toast;
use crate::format::{format_date, format_money};

/// 预约状态徽章样式
fn status_badge(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "badge badge-warning",
        ReservationStatus::Approved => "badge badge-success",
        ReservationStatus::Rejected => "badge badge-error",
        ReservationStatus::Completed => "badge badge-info",
    }
}

#[component]
pub fn ReservationsPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (reservations, set_reservations) = signal(Vec::<Reservation>::new());
    let (is_loading, set_is_loading) = signal(true);
    let dialog_open = RwSignal::new(false);

    let is_admin = move || {
        ctx.state
            .get()
            .user
            .as_ref()
            .is_some_and(|u| u.role.is_admin())
    };
    let is_client = move || {
        ctx.state
            .get()
            .user
            .as_ref()
            .is_some_and(|u| u.role == enginerent_shared::Role::Client)
    };

    let load_reservations = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_reservations().await {
                    Ok(data) => set_reservations.set(data),
                    Err(e) => logging::error!("[Reservations] Failed to load reservations: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载
    Effect::new(move |_| load_reservations());

    let handle_approve = move |id: i64| {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.approve_reservation(id).await {
                    Ok(()) => {
                        toast.success("Reservation approved.");
                        load_reservations();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    let handle_reject = move |id: i64| {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.reject_reservation(id).await {
                    Ok(()) => {
                        toast.success("Reservation rejected.");
                        load_reservations();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    let handle_created = move |_: ()| {
        toast.success("Reservation submitted.");
        load_reservations();
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Reservations"</h2>
                <Show when=is_client>
                    <button class="btn btn-primary gap-2" on:click=move |_| dialog_open.set(true)>
                        <Plus attr:class="h-4 w-4" /> "New reservation"
                    </button>
                </Show>
            </div>

            <Show
                when=move || !is_loading.get()
                fallback=|| {
                    view! {
                        <div class="flex items-center justify-center h-64">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                }
            >
                <div class="card bg-base-100 shadow overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"Engine"</th>
                                <th>"Period"</th>
                                <th>"Amount"</th>
                                <th>"Status"</th>
                                <th>"Created"</th>
                                <Show when=is_admin>
                                    <th>"Actions"</th>
                                </Show>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || reservations.get()
                                key=|res| (res.id, res.status)
                                children=move |res| {
                                    let res_id = res.id;
                                    let pending = res.status == ReservationStatus::Pending;
                                    view! {
                                        <tr>
                                            <td>"#" {res.engine_id}</td>
                                            <td>
                                                {format_date(&res.start_date)} " - "
                                                {format_date(&res.end_date)}
                                            </td>
                                            <td>{format_money(res.total_amount)}</td>
                                            <td>
                                                <span class=status_badge(res.status)>
                                                    {res.status.label()}
                                                </span>
                                            </td>
                                            <td>{format_date(&res.created_at)}</td>
                                            <Show when=is_admin>
                                                <td>
                                                    <Show when=move || pending>
                                                        <div class="flex gap-1">
                                                            <button
                                                                class="btn btn-ghost btn-xs text-success"
                                                                title="Approve"
                                                                on:click=move |_| handle_approve(res_id)
                                                            >
                                                                <Check attr:class="h-4 w-4" />
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                title="Reject"
                                                                on:click=move |_| handle_reject(res_id)
                                                            >
                                                                <X attr:class="h-4 w-4" />
                                                            </button>
                                                        </div>
                                                    </Show>
                                                </td>
                                            </Show>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>

                    <Show when=move || reservations.get().is_empty()>
                        <div class="text-center py-8 text-base-content/60">
                            "No reservations yet."
                        </div>
                    </Show>
                </div>
            </Show>

            <ReservationDialog open=dialog_open on_created=handle_created />
        </div>
    }
}
