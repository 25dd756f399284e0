//! 工单收件箱(管理员)
//!
//! 展示全部用户的支持工单，管理员在卡片上直接切换处理状态。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{SupportTicket, TicketStatus};

use crate::auth::use_auth;
use crate::components::toast::use_toast;
use crate::format::{capitalize, format_datetime};

fn status_badge(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "badge badge-warning",
        TicketStatus::InProgress => "badge badge-info",
        TicketStatus::Resolved => "badge badge-success",
        TicketStatus::Closed => "badge badge-ghost",
    }
}

#[component]
pub fn TicketsPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (tickets, set_tickets) = signal(Vec::<SupportTicket>::new());
    let (is_loading, set_is_loading) = signal(true);

    let load_tickets = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_tickets().await {
                    Ok(data) => set_tickets.set(data),
                    Err(e) => logging::error!("[Tickets] Failed to load tickets: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    Effect::new(move |_| load_tickets());

    let handle_status = move |id: i64, value: String| {
        let Some(status) = TicketStatus::parse(&value) else {
            return;
        };
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.set_ticket_status(id, status).await {
                    Ok(_) => {
                        toast.success("Ticket updated.");
                        load_tickets();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Ticket inbox"</h2>

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
                <Show
                    when=move || !tickets.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-12 text-base-content/60">
                                "No tickets. Enjoy the quiet."
                            </div>
                        }
                    }
                >
                    <div class="space-y-3">
                        <For
                            each=move || tickets.get()
                            key=|ticket| (ticket.id, ticket.status)
                            children=move |ticket| {
                                let ticket_id = ticket.id;
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body py-4">
                                            <div class="flex flex-wrap justify-between items-center gap-2">
                                                <div class="flex items-center gap-2">
                                                    <span class="font-bold">{ticket.subject.clone()}</span>
                                                    <span class=status_badge(ticket.status)>
                                                        {ticket.status.label()}
                                                    </span>
                                                    <span class="badge badge-outline">
                                                        {capitalize(&ticket.priority)}
                                                    </span>
                                                </div>
                                                <select
                                                    class="select select-bordered select-sm"
                                                    on:change=move |ev| handle_status(
                                                        ticket_id,
                                                        event_target_value(&ev),
                                                    )
                                                >
                                                    {TicketStatus::ALL
                                                        .iter()
                                                        .map(|s| {
                                                            view! {
                                                                <option
                                                                    value=s.as_str()
                                                                    selected=ticket.status == *s
                                                                >
                                                                    {s.label()}
                                                                </option>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </select>
                                            </div>
                                            <p class="text-base-content/70">{ticket.message.clone()}</p>
                                            <p class="text-sm text-base-content/50">
                                                {capitalize(&ticket.category)}
                                                " · User #" {ticket.user_id}
                                                " · " {format_datetime(&ticket.created_at)}
                                            </p>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
