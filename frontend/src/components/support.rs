//! 客户支持页
//!
//! 页内表单提交新工单，下方列出当前用户的历史工单。
//! 服务端按登录用户过滤，管理员的全量收件箱在工单收件箱页。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{SUPPORT_CATEGORIES, SupportTicket, TicketPayload, TicketStatus};

use crate::auth::use_auth;
use crate::components::toast::use_toast;
use crate::format::{capitalize, format_datetime};

/// 工单状态徽章样式
fn status_badge(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "badge badge-warning",
        TicketStatus::InProgress => "badge badge-info",
        TicketStatus::Resolved => "badge badge-success",
        TicketStatus::Closed => "badge badge-ghost",
    }
}

#[component]
pub fn SupportPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (tickets, set_tickets) = signal(Vec::<SupportTicket>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (subject, set_subject) = signal(String::new());
    let (category, set_category) = signal(SUPPORT_CATEGORIES[0].to_string());
    let (message, set_message) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let load_tickets = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_tickets().await {
                    Ok(data) => set_tickets.set(data),
                    Err(e) => logging::error!("[Support] Failed to load tickets: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载
    Effect::new(move |_| load_tickets());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = TicketPayload {
            subject: subject.get_untracked().trim().to_string(),
            message: message.get_untracked().trim().to_string(),
            category: category.get_untracked(),
        };
        if payload.subject.is_empty() || payload.message.is_empty() {
            toast.error("Subject and message are required.");
            return;
        }

        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_submitting.set(true);
            spawn_local(async move {
                match api.create_ticket(&payload).await {
                    Ok(_) => {
                        toast.success("Ticket submitted.");
                        set_subject.set(String::new());
                        set_message.set(String::new());
                        set_category.set(SUPPORT_CATEGORIES[0].to_string());
                        load_tickets();
                    }
                    Err(e) => toast.error(e),
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Customer support"</h2>

            // 新工单表单
            <div class="card bg-base-100 shadow">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <h3 class="card-title text-lg">"Open a ticket"</h3>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="ticket-subject" class="label">
                                <span class="label-text">"Subject"</span>
                            </label>
                            <input
                                id="ticket-subject"
                                required
                                type="text"
                                placeholder="Broken lift arm"
                                on:input=move |ev| set_subject.set(event_target_value(&ev))
                                prop:value=subject
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Category"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| set_category.set(event_target_value(&ev))
                            >
                                {SUPPORT_CATEGORIES
                                    .iter()
                                    .map(|c| {
                                        let c = *c;
                                        view! {
                                            <option value=c selected=move || category.get() == c>
                                                {capitalize(c)}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                    <div class="form-control">
                        <label for="ticket-message" class="label">
                            <span class="label-text">"Message"</span>
                        </label>
                        <textarea
                            id="ticket-message"
                            required
                            rows="4"
                            placeholder="Describe the issue..."
                            on:input=move |ev| set_message.set(event_target_value(&ev))
                            prop:value=message
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                    </div>
                    <div class="flex justify-end">
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Sending..." }.into_any()
                            } else {
                                "Send".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>

            // 历史工单
            <div class="space-y-3">
                <h3 class="text-lg font-semibold">"My tickets"</h3>
                <Show
                    when=move || !is_loading.get()
                    fallback=|| {
                        view! {
                            <div class="flex items-center justify-center h-32">
                                <span class="loading loading-spinner loading-lg text-primary"></span>
                            </div>
                        }
                    }
                >
                    <Show
                        when=move || !tickets.get().is_empty()
                        fallback=|| {
                            view! {
                                <div class="text-center py-8 text-base-content/60">
                                    "You have not opened any tickets yet."
                                </div>
                            }
                        }
                    >
                        <For
                            each=move || tickets.get()
                            key=|ticket| (ticket.id, ticket.status)
                            children=move |ticket| {
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body py-4">
                                            <div class="flex justify-between items-center">
                                                <span class="font-bold">{ticket.subject.clone()}</span>
                                                <span class=status_badge(ticket.status)>
                                                    {ticket.status.label()}
                                                </span>
                                            </div>
                                            <p class="text-base-content/70">{ticket.message.clone()}</p>
                                            <p class="text-sm text-base-content/50">
                                                {capitalize(&ticket.category)} " · "
                                                {format_datetime(&ticket.created_at)}
                                            </p>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </Show>
                </Show>
            </div>
        </div>
    }
}
