//! 支付与发票页
//!
//! 客户在此发起托管收银台支付、下载已完成支付的发票；
//! 管理员看到全量账单，附客户邮箱与预订摘要。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{Payment, PaymentStatus};

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::format::{format_datetime, format_money};
use crate::web::download::{redirect_external, save_bytes};

fn status_badge(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "badge badge-warning",
        PaymentStatus::Completed => "badge badge-success",
        PaymentStatus::Failed => "badge badge-error",
    }
}

#[component]
pub fn PaymentsPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (payments, set_payments) = signal(Vec::<Payment>::new());
    let (is_loading, set_is_loading) = signal(true);

    let is_admin = move || {
        ctx.state
            .get()
            .user
            .as_ref()
            .is_some_and(|u| u.role.is_admin())
    };

    let load_payments = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_payments().await {
                    Ok(data) => set_payments.set(data),
                    Err(e) => logging::error!("[Payments] Failed to load payments: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    Effect::new(move |_| load_payments());

    // 收银台地址拿到后整页跳转，离开 SPA
    let handle_pay = move |reservation_id: i64| {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.create_checkout_session(reservation_id).await {
                    Ok(session) => redirect_external(&session.checkout_url),
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    let handle_invoice = move |payment_id: i64| {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.download_invoice(payment_id).await {
                    Ok(bytes) => {
                        let filename = format!("invoice_{payment_id}.pdf");
                        if let Err(e) = save_bytes(&bytes, "application/pdf", &filename) {
                            toast.error(e);
                        }
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">
                {move || if is_admin() { "Payments" } else { "My payments" }}
            </h2>

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
                    when=move || !payments.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-12 text-base-content/60">
                                "No invoices found."
                            </div>
                        }
                    }
                >
                    <div class="space-y-3">
                        <For
                            each=move || payments.get()
                            key=|payment| (payment.id, payment.status)
                            children=move |payment| {
                                let payment_id = payment.id;
                                let reservation_id = payment.reservation_id;
                                let reservation = payment
                                    .reservation_label
                                    .clone()
                                    .unwrap_or_else(|| format!("Reservation #{reservation_id}"));
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body py-4 flex-row justify-between items-center">
                                            <div>
                                                <p class="font-bold">{reservation}</p>
                                                <Show when=is_admin>
                                                    <p class="text-sm text-base-content/70">
                                                        "Client: "
                                                        {payment
                                                            .user_email
                                                            .clone()
                                                            .unwrap_or_else(|| "unknown".to_string())}
                                                    </p>
                                                </Show>
                                                <p class="text-sm text-base-content/70">
                                                    {format_money(payment.amount)}
                                                    " via " {payment.payment_method.clone()}
                                                </p>
                                                <p class="text-sm text-base-content/50">
                                                    {format_datetime(&payment.created_at)}
                                                </p>
                                            </div>
                                            <div class="flex items-center gap-3">
                                                <span class=status_badge(payment.status)>
                                                    {payment.status.label()}
                                                </span>
                                                // 未完成的支付可以(重新)发起，完成后改为下发票
                                                {if payment.status == PaymentStatus::Completed {
                                                    view! {
                                                        <button
                                                            class="btn btn-success btn-sm"
                                                            on:click=move |_| handle_invoice(payment_id)
                                                        >
                                                            <FileDown />
                                                            "Invoice"
                                                        </button>
                                                    }
                                                        .into_any()
                                                } else if !is_admin() {
                                                    view! {
                                                        <button
                                                            class="btn btn-primary btn-sm"
                                                            on:click=move |_| handle_pay(reservation_id)
                                                        >
                                                            <CreditCard />
                                                            "Pay now"
                                                        </button>
                                                    }
                                                        .into_any()
                                                } else {
                                                    ().into_any()
                                                }}
                                            </div>
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
