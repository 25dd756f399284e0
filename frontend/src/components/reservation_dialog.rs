//! 新建预约对话框（仅客户）
//!
//! 打开时拉取可出租设备填充下拉框。总价由服务端按日单价计算，
//! 这里只提交设备与起止日期；服务端拒绝（档期冲突等）时原样展示 detail。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{Engine, ReservationPayload};

use crate::api::EngineFilter;
use crate::auth::use_auth;
use crate::components::icons::X;
use crate::format::{format_money, parse_date_input};

/// 预约表单状态
#[derive(Clone, Copy)]
pub struct FormState {
    pub engine_id: RwSignal<String>,
    pub start_date: RwSignal<String>,
    pub end_date: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            engine_id: RwSignal::new(String::new()),
            start_date: RwSignal::new(String::new()),
            end_date: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.engine_id.set(String::new());
        self.start_date.set(String::new());
        self.end_date.set(String::new());
    }

    /// 校验并转换为请求载荷，日期取 UTC 零点
    pub fn to_request(&self) -> Result<ReservationPayload, String> {
        let engine_id: i64 = self
            .engine_id
            .get()
            .parse()
            .map_err(|_| "Please select an engine".to_string())?;

        let start_date = parse_date_input(&self.start_date.get())
            .ok_or_else(|| "Please pick valid dates".to_string())?;
        let end_date = parse_date_input(&self.end_date.get())
            .ok_or_else(|| "Please pick valid dates".to_string())?;

        if end_date <= start_date {
            return Err("End date must be after start date".to_string());
        }

        Ok(ReservationPayload {
            engine_id,
            start_date,
            end_date,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ReservationDialog(
    /// 对话框开关
    open: RwSignal<bool>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let ctx = use_auth();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let form = FormState::new();

    let (engines, set_engines) = signal(Vec::<Engine>::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    // 打开时清空表单并拉取可出租设备
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        form.reset();
        set_error_msg.set(None);

        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.list_engines(&EngineFilter::available_only()).await {
                    Ok(data) => set_engines.set(data),
                    Err(e) => logging::error!("[Reservations] Failed to load engines: {e}"),
                }
            });
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match form.to_request() {
            Ok(payload) => payload,
            Err(e) => {
                set_error_msg.set(Some(e));
                return;
            }
        };

        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_submitting.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                match api.create_reservation(&payload).await {
                    Ok(_) => {
                        on_created.run(());
                        open.set(false);
                    }
                    Err(e) => set_error_msg.set(Some(e)),
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box">
                <div class="flex items-center justify-between">
                    <h3 class="font-bold text-lg">"New reservation"</h3>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| open.set(false)>
                        <X attr:class="h-4 w-4" />
                    </button>
                </div>

                <form on:submit=on_submit class="space-y-4 mt-4">
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Engine"</span>
                        </label>
                        <select
                            class="select select-bordered w-full"
                            required
                            on:change=move |ev| form.engine_id.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || form.engine_id.get().is_empty()>
                                "Select an engine"
                            </option>
                            <For
                                each=move || engines.get()
                                key=|engine| engine.id
                                children=move |engine| {
                                    let value = engine.id.to_string();
                                    let selected_value = value.clone();
                                    view! {
                                        <option
                                            value=value
                                            selected=move || form.engine_id.get() == selected_value
                                        >
                                            {engine.name.clone()} " - "
                                            {format_money(engine.daily_rate)} "/day"
                                        </option>
                                    }
                                }
                            />
                        </select>
                    </div>

                    <div class="form-control">
                        <label for="reservation-start" class="label">
                            <span class="label-text">"Start date"</span>
                        </label>
                        <input
                            id="reservation-start"
                            required
                            type="date"
                            on:input=move |ev| form.start_date.set(event_target_value(&ev))
                            prop:value=form.start_date
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label for="reservation-end" class="label">
                            <span class="label-text">"End date"</span>
                        </label>
                        <input
                            id="reservation-end"
                            required
                            type="date"
                            on:input=move |ev| form.end_date.set(event_target_value(&ev))
                            prop:value=form.end_date
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Submitting..." }.into_any()
                            } else {
                                "Create reservation".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_request_maps_dates_to_utc_midnight() {
        let form = FormState::new();
        form.engine_id.set("3".to_string());
        form.start_date.set("2024-06-01".to_string());
        form.end_date.set("2024-06-05".to_string());

        let payload = form.to_request().unwrap();
        assert_eq!(payload.engine_id, 3);
        assert_eq!(payload.start_date.to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert_eq!(payload.end_date.to_rfc3339(), "2024-06-05T00:00:00+00:00");
    }

    #[test]
    fn to_request_rejects_missing_engine() {
        let form = FormState::new();
        form.start_date.set("2024-06-01".to_string());
        form.end_date.set("2024-06-05".to_string());
        assert_eq!(form.to_request().unwrap_err(), "Please select an engine");
    }

    #[test]
    fn to_request_rejects_inverted_period() {
        let form = FormState::new();
        form.engine_id.set("3".to_string());
        form.start_date.set("2024-06-05".to_string());
        form.end_date.set("2024-06-05".to_string());
        assert_eq!(
            form.to_request().unwrap_err(),
            "End date must be after start date"
        );

        form.end_date.set("2024-06-01".to_string());
        assert!(form.to_request().is_err());
    }
}
