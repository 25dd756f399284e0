//! 维护任务管理页（仅管理员）
//!
//! 页内表单新增/编辑，列表行内推进状态或删除。
//! 编辑复用同一个表单，`editing_id` 区分模式。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{MaintenancePayload, MaintenanceStatus, MaintenanceTask};

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::format::{datetime_input_value, format_datetime, parse_datetime_input};
use crate::web::confirm::confirm;

/// 维护任务状态徽章样式
fn status_badge(status: MaintenanceStatus) -> &'static str {
    match status {
        MaintenanceStatus::Scheduled => "badge badge-warning",
        MaintenanceStatus::InProgress => "badge badge-info",
        MaintenanceStatus::Validated => "badge badge-success",
        MaintenanceStatus::Cancelled => "badge badge-ghost",
    }
}

/// 维护任务表单状态
#[derive(Clone, Copy)]
pub struct FormState {
    pub engine_id: RwSignal<String>,
    pub kind: RwSignal<String>,
    pub description: RwSignal<String>,
    pub scheduled_date: RwSignal<String>,
    pub technician_id: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            engine_id: RwSignal::new(String::new()),
            kind: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            scheduled_date: RwSignal::new(String::new()),
            technician_id: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.engine_id.set(String::new());
        self.kind.set(String::new());
        self.description.set(String::new());
        self.scheduled_date.set(String::new());
        self.technician_id.set(String::new());
    }

    /// 用已有任务回填表单
    pub fn seed(&self, task: &MaintenanceTask) {
        self.engine_id.set(task.engine_id.to_string());
        self.kind.set(task.kind.clone());
        self.description.set(task.description.clone());
        self.scheduled_date
            .set(datetime_input_value(&task.scheduled_date));
        self.technician_id.set(
            task.technician_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        );
    }

    /// 校验并转换为请求载荷，技师编号留空表示暂不指派
    pub fn to_request(&self) -> Result<MaintenancePayload, String> {
        let kind = self.kind.get().trim().to_string();
        let description = self.description.get().trim().to_string();
        if kind.is_empty() || description.is_empty() {
            return Err("Type and description are required".to_string());
        }

        let engine_id: i64 = self
            .engine_id
            .get()
            .trim()
            .parse()
            .map_err(|_| "Engine ID must be a number".to_string())?;

        let scheduled_date = parse_datetime_input(&self.scheduled_date.get())
            .ok_or_else(|| "Please pick a valid scheduled date".to_string())?;

        let technician_raw = self.technician_id.get();
        let technician_id = if technician_raw.trim().is_empty() {
            None
        } else {
            Some(
                technician_raw
                    .trim()
                    .parse()
                    .map_err(|_| "Technician ID must be a number".to_string())?,
            )
        };

        Ok(MaintenancePayload {
            engine_id,
            kind,
            description,
            scheduled_date,
            technician_id,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn MaintenancePage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();
    let form = FormState::new();

    let (tasks, set_tasks) = signal(Vec::<MaintenanceTask>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (is_submitting, set_is_submitting) = signal(false);
    let editing_id = RwSignal::new(Option::<i64>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_tasks = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_maintenance().await {
                    Ok(data) => set_tasks.set(data),
                    Err(e) => logging::error!("[Maintenance] Failed to load tasks: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载
    Effect::new(move |_| load_tasks());

    let cancel_edit = move || {
        editing_id.set(None);
        form.reset();
        set_error_msg.set(None);
    };

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
            let id = editing_id.get_untracked();
            set_is_submitting.set(true);
            set_error_msg.set(None);
            spawn_local(async move {
                let result = match id {
                    Some(id) => api.update_maintenance(id, &payload).await.map(|_| ()),
                    None => api.create_maintenance(&payload).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        toast.success(if id.is_some() {
                            "Maintenance task updated."
                        } else {
                            "Maintenance task created."
                        });
                        cancel_edit();
                        load_tasks();
                    }
                    Err(e) => set_error_msg.set(Some(e)),
                }
                set_is_submitting.set(false);
            });
        }
    };

    let handle_edit = move |task: MaintenanceTask| {
        form.seed(&task);
        editing_id.set(Some(task.id));
        set_error_msg.set(None);
    };

    let handle_delete = move |id: i64| {
        if !confirm("Delete this maintenance task?") {
            return;
        }
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_maintenance(id).await {
                    Ok(()) => {
                        toast.success("Maintenance task deleted.");
                        load_tasks();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    let handle_status = move |id: i64, value: String| {
        let Some(status) = MaintenanceStatus::parse(&value) else {
            return;
        };
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.set_maintenance_status(id, status).await {
                    Ok(()) => {
                        toast.success("Status updated.");
                        load_tasks();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Maintenance planning"</h2>

            // 新增/编辑表单
            <div class="card bg-base-100 shadow">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <h3 class="card-title text-lg">
                        {move || {
                            if editing_id.get().is_some() {
                                "Edit maintenance task"
                            } else {
                                "Schedule maintenance"
                            }
                        }}
                    </h3>

                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap()}</span>
                        </div>
                    </Show>

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <div class="form-control">
                            <label for="mt-engine" class="label">
                                <span class="label-text">"Engine ID"</span>
                            </label>
                            <input
                                id="mt-engine"
                                required
                                type="number"
                                on:input=move |ev| form.engine_id.set(event_target_value(&ev))
                                prop:value=form.engine_id
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="mt-kind" class="label">
                                <span class="label-text">"Type"</span>
                            </label>
                            <input
                                id="mt-kind"
                                required
                                type="text"
                                placeholder="Hydraulic inspection"
                                on:input=move |ev| form.kind.set(event_target_value(&ev))
                                prop:value=form.kind
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="mt-date" class="label">
                                <span class="label-text">"Scheduled for"</span>
                            </label>
                            <input
                                id="mt-date"
                                required
                                type="datetime-local"
                                on:input=move |ev| form.scheduled_date.set(event_target_value(&ev))
                                prop:value=form.scheduled_date
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="mt-description" class="label">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="mt-description"
                                required
                                rows="2"
                                on:input=move |ev| form.description.set(event_target_value(&ev))
                                prop:value=form.description
                                class="textarea textarea-bordered w-full"
                            ></textarea>
                        </div>
                        <div class="form-control">
                            <label for="mt-technician" class="label">
                                <span class="label-text">"Technician ID (optional)"</span>
                            </label>
                            <input
                                id="mt-technician"
                                type="number"
                                on:input=move |ev| form.technician_id.set(event_target_value(&ev))
                                prop:value=form.technician_id
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="flex justify-end gap-2">
                        <Show when=move || editing_id.get().is_some()>
                            <button type="button" class="btn btn-ghost" on:click=move |_| cancel_edit()>
                                "Cancel"
                            </button>
                        </Show>
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || {
                                if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }
                                        .into_any()
                                } else if editing_id.get().is_some() {
                                    "Update task".into_any()
                                } else {
                                    "Create task".into_any()
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>

            // 任务列表
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
                                <th>"Type"</th>
                                <th>"Scheduled"</th>
                                <th>"Technician"</th>
                                <th>"Status"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        // 编辑会原地改动行内容，整组重建而不是按 id 复用
                        <tbody>
                            {move || tasks
                                .get()
                                .into_iter()
                                .map(|task| {
                                    let task_id = task.id;
                                    let task_status = task.status;
                                    let task_for_edit = task.clone();
                                    view! {
                                        <tr>
                                            <td>"#" {task.engine_id}</td>
                                            <td>{task.kind.clone()}</td>
                                            <td>{format_datetime(&task.scheduled_date)}</td>
                                            <td>
                                                {task
                                                    .technician_id
                                                    .map(|id| format!("#{id}"))
                                                    .unwrap_or_else(|| "-".to_string())}
                                            </td>
                                            <td>
                                                <span class=status_badge(task.status)>
                                                    {task.status.label()}
                                                </span>
                                            </td>
                                            <td>
                                                <div class="flex items-center gap-1">
                                                    <button
                                                        class="btn btn-ghost btn-xs"
                                                        on:click=move |_| handle_edit(task_for_edit.clone())
                                                    >
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-xs text-error"
                                                        on:click=move |_| handle_delete(task_id)
                                                    >
                                                        <Trash2 attr:class="h-4 w-4" />
                                                    </button>
                                                    <select
                                                        class="select select-bordered select-xs"
                                                        on:change=move |ev| {
                                                            handle_status(task_id, event_target_value(&ev))
                                                        }
                                                    >
                                                        {MaintenanceStatus::ALL
                                                            .iter()
                                                            .map(|s| {
                                                                let s = *s;
                                                                view! {
                                                                    <option
                                                                        value=s.as_str()
                                                                        selected=s == task_status
                                                                    >
                                                                        {s.label()}
                                                                    </option>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </select>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>

                    <Show when=move || tasks.get().is_empty()>
                        <div class="text-center py-8 text-base-content/60">
                            "No maintenance tasks scheduled."
                        </div>
                    </Show>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_request_parses_ids_and_dates() {
        let form = FormState::new();
        form.engine_id.set("12".to_string());
        form.kind.set("Hydraulic inspection".to_string());
        form.description.set("Check hoses and seals".to_string());
        form.scheduled_date.set("2024-07-01T08:00".to_string());

        let payload = form.to_request().unwrap();
        assert_eq!(payload.engine_id, 12);
        assert_eq!(payload.kind, "Hydraulic inspection");
        assert_eq!(payload.technician_id, None);
        assert_eq!(
            payload.scheduled_date.to_rfc3339(),
            "2024-07-01T08:00:00+00:00"
        );

        form.technician_id.set(" 4 ".to_string());
        assert_eq!(form.to_request().unwrap().technician_id, Some(4));
    }

    #[test]
    fn to_request_reports_field_errors() {
        let form = FormState::new();
        assert_eq!(
            form.to_request().unwrap_err(),
            "Type and description are required"
        );

        form.kind.set("Oil change".to_string());
        form.description.set("Drain and refill".to_string());
        form.engine_id.set("abc".to_string());
        assert_eq!(form.to_request().unwrap_err(), "Engine ID must be a number");

        form.engine_id.set("5".to_string());
        form.scheduled_date.set("not-a-date".to_string());
        assert_eq!(
            form.to_request().unwrap_err(),
            "Please pick a valid scheduled date"
        );

        form.scheduled_date.set("2024-07-01T08:00".to_string());
        form.technician_id.set("four".to_string());
        assert_eq!(
            form.to_request().unwrap_err(),
            "Technician ID must be a number"
        );
    }

    #[test]
    fn seed_roundtrips_through_request() {
        let task: MaintenanceTask = serde_json::from_value(serde_json::json!({
            "id": 9,
            "engine_id": 12,
            "type": "Track replacement",
            "description": "Replace worn tracks",
            "scheduled_date": "2024-07-01T08:00:00Z",
            "completed_date": null,
            "technician_id": 4,
            "status": "scheduled",
            "notes": null,
            "created_at": "2024-06-20T10:00:00Z"
        }))
        .unwrap();

        let form = FormState::new();
        form.seed(&task);
        let payload = form.to_request().unwrap();
        assert_eq!(payload.engine_id, task.engine_id);
        assert_eq!(payload.kind, task.kind);
        assert_eq!(payload.scheduled_date, task.scheduled_date);
        assert_eq!(payload.technician_id, Some(4));
    }
}
