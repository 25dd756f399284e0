//! 技师工作台（仅技师）
//!
//! 服务端按登录技师过滤任务，这里只展示 `scheduled` 的待办项。
//! 每张卡片自带工作记录输入，完成时随请求提交。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{MaintenanceStatus, MaintenanceTask};

use crate::auth::use_auth;
use crate::components::icons::Check;
use crate::components::toast::use_toast;
use crate::format::format_datetime;

#[component]
pub fn TechnicianPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (tasks, set_tasks) = signal(Vec::<MaintenanceTask>::new());
    let (is_loading, set_is_loading) = signal(true);

    let load_tasks = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_maintenance().await {
                    Ok(data) => {
                        let pending: Vec<_> = data
                            .into_iter()
                            .filter(|t| t.status == MaintenanceStatus::Scheduled)
                            .collect();
                        set_tasks.set(pending);
                    }
                    Err(e) => logging::error!("[Technician] Failed to load tasks: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载
    Effect::new(move |_| load_tasks());

    let handle_complete = move |id: i64, notes: String| {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.complete_maintenance(id, notes.trim()).await {
                    Ok(()) => {
                        toast.success("Task marked as completed.");
                        load_tasks();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"My pending tasks"</h2>

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
                    when=move || !tasks.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-8 text-base-content/60">
                                "Nothing to do right now."
                            </div>
                        }
                    }
                >
                    <div class="space-y-4">
                        <For
                            each=move || tasks.get()
                            key=|task| task.id
                            children=move |task| {
                                let task_id = task.id;
                                // 每张卡片独立持有自己的工作记录
                                let notes = RwSignal::new(String::new());
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body space-y-3">
                                            <div class="flex items-center justify-between">
                                                <h3 class="card-title text-lg">{task.kind.clone()}</h3>
                                                <span class="badge badge-warning">
                                                    {task.status.label()}
                                                </span>
                                            </div>
                                            <div class="text-sm space-y-1">
                                                <p>
                                                    <span class="font-semibold">"Engine: "</span>
                                                    "#" {task.engine_id}
                                                </p>
                                                <p>
                                                    <span class="font-semibold">"Description: "</span>
                                                    {task.description.clone()}
                                                </p>
                                                <p>
                                                    <span class="font-semibold">"Scheduled: "</span>
                                                    {format_datetime(&task.scheduled_date)}
                                                </p>
                                            </div>

                                            <textarea
                                                placeholder="Work notes..."
                                                rows="2"
                                                on:input=move |ev| notes.set(event_target_value(&ev))
                                                prop:value=notes
                                                class="textarea textarea-bordered w-full"
                                            ></textarea>

                                            <div class="card-actions justify-end">
                                                <button
                                                    class="btn btn-success gap-2"
                                                    on:click=move |_| {
                                                        handle_complete(task_id, notes.get_untracked())
                                                    }
                                                >
                                                    <Check attr:class="h-4 w-4" /> "Mark as completed"
                                                </button>
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
