//! FAQ 维护页(管理员)
//!
//! 页内表单新建或编辑条目，列表行内提供编辑与删除。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{FaqEntry, FaqPayload};

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::web::confirm::confirm;

/// 表单字段集合，整体 Copy 方便闭包里到处传
#[derive(Clone, Copy)]
struct FormState {
    question: RwSignal<String>,
    answer: RwSignal<String>,
    category: RwSignal<String>,
    position: RwSignal<String>,
}

impl FormState {
    fn new() -> Self {
        Self {
            question: RwSignal::new(String::new()),
            answer: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            position: RwSignal::new("0".to_string()),
        }
    }

    fn reset(&self) {
        self.question.set(String::new());
        self.answer.set(String::new());
        self.category.set(String::new());
        self.position.set("0".to_string());
    }

    fn seed(&self, entry: &FaqEntry) {
        self.question.set(entry.question.clone());
        self.answer.set(entry.answer.clone());
        self.category
            .set(entry.category.clone().unwrap_or_default());
        self.position.set(entry.position.to_string());
    }

    fn to_request(&self) -> Result<FaqPayload, String> {
        let question = self.question.get_untracked().trim().to_string();
        let answer = self.answer.get_untracked().trim().to_string();
        if question.is_empty() || answer.is_empty() {
            return Err("Question and answer are required".to_string());
        }

        let position_raw = self.position.get_untracked();
        let position_raw = position_raw.trim();
        let position = if position_raw.is_empty() {
            0
        } else {
            position_raw
                .parse::<i32>()
                .map_err(|_| "Position must be a number".to_string())?
        };

        let category = self.category.get_untracked().trim().to_string();
        Ok(FaqPayload {
            question,
            answer,
            category: (!category.is_empty()).then_some(category),
            position,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn FaqManagerPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (entries, set_entries) = signal(Vec::<FaqEntry>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let editing_id = RwSignal::new(Option::<i64>::None);
    let form = FormState::new();

    let load_entries = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_faq().await {
                    Ok(data) => set_entries.set(data),
                    Err(e) => logging::error!("[FaqManager] Failed to load entries: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    Effect::new(move |_| load_entries());

    let cancel_edit = move |_| {
        editing_id.set(None);
        form.reset();
        set_error.set(None);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match form.to_request() {
            Ok(payload) => payload,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        set_error.set(None);

        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            let id = editing_id.get_untracked();
            set_is_submitting.set(true);
            spawn_local(async move {
                let result = match id {
                    Some(id) => api.update_faq(id, &payload).await.map(|_| ()),
                    None => api.create_faq(&payload).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        toast.success(if id.is_some() {
                            "Entry updated."
                        } else {
                            "Entry added."
                        });
                        editing_id.set(None);
                        form.reset();
                        load_entries();
                    }
                    Err(e) => toast.error(e),
                }
                set_is_submitting.set(false);
            });
        }
    };

    let handle_edit = move |entry: &FaqEntry| {
        editing_id.set(Some(entry.id));
        form.seed(entry);
        set_error.set(None);
    };

    let handle_delete = move |id: i64| {
        if !confirm("Delete this entry?") {
            return;
        }
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_faq(id).await {
                    Ok(()) => {
                        toast.success("Entry deleted.");
                        load_entries();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Manage FAQ"</h2>

            <div class="card bg-base-100 shadow">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <h3 class="card-title text-lg">
                        {move || if editing_id.get().is_some() {
                            "Edit entry"
                        } else {
                            "New entry"
                        }}
                    </h3>

                    <Show when=move || error.get().is_some()>
                        <div class="alert alert-error py-2">
                            <span>{move || error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Question"</span>
                        </label>
                        <input
                            required
                            type="text"
                            on:input=move |ev| form.question.set(event_target_value(&ev))
                            prop:value=form.question
                            class="input input-bordered w-full"
                        />
                    </div>
                    <div class="form-control">
                        <label class="label">
                            <span class="label-text">"Answer"</span>
                        </label>
                        <textarea
                            required
                            rows="3"
                            on:input=move |ev| form.answer.set(event_target_value(&ev))
                            prop:value=form.answer
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                    </div>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Category"</span>
                            </label>
                            <input
                                type="text"
                                placeholder="Billing"
                                on:input=move |ev| form.category.set(event_target_value(&ev))
                                prop:value=form.category
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Position"</span>
                            </label>
                            <input
                                type="number"
                                on:input=move |ev| form.position.set(event_target_value(&ev))
                                prop:value=form.position
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="flex justify-end gap-2">
                        <Show when=move || editing_id.get().is_some()>
                            <button type="button" class="btn btn-ghost" on:click=cancel_edit>
                                "Cancel"
                            </button>
                        </Show>
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else if editing_id.get().is_some() {
                                "Update entry".into_any()
                            } else {
                                "Add entry".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>

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
                // 编辑会原地改动条目内容，整组重建而不是按 id 复用
                <div class="space-y-3">
                    {move || entries
                        .get()
                        .into_iter()
                        .map(|entry| {
                            let entry_id = entry.id;
                            let edit_source = entry.clone();
                            view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body py-4 flex-row justify-between items-start">
                                        <div>
                                            <p class="font-bold">{entry.question.clone()}</p>
                                            <p class="text-base-content/70">{entry.answer.clone()}</p>
                                            <p class="text-sm text-base-content/50">
                                                {entry
                                                    .category
                                                    .clone()
                                                    .unwrap_or_else(|| "General".to_string())}
                                                " · position " {entry.position}
                                            </p>
                                        </div>
                                        <div class="flex gap-2">
                                            <button
                                                class="btn btn-ghost btn-sm"
                                                on:click=move |_| handle_edit(&edit_source)
                                            >
                                                <Pencil />
                                            </button>
                                            <button
                                                class="btn btn-ghost btn-sm text-error"
                                                on:click=move |_| handle_delete(entry_id)
                                            >
                                                <Trash2 />
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn to_request_trims_and_drops_blank_category() {
        let form = FormState::new();
        form.question.set("  How do I pay?  ".to_string());
        form.answer.set("Through the checkout page.".to_string());
        form.category.set("   ".to_string());
        form.position.set(String::new());

        let payload = form.to_request().unwrap();
        assert_eq!(payload.question, "How do I pay?");
        assert_eq!(payload.category, None);
        assert_eq!(payload.position, 0);
    }

    #[test]
    fn to_request_requires_answer() {
        let form = FormState::new();
        form.question.set("Only a question".to_string());

        let err = form.to_request().unwrap_err();
        assert_eq!(err, "Question and answer are required");
    }

    #[test]
    fn to_request_rejects_non_numeric_position() {
        let form = FormState::new();
        form.question.set("Q".to_string());
        form.answer.set("A".to_string());
        form.position.set("first".to_string());

        let err = form.to_request().unwrap_err();
        assert_eq!(err, "Position must be a number");
    }

    #[test]
    fn seed_fills_every_field() {
        let entry = FaqEntry {
            id: 7,
            question: "What are the opening hours?".to_string(),
            answer: "8am to 6pm on weekdays.".to_string(),
            category: Some("Rental".to_string()),
            position: 3,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        };

        let form = FormState::new();
        form.seed(&entry);

        assert_eq!(form.question.get_untracked(), entry.question);
        assert_eq!(form.category.get_untracked(), "Rental");
        assert_eq!(form.position.get_untracked(), "3");
    }
}
