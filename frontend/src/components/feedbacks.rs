//! 客户评价页(管理员)
//!
//! 只读列表加删除，评价本身由客户在租用流程外部提交。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::Feedback;

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::format::format_datetime;
use crate::web::confirm::confirm;

#[component]
pub fn FeedbacksPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (feedbacks, set_feedbacks) = signal(Vec::<Feedback>::new());
    let (is_loading, set_is_loading) = signal(true);

    let load_feedbacks = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_feedbacks().await {
                    Ok(data) => set_feedbacks.set(data),
                    Err(e) => logging::error!("[Feedbacks] Failed to load feedbacks: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    Effect::new(move |_| load_feedbacks());

    let handle_delete = move |id: i64| {
        if !confirm("Delete this feedback?") {
            return;
        }
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_feedback(id).await {
                    Ok(()) => {
                        toast.success("Feedback deleted.");
                        load_feedbacks();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"Customer feedback"</h2>

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
                    when=move || !feedbacks.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-12 text-base-content/60">
                                "No feedback yet."
                            </div>
                        }
                    }
                >
                    <div class="space-y-3">
                        <For
                            each=move || feedbacks.get()
                            key=|feedback| feedback.id
                            children=move |feedback| {
                                let feedback_id = feedback.id;
                                let author = feedback
                                    .user_email
                                    .clone()
                                    .unwrap_or_else(|| format!("User #{}", feedback.user_id));
                                view! {
                                    <div class="card bg-base-100 shadow">
                                        <div class="card-body py-4">
                                            <div class="flex justify-between items-center">
                                                <span class="font-bold">{author}</span>
                                                <button
                                                    class="btn btn-ghost btn-sm text-error"
                                                    on:click=move |_| handle_delete(feedback_id)
                                                >
                                                    <Trash2 />
                                                </button>
                                            </div>
                                            <p class="text-sm text-base-content/50 italic">
                                                {format_datetime(&feedback.created_at)}
                                            </p>
                                            <p>{feedback.comment.clone()}</p>
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
