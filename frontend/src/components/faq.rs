//! FAQ 浏览页
//!
//! 条目按类别分组，组内按 position 升序，折叠面板展示。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::FaqEntry;

use crate::auth::use_auth;

/// 没有类别的条目归入该组
const DEFAULT_CATEGORY: &str = "General";

/// 按类别分组并排序，类别按字母序、组内按 position 再按 id
fn group_entries(mut entries: Vec<FaqEntry>) -> Vec<(String, Vec<FaqEntry>)> {
    entries.sort_by(|a, b| (a.position, a.id).cmp(&(b.position, b.id)));

    let mut groups: Vec<(String, Vec<FaqEntry>)> = Vec::new();
    for entry in entries {
        let category = entry
            .category
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        match groups.iter_mut().find(|(name, _)| *name == category) {
            Some((_, group)) => group.push(entry),
            None => groups.push((category, vec![entry])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    groups
}

#[component]
pub fn FaqPage() -> impl IntoView {
    let ctx = use_auth();

    let (groups, set_groups) = signal(Vec::<(String, Vec<FaqEntry>)>::new());
    let (is_loading, set_is_loading) = signal(true);

    let load_faq = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_faq().await {
                    Ok(data) => set_groups.set(group_entries(data)),
                    Err(e) => logging::error!("[Faq] Failed to load entries: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    Effect::new(move |_| load_faq());

    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            <h2 class="text-2xl font-bold">"Frequently asked questions"</h2>

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
                    when=move || !groups.get().is_empty()
                    fallback=|| {
                        view! {
                            <div class="text-center py-12 text-base-content/60">
                                "No questions yet."
                            </div>
                        }
                    }
                >
                    <For
                        each=move || groups.get()
                        key=|(category, entries)| (category.clone(), entries.len())
                        children=move |(category, entries)| {
                            view! {
                                <div class="space-y-2">
                                    <h3 class="text-lg font-semibold border-b border-base-300 pb-2">
                                        {category}
                                    </h3>
                                    {entries
                                        .into_iter()
                                        .map(|entry| {
                                            view! {
                                                <div class="collapse collapse-arrow bg-base-100 shadow">
                                                    <input type="checkbox" />
                                                    <div class="collapse-title font-medium">
                                                        {entry.question}
                                                    </div>
                                                    <div class="collapse-content text-base-content/70">
                                                        <p>{entry.answer}</p>
                                                    </div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                        }
                    />
                </Show>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, category: Option<&str>, position: i32) -> FaqEntry {
        FaqEntry {
            id,
            question: format!("Q{id}"),
            answer: format!("A{id}"),
            category: category.map(str::to_string),
            position,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn groups_sorted_by_category_then_position() {
        let groups = group_entries(vec![
            entry(1, Some("Billing"), 2),
            entry(2, Some("Account"), 1),
            entry(3, Some("Billing"), 1),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Account");
        assert_eq!(groups[1].0, "Billing");
        let billing: Vec<i64> = groups[1].1.iter().map(|e| e.id).collect();
        assert_eq!(billing, vec![3, 1]);
    }

    #[test]
    fn blank_category_falls_back_to_general() {
        let groups = group_entries(vec![entry(1, None, 0), entry(2, Some("  "), 0)]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, DEFAULT_CATEGORY);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn equal_positions_keep_id_order() {
        let groups = group_entries(vec![
            entry(9, Some("Rental"), 0),
            entry(4, Some("Rental"), 0),
        ]);

        let ids: Vec<i64> = groups[0].1.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 9]);
    }
}
