//! 设备目录页
//!
//! 所有已登录角色可浏览，筛选条件变化即重新拉取列表。
//! 管理员额外获得新增/编辑/删除入口，写操作完成后整表重拉。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{
    ENGINE_BRANDS, ENGINE_CATEGORIES, Engine, EnginePayload, EngineStatus,
};

use crate::api::EngineFilter;
use crate::auth::use_auth;
use crate::components::engine_dialog::EngineDialog;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::format::{capitalize, format_money};
use crate::web::confirm::confirm;

/// 设备状态徽章样式
fn status_badge(status: EngineStatus) -> &'static str {
    match status {
        EngineStatus::Available => "badge badge-success",
        EngineStatus::Rented => "badge badge-warning",
        EngineStatus::Maintenance => "badge badge-error",
    }
}

#[component]
pub fn EnginesPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (engines, set_engines) = signal(Vec::<Engine>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (brand, set_brand) = signal(String::new());

    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<Engine>::None);

    let is_admin = move || {
        ctx.state
            .get()
            .user
            .as_ref()
            .is_some_and(|u| u.role.is_admin())
    };

    let load_engines = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            let filter = EngineFilter {
                search: search.get_untracked(),
                category: category.get_untracked(),
                brand: brand.get_untracked(),
                ..EngineFilter::default()
            };
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_engines(&filter).await {
                    Ok(data) => set_engines.set(data),
                    Err(e) => logging::error!("[Engines] Failed to load engines: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    // 初始加载 + 筛选条件变化时重拉
    Effect::new(move |_| {
        search.track();
        category.track();
        brand.track();
        load_engines();
    });

    let handle_save = move |(id, payload): (Option<i64>, EnginePayload)| {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                let result = match id {
                    Some(id) => api.update_engine(id, &payload).await.map(|_| ()),
                    None => api.create_engine(&payload).await.map(|_| ()),
                };
                match result {
                    Ok(()) => {
                        toast.success(if id.is_some() {
                            "Engine updated."
                        } else {
                            "Engine created."
                        });
                        load_engines();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    let handle_delete = move |id: i64| {
        if !confirm("Delete this engine? This cannot be undone.") {
            return;
        }
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_engine(id).await {
                    Ok(()) => {
                        toast.success("Engine deleted.");
                        load_engines();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-bold">"Engine catalog"</h2>
                <Show when=is_admin>
                    <button
                        class="btn btn-primary gap-2"
                        on:click=move |_| {
                            editing.set(None);
                            dialog_open.set(true);
                        }
                    >
                        <Plus attr:class="h-4 w-4" /> "Add engine"
                    </button>
                </Show>
            </div>

            // 筛选栏
            <div class="card bg-base-100 shadow">
                <div class="card-body grid grid-cols-1 md:grid-cols-3 gap-4 py-4">
                    <div class="form-control">
                        <label class="label" for="engine-search">
                            <span class="label-text">"Search"</span>
                        </label>
                        <label class="input input-bordered flex items-center gap-2">
                            <Search attr:class="h-4 w-4 opacity-50" />
                            <input
                                id="engine-search"
                                type="text"
                                class="grow"
                                placeholder="Search engines..."
                                on:input=move |ev| set_search.set(event_target_value(&ev))
                                prop:value=search
                            />
                        </label>
                    </div>
                    <div class="form-control">
                        <label class="label" for="engine-category">
                            <span class="label-text">"Category"</span>
                        </label>
                        <select
                            id="engine-category"
                            class="select select-bordered"
                            on:change=move |ev| set_category.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || category.get().is_empty()>
                                "All categories"
                            </option>
                            {ENGINE_CATEGORIES
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
                    <div class="form-control">
                        <label class="label" for="engine-brand">
                            <span class="label-text">"Brand"</span>
                        </label>
                        <select
                            id="engine-brand"
                            class="select select-bordered"
                            on:change=move |ev| set_brand.set(event_target_value(&ev))
                        >
                            <option value="" selected=move || brand.get().is_empty()>
                                "All brands"
                            </option>
                            {ENGINE_BRANDS
                                .iter()
                                .map(|b| {
                                    let b = *b;
                                    view! {
                                        <option value=b selected=move || brand.get() == b>
                                            {b}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </div>
            </div>

            // 设备卡片
            <Show
                when=move || !is_loading.get() || !engines.get().is_empty()
                fallback=|| {
                    view! {
                        <div class="flex items-center justify-center h-64">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                }
            >
                // 编辑会原地改动卡片内容，整组重建而不是按 id 复用
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    {move || engines
                        .get()
                        .into_iter()
                        .map(|engine| {
                            let engine_for_edit = engine.clone();
                            view! {
                                <div class="card bg-base-100 shadow overflow-hidden">
                                    <figure class="h-48 bg-base-300">
                                        {if let Some(src) = engine.images.first().cloned() {
                                            view! {
                                                <img
                                                    src=src
                                                    alt=engine.name.clone()
                                                    class="w-full h-full object-cover"
                                                />
                                            }
                                                .into_any()
                                        } else {
                                            view! {
                                                <Truck attr:class="h-16 w-16 text-base-content/30" />
                                            }
                                                .into_any()
                                        }}
                                    </figure>
                                    <div class="card-body p-4">
                                        <div class="flex justify-between items-start">
                                            <h3 class="card-title text-lg">{engine.name.clone()}</h3>
                                            <span class=status_badge(engine.status)>
                                                {engine.status.label()}
                                            </span>
                                        </div>
                                        <p class="text-sm text-base-content/70">
                                            {engine.description.clone().unwrap_or_default()}
                                        </p>
                                        <div class="flex items-center gap-1 text-sm text-base-content/60">
                                            <MapPin attr:class="h-4 w-4" />
                                            <span>{engine.location.clone().unwrap_or_default()}</span>
                                        </div>
                                        <div class="flex justify-between items-center mt-2">
                                            <span class="text-xl font-bold text-primary">
                                                {format_money(engine.daily_rate)} "/day"
                                            </span>
                                            <Show when=is_admin>
                                                {
                                                    let engine_for_edit = engine_for_edit.clone();
                                                    let engine_id = engine.id;
                                                    view! {
                                                        <div class="flex gap-1">
                                                            <button
                                                                class="btn btn-ghost btn-xs"
                                                                on:click=move |_| {
                                                                    editing.set(Some(engine_for_edit.clone()));
                                                                    dialog_open.set(true);
                                                                }
                                                            >
                                                                <Pencil attr:class="h-4 w-4" />
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                on:click=move |_| handle_delete(engine_id)
                                                            >
                                                                <Trash2 attr:class="h-4 w-4" />
                                                            </button>
                                                        </div>
                                                    }
                                                }
                                            </Show>
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>

                <Show when=move || engines.get().is_empty()>
                    <div class="text-center py-8 text-base-content/60">
                        "No engines match your filters."
                    </div>
                </Show>
            </Show>

            <EngineDialog open=dialog_open editing=editing on_save=handle_save />
        </div>
    }
}
