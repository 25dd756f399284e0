//! 设备新增/编辑对话框
//!
//! 表单状态整合为 [`FormState`] 结构体，负责持有、回填、重置与
//! 到请求载荷的转换。图片与规格参数没有编辑界面，编辑时原样带回，
//! 避免覆盖服务端已有数据。

use leptos::prelude::*;

use enginerent_shared::{ENGINE_CATEGORIES, Engine, EnginePayload, EngineStatus};

use crate::components::icons::X;
use crate::format::capitalize;

/// 设备表单状态
///
/// 字段全部是 `RwSignal`，结构体实现 `Copy`，可直接在闭包间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub category: RwSignal<String>,
    pub brand: RwSignal<String>,
    pub daily_rate: RwSignal<String>,
    pub status: RwSignal<EngineStatus>,
    pub location: RwSignal<String>,
    images: RwSignal<Vec<String>>,
    specifications: RwSignal<serde_json::Map<String, serde_json::Value>>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            brand: RwSignal::new(String::new()),
            daily_rate: RwSignal::new(String::new()),
            status: RwSignal::new(EngineStatus::Available),
            location: RwSignal::new(String::new()),
            images: RwSignal::new(Vec::new()),
            specifications: RwSignal::new(serde_json::Map::new()),
        }
    }

    /// 重置表单到新增模式的初始状态
    pub fn reset(&self) {
        self.name.set(String::new());
        self.description.set(String::new());
        self.category.set(String::new());
        self.brand.set(String::new());
        self.daily_rate.set(String::new());
        self.status.set(EngineStatus::Available);
        self.location.set(String::new());
        self.images.set(Vec::new());
        self.specifications.set(serde_json::Map::new());
    }

    /// 用已有设备回填表单，进入编辑模式
    pub fn seed(&self, engine: &Engine) {
        self.name.set(engine.name.clone());
        self.description
            .set(engine.description.clone().unwrap_or_default());
        self.category.set(engine.category.clone());
        self.brand.set(engine.brand.clone());
        self.daily_rate.set(engine.daily_rate.to_string());
        self.status.set(engine.status);
        self.location
            .set(engine.location.clone().unwrap_or_default());
        self.images.set(engine.images.clone());
        self.specifications.set(engine.specifications.clone());
    }

    /// 校验并转换为请求载荷
    pub fn to_request(&self) -> Result<EnginePayload, String> {
        let name = self.name.get().trim().to_string();
        let category = self.category.get();
        let brand = self.brand.get().trim().to_string();
        if name.is_empty() || category.is_empty() || brand.is_empty() {
            return Err("Name, category and brand are required".to_string());
        }

        let daily_rate: f64 = self
            .daily_rate
            .get()
            .trim()
            .parse()
            .map_err(|_| "Daily rate must be a number".to_string())?;
        if daily_rate < 0.0 {
            return Err("Daily rate cannot be negative".to_string());
        }

        let description = self.description.get().trim().to_string();
        let location = self.location.get().trim().to_string();

        Ok(EnginePayload {
            name,
            description: (!description.is_empty()).then_some(description),
            category,
            brand,
            daily_rate,
            status: self.status.get(),
            location: (!location.is_empty()).then_some(location),
            images: self.images.get(),
            specifications: self.specifications.get(),
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn EngineDialog(
    /// 对话框开关
    open: RwSignal<bool>,
    /// None 为新增，Some 为编辑
    editing: RwSignal<Option<Engine>>,
    #[prop(into)] on_save: Callback<(Option<i64>, EnginePayload)>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let form = FormState::new();
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

    // 打开时按模式回填或清空
    Effect::new(move |_| {
        if open.get() {
            match editing.get() {
                Some(engine) => form.seed(&engine),
                None => form.reset(),
            }
            set_error_msg.set(None);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.to_request() {
            Ok(payload) => {
                let id = editing.get_untracked().map(|e| e.id);
                on_save.run((id, payload));
                open.set(false);
            }
            Err(e) => set_error_msg.set(Some(e)),
        }
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box max-w-2xl">
                <div class="flex items-center justify-between">
                    <h3 class="font-bold text-lg">
                        {move || {
                            if editing.get().is_some() { "Edit engine" } else { "Add engine" }
                        }}
                    </h3>
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

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="engine-name" class="label">
                                <span class="label-text">"Name"</span>
                            </label>
                            <input
                                id="engine-name"
                                required
                                type="text"
                                placeholder="CAT 320 Excavator"
                                on:input=move |ev| form.name.set(event_target_value(&ev))
                                prop:value=form.name
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="engine-brand" class="label">
                                <span class="label-text">"Brand"</span>
                            </label>
                            <input
                                id="engine-brand"
                                required
                                type="text"
                                placeholder="Caterpillar"
                                on:input=move |ev| form.brand.set(event_target_value(&ev))
                                prop:value=form.brand
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="form-control">
                        <label for="engine-description" class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea
                            id="engine-description"
                            rows="3"
                            on:input=move |ev| form.description.set(event_target_value(&ev))
                            prop:value=form.description
                            class="textarea textarea-bordered w-full"
                        ></textarea>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Category"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                required
                                on:change=move |ev| form.category.set(event_target_value(&ev))
                            >
                                <option value="" selected=move || form.category.get().is_empty()>
                                    "Select a category"
                                </option>
                                {ENGINE_CATEGORIES
                                    .iter()
                                    .map(|c| {
                                        let c = *c;
                                        view! {
                                            <option
                                                value=c
                                                selected=move || form.category.get() == c
                                            >
                                                {capitalize(c)}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form-control">
                            <label class="label">
                                <span class="label-text">"Status"</span>
                            </label>
                            <select
                                class="select select-bordered w-full"
                                on:change=move |ev| {
                                    if let Some(status) = EngineStatus::parse(&event_target_value(&ev)) {
                                        form.status.set(status);
                                    }
                                }
                            >
                                {EngineStatus::ALL
                                    .iter()
                                    .map(|s| {
                                        let s = *s;
                                        view! {
                                            <option
                                                value=s.as_str()
                                                selected=move || form.status.get() == s
                                            >
                                                {s.label()}
                                            </option>
                                        }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>

                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="engine-rate" class="label">
                                <span class="label-text">"Daily rate (€)"</span>
                            </label>
                            <input
                                id="engine-rate"
                                required
                                type="number"
                                min="0"
                                step="0.01"
                                on:input=move |ev| form.daily_rate.set(event_target_value(&ev))
                                prop:value=form.daily_rate
                                class="input input-bordered w-full"
                            />
                        </div>
                        <div class="form-control">
                            <label for="engine-location" class="label">
                                <span class="label-text">"Location"</span>
                            </label>
                            <input
                                id="engine-location"
                                type="text"
                                placeholder="Lyon depot"
                                on:input=move |ev| form.location.set(event_target_value(&ev))
                                prop:value=form.location
                                class="input input-bordered w-full"
                            />
                        </div>
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary">
                            {move || if editing.get().is_some() { "Save changes" } else { "Create engine" }}
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

    fn sample_engine() -> Engine {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "CAT 320",
            "description": "Tracked excavator",
            "category": "excavator",
            "brand": "Caterpillar",
            "daily_rate": 450.0,
            "status": "rented",
            "location": "Lyon depot",
            "images": ["https://cdn.example.com/cat320.jpg"],
            "specifications": {"weight_tons": 20},
            "created_at": "2024-05-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn to_request_requires_mandatory_fields() {
        let form = FormState::new();
        assert!(form.to_request().is_err());

        form.name.set("CAT 320".to_string());
        form.category.set("excavator".to_string());
        form.brand.set("Caterpillar".to_string());
        form.daily_rate.set("abc".to_string());
        assert_eq!(
            form.to_request().unwrap_err(),
            "Daily rate must be a number"
        );

        form.daily_rate.set("-10".to_string());
        assert_eq!(
            form.to_request().unwrap_err(),
            "Daily rate cannot be negative"
        );

        form.daily_rate.set("450".to_string());
        let payload = form.to_request().unwrap();
        assert_eq!(payload.name, "CAT 320");
        assert_eq!(payload.daily_rate, 450.0);
        assert_eq!(payload.status, EngineStatus::Available);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn seed_then_request_preserves_hidden_fields() {
        let form = FormState::new();
        form.seed(&sample_engine());

        let payload = form.to_request().unwrap();
        assert_eq!(payload.status, EngineStatus::Rented);
        assert_eq!(payload.images, vec!["https://cdn.example.com/cat320.jpg"]);
        assert_eq!(
            payload.specifications.get("weight_tons"),
            Some(&serde_json::json!(20))
        );
        assert_eq!(payload.location.as_deref(), Some("Lyon depot"));
    }

    #[test]
    fn reset_clears_seeded_state() {
        let form = FormState::new();
        form.seed(&sample_engine());
        form.reset();

        assert!(form.name.get().is_empty());
        assert_eq!(form.status.get(), EngineStatus::Available);
        assert!(form.to_request().is_err());
    }
}
