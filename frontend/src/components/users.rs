//! 账户管理页(管理员)
//!
//! 用户列表支持启停验证状态与删除，下方表单直接开新账户。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{CreateUserRequest, Role, User};

use crate::auth::use_auth;
use crate::components::icons::*;
use crate::components::toast::use_toast;
use crate::web::confirm::confirm;

#[derive(Clone, Copy)]
struct FormState {
    name: RwSignal<String>,
    email: RwSignal<String>,
    password: RwSignal<String>,
    phone: RwSignal<String>,
    address: RwSignal<String>,
    role: RwSignal<Role>,
}

impl FormState {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            role: RwSignal::new(Role::Client),
        }
    }

    fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
        self.phone.set(String::new());
        self.address.set(String::new());
        self.role.set(Role::Client);
    }

    fn to_request(&self) -> Result<CreateUserRequest, String> {
        let name = self.name.get_untracked().trim().to_string();
        let email = self.email.get_untracked().trim().to_string();
        let password = self.password.get_untracked();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err("Name, email and password are required".to_string());
        }

        let phone = self.phone.get_untracked().trim().to_string();
        let address = self.address.get_untracked().trim().to_string();
        Ok(CreateUserRequest {
            name,
            email,
            password,
            phone: (!phone.is_empty()).then_some(phone),
            address: (!address.is_empty()).then_some(address),
            role: self.role.get_untracked(),
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_auth();
    let toast = use_toast();

    let (users, set_users) = signal(Vec::<User>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let form = FormState::new();

    let load_users = move || {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            set_is_loading.set(true);
            spawn_local(async move {
                match api.list_users().await {
                    Ok(data) => set_users.set(data),
                    Err(e) => logging::error!("[Users] Failed to load users: {e}"),
                }
                set_is_loading.set(false);
            });
        }
    };

    Effect::new(move |_| load_users());

    let handle_toggle = move |id: i64| {
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.toggle_user_verify(id).await {
                    Ok(()) => {
                        toast.success("User updated.");
                        load_users();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
    };

    let handle_delete = move |id: i64| {
        if !confirm("Delete this user? This cannot be undone.") {
            return;
        }
        let state = ctx.state.get_untracked();
        if let Some(api) = state.api.as_ref() {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_user(id).await {
                    Ok(()) => {
                        toast.success("User deleted.");
                        load_users();
                    }
                    Err(e) => toast.error(e),
                }
            });
        }
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
            set_is_submitting.set(true);
            spawn_local(async move {
                match api.create_user(&payload).await {
                    Ok(_) => {
                        toast.success("User created.");
                        form.reset();
                        load_users();
                    }
                    Err(e) => toast.error(e),
                }
                set_is_submitting.set(false);
            });
        }
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-bold">"User accounts"</h2>

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
                <div class="card bg-base-100 shadow">
                    <div class="card-body p-0 overflow-x-auto">
                        <table class="table table-zebra">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Phone"</th>
                                    <th>"Role"</th>
                                    <th>"Status"</th>
                                    <th class="text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || users.get()
                                    key=|user| (user.id, user.is_verified)
                                    children=move |user| {
                                        let user_id = user.id;
                                        let is_verified = user.is_verified;
                                        view! {
                                            <tr>
                                                <td class="font-medium">{user.name.clone()}</td>
                                                <td>{user.email.clone()}</td>
                                                <td>
                                                    {user
                                                        .phone
                                                        .clone()
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td>{user.role.label()}</td>
                                                <td>
                                                    <span class=if is_verified {
                                                        "badge badge-success"
                                                    } else {
                                                        "badge badge-warning"
                                                    }>
                                                        {if is_verified { "Verified" } else { "Pending" }}
                                                    </span>
                                                </td>
                                                <td class="text-right">
                                                    <button
                                                        class="btn btn-ghost btn-xs"
                                                        on:click=move |_| handle_toggle(user_id)
                                                    >
                                                        {if is_verified { "Deactivate" } else { "Activate" }}
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-xs text-error"
                                                        on:click=move |_| handle_delete(user_id)
                                                    >
                                                        <Trash2 />
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </Show>

            // 开户表单
            <div class="card bg-base-100 shadow">
                <form class="card-body space-y-4" on:submit=on_submit>
                    <h3 class="card-title text-lg">"Add a new user"</h3>

                    <Show when=move || error.get().is_some()>
                        <div class="alert alert-error py-2">
                            <span>{move || error.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <input
                            required
                            type="text"
                            placeholder="Name"
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                            prop:value=form.name
                            class="input input-bordered w-full"
                        />
                        <input
                            required
                            type="email"
                            placeholder="Email"
                            on:input=move |ev| form.email.set(event_target_value(&ev))
                            prop:value=form.email
                            class="input input-bordered w-full"
                        />
                        <input
                            type="text"
                            placeholder="Phone (optional)"
                            on:input=move |ev| form.phone.set(event_target_value(&ev))
                            prop:value=form.phone
                            class="input input-bordered w-full"
                        />
                        <input
                            type="text"
                            placeholder="Address (optional)"
                            on:input=move |ev| form.address.set(event_target_value(&ev))
                            prop:value=form.address
                            class="input input-bordered w-full"
                        />
                        <select
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                if let Some(role) = Role::parse(&event_target_value(&ev)) {
                                    form.role.set(role);
                                }
                            }
                        >
                            {Role::ALL
                                .iter()
                                .map(|r| {
                                    let r = *r;
                                    view! {
                                        <option
                                            value=r.as_str()
                                            selected=move || form.role.get() == r
                                        >
                                            {r.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <input
                            required
                            type="password"
                            placeholder="Password"
                            on:input=move |ev| form.password.set(event_target_value(&ev))
                            prop:value=form.password
                            class="input input-bordered w-full"
                        />
                    </div>

                    <div class="flex justify-end">
                        <button type="submit" disabled=move || is_submitting.get() class="btn btn-primary">
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                            } else {
                                view! { <Plus /> "Create user" }.into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_request_drops_blank_optionals() {
        let form = FormState::new();
        form.name.set("Jane Doe".to_string());
        form.email.set("jane@example.com".to_string());
        form.password.set("hunter2".to_string());
        form.phone.set("  ".to_string());
        form.role.set(Role::Technician);

        let payload = form.to_request().unwrap();
        assert_eq!(payload.phone, None);
        assert_eq!(payload.address, None);
        assert_eq!(payload.role, Role::Technician);
    }

    #[test]
    fn to_request_requires_password() {
        let form = FormState::new();
        form.name.set("Jane Doe".to_string());
        form.email.set("jane@example.com".to_string());

        let err = form.to_request().unwrap_err();
        assert_eq!(err, "Name, email and password are required");
    }

    #[test]
    fn reset_returns_role_to_client() {
        let form = FormState::new();
        form.role.set(Role::Admin);
        form.name.set("someone".to_string());

        form.reset();

        assert_eq!(form.role.get_untracked(), Role::Client);
        assert!(form.name.get_untracked().is_empty());
    }
}
