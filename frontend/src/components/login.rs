//! 登录/注册页
//!
//! 单页双模式：默认登录表单，可切换到注册表单。
//! 登录成功后角色信号变化，路由服务自动跳转到对应落地页。

use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::RegisterRequest;

use crate::auth::{login, register, use_auth};
use crate::components::icons::Truck;

/// 空字符串转 None，注册表单的可选字段用
fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_auth();

    let (is_registering, set_is_registering) = signal(false);
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (address, set_address) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);

    let on_login = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_notice.set(None);

        spawn_local(async move {
            // 成功后角色信号翻转，重定向由路由服务完成
            if let Err(e) = login(&ctx, email.get_untracked(), password.get_untracked()).await {
                set_error_msg.set(Some(e));
            }
            set_is_submitting.set(false);
        });
    };

    let on_register = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if name.get().is_empty() || email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_notice.set(None);

        spawn_local(async move {
            let payload = RegisterRequest {
                name: name.get_untracked().trim().to_string(),
                email: email.get_untracked().trim().to_string(),
                password: password.get_untracked(),
                phone: optional(phone.get_untracked()),
                address: optional(address.get_untracked()),
            };
            match register(payload).await {
                Ok(()) => {
                    // 回到登录模式，邮箱保留，密码要求重新输入
                    set_notice.set(Some(
                        "Account created. You can sign in now.".to_string(),
                    ));
                    set_password.set(String::new());
                    set_is_registering.set(false);
                }
                Err(e) => set_error_msg.set(Some(e)),
            }
            set_is_submitting.set(false);
        });
    };

    let switch_mode = move |registering: bool| {
        set_is_registering.set(registering);
        set_error_msg.set(None);
        set_notice.set(None);
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Truck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"EngineRent Pro"</h1>
                        <p class="text-base-content/70">"Heavy equipment rental management"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <Show
                        when=move || !is_registering.get()
                        fallback=move || {
                            view! {
                                <form class="card-body" on:submit=on_register>
                                    <Show when=move || error_msg.get().is_some()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                                            <span>{move || error_msg.get().unwrap()}</span>
                                        </div>
                                    </Show>

                                    <div class="form-control">
                                        <label class="label" for="reg-name">
                                            <span class="label-text">"Full name"</span>
                                        </label>
                                        <input
                                            id="reg-name"
                                            type="text"
                                            on:input=move |ev| set_name.set(event_target_value(&ev))
                                            prop:value=name
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="reg-email">
                                            <span class="label-text">"Email"</span>
                                        </label>
                                        <input
                                            id="reg-email"
                                            type="email"
                                            on:input=move |ev| set_email.set(event_target_value(&ev))
                                            prop:value=email
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="reg-phone">
                                            <span class="label-text">"Phone (optional)"</span>
                                        </label>
                                        <input
                                            id="reg-phone"
                                            type="tel"
                                            on:input=move |ev| set_phone.set(event_target_value(&ev))
                                            prop:value=phone
                                            class="input input-bordered"
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="reg-address">
                                            <span class="label-text">"Address (optional)"</span>
                                        </label>
                                        <input
                                            id="reg-address"
                                            type="text"
                                            on:input=move |ev| set_address.set(event_target_value(&ev))
                                            prop:value=address
                                            class="input input-bordered"
                                        />
                                    </div>
                                    <div class="form-control">
                                        <label class="label" for="reg-password">
                                            <span class="label-text">"Password"</span>
                                        </label>
                                        <input
                                            id="reg-password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_password.set(event_target_value(&ev))
                                            prop:value=password
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>
                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                            {move || if is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> "Creating account..." }.into_any()
                                            } else {
                                                "Create account".into_any()
                                            }}
                                        </button>
                                    </div>
                                    <p class="text-center text-sm mt-2">
                                        "Already have an account? "
                                        <button
                                            type="button"
                                            class="link link-primary"
                                            on:click=move |_| switch_mode(false)
                                        >
                                            "Sign in"
                                        </button>
                                    </p>
                                </form>
                            }
                        }
                    >
                        <form class="card-body" on:submit=on_login>
                            <Show when=move || notice.get().is_some()>
                                <div role="alert" class="alert alert-success text-sm py-2">
                                    <span>{move || notice.get().unwrap()}</span>
                                </div>
                            </Show>
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <svg xmlns="http://www.w3.org/2000/svg" class="stroke-current shrink-0 h-6 w-6" fill="none" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M10 14l2-2m0 0l2-2m-2 2l-2-2m2 2l2 2m7-2a9 9 0 11-18 0 9 9 0 0118 0z" /></svg>
                                    <span>{move || error_msg.get().unwrap()}</span>
                                </div>
                            </Show>

                            <div class="form-control">
                                <label class="label" for="login-email">
                                    <span class="label-text">"Email"</span>
                                </label>
                                <input
                                    id="login-email"
                                    type="email"
                                    placeholder="you@example.com"
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="login-password">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input
                                    id="login-password"
                                    type="password"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                    } else {
                                        "Sign in".into_any()
                                    }}
                                </button>
                            </div>
                            <p class="text-center text-sm mt-2">
                                "No account yet? "
                                <button
                                    type="button"
                                    class="link link-primary"
                                    on:click=move |_| switch_mode(true)
                                >
                                    "Create one"
                                </button>
                            </p>
                            <p class="text-center text-sm text-base-content/60 mt-2">
                                "Demo admin: admin@enginerent.com / admin123"
                            </p>
                        </form>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_drops_blank_values() {
        assert_eq!(optional(String::new()), None);
        assert_eq!(optional("   ".to_string()), None);
        assert_eq!(
            optional(" 06 12 34 56 78 ".to_string()),
            Some("06 12 34 56 78".to_string())
        );
    }
}
