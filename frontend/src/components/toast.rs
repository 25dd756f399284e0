//! 全局通知 (Toast) 组件
//!
//! 管理后台所有页面共用一个通知通道：
//! - `ToastContext`: 消息信号对，(消息内容, 是否出错)
//! - `ToastHost`: 渲染角标通知，3 秒后自动消失

use leptos::prelude::*;

/// 通知上下文
///
/// 通过 Context 注入，任意页面可调用 `success` / `error` 发送通知。
#[derive(Clone, Copy)]
pub struct ToastContext {
    message: ReadSignal<Option<(String, bool)>>,
    set_message: WriteSignal<Option<(String, bool)>>,
}

impl ToastContext {
    pub fn new() -> Self {
        let (message, set_message) = signal(Option::<(String, bool)>::None);
        Self {
            message,
            set_message,
        }
    }

    /// 发送成功通知
    pub fn success(&self, text: impl Into<String>) {
        self.set_message.set(Some((text.into(), false)));
    }

    /// 发送错误通知
    pub fn error(&self, text: impl Into<String>) {
        self.set_message.set(Some((text.into(), true)));
    }
}

/// 创建通知上下文并注入 Context
pub fn provide_toast() -> ToastContext {
    let ctx = ToastContext::new();
    provide_context(ctx);
    ctx
}

/// 获取通知上下文
///
/// # Panics
/// 在 `provide_toast` 之前调用会 panic。
pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}

/// 通知渲染组件，挂在后台布局里
#[component]
pub fn ToastHost() -> impl IntoView {
    let ctx = use_toast();
    let message = ctx.message;
    let set_message = ctx.set_message;

    // 3秒后清除通知
    Effect::new(move |_| {
        if message.get().is_some() {
            set_timeout(
                move || set_message.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let (_, is_err) = message.get().unwrap();
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || message.get().unwrap().0}</span>
                </div>
            </div>
        </Show>
    }
}
