//! 浏览器原生确认框封装
//!
//! 删除等破坏性操作统一先走这里，窗口不可用时按取消处理。

/// 弹出确认框，返回用户是否点击了确认
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
