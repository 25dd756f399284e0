//! 会话令牌持久化
//!
//! 使用 `web_sys::Storage` 直接读写浏览器 LocalStorage。
//! 整个应用只持久化一个键：裸 token 字符串，键不存在即未认证。

use enginerent_shared::TOKEN_STORAGE_KEY;

/// 浏览器本地存储中的会话令牌
pub struct TokenStore;

impl TokenStore {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 读取已持久化的令牌
    ///
    /// # 返回
    /// - `Some(String)` 存在可恢复的会话
    /// - `None` 未认证或存储不可用
    pub fn load() -> Option<String> {
        Self::storage()?.get_item(TOKEN_STORAGE_KEY).ok()?
    }

    /// 持久化令牌，登录成功后调用
    pub fn save(token: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(TOKEN_STORAGE_KEY, token).ok())
            .is_some()
    }

    /// 清除令牌，登出或会话失效时调用
    pub fn clear() -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(TOKEN_STORAGE_KEY).ok())
            .is_some()
    }
}
