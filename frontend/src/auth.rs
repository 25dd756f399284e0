//! 认证模块
//!
//! 管理会话状态（令牌 + 已解析账户），与路由系统解耦。
//! 路由服务只拿到一个角色信号来执行守卫；携带令牌的 API 客户端
//! 放在状态里显式传递，不设置任何进程级默认请求头。

use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

use enginerent_shared::{LoginRequest, RegisterRequest, Role, User};

use crate::api::{ApiClient, backend_url};
use crate::web::TokenStore;

/// 会话状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 携带令牌的 API 客户端（仅认证成功后存在）
    pub api: Option<ApiClient>,
    /// 已解析的当前账户
    pub user: Option<User>,
    /// 页面加载时的会话恢复是否仍在进行
    pub is_loading: bool,
}

impl AuthState {
    /// 认证成功后的状态：客户端与账户成对出现
    fn established(api: ApiClient, user: User) -> Self {
        Self {
            api: Some(api),
            user: Some(user),
            is_loading: false,
        }
    }

    /// 未认证状态
    fn signed_out() -> Self {
        Self::default()
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 当前角色信号（用于路由服务注入；None 表示未认证）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.get().user.as_ref().map(|u| u.role))
    }

    /// 会话恢复进行中信号（App 在此期间挂起路由渲染）
    pub fn is_loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_loading)
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化会话：持久化令牌存在时做一次 "who am I" 恢复
///
/// 恢复失败（令牌过期/无效）执行与登出相同的清理。
pub fn init_auth(ctx: &AuthContext) {
    let Some(token) = TokenStore::load() else {
        ctx.set_state.set(AuthState::signed_out());
        return;
    };

    ctx.set_state.update(|state| state.is_loading = true);

    let set_state = ctx.set_state;
    spawn_local(async move {
        let api = ApiClient::new(&backend_url()).with_token(&token);
        match api.current_user().await {
            Ok(user) => set_state.set(AuthState::established(api, user)),
            Err(err) => {
                logging::warn!("[Auth] Session restore failed: {err}");
                TokenStore::clear();
                set_state.set(AuthState::signed_out());
            }
        }
    });
}

/// 登录：换取令牌、解析账户、持久化、建立会话
///
/// # Returns
/// 失败时返回服务端的错误说明，会话保持未认证
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), String> {
    let anonymous = ApiClient::new(&backend_url());
    let token = anonymous
        .login(&LoginRequest { email, password })
        .await?;

    let api = ApiClient::new(&backend_url()).with_token(&token.access_token);
    let user = api.current_user().await?;

    TokenStore::save(&token.access_token);
    ctx.set_state.set(AuthState::established(api, user));
    Ok(())
}

/// 注册新账户；成功与否都不改变会话状态，用户仍需登录
pub async fn register(payload: RegisterRequest) -> Result<(), String> {
    let anonymous = ApiClient::new(&backend_url());
    anonymous.register(&payload).await
}

/// 注销并清除状态
///
/// 导航由路由服务监听角色信号自动处理。
pub fn logout(ctx: &AuthContext) {
    TokenStore::clear();
    ctx.set_state.set(AuthState::signed_out());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_user(role: Role) -> User {
        User {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@enginerent.com".to_string(),
            phone: None,
            address: None,
            role,
            is_verified: true,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn established_state_holds_client_and_user() {
        let api = ApiClient::new("http://backend.test").with_token("tok");
        let state = AuthState::established(api, sample_user(Role::Admin));

        assert!(state.api.is_some());
        assert!(!state.is_loading);
        assert_eq!(state.user.as_ref().map(|u| u.role), Some(Role::Admin));
    }

    #[test]
    fn signed_out_state_clears_everything() {
        let state = AuthState::signed_out();
        assert!(state.api.is_none());
        assert!(state.user.is_none());
        assert!(!state.is_loading);
    }
}
