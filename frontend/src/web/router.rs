//! 标签路由服务
//!
//! 封装 `window.history`，所有 History 操作都集中在此模块。
//! 是否已登录由外部信号注入：未登录时 URL 被重置到首页。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppTab;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

#[derive(Clone, Copy)]
pub struct TabRouter {
    current: ReadSignal<AppTab>,
    set_current: WriteSignal<AppTab>,
    signed_in: Signal<bool>,
}

impl TabRouter {
    fn new(signed_in: Signal<bool>) -> Self {
        let (current, set_current) = signal(AppTab::from_path(&current_path()));
        Self {
            current,
            set_current,
            signed_in,
        }
    }

    pub fn current(&self) -> ReadSignal<AppTab> {
        self.current
    }

    /// 切换标签；未登录时忽略
    pub fn navigate(&self, tab: AppTab) {
        if !self.signed_in.get_untracked() {
            log_warn!("[Router] Ignoring navigation to {} while signed out", tab);
            return;
        }
        if self.current.get_untracked() == tab {
            return;
        }
        push_history_state(tab.to_path());
        self.set_current.set(tab);
    }

    /// 浏览器后退/前进
    ///
    /// 每次进入主界面都会创建新的路由，监听器随路由一起移除。
    fn init_popstate_listener(&self) {
        let set_current = self.set_current;
        let signed_in = self.signed_in;

        let handle = window_event_listener(leptos::ev::popstate, move |_| {
            if signed_in.get_untracked() {
                set_current.set(AppTab::from_path(&current_path()));
            } else {
                let fallback = AppTab::signed_out_fallback();
                replace_history_state(fallback.to_path());
                set_current.set(fallback);
            }
        });
        on_cleanup(move || handle.remove());
    }

    /// 退出登录时把 URL 重置到首页
    ///
    /// 主界面卸载时路由随之销毁，因此同时在 cleanup 中重置。
    fn setup_sign_out_reset(&self) {
        let current = self.current;
        let set_current = self.set_current;
        let signed_in = self.signed_in;

        Effect::new(move |_| {
            if signed_in.get() {
                return;
            }
            let fallback = AppTab::signed_out_fallback();
            if current.get_untracked() != fallback {
                set_current.set(fallback);
            }
            replace_history_state(fallback.to_path());
        });

        on_cleanup(|| {
            let fallback = AppTab::signed_out_fallback();
            if current_path() != fallback.to_path() {
                replace_history_state(fallback.to_path());
                log_info!("[Router] Left the app screen, URL reset to {}", fallback);
            }
        });
    }
}

fn provide_router(signed_in: Signal<bool>) -> TabRouter {
    let router = TabRouter::new(signed_in);
    router.init_popstate_listener();
    router.setup_sign_out_reset();
    provide_context(router);
    router
}

pub fn use_router() -> TabRouter {
    use_context::<TabRouter>().expect("TabRouter not found in context. Ensure Router is provided.")
}

/// 路由器根组件
#[component]
pub fn Router(signed_in: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(signed_in);
    children()
}

/// 根据当前标签渲染视图
#[component]
pub fn RouterOutlet(matcher: fn(AppTab) -> AnyView) -> impl IntoView {
    let router = use_router();
    move || matcher(router.current().get())
}
