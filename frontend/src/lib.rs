//! UdeM Campus Connect 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `controller`: 顶层屏幕状态机（欢迎 / 登录 / 创建档案 / 主界面）
//! - `session`: LocalStorage 中的会话数据
//! - `api`: 后端 REST 客户端
//! - `web::route` / `web::router`: 主界面内的标签路由
//! - `components`: UI 组件层

// 日志宏：浏览器中输出到 console，原生测试中输出到 stdout/stderr
#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}
#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

mod api;
mod config;
mod context;
mod controller;
mod error;
mod i18n;
mod session;
mod components {
    pub mod challenges;
    pub mod home;
    pub mod login;
    pub mod matches;
    pub mod onboarding;
    pub mod placeholder;
    pub mod profile;
    pub mod shell;
    pub mod welcome;
}
pub(crate) mod web;

use campus_connect_shared::LanguageCode;
use leptos::prelude::*;

use crate::api::CampusApi;
use crate::components::login::LoginPage;
use crate::components::onboarding::OnboardingPage;
use crate::components::shell::AppShell;
use crate::components::welcome::WelcomePage;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::controller::{Screen, ScreenController};
use crate::i18n::{Key, t};
use crate::session::Session;
use crate::web::BrowserStorage;

/// 根据控制器的当前屏幕返回视图
fn screen_matcher(screen: Screen) -> AnyView {
    match screen {
        Screen::Loading => view! {
            <div class="flex flex-col items-center justify-center min-h-screen bg-base-200 gap-4">
                <span class="loading loading-spinner loading-lg text-primary"></span>
                <p class="text-base-content/70">{t(LanguageCode::default(), Key::Loading)}</p>
            </div>
        }
        .into_any(),
        Screen::Welcome => view! { <WelcomePage /> }.into_any(),
        Screen::Login => view! { <LoginPage /> }.into_any(),
        Screen::Onboarding => view! { <OnboardingPage /> }.into_any(),
        Screen::App => view! { <AppShell /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 组装控制器（会话存储 + 后端客户端）
    let config = AppConfig::from_build_env();
    log_info!("[App] API base URL: {}", config.api_base_url);
    let controller = ScreenController::new(
        Session::new(BrowserStorage),
        CampusApi::from_config(&config),
        &config,
    );

    // 2. 提供上下文
    let ctx = AppContext::new(controller);
    provide_context(ctx);

    // 3. 根据缓存决定首屏
    ctx.apply(|c| c.initialize());

    let screen = ctx.screen_signal();
    move || screen_matcher(screen.get())
}
