//! 主界面外壳
//!
//! 顶部栏、底部导航和标签路由。渲染时执行会话自检，
//! 并提供本次访问内的 `ConnectionBook`。

use leptos::prelude::*;

use crate::components::challenges::ChallengesPage;
use crate::components::home::HomePage;
use crate::components::matches::{ConnectionBook, MatchesPage};
use crate::components::placeholder::PlaceholderPage;
use crate::components::profile::ProfilePage;
use crate::context::use_app;
use crate::i18n::{Key, t};
use crate::web::route::AppTab;
use crate::web::router::{Router, RouterOutlet, use_router};

fn tab_matcher(tab: AppTab) -> AnyView {
    match tab {
        AppTab::Home => view! { <HomePage /> }.into_any(),
        AppTab::Matches => view! { <MatchesPage /> }.into_any(),
        AppTab::Challenges => view! { <ChallengesPage /> }.into_any(),
        AppTab::Profile => view! { <ProfilePage /> }.into_any(),
        AppTab::Map | AppTab::Forum | AppTab::Marketplace => {
            view! { <PlaceholderPage tab=tab /> }.into_any()
        }
    }
}

/// 切换界面语言
#[component]
pub fn LanguageToggle() -> impl IntoView {
    let ctx = use_app();
    let on_click = move |_| {
        ctx.apply(|c| c.set_language(c.language().toggle()));
    };

    view! {
        <button class="btn btn-sm btn-ghost" on:click=on_click>
            {move || ctx.state.with(|s| s.language.toggle().as_str().to_uppercase())}
        </button>
    }
}

#[component]
fn BottomNav() -> impl IntoView {
    let ctx = use_app();
    let router = use_router();
    let lang = move || ctx.state.with(|s| s.language);

    let items = AppTab::NAV
        .into_iter()
        .map(|tab| {
            let active = move || router.current().get() == tab;
            view! {
                <button
                    class=move || if active() { "active text-primary" } else { "" }
                    on:click=move |_| router.navigate(tab)
                >
                    <span class="text-lg">{tab.icon()}</span>
                    <span class="btm-nav-label text-xs">{move || t(lang(), tab.label())}</span>
                </button>
            }
        })
        .collect_view();

    view! { <div class="btm-nav btm-nav-sm bg-base-100 border-t">{items}</div> }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let ctx = use_app();
    let lang = move || ctx.state.with(|s| s.language);

    // 会话自检：App 状态下没有档案时回到登录页
    Effect::new(move |_| {
        ctx.state.track();
        ctx.apply(|c| c.ensure_session());
    });

    provide_context(RwSignal::new(ConnectionBook::default()));

    let first_name = move || {
        ctx.state.with(|s| {
            s.profile
                .as_ref()
                .and_then(|p| p.name.split_whitespace().next().map(str::to_string))
                .unwrap_or_default()
        })
    };
    let warning = move || ctx.state.with(|s| s.warning.clone());

    let on_logout = move |_| {
        ctx.apply(|c| c.logout());
    };

    view! {
        <Router signed_in=ctx.signed_in_signal()>
            <div class="min-h-screen bg-base-200 pb-20">
                <div class="navbar bg-base-100 shadow-sm sticky top-0 z-10">
                    <div class="flex-1 gap-2">
                        <div class="w-9 h-9 rounded-xl bg-gradient-to-br from-primary to-secondary text-primary-content flex items-center justify-center font-bold">
                            "UC"
                        </div>
                        <span class="font-semibold">{first_name}</span>
                    </div>
                    <div class="flex-none gap-1">
                        <LanguageToggle />
                        <button class="btn btn-sm btn-ghost" on:click=on_logout>
                            {move || t(lang(), Key::Logout)}
                        </button>
                    </div>
                </div>

                <Show when=move || warning().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class="alert alert-warning shadow-lg">
                            <span>{move || warning().unwrap_or_default()}</span>
                            <button class="btn btn-xs btn-ghost" on:click=move |_| ctx.apply(|c| c.dismiss_notices())>
                                "✕"
                            </button>
                        </div>
                    </div>
                </Show>

                <main class="max-w-2xl mx-auto p-4">
                    <RouterOutlet matcher=tab_matcher />
                </main>

                <BottomNav />
            </div>
        </Router>
    }
}
