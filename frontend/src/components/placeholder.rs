//! 尚未实现的标签页（地图、论坛、市场）

use leptos::prelude::*;

use crate::context::use_app;
use crate::i18n::{pick, t};
use crate::web::route::AppTab;

#[component]
pub fn PlaceholderPage(tab: AppTab) -> impl IntoView {
    let ctx = use_app();
    let lang = move || ctx.state.with(|s| s.language);

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body items-center text-center p-8">
                <div class="text-5xl">{tab.icon()}</div>
                <h2 class="text-xl font-bold">{move || t(lang(), tab.label())}</h2>
                <p class="text-base-content/60">
                    {move || pick(lang(), "Coming soon.", "Bientôt disponible.")}
                </p>
            </div>
        </div>
    }
}
