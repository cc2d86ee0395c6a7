use leptos::prelude::*;

use crate::components::shell::LanguageToggle;
use crate::context::use_app;
use crate::i18n::{self, Key, t};

#[component]
pub fn WelcomePage() -> impl IntoView {
    let ctx = use_app();
    let lang = move || ctx.state.with(|s| s.language);

    let on_get_started = move |_| {
        ctx.apply(|c| c.get_started());
    };
    let on_login = move |_| {
        ctx.apply(|c| c.go_to_login());
    };

    view! {
        <div class="hero min-h-screen bg-gradient-to-br from-primary to-secondary text-primary-content">
            <div class="absolute top-4 right-4">
                <LanguageToggle />
            </div>
            <div class="hero-content flex-col text-center max-w-md">
                <div class="w-20 h-20 rounded-3xl bg-base-100/20 flex items-center justify-center text-3xl font-bold">
                    "UC"
                </div>
                <h1 class="text-4xl font-bold">{move || t(lang(), Key::WelcomeTitle)}</h1>
                <p class="text-lg opacity-90">{move || t(lang(), Key::WelcomeSubtitle)}</p>
                <ul class="text-left space-y-2 my-4">
                    <li>"🤝 " {move || i18n::pick(lang(), "Find language-exchange partners", "Trouve des partenaires d'échange linguistique")}</li>
                    <li>"🎯 " {move || i18n::pick(lang(), "Take on Montreal challenges", "Relève des défis montréalais")}</li>
                    <li>"🎉 " {move || i18n::pick(lang(), "Discover campus events", "Découvre les événements du campus")}</li>
                </ul>
                <button class="btn btn-lg btn-block bg-base-100 text-primary" on:click=on_get_started>
                    {move || i18n::pick(lang(), "Get started", "Commencer")}
                </button>
                <button class="btn btn-ghost btn-block" on:click=on_login>
                    {move || i18n::pick(lang(), "I already have a profile", "J'ai déjà un profil")}
                </button>
            </div>
        </div>
    }
}
