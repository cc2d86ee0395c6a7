use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::shell::LanguageToggle;
use crate::context::use_app;
use crate::controller::LoginOutcome;
use crate::i18n::{self, Key, t};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app();
    let lang = move || ctx.state.with(|s| s.language);

    let (identifier, set_identifier) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = identifier.get();
        if value.trim().is_empty() || is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        set_busy.set(false);
        let controller = ctx.controller();
        spawn_local(async move {
            let outcome = controller.submit_login(&value).await;
            match outcome {
                LoginOutcome::SignedIn => set_identifier.set(String::new()),
                LoginOutcome::Busy => set_busy.set(true),
                _ => {}
            }
            set_is_submitting.set(false);
            ctx.sync();
        });
    };

    let on_create = move |_| {
        ctx.apply(|c| c.create_profile());
    };

    let error = move || ctx.state.with(|s| s.error.clone());

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="absolute top-4 right-4">
                <LanguageToggle />
            </div>
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="mx-auto mb-4 w-14 h-14 rounded-2xl bg-gradient-to-br from-primary to-secondary text-primary-content flex items-center justify-center text-2xl font-bold">
                        "UC"
                    </div>
                    <h1 class="text-2xl font-bold">{move || t(lang(), Key::WelcomeTitle)}</h1>
                    <p class="text-base-content/70">
                        {move || i18n::pick(
                            lang(),
                            "Sign in to continue with your profile and matches.",
                            "Connecte-toi pour retrouver ton profil et tes matchs.",
                        )}
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="identifier">
                                <span class="label-text">
                                    {move || i18n::pick(lang(), "Username or full name", "Nom d'utilisateur ou nom complet")}
                                </span>
                            </label>
                            <input
                                id="identifier"
                                type="text"
                                placeholder=move || i18n::pick(lang(), "e.g. toto123", "ex. toto123")
                                on:input=move |ev| set_identifier.set(event_target_value(&ev))
                                prop:value=identifier
                                prop:disabled=move || is_submitting.get()
                                class="input input-bordered"
                                autofocus
                            />
                        </div>

                        <Show when=move || error().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || busy.get()>
                            <div role="alert" class="alert alert-info text-sm py-2">
                                <span>{move || i18n::request_in_progress(lang())}</span>
                            </div>
                        </Show>

                        <div class="form-control mt-4">
                            <button
                                class="btn btn-primary"
                                disabled=move || is_submitting.get() || identifier.with(|v| v.trim().is_empty())
                            >
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> {t(lang(), Key::SigningIn)} }.into_any()
                                } else {
                                    t(lang(), Key::SignIn).into_any()
                                }}
                            </button>
                        </div>

                        <div class="divider text-xs">{move || i18n::pick(lang(), "OR", "OU")}</div>

                        <button type="button" class="btn btn-outline" on:click=on_create>
                            {move || i18n::pick(lang(), "Create a new profile", "Créer un nouveau profil")}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
