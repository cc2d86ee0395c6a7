use leptos::prelude::*;

use crate::components::onboarding::{ProfileFields, ProfileForm};
use crate::context::use_app;
use crate::i18n::{self, Key, t};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app();
    let lang = Signal::derive(move || ctx.state.with(|s| s.language));

    let current = ctx.state.with_untracked(|s| s.profile.clone()).unwrap_or_default();
    let avatar_url = current.avatar_url.clone();
    let member_since = current.created_at.as_ref().map(|ts| ts.to_string());
    let form = ProfileForm::from_profile(&current);
    let (saved, set_saved) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.is_complete() {
            return;
        }
        let profile = form.to_profile();
        let persisted = ctx.apply(|c| c.save_profile(profile));
        set_saved.set(persisted);
    };

    view! {
        <div class="space-y-4">
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body p-4 flex-row items-center gap-4">
                    {match avatar_url {
                        Some(url) => view! {
                            <div class="avatar">
                                <div class="w-16 rounded-full"><img src=url /></div>
                            </div>
                        }
                        .into_any(),
                        None => view! {
                            <div class="avatar placeholder">
                                <div class="bg-neutral text-neutral-content rounded-full w-16">
                                    <span class="text-xl">{current.name.chars().next().unwrap_or('?').to_string()}</span>
                                </div>
                            </div>
                        }
                        .into_any(),
                    }}
                    <div>
                        <h2 class="text-xl font-bold">{current.name.clone()}</h2>
                        <p class="text-sm text-base-content/70">{current.identifier().to_string()}</p>
                        {member_since.map(|date| view! {
                            <p class="text-xs text-base-content/60">
                                {move || i18n::pick(lang.get(), "Member since ", "Membre depuis ")} {date}
                            </p>
                        })}
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-sm">
                <form class="card-body p-4 space-y-2" on:submit=on_submit>
                    <ProfileFields form=form lang=lang />
                    <Show when=move || saved.get()>
                        <div role="status" class="alert alert-success text-sm py-2">
                            <span>{move || i18n::pick(lang.get(), "Profile saved.", "Profil enregistré.")}</span>
                        </div>
                    </Show>
                    <div class="form-control mt-4">
                        <button class="btn btn-primary">{move || t(lang.get(), Key::Save)}</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
