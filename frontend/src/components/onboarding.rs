//! 创建档案页
//!
//! 表单状态在 `form_state`，字段渲染在 `profile_fields`，
//! 本组件只负责头像读取和提交。

mod form_state;
mod profile_fields;

pub use form_state::ProfileForm;
pub use profile_fields::ProfileFields;

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

use crate::api::AvatarFile;
use crate::context::use_app;
use crate::controller::OnboardingOutcome;
use crate::error::{ClientError, ClientResult};
use crate::i18n::{pick, request_in_progress};

/// 把用户选择的文件读入内存
async fn read_avatar(file: web_sys::File) -> ClientResult<AvatarFile> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::from(e).in_op_with("avatar.read", file.name()))?;
    Ok(AvatarFile {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

#[component]
pub fn OnboardingPage() -> impl IntoView {
    let ctx = use_app();
    let lang = Signal::derive(move || ctx.state.with(|s| s.language));
    let tr = move |en: &'static str, fr: &'static str| pick(lang.get(), en, fr);

    let form = ProfileForm::new();
    let avatar = RwSignal::new(Option::<AvatarFile>::None);
    let (is_submitting, set_is_submitting) = signal(false);
    let (busy, set_busy) = signal(false);

    let on_avatar_change = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            avatar.set(None);
            return;
        };
        spawn_local(async move {
            match read_avatar(file).await {
                Ok(file) => avatar.set(Some(file)),
                Err(e) => {
                    log_warn!("[Onboarding] Could not read avatar: {}", e);
                    avatar.set(None);
                }
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.is_complete() || is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        set_busy.set(false);
        let draft = form.to_profile();
        let avatar = avatar.get_untracked();
        let controller = ctx.controller();
        spawn_local(async move {
            let outcome = controller.complete_onboarding(draft, avatar).await;
            set_busy.set(outcome == OnboardingOutcome::Busy);
            set_is_submitting.set(false);
            ctx.sync();
        });
    };

    let on_back = move |_| {
        ctx.apply(|c| c.back_to_login());
    };

    let error = move || ctx.state.with(|s| s.error.clone());
    let warning = move || ctx.state.with(|s| s.warning.clone());

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <div class="max-w-lg mx-auto space-y-4">
                <div class="text-center">
                    <h1 class="text-2xl font-bold">{move || tr("Create your profile", "Crée ton profil")}</h1>
                    <p class="text-base-content/70">
                        {move || tr(
                            "Tell us about yourself to find your matches.",
                            "Parle-nous de toi pour trouver tes jumelages.",
                        )}
                    </p>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body space-y-2" on:submit=on_submit>
                        <Show when=move || error().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || warning().is_some()>
                            <div role="alert" class="alert alert-warning text-sm py-2">
                                <span>{move || warning().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || busy.get()>
                            <div role="alert" class="alert alert-info text-sm py-2">
                                <span>{move || request_in_progress(lang.get())}</span>
                            </div>
                        </Show>

                        <ProfileFields form=form lang=lang />

                        <div class="form-control">
                            <label for="avatar" class="label">
                                <span class="label-text">{move || tr("Profile photo", "Photo de profil")}</span>
                            </label>
                            <input id="avatar"
                                type="file"
                                accept="image/*"
                                class="file-input file-input-bordered w-full"
                                on:change=on_avatar_change
                            />
                        </div>

                        <div class="form-control mt-4">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> {tr("Creating...", "Création...")} }.into_any()
                                } else {
                                    tr("Create profile", "Créer le profil").into_any()
                                }}
                            </button>
                        </div>
                        <button type="button" class="btn btn-ghost btn-sm" on:click=on_back>
                            {move || tr("I already have a profile", "J'ai déjà un profil")}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
