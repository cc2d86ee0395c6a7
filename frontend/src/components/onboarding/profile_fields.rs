//! 档案字段表单组件
//!
//! 创建档案和编辑档案共用的输入区域，纯粹的渲染，不负责提交。

use std::collections::BTreeSet;

use campus_connect_shared::{FrenchLevel, LanguageCode};
use leptos::prelude::*;

use super::form_state::{
    INTEREST_OPTIONS, LANGUAGE_OPTIONS, LOOKING_FOR_OPTIONS, ProfileForm, option_label, toggle_item,
};
use crate::i18n::pick;

/// 可多选的标签组
#[component]
pub fn ChipGroup(
    options: &'static [&'static str],
    selected: RwSignal<BTreeSet<String>>,
) -> impl IntoView {
    let chips = options
        .iter()
        .map(|&item| {
            let is_on = move || selected.with(|s| s.contains(item));
            view! {
                <button
                    type="button"
                    class=move || if is_on() {
                        "badge badge-primary badge-lg cursor-pointer"
                    } else {
                        "badge badge-outline badge-lg cursor-pointer"
                    }
                    on:click=move |_| selected.update(|s| toggle_item(s, item))
                >
                    {option_label(item)}
                </button>
            }
        })
        .collect_view();

    view! { <div class="flex flex-wrap gap-2">{chips}</div> }
}

#[component]
pub fn ProfileFields(
    form: ProfileForm,
    #[prop(into)] lang: Signal<LanguageCode>,
) -> impl IntoView {
    let tr = move |en: &'static str, fr: &'static str| pick(lang.get(), en, fr);

    view! {
        <div class="form-control">
            <label for="name" class="label">
                <span class="label-text">{move || tr("Full name", "Nom complet")} " *"</span>
            </label>
            <input id="name" required
                type="text"
                on:input=move |ev| form.name.set(event_target_value(&ev))
                prop:value=move || form.name.get()
                class="input input-bordered w-full"
            />
        </div>

        <div class="grid grid-cols-2 gap-4">
            <div class="form-control">
                <label for="username" class="label">
                    <span class="label-text">{move || tr("Username", "Nom d'utilisateur")}</span>
                </label>
                <input id="username"
                    type="text"
                    placeholder="toto123"
                    on:input=move |ev| form.username.set(event_target_value(&ev))
                    prop:value=move || form.username.get()
                    class="input input-bordered w-full"
                />
            </div>
            <div class="form-control">
                <label for="email" class="label">
                    <span class="label-text">"Email *"</span>
                </label>
                <input id="email" required
                    type="email"
                    placeholder="prenom.nom@umontreal.ca"
                    on:input=move |ev| form.email.set(event_target_value(&ev))
                    prop:value=move || form.email.get()
                    class="input input-bordered w-full"
                />
            </div>
        </div>

        <div class="form-control">
            <label for="program" class="label">
                <span class="label-text">{move || tr("Program", "Programme")}</span>
            </label>
            <input id="program"
                type="text"
                on:input=move |ev| form.program.set(event_target_value(&ev))
                prop:value=move || form.program.get()
                class="input input-bordered w-full"
            />
        </div>

        <div class="form-control">
            <span class="label-text mb-2">{move || tr("Languages you speak", "Langues parlées")}</span>
            <ChipGroup options=&LANGUAGE_OPTIONS selected=form.languages />
        </div>

        <div class="form-control">
            <label for="french_level" class="label">
                <span class="label-text">{move || tr("French level", "Niveau de français")}</span>
            </label>
            <select id="french_level"
                class="select select-bordered w-full"
                on:change=move |ev| {
                    if let Ok(level) = event_target_value(&ev).parse::<FrenchLevel>() {
                        form.french_level.set(level);
                    }
                }
            >
                {FrenchLevel::ALL
                    .into_iter()
                    .map(|level| view! {
                        <option value=level.as_str() selected=move || form.french_level.get() == level>
                            {level.as_str()}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>

        <div class="form-control">
            <span class="label-text mb-2">{move || tr("Interests", "Intérêts")}</span>
            <ChipGroup options=&INTEREST_OPTIONS selected=form.interests />
        </div>

        <div class="form-control">
            <span class="label-text mb-2">{move || tr("Looking for", "Je recherche")}</span>
            <ChipGroup options=&LOOKING_FOR_OPTIONS selected=form.looking_for />
        </div>

        <div class="form-control">
            <label for="bio" class="label">
                <span class="label-text">"Bio"</span>
            </label>
            <textarea id="bio"
                rows="3"
                class="textarea textarea-bordered w-full"
                on:input=move |ev| form.bio.set(event_target_value(&ev))
                prop:value=move || form.bio.get()
            ></textarea>
        </div>
    }
}
