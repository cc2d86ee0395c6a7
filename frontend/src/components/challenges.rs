use campus_connect_shared::challenge::{self, Challenge, ChallengeKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::RemoteClient;
use crate::context::use_app;
use crate::i18n::{self, Key, t};

fn kind_badge(kind: ChallengeKind) -> &'static str {
    match kind {
        ChallengeKind::Social => "badge badge-info",
        ChallengeKind::Cultural => "badge badge-secondary",
        ChallengeKind::Linguistic => "badge badge-primary",
    }
}

/// 已完成挑战的积分合计
fn earned_points(list: &[Challenge]) -> u32 {
    list.iter().filter(|c| c.completed).map(|c| c.points).sum()
}

#[component]
pub fn ChallengesPage() -> impl IntoView {
    let ctx = use_app();
    let lang = move || ctx.state.with(|s| s.language);

    let (challenges, set_challenges) = signal(Vec::<Challenge>::new());
    let (loading, set_loading) = signal(false);
    let (offline, set_offline) = signal(false);

    let load_challenges = move || {
        let Some(name) = ctx.state.with_untracked(|s| s.profile.as_ref().map(|p| p.name.clone())) else {
            return;
        };
        let language = ctx.state.with_untracked(|s| s.language);
        let controller = ctx.controller();
        set_loading.set(true);
        spawn_local(async move {
            match controller
                .client()
                .list_challenge_suggestions(&name, language)
                .await
            {
                Ok(titles) => {
                    set_challenges.set(challenge::from_suggestions(&titles));
                    set_offline.set(false);
                }
                Err(e) => {
                    log_warn!("[Challenges] Using fallback challenges: {}", e);
                    set_challenges.set(challenge::fallback_challenges());
                    set_offline.set(true);
                }
            }
            set_loading.set(false);
        });
    };

    let language = Memo::new(move |_| ctx.state.with(|s| s.language));
    Effect::new(move |_| {
        language.track();
        load_challenges();
    });

    let toggle_completed = move |id: String| {
        set_challenges.update(|list| {
            if let Some(c) = list.iter_mut().find(|c| c.id == id) {
                c.completed = !c.completed;
            }
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-bold">{move || t(lang(), Key::ChallengesTitle)}</h2>
                <div class="badge badge-lg badge-accent">
                    {move || format!("{} pts", challenges.with(|list| earned_points(list)))}
                </div>
            </div>

            <Show when=move || offline.get()>
                <div role="alert" class="alert alert-info text-sm py-2">
                    <span>
                        {move || i18n::pick(
                            lang(),
                            "Suggestions are unavailable right now, here are a few classics.",
                            "Suggestions indisponibles pour le moment, voici quelques classiques.",
                        )}
                    </span>
                </div>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex justify-center p-8">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <div class="space-y-3">
                    <For each=move || challenges.get() key=|c| (c.id.clone(), c.completed) let:item>
                        {
                            let id = item.id.clone();
                            view! {
                                <div class="card bg-base-100 shadow">
                                    <div class="card-body p-4">
                                        <div class="flex items-start justify-between gap-2">
                                            <h3 class="font-semibold">{item.title.clone()}</h3>
                                            <span class=kind_badge(item.kind)>{item.kind.as_str()}</span>
                                        </div>
                                        <p class="text-sm text-base-content/70">{item.description.clone()}</p>
                                        <div class="flex items-center justify-between text-xs">
                                            <span>"📍 " {item.location.clone()}</span>
                                            <span class="font-semibold">{format!("+{} pts", item.points)}</span>
                                        </div>
                                        <div class="card-actions justify-end">
                                            <button
                                                class=if item.completed { "btn btn-sm btn-success" } else { "btn btn-sm btn-outline" }
                                                on:click=move |_| toggle_completed(id.clone())
                                            >
                                                {if item.completed {
                                                    i18n::pick(lang(), "Completed ✓", "Terminé ✓")
                                                } else {
                                                    i18n::pick(lang(), "Mark as done", "Marquer comme fait")
                                                }}
                                            </button>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    </For>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earned_points_counts_completed_only() {
        let mut list = challenge::fallback_challenges();
        assert_eq!(earned_points(&list), 100);
        list[0].completed = true;
        assert_eq!(earned_points(&list), 175);
        assert_eq!(earned_points(&[]), 0);
    }
}
