//! 首页：问候、快捷入口和近期活动

use campus_connect_shared::CampusEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::RemoteClient;
use crate::context::use_app;
use crate::i18n::{self, Key, t};
use crate::web::route::AppTab;
use crate::web::router::use_router;

/// `12/40` 或 `12`（无上限时）
fn capacity_label(event: &CampusEvent) -> String {
    match event.max_capacity {
        Some(max) => format!("{}/{}", event.participants, max),
        None => event.participants.to_string(),
    }
}

#[component]
fn QuickAction(tab: AppTab, en: &'static str, fr: &'static str) -> impl IntoView {
    let ctx = use_app();
    let router = use_router();
    view! {
        <button
            class="p-4 rounded-xl border bg-base-100 text-left hover:bg-base-300 transition"
            on:click=move |_| router.navigate(tab)
        >
            <div class="text-lg">{tab.icon()}</div>
            <div class="font-semibold mt-1">{move || i18n::pick(ctx.state.with(|s| s.language), en, fr)}</div>
        </button>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app();
    let lang = move || ctx.state.with(|s| s.language);

    let (events, set_events) = signal(Vec::<CampusEvent>::new());
    let (loading, set_loading) = signal(true);
    let (online, set_online) = signal(Option::<bool>::None);

    // 首次渲染时加载活动并检查后端状态
    let controller = ctx.controller();
    spawn_local(async move {
        let client = controller.client();
        match client.list_events().await {
            Ok(list) => set_events.set(list),
            Err(e) => log_warn!("[Home] Failed to load events: {}", e),
        }
        set_loading.set(false);

        let healthy = client.health_check().await.unwrap_or(false);
        set_online.set(Some(healthy));
    });

    let greeting = move || {
        let name = ctx.state.with(|s| {
            s.profile
                .as_ref()
                .and_then(|p| p.name.split_whitespace().next().map(str::to_string))
        });
        let hello = i18n::pick(lang(), "Welcome back", "Bon retour");
        match name {
            Some(name) => format!("{}, {} 👋", hello, name),
            None => format!("{} 👋", hello),
        }
    };

    view! {
        <div class="space-y-4">
            <div class="card bg-base-100 shadow-sm">
                <div class="card-body p-4">
                    <div class="text-sm text-base-content/70">{greeting}</div>
                    <div class="text-xl font-bold">{move || t(lang(), Key::WelcomeTitle)}</div>
                    <div class="text-xs">
                        {move || match online.get() {
                            Some(true) => view! { <span class="badge badge-success badge-sm">"online"</span> }.into_any(),
                            Some(false) => view! { <span class="badge badge-warning badge-sm">"offline"</span> }.into_any(),
                            None => ().into_any(),
                        }}
                    </div>
                </div>
            </div>

            <div class="grid grid-cols-2 gap-3">
                <QuickAction tab=AppTab::Map en="Explore campus" fr="Explorer le campus" />
                <QuickAction tab=AppTab::Challenges en="Join a challenge" fr="Rejoindre un défi" />
                <QuickAction tab=AppTab::Matches en="Find matches" fr="Trouver des matchs" />
                <QuickAction tab=AppTab::Marketplace en="Marketplace" fr="Marché" />
            </div>

            <div class="card bg-base-100 shadow-sm">
                <div class="card-body p-4">
                    <h3 class="font-semibold">{move || i18n::pick(lang(), "Upcoming", "À venir")}</h3>
                    {move || {
                        if loading.get() {
                            view! { <span class="loading loading-dots loading-sm"></span> }.into_any()
                        } else if events.with(|e| e.is_empty()) {
                            view! {
                                <p class="text-sm text-base-content/60">
                                    {i18n::pick(lang(), "Coming soon.", "À venir.")}
                                </p>
                            }
                            .into_any()
                        } else {
                            view! {
                                <ul class="space-y-2">
                                    <For each=move || events.get() key=|e| e.id.clone() let:event>
                                        <li class="p-3 rounded-xl border">
                                            <div class="flex justify-between">
                                                <span class="font-semibold text-sm">{event.title.clone()}</span>
                                                <span class="badge badge-ghost badge-sm">{event.category.clone()}</span>
                                            </div>
                                            <div class="text-xs text-base-content/70 mt-1">
                                                {format!("{} {} · {}", event.date, event.time, event.location)}
                                            </div>
                                            <div class="text-xs mt-1">"👥 " {capacity_label(&event)}</div>
                                        </li>
                                    </For>
                                </ul>
                            }
                            .into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_label() {
        let mut event = CampusEvent {
            id: "e1".into(),
            title: "Welcome Week".into(),
            description: String::new(),
            category: "social".into(),
            date: "2024-09-02".into(),
            time: "18:00".into(),
            location: "Pavillon Roger-Gaudry".into(),
            image_url: None,
            participants: 12,
            max_capacity: Some(40),
        };
        assert_eq!(capacity_label(&event), "12/40");
        event.max_capacity = None;
        assert_eq!(capacity_label(&event), "12");
    }
}
