//! 匹配列表
//!
//! 连接和“稍后再说”只记录在本次访问的 [`ConnectionBook`] 中；
//! 档案有服务端 ID 时连接同时尽力通知后端，否则只保留在本地并记录警告。

use std::collections::BTreeSet;

use campus_connect_shared::{MatchResult, PREFIX_TEMP_STUDENT, StudentProfile};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::RemoteClient;
use crate::context::use_app;
use crate::i18n::{self, Key, t};

/// 本次访问中已处理过的匹配对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionBook {
    connected: BTreeSet<String>,
    saved: BTreeSet<String>,
}

impl ConnectionBook {
    pub fn connect(&mut self, partner_id: &str) {
        self.saved.remove(partner_id);
        self.connected.insert(partner_id.to_string());
    }

    pub fn save_for_later(&mut self, partner_id: &str) {
        if !self.connected.contains(partner_id) {
            self.saved.insert(partner_id.to_string());
        }
    }

    /// 已连接或已保存的对象不再出现在列表中
    pub fn is_handled(&self, partner_id: &str) -> bool {
        self.connected.contains(partner_id) || self.saved.contains(partner_id)
    }

    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// 合并后端记录的已连接对象
    pub fn absorb_connected(&mut self, partner_ids: impl IntoIterator<Item = String>) {
        for id in partner_ids {
            self.saved.remove(&id);
            self.connected.insert(id);
        }
    }
}

/// 后端认识的学生 ID
///
/// 注册时服务端未返回 ID 的档案只有本地临时 ID，无法用于连接接口。
fn remote_student_id(profile: Option<&StudentProfile>) -> Option<&str> {
    profile
        .and_then(|p| p.id.as_deref())
        .map(str::trim)
        .filter(|id| !id.is_empty() && !id.starts_with(PREFIX_TEMP_STUDENT))
}

pub fn use_connection_book() -> RwSignal<ConnectionBook> {
    use_context::<RwSignal<ConnectionBook>>().expect("ConnectionBook should be provided")
}

#[component]
fn MatchCard(item: MatchResult) -> impl IntoView {
    let ctx = use_app();
    let book = use_connection_book();
    let lang = move || ctx.state.with(|s| s.language);

    let partner_id = StoredValue::new(item.id.clone());
    let on_connect = move |_| {
        let partner_id = partner_id.get_value();
        book.update(|b| b.connect(&partner_id));

        let controller = ctx.controller();
        let profile = controller.active_profile();
        let Some(student_id) = remote_student_id(profile.as_ref()).map(str::to_string) else {
            log_warn!(
                "[Matches] No server id for the current profile, connection with {} kept on this device only",
                partner_id
            );
            return;
        };
        spawn_local(async move {
            match controller.client().connect(&student_id, &partner_id).await {
                Ok(()) => log_info!("[Matches] Connected with {}", partner_id),
                Err(e) => log_warn!("[Matches] Connect request failed: {}", e),
            }
        });
    };
    let on_later = move |_| {
        book.update(|b| b.save_for_later(&partner_id.get_value()));
    };

    let interests = item.common_interests.join(" · ");

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body p-4">
                <div class="flex items-center gap-3">
                    <div class="avatar placeholder">
                        <div class="bg-neutral text-neutral-content rounded-full w-12">
                            <span>{item.name.chars().next().unwrap_or('?').to_string()}</span>
                        </div>
                    </div>
                    <div class="flex-1">
                        <h3 class="font-semibold">{item.name.clone()}</h3>
                        <p class="text-xs text-base-content/70">
                            {item.native_language.clone()} " → " {item.target_language.clone()}
                        </p>
                    </div>
                    <div class="badge badge-primary">{format!("{}%", item.match_score.round())}</div>
                </div>
                <p class="text-sm">{item.explanation.clone()}</p>
                {(!interests.is_empty())
                    .then(|| view! { <p class="text-xs text-base-content/60">{interests}</p> })}
                <p class="text-xs">"💡 " {item.suggested_activity.clone()}</p>
                <div class="card-actions justify-end">
                    <button class="btn btn-sm btn-ghost" on:click=on_later>
                        {move || i18n::pick(lang(), "Maybe later", "Plus tard")}
                    </button>
                    <button class="btn btn-sm btn-primary" on:click=on_connect>
                        {move || i18n::pick(lang(), "Connect", "Se connecter")}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn MatchesPage() -> impl IntoView {
    let ctx = use_app();
    let book = use_connection_book();
    let lang = move || ctx.state.with(|s| s.language);

    let (matches, set_matches) = signal(Vec::<MatchResult>::new());
    let (loading, set_loading) = signal(false);
    let (failed, set_failed) = signal(false);

    let load_matches = move || {
        let Some(profile) = ctx.state.with_untracked(|s| s.profile.clone()) else {
            return;
        };
        let language = ctx.state.with_untracked(|s| s.language);
        let controller = ctx.controller();
        set_loading.set(true);
        set_failed.set(false);
        spawn_local(async move {
            match controller.client().list_matches(&profile.name, language).await {
                Ok(data) => set_matches.set(data),
                Err(e) => {
                    log_error!("[Matches] Failed to load matches: {}", e);
                    set_failed.set(true);
                }
            }
            match remote_student_id(Some(&profile)) {
                Some(id) => match controller.client().list_connections(id).await {
                    Ok(ids) => book.update(|b| b.absorb_connected(ids)),
                    Err(e) => log_warn!("[Matches] Failed to load connections: {}", e),
                },
                None => log_warn!("[Matches] No server id for the current profile, skipping saved connections"),
            }
            set_loading.set(false);
        });
    };

    // 初始加载，语言切换时重新加载
    let language = Memo::new(move |_| ctx.state.with(|s| s.language));
    Effect::new(move |_| {
        language.track();
        load_matches();
    });

    let visible = move || {
        let book = book.get();
        matches.with(|list| {
            list.iter()
                .filter(|m| !book.is_handled(&m.id))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-bold">{move || t(lang(), Key::MatchesTitle)}</h2>
                <button class="btn btn-sm btn-outline" disabled=move || loading.get() on:click=move |_| load_matches()>
                    {move || i18n::pick(lang(), "Refresh", "Actualiser")}
                </button>
            </div>
            <p class="text-xs text-base-content/60">
                {move || {
                    let b = book.get();
                    format!(
                        "{} {} · {} {}",
                        b.connected_count(),
                        i18n::pick(lang(), "connected", "connectés"),
                        b.saved_count(),
                        i18n::pick(lang(), "saved", "sauvegardés"),
                    )
                }}
            </p>

            {move || {
                if loading.get() {
                    view! {
                        <div class="flex justify-center p-8">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any()
                } else if failed.get() {
                    view! {
                        <div role="alert" class="alert alert-error">
                            <span>{t(lang(), Key::Error)}</span>
                        </div>
                    }
                    .into_any()
                } else if visible().is_empty() {
                    view! {
                        <div class="text-center p-8 text-base-content/60">{t(lang(), Key::MatchesEmpty)}</div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="space-y-3">
                            <For each=visible key=|m| m.id.clone() let:item>
                                <MatchCard item=item />
                            </For>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_and_save_hide_matches() {
        let mut book = ConnectionBook::default();
        assert!(!book.is_handled("match-0"));

        book.save_for_later("match-0");
        assert!(book.is_handled("match-0"));
        assert_eq!(book.saved_count(), 1);

        book.connect("match-0");
        assert_eq!(book.saved_count(), 0);
        assert_eq!(book.connected_count(), 1);

        // Already connected partners are not downgraded to saved
        book.save_for_later("match-0");
        assert_eq!(book.saved_count(), 0);
    }

    #[test]
    fn test_remote_student_id_skips_local_ids() {
        let mut profile = StudentProfile {
            name: "Ana".into(),
            ..Default::default()
        };
        assert_eq!(remote_student_id(None), None);
        assert_eq!(remote_student_id(Some(&profile)), None);

        profile.id = Some(format!("{}1234", PREFIX_TEMP_STUDENT));
        assert_eq!(remote_student_id(Some(&profile)), None);

        profile.id = Some("  ".into());
        assert_eq!(remote_student_id(Some(&profile)), None);

        profile.id = Some("65abc".into());
        assert_eq!(remote_student_id(Some(&profile)), Some("65abc"));
    }

    #[test]
    fn test_absorb_server_connections() {
        let mut book = ConnectionBook::default();
        book.save_for_later("p2");
        book.absorb_connected(vec!["p1".to_string(), "p2".to_string()]);
        assert_eq!(book.connected_count(), 2);
        assert_eq!(book.saved_count(), 0);
    }
}
