use super::*;
use crate::error::{ClientError, ClientErrorStatus};
use crate::session::tests::MemoryStore;
use crate::session::{KEY_CURRENT_USER, KEY_HAS_SEEN_WELCOME};
use async_trait::async_trait;
use campus_connect_shared::{CampusEvent, MatchResult};
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

// =========================================================
// Scripted Remote Client
// =========================================================

#[derive(Default)]
struct FakeBackend {
    /// Operation log to verify what reached the network
    calls: RefCell<Vec<String>>,
    /// Profiles that lookup-by-identifier can find
    profiles: RefCell<HashMap<String, StudentProfile>>,
    /// Forces every lookup to fail with this status
    lookup_failure: Cell<Option<ClientErrorStatus>>,
    /// Forces registration to fail, with an optional server detail
    register_failure: RefCell<Option<Option<String>>>,
    upload_fails: Cell<bool>,
    /// When set, lookups wait for this signal before answering
    gate: RefCell<Option<oneshot::Receiver<()>>>,
    /// Last profile received by register_profile
    registered: RefCell<Option<StudentProfile>>,
}

impl FakeBackend {
    fn push_log(&self, msg: String) {
        self.calls.borrow_mut().push(msg);
    }

    fn add_profile(&self, identifier: &str, profile: StudentProfile) {
        self.profiles
            .borrow_mut()
            .insert(identifier.to_string(), profile);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

struct FakeClient {
    backend: Rc<FakeBackend>,
}

#[async_trait(?Send)]
impl RemoteClient for FakeClient {
    async fn register_profile(&self, profile: &StudentProfile) -> ClientResult<StudentProfile> {
        self.backend
            .push_log(format!("register:{}", profile.name));
        *self.backend.registered.borrow_mut() = Some(profile.clone());

        if let Some(detail) = self.backend.register_failure.borrow().clone() {
            let err = ClientError::validation(detail.clone().unwrap_or_else(|| "HTTP 400".into()));
            return Err(match detail {
                Some(detail) => err.with_server_detail(detail),
                None => err,
            });
        }
        Ok(StudentProfile {
            id: Some("srv-42".into()),
            ..profile.clone()
        })
    }

    async fn lookup_profile(&self, identifier: &str) -> ClientResult<StudentProfile> {
        self.backend.push_log(format!("lookup:{}", identifier));
        let gate = self.backend.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(status) = self.backend.lookup_failure.get() {
            return Err(ClientError::new(status, "Simulated failure"));
        }
        self.backend
            .profiles
            .borrow()
            .get(identifier)
            .cloned()
            .ok_or_else(|| ClientError::new(ClientErrorStatus::NotFound, "Student not found"))
    }

    async fn list_matches(&self, name: &str, _: LanguageCode) -> ClientResult<Vec<MatchResult>> {
        self.backend.push_log(format!("matches:{}", name));
        Ok(Vec::new())
    }

    async fn list_challenge_suggestions(
        &self,
        name: &str,
        _: LanguageCode,
    ) -> ClientResult<Vec<String>> {
        self.backend.push_log(format!("challenges:{}", name));
        Ok(Vec::new())
    }

    async fn connect(&self, student_id: &str, partner_id: &str) -> ClientResult<()> {
        self.backend
            .push_log(format!("connect:{}:{}", student_id, partner_id));
        Ok(())
    }

    async fn list_connections(&self, student_id: &str) -> ClientResult<Vec<String>> {
        self.backend
            .push_log(format!("connections:{}", student_id));
        Ok(Vec::new())
    }

    async fn list_events(&self) -> ClientResult<Vec<CampusEvent>> {
        self.backend.push_log("events".to_string());
        Ok(Vec::new())
    }

    async fn upload_avatar(&self, avatar: &AvatarFile) -> ClientResult<String> {
        self.backend
            .push_log(format!("upload:{}", avatar.file_name));
        if self.backend.upload_fails.get() {
            return Err(ClientError::network("Simulated upload failure"));
        }
        Ok(format!("/uploads/{}", avatar.file_name))
    }

    async fn health_check(&self) -> ClientResult<bool> {
        Ok(true)
    }
}

type TestController = ScreenController<MemoryStore, FakeClient>;

fn setup(store: MemoryStore) -> (Rc<FakeBackend>, TestController) {
    setup_with_config(store, &AppConfig::default())
}

fn setup_with_config(store: MemoryStore, config: &AppConfig) -> (Rc<FakeBackend>, TestController) {
    let backend = Rc::new(FakeBackend::default());
    let client = FakeClient {
        backend: backend.clone(),
    };
    let controller = ScreenController::new(Session::new(store), client, config);
    (backend, controller)
}

fn toto() -> StudentProfile {
    StudentProfile {
        id: Some("srv-1".into()),
        name: "Toto Tremblay".into(),
        username: Some("toto123".into()),
        email: Some("toto@umontreal.ca".into()),
        interests: ["Music".to_string(), "Hiking".to_string()].into(),
        languages: ["French".to_string()].into(),
        bio: "Salut!".into(),
        ..Default::default()
    }
}

fn toto_json() -> String {
    serde_json::to_string(&toto()).unwrap()
}

/// Controller already sitting on the login screen
fn login_screen() -> (MemoryStore, Rc<FakeBackend>, TestController) {
    let store = MemoryStore::with(&[(KEY_HAS_SEEN_WELCOME, "true")]);
    let (backend, controller) = setup(store.clone());
    assert_eq!(controller.initialize(), Screen::Login);
    (store, backend, controller)
}

/// Controller already sitting on the onboarding screen
fn onboarding_screen() -> (MemoryStore, Rc<FakeBackend>, TestController) {
    let store = MemoryStore::new();
    let (backend, controller) = setup(store.clone());
    controller.initialize();
    assert!(controller.get_started());
    assert_eq!(controller.screen(), Screen::Onboarding);
    (store, backend, controller)
}

fn draft() -> StudentProfile {
    StudentProfile {
        name: "  Ana Gagnon ".into(),
        username: Some("ana".into()),
        email: Some("ana@umontreal.ca".into()),
        ..Default::default()
    }
}

fn avatar() -> AvatarFile {
    AvatarFile {
        file_name: "me.png".into(),
        mime_type: "image/png".into(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    }
}

// =========================================================
// Initialization
// =========================================================

#[test]
fn test_fresh_browser_starts_on_welcome() {
    let (_, controller) = setup(MemoryStore::new());
    assert_eq!(controller.screen(), Screen::Loading);
    assert_eq!(controller.initialize(), Screen::Welcome);
    assert_eq!(controller.active_profile(), None);
}

#[test]
fn test_seen_flag_only_starts_on_login() {
    let (_, controller) = setup(MemoryStore::with(&[(KEY_HAS_SEEN_WELCOME, "true")]));
    assert_eq!(controller.initialize(), Screen::Login);
}

#[test]
fn test_valid_record_starts_on_app_with_identical_fields() {
    let raw = toto_json();
    let (_, controller) = setup(MemoryStore::with(&[(KEY_CURRENT_USER, raw.as_str())]));
    assert_eq!(controller.initialize(), Screen::App);
    assert_eq!(controller.active_profile(), Some(toto()));
}

#[test]
fn test_corrupt_record_never_reaches_app() {
    let (_, controller) = setup(MemoryStore::with(&[(KEY_CURRENT_USER, "{\"name\":")]));
    assert_eq!(controller.initialize(), Screen::Welcome);

    let (_, controller) = setup(MemoryStore::with(&[
        (KEY_CURRENT_USER, "not json at all"),
        (KEY_HAS_SEEN_WELCOME, "true"),
    ]));
    assert_eq!(controller.initialize(), Screen::Login);
    assert_eq!(controller.active_profile(), None);
}

#[test]
fn test_storage_unavailable_during_init_goes_to_login() {
    let store = MemoryStore::new();
    store.set_unavailable(true);
    let (_, controller) = setup(store);
    assert_eq!(controller.initialize(), Screen::Login);
}

#[test]
fn test_initialize_runs_once() {
    let store = MemoryStore::new();
    let (_, controller) = setup(store.clone());
    assert_eq!(controller.initialize(), Screen::Welcome);
    controller.go_to_login();

    // A record appearing later must not re-route the app
    let raw = toto_json();
    KeyValueStore::set(&store, KEY_CURRENT_USER, &raw).unwrap();
    assert_eq!(controller.initialize(), Screen::Login);
}

// =========================================================
// Welcome
// =========================================================

#[test]
fn test_welcome_transitions_set_flag_without_writing_record() {
    let store = MemoryStore::new();
    let (_, controller) = setup(store.clone());
    controller.initialize();
    assert!(controller.get_started());
    assert_eq!(controller.screen(), Screen::Onboarding);
    assert_eq!(store.raw(KEY_HAS_SEEN_WELCOME).as_deref(), Some("true"));
    assert_eq!(store.raw(KEY_CURRENT_USER), None);

    let store = MemoryStore::new();
    let (_, controller) = setup(store.clone());
    controller.initialize();
    assert!(controller.go_to_login());
    assert_eq!(controller.screen(), Screen::Login);
    assert_eq!(store.raw(KEY_HAS_SEEN_WELCOME).as_deref(), Some("true"));
    assert_eq!(store.raw(KEY_CURRENT_USER), None);
}

#[test]
fn test_welcome_actions_ignored_elsewhere() {
    let (_, _, controller) = login_screen();
    assert!(!controller.get_started());
    assert!(!controller.go_to_login());
    assert_eq!(controller.screen(), Screen::Login);
}

// =========================================================
// Login
// =========================================================

#[tokio::test]
async fn test_failed_logins_increment_counter_by_one() {
    let (_, _, controller) = login_screen();

    for expected in 1..=3 {
        let outcome = controller.submit_login("nobody").await;
        assert_eq!(outcome, LoginOutcome::Rejected { attempts: expected });
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.login_attempts, expected);
        assert_eq!(snapshot.screen, Screen::Login);
        assert!(
            snapshot
                .error
                .unwrap()
                .ends_with(&format!("({}/4 attempts)", expected))
        );
    }
}

#[tokio::test]
async fn test_three_failures_then_success_reaches_app() {
    let (store, backend, controller) = login_screen();
    backend.add_profile("toto123", toto());

    for _ in 0..3 {
        controller.submit_login("wrong").await;
    }
    assert_eq!(controller.snapshot().login_attempts, 3);

    assert_eq!(
        controller.submit_login("toto123").await,
        LoginOutcome::SignedIn
    );
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::App);
    assert_eq!(snapshot.login_attempts, 0);
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.profile, Some(toto()));
    assert_eq!(store.raw(KEY_CURRENT_USER), Some(toto_json()));
}

#[tokio::test]
async fn test_fourth_failure_returns_to_welcome_and_clears_flag() {
    let (store, backend, controller) = login_screen();
    // Reason does not matter: network errors count the same as not-found
    backend.lookup_failure.set(Some(ClientErrorStatus::Network));

    for _ in 0..3 {
        controller.submit_login("toto123").await;
    }
    assert_eq!(store.raw(KEY_HAS_SEEN_WELCOME).as_deref(), Some("true"));

    assert_eq!(
        controller.submit_login("toto123").await,
        LoginOutcome::ReturnedToWelcome
    );
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::Welcome);
    assert_eq!(snapshot.login_attempts, 0);
    assert_eq!(store.raw(KEY_HAS_SEEN_WELCOME), None);
    assert_eq!(store.raw(KEY_CURRENT_USER), None);
}

#[tokio::test]
async fn test_max_login_attempts_is_configurable() {
    let config = AppConfig {
        max_login_attempts: 2,
        ..AppConfig::default()
    };
    let (_, controller) = setup_with_config(
        MemoryStore::with(&[(KEY_HAS_SEEN_WELCOME, "true")]),
        &config,
    );
    controller.initialize();

    assert_eq!(
        controller.submit_login("x").await,
        LoginOutcome::Rejected { attempts: 1 }
    );
    assert!(controller.snapshot().error.unwrap().ends_with("(1/2 attempts)"));
    assert_eq!(
        controller.submit_login("x").await,
        LoginOutcome::ReturnedToWelcome
    );
}

#[tokio::test]
async fn test_empty_identifier_is_ignored_and_input_is_trimmed() {
    let (_, backend, controller) = login_screen();
    backend.add_profile("toto123", toto());

    assert_eq!(controller.submit_login("   ").await, LoginOutcome::Ignored);
    assert_eq!(controller.snapshot().login_attempts, 0);
    assert!(backend.calls().is_empty());

    assert_eq!(
        controller.submit_login("  toto123\n").await,
        LoginOutcome::SignedIn
    );
    assert_eq!(backend.calls(), vec!["lookup:toto123".to_string()]);
}

#[tokio::test]
async fn test_login_message_follows_language() {
    let (_, _, controller) = login_screen();
    controller.set_language(LanguageCode::Fr);
    controller.submit_login("personne").await;
    assert!(controller.snapshot().error.unwrap().ends_with("(1/4 essais)"));
}

#[tokio::test]
async fn test_counter_resets_on_screen_change() {
    let (_, _, controller) = login_screen();
    controller.submit_login("a").await;
    controller.submit_login("b").await;
    assert_eq!(controller.snapshot().login_attempts, 2);

    assert!(controller.create_profile());
    assert_eq!(controller.snapshot().login_attempts, 0);
    assert!(controller.back_to_login());
    assert_eq!(controller.snapshot().login_attempts, 0);

    assert_eq!(
        controller.submit_login("c").await,
        LoginOutcome::Rejected { attempts: 1 }
    );
}

#[tokio::test]
async fn test_create_profile_does_not_touch_session() {
    let (store, _, controller) = login_screen();
    assert!(controller.create_profile());
    assert_eq!(controller.screen(), Screen::Onboarding);
    assert_eq!(store.raw(KEY_CURRENT_USER), None);
    assert_eq!(store.raw(KEY_HAS_SEEN_WELCOME).as_deref(), Some("true"));
}

#[tokio::test]
async fn test_reentrant_submit_is_busy() {
    let (_, backend, controller) = login_screen();
    backend.add_profile("toto123", toto());
    let (release, gate) = oneshot::channel();
    *backend.gate.borrow_mut() = Some(gate);

    let mut first = Box::pin(controller.submit_login("toto123"));
    assert!(futures::poll!(first.as_mut()).is_pending());
    assert!(controller.snapshot().pending);

    assert_eq!(controller.submit_login("toto123").await, LoginOutcome::Busy);
    assert_eq!(backend.calls().len(), 1);

    release.send(()).unwrap();
    assert_eq!(first.await, LoginOutcome::SignedIn);
    assert!(!controller.snapshot().pending);
}

#[tokio::test]
async fn test_login_survives_storage_failure() {
    let (store, backend, controller) = login_screen();
    backend.add_profile("Toto Tremblay", toto());
    store.set_unavailable(true);

    assert_eq!(
        controller.submit_login("Toto Tremblay").await,
        LoginOutcome::SignedIn
    );
    assert_eq!(controller.screen(), Screen::App);
    assert_eq!(controller.active_profile(), Some(toto()));
}

#[tokio::test]
async fn test_login_result_discarded_after_leaving_screen() {
    let (_, backend, controller) = login_screen();
    backend.add_profile("toto123", toto());
    let (release, gate) = oneshot::channel();
    *backend.gate.borrow_mut() = Some(gate);

    let mut pending = Box::pin(controller.submit_login("toto123"));
    assert!(futures::poll!(pending.as_mut()).is_pending());
    controller.create_profile();

    release.send(()).unwrap();
    assert_eq!(pending.await, LoginOutcome::Ignored);
    assert_eq!(controller.screen(), Screen::Onboarding);
    assert_eq!(controller.active_profile(), None);
}

#[tokio::test]
async fn test_onboarding_not_blocked_by_abandoned_login() {
    let (_, backend, controller) = login_screen();
    backend.add_profile("toto123", toto());
    let (release, gate) = oneshot::channel();
    *backend.gate.borrow_mut() = Some(gate);

    let mut login = Box::pin(controller.submit_login("toto123"));
    assert!(futures::poll!(login.as_mut()).is_pending());
    assert!(controller.create_profile());
    assert!(!controller.snapshot().pending);

    let outcome = controller.complete_onboarding(draft(), None).await;
    assert_eq!(outcome, OnboardingOutcome::Completed { avatar_failed: false });
    assert_eq!(controller.screen(), Screen::App);

    release.send(()).unwrap();
    assert_eq!(login.await, LoginOutcome::Ignored);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::App);
    assert_eq!(snapshot.profile.unwrap().name, "Ana Gagnon");
    assert!(!snapshot.pending);
}

#[tokio::test]
async fn test_stale_login_ignored_after_returning_to_login() {
    let (_, backend, controller) = login_screen();
    backend.add_profile("toto123", toto());
    let (release, gate) = oneshot::channel();
    *backend.gate.borrow_mut() = Some(gate);

    let mut stale = Box::pin(controller.submit_login("toto123"));
    assert!(futures::poll!(stale.as_mut()).is_pending());
    controller.create_profile();
    controller.back_to_login();

    assert_eq!(
        controller.submit_login("nobody").await,
        LoginOutcome::Rejected { attempts: 1 }
    );

    release.send(()).unwrap();
    assert_eq!(stale.await, LoginOutcome::Ignored);
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::Login);
    assert_eq!(snapshot.profile, None);
    assert_eq!(snapshot.login_attempts, 1);
}

#[tokio::test]
async fn test_logout_abandons_login_in_flight() {
    let (_, backend, controller) = login_screen();
    backend.add_profile("toto123", toto());
    let (release, gate) = oneshot::channel();
    *backend.gate.borrow_mut() = Some(gate);

    let mut pending = Box::pin(controller.submit_login("toto123"));
    assert!(futures::poll!(pending.as_mut()).is_pending());
    controller.logout();

    release.send(()).unwrap();
    assert_eq!(pending.await, LoginOutcome::Ignored);
    assert_eq!(controller.screen(), Screen::Login);
    assert_eq!(controller.active_profile(), None);
}

// =========================================================
// Onboarding
// =========================================================

#[tokio::test]
async fn test_onboarding_registers_with_temp_id_and_merges_server_profile() {
    let (store, backend, controller) = onboarding_screen();

    let outcome = controller.complete_onboarding(draft(), None).await;
    assert_eq!(outcome, OnboardingOutcome::Completed { avatar_failed: false });

    let sent = backend.registered.borrow().clone().unwrap();
    assert!(sent.id.unwrap().starts_with(PREFIX_TEMP_STUDENT));
    assert!(sent.created_at.is_some());
    assert_eq!(sent.name, "Ana Gagnon");

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::App);
    let profile = snapshot.profile.unwrap();
    assert_eq!(profile.id.as_deref(), Some("srv-42"));
    assert_eq!(
        store.raw(KEY_CURRENT_USER),
        Some(serde_json::to_string(&profile).unwrap())
    );
    assert_eq!(backend.calls(), vec!["register:Ana Gagnon".to_string()]);
}

#[tokio::test]
async fn test_onboarding_uploads_avatar_first() {
    let (_, backend, controller) = onboarding_screen();

    let outcome = controller.complete_onboarding(draft(), Some(avatar())).await;
    assert_eq!(outcome, OnboardingOutcome::Completed { avatar_failed: false });
    assert_eq!(
        backend.calls(),
        vec!["upload:me.png".to_string(), "register:Ana Gagnon".to_string()]
    );
    assert_eq!(
        controller.active_profile().unwrap().avatar_url.as_deref(),
        Some("/uploads/me.png")
    );
}

#[tokio::test]
async fn test_avatar_failure_still_completes_with_warning() {
    let (_, backend, controller) = onboarding_screen();
    backend.upload_fails.set(true);

    let outcome = controller.complete_onboarding(draft(), Some(avatar())).await;
    assert_eq!(outcome, OnboardingOutcome::Completed { avatar_failed: true });

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::App);
    assert_eq!(snapshot.profile.unwrap().avatar_url, None);
    assert!(snapshot.warning.is_some());
}

#[tokio::test]
async fn test_registration_failure_stays_on_onboarding() {
    let (store, backend, controller) = onboarding_screen();
    *backend.register_failure.borrow_mut() = Some(Some("Username already taken".into()));

    let outcome = controller.complete_onboarding(draft(), None).await;
    assert_eq!(outcome, OnboardingOutcome::Failed);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::Onboarding);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Registration failed: Username already taken")
    );
    assert!(!snapshot.pending);
    assert_eq!(store.raw(KEY_CURRENT_USER), None);
}

#[tokio::test]
async fn test_registration_failure_without_detail() {
    let (_, backend, controller) = onboarding_screen();
    *backend.register_failure.borrow_mut() = Some(None);

    controller.complete_onboarding(draft(), None).await;
    assert_eq!(
        controller.snapshot().error.as_deref(),
        Some("Registration failed: Please try again.")
    );
}

#[tokio::test]
async fn test_onboarding_requires_name_and_screen() {
    let (_, backend, controller) = onboarding_screen();
    let nameless = StudentProfile {
        name: "   ".into(),
        ..draft()
    };
    assert_eq!(
        controller.complete_onboarding(nameless, None).await,
        OnboardingOutcome::Ignored
    );
    assert!(backend.calls().is_empty());

    let (_, backend, controller) = login_screen();
    assert_eq!(
        controller.complete_onboarding(draft(), None).await,
        OnboardingOutcome::Ignored
    );
    assert!(backend.calls().is_empty());
}

#[test]
fn test_back_to_login_sets_flag() {
    let store = MemoryStore::new();
    let (_, controller) = setup(store.clone());
    controller.initialize();
    controller.get_started();
    KeyValueStore::remove(&store, KEY_HAS_SEEN_WELCOME).unwrap();

    assert!(controller.back_to_login());
    assert_eq!(controller.screen(), Screen::Login);
    assert_eq!(store.raw(KEY_HAS_SEEN_WELCOME).as_deref(), Some("true"));
}

// =========================================================
// App
// =========================================================

#[tokio::test]
async fn test_logout_clears_record_and_sets_flag() {
    let raw = toto_json();
    let store = MemoryStore::with(&[(KEY_CURRENT_USER, raw.as_str())]);
    let (_, controller) = setup(store.clone());
    assert_eq!(controller.initialize(), Screen::App);

    controller.logout();
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.screen, Screen::Login);
    assert_eq!(snapshot.profile, None);
    assert_eq!(store.raw(KEY_CURRENT_USER), None);
    assert_eq!(store.raw(KEY_HAS_SEEN_WELCOME).as_deref(), Some("true"));
}

#[test]
fn test_save_profile_persists_and_reports_storage_failure() {
    let raw = toto_json();
    let store = MemoryStore::with(&[(KEY_CURRENT_USER, raw.as_str())]);
    let (_, controller) = setup(store.clone());
    controller.initialize();

    let edited = StudentProfile {
        bio: "Nouvelle bio".into(),
        ..toto()
    };
    assert!(controller.save_profile(edited.clone()));
    assert_eq!(
        store.raw(KEY_CURRENT_USER),
        Some(serde_json::to_string(&edited).unwrap())
    );
    assert_eq!(controller.snapshot().warning, None);

    store.set_unavailable(true);
    let again = StudentProfile {
        bio: "Encore".into(),
        ..toto()
    };
    assert!(!controller.save_profile(again.clone()));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.profile, Some(again));
    assert!(snapshot.warning.is_some());
    assert_eq!(snapshot.screen, Screen::App);
}

#[test]
fn test_ensure_session_without_profile_goes_to_login() {
    let raw = toto_json();
    let (_, controller) = setup(MemoryStore::with(&[(KEY_CURRENT_USER, raw.as_str())]));
    controller.initialize();
    assert_eq!(controller.ensure_session(), Screen::App);

    controller.state.borrow_mut().profile = None;
    assert_eq!(controller.ensure_session(), Screen::Login);
}
