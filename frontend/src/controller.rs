//! 屏幕控制器
//!
//! 应用的核心状态机：`Loading → Welcome / Login / Onboarding / App`。
//! 控制器不依赖 Leptos，通过注入的 [`KeyValueStore`] 和 [`RemoteClient`]
//! 完成所有副作用，视图层只负责把 [`ControllerSnapshot`] 渲染出来。
//!
//! 内部状态保存在 `RefCell` 中，所有方法都接收 `&self`，
//! 借用不会跨越 `.await`。

use std::cell::{Cell, RefCell};

use campus_connect_shared::{LanguageCode, PREFIX_TEMP_STUDENT, StudentProfile, Timestamp};
use uuid::Uuid;

use crate::api::{AvatarFile, RemoteClient};
use crate::config::AppConfig;
use crate::error::ClientResult;
use crate::i18n;
use crate::session::{KeyValueStore, Session};

#[cfg(test)]
mod tests;

/// 顶层屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Loading,
    Welcome,
    Login,
    Onboarding,
    App,
}

/// 控制器状态的只读快照，供视图渲染
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerSnapshot {
    pub screen: Screen,
    pub profile: Option<StudentProfile>,
    pub login_attempts: u32,
    /// 当前屏幕有登录或注册请求进行中
    pub pending: bool,
    pub error: Option<String>,
    /// 非致命提示（头像上传失败、本地保存失败）
    pub warning: Option<String>,
    pub language: LanguageCode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn,
    Rejected { attempts: u32 },
    /// 达到最大失败次数，已返回欢迎页
    ReturnedToWelcome,
    /// 标识符为空或当前不在登录页
    Ignored,
    /// 已有请求进行中
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingOutcome {
    Completed { avatar_failed: bool },
    Failed,
    Ignored,
    Busy,
}

/// 请求期间持有，drop 时清除 `pending` 标记
///
/// 每次离开屏幕都会推进 `epoch`，旧请求的守卫随之失效：
/// 它既不再阻塞新屏幕的提交，也不会在 drop 时清掉别人的标记。
struct PendingGuard<'a> {
    state: &'a RefCell<ControllerSnapshot>,
    epoch: &'a Cell<u64>,
    ticket: u64,
}

impl<'a> PendingGuard<'a> {
    /// 当前屏幕已有请求进行中时返回 `None`
    fn acquire(state: &'a RefCell<ControllerSnapshot>, epoch: &'a Cell<u64>) -> Option<Self> {
        let mut s = state.borrow_mut();
        if s.pending {
            return None;
        }
        s.pending = true;
        let ticket = epoch.get() + 1;
        epoch.set(ticket);
        Some(Self {
            state,
            epoch,
            ticket,
        })
    }

    /// 请求发出后没有离开过屏幕
    fn is_current(&self) -> bool {
        self.epoch.get() == self.ticket
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.is_current() {
            self.state.borrow_mut().pending = false;
        }
    }
}

pub struct ScreenController<S, C> {
    session: Session<S>,
    client: C,
    max_login_attempts: u32,
    state: RefCell<ControllerSnapshot>,
    epoch: Cell<u64>,
}

impl<S: KeyValueStore, C: RemoteClient> ScreenController<S, C> {
    pub fn new(session: Session<S>, client: C, config: &AppConfig) -> Self {
        Self {
            session,
            client,
            max_login_attempts: config.max_login_attempts.max(1),
            state: RefCell::new(ControllerSnapshot::default()),
            epoch: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        self.state.borrow().clone()
    }

    pub fn screen(&self) -> Screen {
        self.state.borrow().screen
    }

    pub fn language(&self) -> LanguageCode {
        self.state.borrow().language
    }

    pub fn active_profile(&self) -> Option<StudentProfile> {
        self.state.borrow().profile.clone()
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    // =========================================================
    // 初始化
    // =========================================================

    /// 根据缓存决定首屏，只在 `Loading` 时生效
    pub fn initialize(&self) -> Screen {
        if self.screen() != Screen::Loading {
            return self.screen();
        }

        let (screen, profile) = match self.resolve_initial_screen() {
            Ok(resolved) => resolved,
            Err(e) => {
                log_error!("[Controller] Session unavailable during init: {}", e);
                (Screen::Login, None)
            }
        };

        let mut s = self.state.borrow_mut();
        s.profile = profile;
        self.enter(&mut s, screen);
        screen
    }

    fn resolve_initial_screen(&self) -> ClientResult<(Screen, Option<StudentProfile>)> {
        if let Some(profile) = self.session.load_profile()? {
            return Ok((Screen::App, Some(profile)));
        }
        let screen = if self.session.has_seen_welcome()? {
            Screen::Login
        } else {
            Screen::Welcome
        };
        Ok((screen, None))
    }

    // =========================================================
    // 同步转换
    // =========================================================

    /// 欢迎页 → 创建档案
    pub fn get_started(&self) -> bool {
        self.leave_welcome(Screen::Onboarding)
    }

    /// 欢迎页 → 登录
    pub fn go_to_login(&self) -> bool {
        self.leave_welcome(Screen::Login)
    }

    fn leave_welcome(&self, to: Screen) -> bool {
        if self.screen() != Screen::Welcome {
            return false;
        }
        self.mark_welcome_seen();
        self.enter(&mut self.state.borrow_mut(), to);
        true
    }

    /// 登录页 → 创建档案
    pub fn create_profile(&self) -> bool {
        let mut s = self.state.borrow_mut();
        if s.screen != Screen::Login {
            return false;
        }
        self.enter(&mut s, Screen::Onboarding);
        true
    }

    /// 创建档案页 → 登录（"已有档案"）
    pub fn back_to_login(&self) -> bool {
        if self.screen() != Screen::Onboarding {
            return false;
        }
        self.mark_welcome_seen();
        self.enter(&mut self.state.borrow_mut(), Screen::Login);
        true
    }

    /// 退出登录，从任何已登录状态回到登录页
    pub fn logout(&self) {
        if let Err(e) = self.session.clear_profile() {
            log_warn!("[Controller] Failed to clear stored profile: {}", e);
        }
        self.mark_welcome_seen();

        let mut s = self.state.borrow_mut();
        s.profile = None;
        self.abandon_pending(&mut s);
        self.enter(&mut s, Screen::Login);
        log_info!("[Controller] Logged out");
    }

    /// 应用外壳渲染时的自检：`App` 状态下必须有当前档案
    pub fn ensure_session(&self) -> Screen {
        let mut s = self.state.borrow_mut();
        if s.screen == Screen::App && s.profile.is_none() {
            log_warn!("[Controller] App screen without an active profile");
            self.enter(&mut s, Screen::Login);
        }
        s.screen
    }

    /// 更新当前档案并写入缓存
    ///
    /// 写入失败不会回滚内存中的档案，只给出提示。返回是否已持久化。
    pub fn save_profile(&self, profile: StudentProfile) -> bool {
        if self.screen() != Screen::App {
            return false;
        }
        let saved = match self.session.save_profile(&profile) {
            Ok(()) => true,
            Err(e) => {
                log_warn!("[Controller] Failed to persist edited profile: {}", e);
                false
            }
        };

        let mut s = self.state.borrow_mut();
        let language = s.language;
        s.warning = (!saved).then(|| i18n::profile_save_failed(language).to_string());
        s.profile = Some(profile);
        saved
    }

    pub fn set_language(&self, language: LanguageCode) {
        self.state.borrow_mut().language = language;
    }

    pub fn dismiss_notices(&self) {
        let mut s = self.state.borrow_mut();
        s.error = None;
        s.warning = None;
    }

    // =========================================================
    // 异步转换
    // =========================================================

    /// 按用户名或全名登录
    pub async fn submit_login(&self, identifier: &str) -> LoginOutcome {
        let identifier = identifier.trim();
        if self.screen() != Screen::Login || identifier.is_empty() {
            return LoginOutcome::Ignored;
        }
        let Some(guard) = PendingGuard::acquire(&self.state, &self.epoch) else {
            return LoginOutcome::Busy;
        };
        self.state.borrow_mut().error = None;

        let result = self.client.lookup_profile(identifier).await;

        if !guard.is_current() {
            log_warn!("[Controller] Login result discarded, screen changed");
            return LoginOutcome::Ignored;
        }

        match result {
            Ok(profile) => {
                self.persist_profile(&profile);
                let mut s = self.state.borrow_mut();
                s.profile = Some(profile);
                self.enter(&mut s, Screen::App);
                log_info!("[Controller] Signed in as '{}'", identifier);
                LoginOutcome::SignedIn
            }
            Err(e) => {
                log_warn!("[Controller] Login failed for '{}': {}", identifier, e);
                let attempts = {
                    let mut s = self.state.borrow_mut();
                    s.login_attempts += 1;
                    s.error = Some(i18n::login_not_found(
                        s.language,
                        s.login_attempts,
                        self.max_login_attempts,
                    ));
                    s.login_attempts
                };

                if attempts < self.max_login_attempts {
                    return LoginOutcome::Rejected { attempts };
                }

                if let Err(e) = self.session.clear_welcome_seen() {
                    log_warn!("[Controller] Failed to clear welcome flag: {}", e);
                }
                self.enter(&mut self.state.borrow_mut(), Screen::Welcome);
                LoginOutcome::ReturnedToWelcome
            }
        }
    }

    /// 提交新档案
    ///
    /// 头像上传失败时降级为提示，继续注册。
    pub async fn complete_onboarding(
        &self,
        draft: StudentProfile,
        avatar: Option<AvatarFile>,
    ) -> OnboardingOutcome {
        if self.screen() != Screen::Onboarding || draft.name.trim().is_empty() {
            return OnboardingOutcome::Ignored;
        }
        let Some(guard) = PendingGuard::acquire(&self.state, &self.epoch) else {
            return OnboardingOutcome::Busy;
        };
        self.dismiss_notices();

        let mut profile = prepare_draft(draft);
        let mut avatar_failed = false;

        if let Some(avatar) = avatar {
            match self.client.upload_avatar(&avatar).await {
                Ok(location) => profile.avatar_url = Some(location),
                Err(e) => {
                    log_warn!("[Controller] Avatar upload failed, continuing: {}", e);
                    avatar_failed = true;
                }
            }
            if !guard.is_current() {
                log_warn!("[Controller] Onboarding abandoned during avatar upload");
                return OnboardingOutcome::Ignored;
            }
        }

        let result = self.client.register_profile(&profile).await;

        if !guard.is_current() {
            log_warn!("[Controller] Registration result discarded, screen changed");
            return OnboardingOutcome::Ignored;
        }

        let language = self.language();
        let warning = avatar_failed.then(|| i18n::avatar_upload_failed(language).to_string());

        match result {
            Ok(server) => {
                let profile = profile.merge_from_server(server);
                self.persist_profile(&profile);
                let mut s = self.state.borrow_mut();
                s.profile = Some(profile);
                self.enter(&mut s, Screen::App);
                s.warning = warning;
                OnboardingOutcome::Completed { avatar_failed }
            }
            Err(e) => {
                log_error!("[Controller] Registration failed: {}", e);
                let mut s = self.state.borrow_mut();
                s.error = Some(i18n::registration_failed(language, e.server_detail()));
                s.warning = warning;
                OnboardingOutcome::Failed
            }
        }
    }

    // =========================================================
    // 内部工具
    // =========================================================

    /// 切换屏幕；离开当前屏幕时清空失败计数和提示
    fn enter(&self, s: &mut ControllerSnapshot, to: Screen) {
        if s.screen == to {
            return;
        }
        log_info!("[Controller] {:?} -> {:?}", s.screen, to);
        self.abandon_pending(s);
        s.screen = to;
        s.login_attempts = 0;
        s.error = None;
        s.warning = None;
    }

    /// 放弃进行中的请求：结果到达时会被丢弃
    fn abandon_pending(&self, s: &mut ControllerSnapshot) {
        s.pending = false;
        self.epoch.set(self.epoch.get() + 1);
    }

    fn mark_welcome_seen(&self) {
        if let Err(e) = self.session.mark_welcome_seen() {
            log_warn!("[Controller] Failed to set welcome flag: {}", e);
        }
    }

    fn persist_profile(&self, profile: &StudentProfile) {
        if let Err(e) = self.session.save_profile(profile) {
            log_warn!("[Controller] Failed to cache profile: {}", e);
        }
    }
}

/// 为草稿补齐临时 ID 和创建时间
fn prepare_draft(mut draft: StudentProfile) -> StudentProfile {
    draft.name = draft.name.trim().to_string();
    if draft.id.as_deref().is_none_or(str::is_empty) {
        draft.id = Some(format!("{}{}", PREFIX_TEMP_STUDENT, Uuid::new_v4()));
    }
    if draft.created_at.is_none() {
        draft.created_at = Some(Timestamp::now());
    }
    draft
}
