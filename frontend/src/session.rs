//! 会话存储
//!
//! 两个逻辑键：当前用户档案（JSON）和“已看过欢迎页”标记（字面量 `"true"`）。
//! 底层键值存储通过 [`KeyValueStore`] 注入，浏览器中为 `BrowserStorage`，测试中为内存实现。

use campus_connect_shared::StudentProfile;

use crate::error::ClientResult;

pub const KEY_CURRENT_USER: &str = "udemCampusUser";
pub const KEY_HAS_SEEN_WELCOME: &str = "udemCampusHasSeenWelcome";
/// 旧版本使用的用户键，读取后迁移到 `KEY_CURRENT_USER`
pub const KEY_LEGACY_USER: &str = "montrealCampusUser";

const FLAG_TRUE: &str = "true";

/// 同步、持久的键值存储接口
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// 类型化的会话访问
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 读取缓存的当前用户
    ///
    /// - 存储不可用时返回错误
    /// - 记录损坏（无法解析）时记录日志并视为不存在
    /// - 仅存在旧键时迁移到新键
    pub fn load_profile(&self) -> ClientResult<Option<StudentProfile>> {
        let (raw, from_legacy) = match self.store.get(KEY_CURRENT_USER)? {
            Some(raw) => (raw, false),
            None => match self.store.get(KEY_LEGACY_USER)? {
                Some(raw) => (raw, true),
                None => return Ok(None),
            },
        };

        let profile = match serde_json::from_str::<StudentProfile>(&raw) {
            Ok(profile) => profile,
            Err(e) => {
                log_warn!("[Session] Stored profile is corrupt, ignoring it: {}", e);
                return Ok(None);
            }
        };

        if from_legacy {
            let migrated = self
                .store
                .set(KEY_CURRENT_USER, &raw)
                .and_then(|_| self.store.remove(KEY_LEGACY_USER));
            if let Err(e) = migrated {
                log_warn!("[Session] Legacy profile migration failed: {}", e);
            }
        }

        Ok(Some(profile))
    }

    pub fn save_profile(&self, profile: &StudentProfile) -> ClientResult<()> {
        let raw = serde_json::to_string(profile)?;
        self.store
            .set(KEY_CURRENT_USER, &raw)
            .map_err(|e| e.in_op("session.save_profile"))
    }

    /// 清除当前用户（含旧键）
    pub fn clear_profile(&self) -> ClientResult<()> {
        self.store.remove(KEY_CURRENT_USER)?;
        self.store.remove(KEY_LEGACY_USER)
    }

    pub fn has_seen_welcome(&self) -> ClientResult<bool> {
        Ok(self.store.get(KEY_HAS_SEEN_WELCOME)?.as_deref() == Some(FLAG_TRUE))
    }

    pub fn mark_welcome_seen(&self) -> ClientResult<()> {
        self.store.set(KEY_HAS_SEEN_WELCOME, FLAG_TRUE)
    }

    pub fn clear_welcome_seen(&self) -> ClientResult<()> {
        self.store.remove(KEY_HAS_SEEN_WELCOME)
    }
}
