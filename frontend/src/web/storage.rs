//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现 [`KeyValueStore`]，区分“键不存在”和“存储不可用”。
//! 隐私模式或禁用存储的浏览器中 `window.localStorage` 会抛异常，此时返回 Storage 错误。

use crate::error::{ClientError, ClientResult};
use crate::session::KeyValueStore;

/// 浏览器 LocalStorage
#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> ClientResult<web_sys::Storage> {
        let window =
            web_sys::window().ok_or_else(|| ClientError::storage("无法获取 window 对象"))?;
        window
            .local_storage()
            .map_err(|e| ClientError::storage(format!("localStorage 不可用: {:?}", e)))?
            .ok_or_else(|| ClientError::storage("localStorage 不存在"))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ClientError::storage(format!("{:?}", e)).in_op_with("storage.get", key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ClientError::storage(format!("{:?}", e)).in_op_with("storage.set", key))
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| ClientError::storage(format!("{:?}", e)).in_op_with("storage.remove", key))
    }
}
