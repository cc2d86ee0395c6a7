//! 应用上下文
//!
//! 把屏幕控制器接入 Leptos 的响应式系统：
//! 控制器本身保存在 `StoredValue` 中（非 Send，使用本地存储），
//! 视图通过 `state` 信号读取最新快照。每次调用控制器后都要 `sync()`。

use std::rc::Rc;

use leptos::prelude::*;

use crate::api::CampusApi;
use crate::controller::{ControllerSnapshot, Screen, ScreenController};
use crate::web::BrowserStorage;

pub type AppController = ScreenController<BrowserStorage, CampusApi>;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// 控制器快照（只读）
    pub state: ReadSignal<ControllerSnapshot>,
    set_state: WriteSignal<ControllerSnapshot>,
    controller: StoredValue<Rc<AppController>, LocalStorage>,
}

impl AppContext {
    pub fn new(controller: AppController) -> Self {
        let (state, set_state) = signal(controller.snapshot());
        Self {
            state,
            set_state,
            controller: StoredValue::new_local(Rc::new(controller)),
        }
    }

    /// 取得控制器句柄，用于跨越 `.await` 的异步操作
    pub fn controller(&self) -> Rc<AppController> {
        self.controller.get_value()
    }

    /// 把控制器的最新状态写回信号
    pub fn sync(&self) {
        let snapshot = self.controller.with_value(|c| c.snapshot());
        if self.state.with_untracked(|current| current != &snapshot) {
            self.set_state.set(snapshot);
        }
    }

    /// 执行一个同步转换并刷新快照
    pub fn apply<R>(&self, f: impl FnOnce(&AppController) -> R) -> R {
        let result = self.controller.with_value(|c| f(c));
        self.sync();
        result
    }

    pub fn screen_signal(&self) -> Signal<Screen> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.screen))
    }

    /// 是否处于已登录的主界面（供标签路由使用）
    pub fn signed_in_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.screen == Screen::App && s.profile.is_some()))
    }
}

/// 从 Context 获取应用上下文
pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
