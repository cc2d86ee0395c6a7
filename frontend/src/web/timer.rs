//! 定时器封装模块
//!
//! 使用 `web_sys` 的原生 `setTimeout` 实现一个可 await 的延时，
//! 用于给网络请求设置超时上限。

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use wasm_bindgen_futures::JsFuture;

/// 一次性延时 Future
///
/// 封装 `setTimeout` API。当 `Sleep` 在触发前被 drop 时，自动清除定时器。
pub struct Sleep {
    handle: Option<i32>,
    inner: JsFuture,
}

impl Sleep {
    /// 创建新的延时
    ///
    /// 无法获取 window 对象时永远不会完成。
    pub fn new(duration: Duration) -> Self {
        let millis = duration.as_millis().min(i32::MAX as u128) as i32;
        let mut handle = None;

        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            if let Some(window) = web_sys::window() {
                handle = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .ok();
            }
        });

        Self {
            handle,
            inner: JsFuture::from(promise),
        }
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.inner).poll(cx) {
            Poll::Ready(_) => {
                self.handle = None;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for Sleep {
    fn drop(&mut self) {
        if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}

pub fn sleep(duration: Duration) -> Sleep {
    Sleep::new(duration)
}
