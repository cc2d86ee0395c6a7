//! 原生 Web API 封装模块
//!
//! 对浏览器原生 API 的轻量级封装（fetch、localStorage、setTimeout、History），
//! 不引入 gloo-* 系列 crate，以减小 WASM 二进制体积。

mod http;
pub mod route;
pub mod router;
mod storage;
mod timer;

pub use http::{HttpClient, HttpRequestBuilder, HttpResponse};
pub use storage::BrowserStorage;
