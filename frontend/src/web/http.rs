//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 提供简洁的 HTTP 客户端接口。
//! 每个请求都与 `setTimeout` 竞速，超时按网络错误返回。

use std::time::Duration;

use campus_connect_shared::protocol::HttpMethod;
use futures::future::{Either, select};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response};

use super::timer::sleep;
use crate::error::{ClientError, ClientResult};

fn method_str(method: HttpMethod) -> &'static str {
    match method {
        HttpMethod::Get => "GET",
        HttpMethod::Post => "POST",
    }
}

/// 请求体
pub enum HttpBody {
    Json(String),
    /// multipart/form-data，由浏览器生成 boundary，不能手动设置 Content-Type
    Form(FormData),
}

/// HTTP 响应封装
pub struct HttpResponse {
    inner: Response,
}

impl HttpResponse {
    /// 获取 HTTP 状态码
    pub fn status(&self) -> u16 {
        self.inner.status()
    }

    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        self.inner.ok()
    }

    /// 获取响应体文本
    pub async fn text(self) -> ClientResult<String> {
        let promise = self
            .inner
            .text()
            .map_err(|e| ClientError::serialization(format!("{:?}", e)))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ClientError::serialization(format!("{:?}", e)))?;

        text.as_string()
            .ok_or_else(|| ClientError::serialization("无法转换为字符串"))
    }
}

/// HTTP 请求构建器
pub struct HttpRequestBuilder {
    url: String,
    method: HttpMethod,
    headers: Vec<(String, String)>,
    body: Option<HttpBody>,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    pub fn new(url: String, method: HttpMethod) -> Self {
        Self {
            url,
            method,
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// 添加请求头
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// 设置 JSON 请求体
    pub fn json(self, body: String) -> Self {
        let mut builder = self.header("Content-Type", "application/json");
        builder.body = Some(HttpBody::Json(body));
        builder
    }

    /// 设置表单请求体
    pub fn form(mut self, form: FormData) -> Self {
        self.body = Some(HttpBody::Form(form));
        self
    }

    /// 设置超时时间
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// 发送请求
    pub async fn send(self) -> ClientResult<HttpResponse> {
        let url = self.url.clone();
        let Some(timeout) = self.timeout else {
            return self.fetch().await;
        };

        let fetch = Box::pin(self.fetch());
        let timer = sleep(timeout);
        match select(fetch, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ClientError::network(format!(
                "请求超时 ({} 秒)",
                timeout.as_secs()
            ))
            .in_op_with("http.send", url)),
        }
    }

    async fn fetch(self) -> ClientResult<HttpResponse> {
        let headers = Headers::new()
            .map_err(|e| ClientError::network(format!("创建 Headers 失败: {:?}", e)))?;

        for (key, value) in &self.headers {
            headers
                .set(key, value)
                .map_err(|e| ClientError::network(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(method_str(self.method));
        opts.set_headers(&headers.into());

        match &self.body {
            Some(HttpBody::Json(body)) => opts.set_body(&JsValue::from_str(body)),
            Some(HttpBody::Form(form)) => opts.set_body(form.as_ref()),
            None => {}
        }

        let request = Request::new_with_str_and_init(&self.url, &opts)
            .map_err(|e| ClientError::network(format!("{:?}", e)).in_op("http.build"))?;

        let window = web_sys::window().ok_or_else(|| ClientError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| {
                ClientError::network(format!("{:?}", e)).in_op_with("http.fetch", &self.url)
            })?;

        let response: Response = resp_value.dyn_into().map_err(|e| {
            ClientError::serialization(format!("Response 类型转换失败: {:?}", e))
        })?;

        Ok(HttpResponse { inner: response })
    }
}

/// 轻量级 HTTP 客户端
pub struct HttpClient;

impl HttpClient {
    /// 创建 GET 请求
    pub fn get(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), HttpMethod::Get)
    }

    /// 创建 POST 请求
    pub fn post(url: &str) -> HttpRequestBuilder {
        HttpRequestBuilder::new(url.to_string(), HttpMethod::Post)
    }
}
