use std::time::Duration;

use async_trait::async_trait;
use campus_connect_shared::protocol::{
    ApiRequest, ErrorDetail, HealthCheckRequest, HttpMethod, ListConnectionsRequest,
    ListEventsRequest, ListMatchesRequest, LookupStudentRequest, RegisterStudentRequest,
    SuggestChallengesRequest, UPLOAD_AVATAR_FIELD, UPLOAD_AVATAR_PATH, UploadAvatarResponse,
};
use campus_connect_shared::{CampusEvent, ConnectRequest, LanguageCode, MatchResult, StudentProfile};

use crate::config::AppConfig;
use crate::error::{ClientError, ClientErrorStatus, ClientResult};
use crate::web::{HttpClient, HttpRequestBuilder, HttpResponse};

/// 待上传的头像文件
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 后端 REST 接口
///
/// 使用 `async_trait(?Send)`，因为浏览器环境下的 Future 不是 Send 的。
#[async_trait(?Send)]
pub trait RemoteClient {
    async fn register_profile(&self, profile: &StudentProfile) -> ClientResult<StudentProfile>;
    /// 按用户名或全名查找档案
    async fn lookup_profile(&self, identifier: &str) -> ClientResult<StudentProfile>;
    async fn list_matches(
        &self,
        name: &str,
        language: LanguageCode,
    ) -> ClientResult<Vec<MatchResult>>;
    async fn list_challenge_suggestions(
        &self,
        name: &str,
        language: LanguageCode,
    ) -> ClientResult<Vec<String>>;
    async fn connect(&self, student_id: &str, partner_id: &str) -> ClientResult<()>;
    /// 返回已连接伙伴的 ID
    async fn list_connections(&self, student_id: &str) -> ClientResult<Vec<String>>;
    async fn list_events(&self) -> ClientResult<Vec<CampusEvent>>;
    /// 返回头像的路径或 URL
    async fn upload_avatar(&self, avatar: &AvatarFile) -> ClientResult<String>;
    async fn health_check(&self) -> ClientResult<bool>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct CampusApi {
    pub base_url: String,
    pub timeout: Duration,
}

impl CampusApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, timeout }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送类型化请求并解析响应
    async fn call<R: ApiRequest>(&self, req: &R, op: &str) -> ClientResult<R::Response> {
        let url = self.url(&req.path());
        let builder = match R::METHOD {
            HttpMethod::Get => HttpClient::get(&url),
            HttpMethod::Post => HttpClient::post(&url).json(serde_json::to_string(req)?),
        };
        let text = self.execute(builder, op).await?;
        serde_json::from_str::<R::Response>(&text).map_err(|e| ClientError::from(e).in_op(op))
    }

    /// 发送请求，非 2xx 响应转换为对应的错误分类
    async fn execute(&self, builder: HttpRequestBuilder, op: &str) -> ClientResult<String> {
        let res = builder
            .header("Accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| e.in_op(op))?;

        if !res.ok() {
            return Err(Self::error_from_response(res).await.in_op(op));
        }
        res.text().await.map_err(|e| e.in_op(op))
    }

    async fn error_from_response(res: HttpResponse) -> ClientError {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        let detail = server_detail(&body);
        let message = detail.clone().unwrap_or_else(|| format!("HTTP {}", status));
        let err = ClientError::new(ClientErrorStatus::from_http_status(status), message);
        match detail {
            Some(detail) => err.with_server_detail(detail),
            None => err,
        }
    }
}

/// 解析 FastAPI 风格的 `detail` 字段
fn server_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorDetail>(body)
        .ok()
        .and_then(|detail| detail.message())
}

#[async_trait(?Send)]
impl RemoteClient for CampusApi {
    async fn register_profile(&self, profile: &StudentProfile) -> ClientResult<StudentProfile> {
        let envelope = self
            .call(&RegisterStudentRequest { profile }, "api.register_profile")
            .await?;
        Ok(envelope.into_profile())
    }

    async fn lookup_profile(&self, identifier: &str) -> ClientResult<StudentProfile> {
        let envelope = self
            .call(&LookupStudentRequest { identifier }, "api.lookup_profile")
            .await?;
        Ok(envelope.into_profile())
    }

    async fn list_matches(
        &self,
        name: &str,
        language: LanguageCode,
    ) -> ClientResult<Vec<MatchResult>> {
        let envelope = self
            .call(&ListMatchesRequest { name, language }, "api.list_matches")
            .await?;
        Ok(envelope.into_matches())
    }

    async fn list_challenge_suggestions(
        &self,
        name: &str,
        language: LanguageCode,
    ) -> ClientResult<Vec<String>> {
        let suggestions = self
            .call(
                &SuggestChallengesRequest { name, language },
                "api.list_challenge_suggestions",
            )
            .await?;
        Ok(suggestions.personalized_challenges)
    }

    async fn connect(&self, student_id: &str, partner_id: &str) -> ClientResult<()> {
        let req = ConnectRequest {
            student_id: student_id.to_string(),
            partner_id: partner_id.to_string(),
        };
        self.call(&req, "api.connect").await?;
        Ok(())
    }

    async fn list_connections(&self, student_id: &str) -> ClientResult<Vec<String>> {
        let envelope = self
            .call(&ListConnectionsRequest { student_id }, "api.list_connections")
            .await?;
        Ok(envelope.into_partner_ids())
    }

    async fn list_events(&self) -> ClientResult<Vec<CampusEvent>> {
        let envelope = self.call(&ListEventsRequest, "api.list_events").await?;
        Ok(envelope.into_events())
    }

    async fn upload_avatar(&self, avatar: &AvatarFile) -> ClientResult<String> {
        let op = "api.upload_avatar";
        let form = avatar_form(avatar).map_err(|e| e.in_op(op))?;
        let builder = HttpClient::post(&self.url(UPLOAD_AVATAR_PATH)).form(form);
        let text = self.execute(builder, op).await?;

        serde_json::from_str::<UploadAvatarResponse>(&text)
            .map_err(|e| ClientError::from(e).in_op(op))?
            .location()
            .ok_or_else(|| ClientError::validation("上传响应中缺少 path/url").in_op(op))
    }

    async fn health_check(&self) -> ClientResult<bool> {
        match self.call(&HealthCheckRequest, "api.health_check").await {
            Ok(_) => Ok(true),
            Err(e) if e.status == ClientErrorStatus::Network => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// 构造 multipart 表单
fn avatar_form(avatar: &AvatarFile) -> ClientResult<web_sys::FormData> {
    let bytes = js_sys::Uint8Array::from(avatar.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&avatar.mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = web_sys::FormData::new()?;
    form.append_with_blob_and_filename(UPLOAD_AVATAR_FIELD, &blob, &avatar.file_name)?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let api = CampusApi::new("http://localhost:8000/", Duration::from_secs(5));
        assert_eq!(api.base_url, "http://localhost:8000");
        assert_eq!(
            api.url("/api/students/toto"),
            "http://localhost:8000/api/students/toto"
        );
        assert_eq!(api.url("api/events"), "http://localhost:8000/api/events");
    }

    #[test]
    fn test_server_detail_parsing() {
        assert_eq!(
            server_detail(r#"{"detail":"Student already exists"}"#).as_deref(),
            Some("Student already exists")
        );
        assert_eq!(server_detail("<html>Bad gateway</html>"), None);
    }
}
