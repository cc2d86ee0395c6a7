use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 客户端错误分类
///
/// 所有错误都可恢复，最终在屏幕控制器边界转换为用户可见的提示。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorStatus {
    /// 404: 标识符没有对应的档案
    NotFound,
    /// 400/422: 提交的数据不合法
    Validation,
    /// 网络失败、超时或服务端 5xx
    Network,
    /// 本地存储不可用
    Storage,
    /// JSON 解析或序列化失败
    Serialization,
}

impl ClientErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientErrorStatus::NotFound => "NOT_FOUND",
            ClientErrorStatus::Validation => "VALIDATION_ERROR",
            ClientErrorStatus::Network => "NETWORK_ERROR",
            ClientErrorStatus::Storage => "STORAGE_ERROR",
            ClientErrorStatus::Serialization => "JSON_PARSE_ERROR",
        }
    }

    /// 按 HTTP 状态码归类
    pub fn from_http_status(status: u16) -> Self {
        match status {
            404 => ClientErrorStatus::NotFound,
            400 | 409 | 422 => ClientErrorStatus::Validation,
            _ => ClientErrorStatus::Network,
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSpan {
    /// 操作名称，如 "storage.get", "api.lookup_profile"
    pub operation: String,
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug)]
pub struct ClientError {
    pub status: ClientErrorStatus,
    pub message: String,
    /// 服务端返回的 `detail` 原文（如果有）
    server_detail: Option<String>,
    /// 原始错误源（供调试用）
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
    spans: Vec<ErrorSpan>,
}

impl ClientError {
    pub fn new(status: ClientErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            server_detail: None,
            source: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Network, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Storage, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ClientErrorStatus::Serialization, message)
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn with_server_detail(mut self, detail: impl Into<String>) -> Self {
        self.server_detail = Some(detail.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    pub fn server_detail(&self) -> Option<&str> {
        self.server_detail.as_deref()
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::serialization(e.to_string()).with_source(e)
    }
}

impl From<wasm_bindgen::JsValue> for ClientError {
    fn from(e: wasm_bindgen::JsValue) -> Self {
        let msg = e.as_string().unwrap_or_else(|| format!("{:?}", e));
        ClientError::network(msg)
    }
}
