//! 运行时配置
//!
//! 浏览器中没有环境变量，配置在编译期通过 `option_env!` 注入，
//! 未设置时使用默认值，例如：
//!
//! ```text
//! CAMPUS_API_BASE_URL=https://api.example.org trunk build --release
//! ```

use std::time::Duration;

/// 这些是默认值，如果构建时没有提供对应的环境变量，则使用这些值
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 后端 API 根地址（不带末尾斜杠）
    pub api_base_url: String,
    /// 单个请求的超时时间，超时按网络错误处理
    pub request_timeout: Duration,
    /// 连续登录失败多少次后返回欢迎页
    pub max_login_attempts: u32,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("CAMPUS_API_BASE_URL"),
            option_env!("CAMPUS_REQUEST_TIMEOUT_SECS"),
            option_env!("CAMPUS_MAX_LOGIN_ATTEMPTS"),
        )
    }

    fn from_values(base_url: Option<&str>, timeout: Option<&str>, attempts: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = timeout
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_login_attempts = attempts
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_LOGIN_ATTEMPTS);

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            max_login_attempts,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_login_attempts, 4);
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = AppConfig::from_values(Some("https://api.example.org/"), Some("0"), Some("6"));
        assert_eq!(config.api_base_url, "https://api.example.org");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_login_attempts, 6);
    }
}
