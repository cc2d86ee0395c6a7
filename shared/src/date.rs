//! 时间类型模块
//!
//! `Timestamp` 包装 `chrono::DateTime<Utc>`，序列化为 RFC 3339。
//! 反序列化时同时接受不带时区的 ISO 时间（服务端 `datetime.utcnow()` 的输出），
//! 按 UTC 解释。

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// 当前时间
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// 解析 RFC 3339 或不带时区的 ISO 8601 字符串
    pub fn parse(s: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| Self(naive.and_utc()))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_and_naive() {
        let a = Timestamp::parse("2024-05-01T10:00:00Z").unwrap();
        let b = Timestamp::parse("2024-05-01T10:00:00").unwrap();
        let c = Timestamp::parse("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(Timestamp::parse("yesterday").is_none());
    }

    #[test]
    fn test_serde_uses_rfc3339() {
        let ts = Timestamp::parse("2024-05-01T10:00:00.5").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
        assert!(json.contains("+00:00"));
    }
}
