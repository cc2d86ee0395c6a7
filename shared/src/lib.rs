use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub mod challenge;
pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 临时学生 ID 前缀，注册成功后由服务端返回的规范 ID 覆盖
pub const PREFIX_TEMP_STUDENT: &str = "student-";
/// 匹配结果缺少 ID 时使用的前缀
pub const PREFIX_MATCH: &str = "match-";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 界面语言 / 查询语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Fr,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 2] = [LanguageCode::En, LanguageCode::Fr];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Fr => "fr",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            LanguageCode::En => LanguageCode::Fr,
            LanguageCode::Fr => LanguageCode::En,
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(LanguageCode::En),
            "fr" => Ok(LanguageCode::Fr),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

/// 法语水平 (CEFR)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum FrenchLevel {
    #[default]
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl FrenchLevel {
    pub const ALL: [FrenchLevel; 6] = [
        FrenchLevel::A1,
        FrenchLevel::A2,
        FrenchLevel::B1,
        FrenchLevel::B2,
        FrenchLevel::C1,
        FrenchLevel::C2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrenchLevel::A1 => "A1",
            FrenchLevel::A2 => "A2",
            FrenchLevel::B1 => "B1",
            FrenchLevel::B2 => "B2",
            FrenchLevel::C1 => "C1",
            FrenchLevel::C2 => "C2",
        }
    }
}

impl fmt::Display for FrenchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrenchLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrenchLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown french level: {}", s))
    }
}

/// 学生档案
///
/// 服务端为权威来源，本地缓存一份副本到 LocalStorage。
/// 集合字段序列化为 JSON 数组（去重，不保证原始顺序）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StudentProfile {
    /// 服务端以 `_id` 返回权威 ID
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    #[serde(default)]
    pub french_level: FrenchLevel,
    #[serde(default)]
    pub looking_for: BTreeSet<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl StudentProfile {
    /// 登录时使用的标识：优先用户名，否则全名
    pub fn identifier(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// 用服务端返回的档案覆盖本地字段
    ///
    /// 服务端未返回的可选字段保留本地值（例如刚上传的头像）。
    pub fn merge_from_server(mut self, server: StudentProfile) -> Self {
        if server.id.is_some() {
            self.id = server.id;
        }
        if !server.name.trim().is_empty() {
            self.name = server.name;
        }
        self.username = server.username.or(self.username);
        self.email = server.email.or(self.email);
        if !server.interests.is_empty() {
            self.interests = server.interests;
        }
        if !server.languages.is_empty() {
            self.languages = server.languages;
        }
        self.french_level = server.french_level;
        if !server.looking_for.is_empty() {
            self.looking_for = server.looking_for;
        }
        if !server.bio.is_empty() {
            self.bio = server.bio;
        }
        self.avatar_url = server.avatar_url.or(self.avatar_url);
        self.program = server.program.or(self.program);
        self.faculty = server.faculty.or(self.faculty);
        self.created_at = server.created_at.or(self.created_at);
        self
    }
}

/// 匹配结果（语言交换伙伴）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_match_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default = "default_unknown")]
    pub native_language: String,
    #[serde(default = "default_unknown")]
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default)]
    pub match_score: f64,
    #[serde(default = "default_explanation")]
    pub explanation: String,
    #[serde(default)]
    pub common_interests: Vec<String>,
    #[serde(default = "default_activity")]
    pub suggested_activity: String,
}

fn default_match_name() -> String {
    "Potential Match".to_string()
}

fn default_unknown() -> String {
    "Unknown".to_string()
}

fn default_explanation() -> String {
    "Great match based on shared interests!".to_string()
}

fn default_activity() -> String {
    "Language exchange session".to_string()
}

/// 校园活动
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampusEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "imageUrl", alias = "image_url")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub participants: u32,
    #[serde(default, rename = "maxCapacity", alias = "max_capacity")]
    pub max_capacity: Option<u32>,
}

/// 建立连接请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectRequest {
    pub student_id: String,
    pub partner_id: String,
}

/// 服务端保存的连接记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(default)]
    pub student_id: String,
    pub partner_id: String,
    #[serde(default)]
    pub status: String,
}
