//! 挑战分类规则表
//!
//! 服务端只返回挑战标题字符串，类型与地点由关键词包含关系推断。
//! 规则按优先级顺序匹配，大小写不敏感，全部未命中时使用默认值。
//! 这是展示层的启发式规则，不是权威数据。

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    Social,
    Cultural,
    Linguistic,
}

impl ChallengeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeKind::Social => "social",
            ChallengeKind::Cultural => "cultural",
            ChallengeKind::Linguistic => "linguistic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChallengeKind::Social => "Connect with other students and build your network",
            ChallengeKind::Cultural => "Explore Montreal's rich culture and heritage",
            ChallengeKind::Linguistic => "Practice your French and improve your language skills",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            ChallengeKind::Social => 60,
            ChallengeKind::Cultural => 100,
            ChallengeKind::Linguistic => 75,
        }
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条规则：任意关键词命中即归入该类别
pub struct KeywordRule<T: 'static> {
    pub keywords: &'static [&'static str],
    pub category: T,
}

/// 有序规则表
pub struct RuleTable<T: 'static> {
    rules: &'static [KeywordRule<T>],
    fallback: T,
}

impl<T: Copy> RuleTable<T> {
    pub const fn new(rules: &'static [KeywordRule<T>], fallback: T) -> Self {
        Self { rules, fallback }
    }

    /// 返回第一条命中规则的类别，否则返回默认值
    pub fn classify(&self, text: &str) -> T {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| haystack.contains(kw)))
            .map(|rule| rule.category)
            .unwrap_or(self.fallback)
    }
}

pub const DEFAULT_LOCATION: &str = "Campus Area";

// 关键词必须是小写
pub static KIND_RULES: RuleTable<ChallengeKind> = RuleTable::new(
    &[
        KeywordRule {
            keywords: &["french", "français"],
            category: ChallengeKind::Linguistic,
        },
        KeywordRule {
            keywords: &["museum", "musée"],
            category: ChallengeKind::Cultural,
        },
    ],
    ChallengeKind::Social,
);

pub static LOCATION_RULES: RuleTable<&'static str> = RuleTable::new(
    &[
        KeywordRule {
            keywords: &["old montreal", "vieux-montréal"],
            category: "Old Montreal",
        },
        KeywordRule {
            keywords: &["mount royal", "mont-royal"],
            category: "Mount Royal Park",
        },
        KeywordRule {
            keywords: &["café", "coffee"],
            category: "Local Café",
        },
        KeywordRule {
            keywords: &["museum", "musée"],
            category: "Museum District",
        },
    ],
    DEFAULT_LOCATION,
);

/// 展示用挑战
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ChallengeKind,
    pub location: String,
    pub points: u32,
    pub completed: bool,
}

impl Challenge {
    /// 由服务端返回的标题构造挑战
    pub fn from_suggestion(index: usize, title: &str) -> Self {
        let kind = KIND_RULES.classify(title);
        Self {
            id: format!("challenge-{}", index),
            title: title.to_string(),
            description: kind.description().to_string(),
            kind,
            location: LOCATION_RULES.classify(title).to_string(),
            points: kind.points(),
            completed: false,
        }
    }
}

pub fn from_suggestions(titles: &[String]) -> Vec<Challenge> {
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| Challenge::from_suggestion(index, title))
        .collect()
}

/// 请求失败时展示的默认挑战
pub fn fallback_challenges() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "1".into(),
            title: "Order coffee in French at a local café".into(),
            description: "Practice your French and enjoy a local coffee".into(),
            kind: ChallengeKind::Linguistic,
            location: "Local Café".into(),
            points: 75,
            completed: false,
        },
        Challenge {
            id: "2".into(),
            title: "Visit the Montreal Museum of Fine Arts".into(),
            description: "Explore world-class art exhibitions".into(),
            kind: ChallengeKind::Cultural,
            location: "Museum District".into(),
            points: 100,
            completed: true,
        },
        Challenge {
            id: "3".into(),
            title: "Join a student club meeting".into(),
            description: "Meet students with similar interests".into(),
            kind: ChallengeKind::Social,
            location: "Campus".into(),
            points: 60,
            completed: false,
        },
    ]
}
