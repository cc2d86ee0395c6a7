//! 档案表单状态
//!
//! 将零散的 signal 整合为 `ProfileForm`，创建档案和编辑档案共用：
//! - 数据的持有
//! - 从已有档案加载
//! - 转换为 `StudentProfile`

use std::collections::BTreeSet;

use campus_connect_shared::{FrenchLevel, StudentProfile};
use leptos::prelude::*;

pub const LANGUAGE_OPTIONS: [&str; 2] = ["en", "fr"];

pub const INTEREST_OPTIONS: [&str; 12] = [
    "art",
    "coffee",
    "museums",
    "technology",
    "sports",
    "music",
    "photography",
    "cinema",
    "startups",
    "reading",
    "gaming",
    "travel",
];

pub const LOOKING_FOR_OPTIONS: [&str; 8] = [
    "coffee",
    "french_practice",
    "study_partners",
    "cultural_exchange",
    "french_help",
    "friends",
    "hiking",
    "food_exploration",
];

/// 选中则移除，未选中则加入
pub fn toggle_item(set: &mut BTreeSet<String>, item: &str) {
    if !set.remove(item) {
        set.insert(item.to_string());
    }
}

/// `"food_exploration"` → `"food exploration"`
pub fn option_label(item: &str) -> String {
    item.replace('_', " ")
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// 使用 `RwSignal` 因为它实现了 `Copy`，适合作为 Props 在组件间传递
#[derive(Clone, Copy)]
pub struct ProfileForm {
    pub name: RwSignal<String>,
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub interests: RwSignal<BTreeSet<String>>,
    pub languages: RwSignal<BTreeSet<String>>,
    pub french_level: RwSignal<FrenchLevel>,
    pub looking_for: RwSignal<BTreeSet<String>>,
    pub bio: RwSignal<String>,
    pub program: RwSignal<String>,
    /// 编辑时保留的原始档案（id、头像、创建时间等不在表单中的字段）
    base: RwSignal<StudentProfile>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::from_profile(&StudentProfile::default())
    }

    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            name: RwSignal::new(profile.name.clone()),
            username: RwSignal::new(profile.username.clone().unwrap_or_default()),
            email: RwSignal::new(profile.email.clone().unwrap_or_default()),
            interests: RwSignal::new(profile.interests.clone()),
            languages: RwSignal::new(profile.languages.clone()),
            french_level: RwSignal::new(profile.french_level),
            looking_for: RwSignal::new(profile.looking_for.clone()),
            bio: RwSignal::new(profile.bio.clone()),
            program: RwSignal::new(profile.program.clone().unwrap_or_default()),
            base: RwSignal::new(profile.clone()),
        }
    }

    /// 名字和邮箱都不能为空
    pub fn is_complete(&self) -> bool {
        !self.name.with(|n| n.trim().is_empty()) && !self.email.with(|e| e.trim().is_empty())
    }

    pub fn to_profile(&self) -> StudentProfile {
        StudentProfile {
            name: self.name.get().trim().to_string(),
            username: non_blank(self.username.get()),
            email: non_blank(self.email.get()),
            interests: self.interests.get(),
            languages: self.languages.get(),
            french_level: self.french_level.get(),
            looking_for: self.looking_for.get(),
            bio: self.bio.get().trim().to_string(),
            program: non_blank(self.program.get()),
            ..self.base.get()
        }
    }
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_item() {
        let mut set = BTreeSet::new();
        toggle_item(&mut set, "coffee");
        toggle_item(&mut set, "music");
        assert_eq!(set.len(), 2);
        toggle_item(&mut set, "coffee");
        assert!(!set.contains("coffee"));
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label("food_exploration"), "food exploration");
        assert_eq!(option_label("art"), "art");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  ".into()), None);
        assert_eq!(non_blank(" ana ".into()).as_deref(), Some("ana"));
    }
}
