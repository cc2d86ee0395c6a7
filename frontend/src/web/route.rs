//! 标签路由定义
//!
//! 只在主界面（`Screen::App`）内生效，不依赖 DOM。
//! 欢迎、登录、创建档案等顶层屏幕由控制器决定，不对应 URL。

use std::fmt::Display;

use crate::i18n::Key;

/// 主界面的标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTab {
    #[default]
    Home,
    Matches,
    Challenges,
    Profile,
    Map,
    Forum,
    Marketplace,
}

impl AppTab {
    /// 底部导航栏中的顺序
    pub const NAV: [AppTab; 5] = [
        AppTab::Home,
        AppTab::Matches,
        AppTab::Challenges,
        AppTab::Forum,
        AppTab::Profile,
    ];

    /// 将 URL path 解析为标签，未知路径回到首页
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/matches" => Self::Matches,
            "/challenges" => Self::Challenges,
            "/profile" => Self::Profile,
            "/map" => Self::Map,
            "/forum" => Self::Forum,
            "/marketplace" => Self::Marketplace,
            _ => Self::Home,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Matches => "/matches",
            Self::Challenges => "/challenges",
            Self::Profile => "/profile",
            Self::Map => "/map",
            Self::Forum => "/forum",
            Self::Marketplace => "/marketplace",
        }
    }

    pub fn label(&self) -> Key {
        match self {
            Self::Home => Key::NavHome,
            Self::Matches => Key::NavMatches,
            Self::Challenges => Key::NavChallenges,
            Self::Profile => Key::NavProfile,
            Self::Map => Key::NavMap,
            Self::Forum => Key::NavForum,
            Self::Marketplace => Key::NavMarketplace,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Home => "🏠",
            Self::Matches => "🤝",
            Self::Challenges => "🎯",
            Self::Profile => "👤",
            Self::Map => "🗺️",
            Self::Forum => "💬",
            Self::Marketplace => "🛒",
        }
    }

    /// 退出登录后停留的标签
    pub fn signed_out_fallback() -> Self {
        Self::Home
    }
}

impl Display for AppTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
