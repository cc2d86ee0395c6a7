//! 双语文案
//!
//! 只包含控制器与视图实际展示的文案，不是完整的翻译表。

use campus_connect_shared::LanguageCode;

/// 视图层使用的文案键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    WelcomeTitle,
    WelcomeSubtitle,
    NavHome,
    NavMatches,
    NavChallenges,
    NavProfile,
    NavMap,
    NavForum,
    NavMarketplace,
    MatchesTitle,
    MatchesEmpty,
    ChallengesTitle,
    Loading,
    Error,
    Logout,
    Save,
    SignIn,
    SigningIn,
}

pub fn t(lang: LanguageCode, key: Key) -> &'static str {
    use Key::*;
    match (lang, key) {
        (LanguageCode::En, WelcomeTitle) => "UdeM Campus Connect",
        (LanguageCode::Fr, WelcomeTitle) => "UdeM Campus Connect",
        (LanguageCode::En, WelcomeSubtitle) => "Your student community in Montreal",
        (LanguageCode::Fr, WelcomeSubtitle) => "Votre communauté étudiante à Montréal",
        (LanguageCode::En, NavHome) => "Home",
        (LanguageCode::Fr, NavHome) => "Accueil",
        (LanguageCode::En, NavMatches) => "Matches",
        (LanguageCode::Fr, NavMatches) => "Jumelages",
        (LanguageCode::En, NavChallenges) => "Challenges",
        (LanguageCode::Fr, NavChallenges) => "Défis",
        (LanguageCode::En, NavProfile) => "Profile",
        (LanguageCode::Fr, NavProfile) => "Profil",
        (LanguageCode::En, NavMap) => "Campus Map",
        (LanguageCode::Fr, NavMap) => "Carte du Campus",
        (_, NavForum) => "Forum",
        (LanguageCode::En, NavMarketplace) => "Marketplace",
        (LanguageCode::Fr, NavMarketplace) => "Marché",
        (LanguageCode::En, MatchesTitle) => "Your Matches",
        (LanguageCode::Fr, MatchesTitle) => "Vos Jumelages",
        (LanguageCode::En, MatchesEmpty) => "No matches found yet",
        (LanguageCode::Fr, MatchesEmpty) => "Aucun jumelage pour le moment",
        (LanguageCode::En, ChallengesTitle) => "Montreal Challenges",
        (LanguageCode::Fr, ChallengesTitle) => "Défis Montréal",
        (LanguageCode::En, Loading) => "Loading...",
        (LanguageCode::Fr, Loading) => "Chargement...",
        (LanguageCode::En, Error) => "Something went wrong",
        (LanguageCode::Fr, Error) => "Quelque chose s'est mal passé",
        (LanguageCode::En, Logout) => "Logout",
        (LanguageCode::Fr, Logout) => "Déconnexion",
        (LanguageCode::En, Save) => "Save",
        (LanguageCode::Fr, Save) => "Enregistrer",
        (LanguageCode::En, SignIn) => "Sign in",
        (LanguageCode::Fr, SignIn) => "Se connecter",
        (LanguageCode::En, SigningIn) => "Signing in...",
        (LanguageCode::Fr, SigningIn) => "Connexion...",
    }
}

/// 视图中一次性使用的短文案，不值得单独建键
pub fn pick(lang: LanguageCode, en: &'static str, fr: &'static str) -> &'static str {
    match lang {
        LanguageCode::En => en,
        LanguageCode::Fr => fr,
    }
}

/// 登录失败提示（带尝试次数）
pub fn login_not_found(lang: LanguageCode, attempts: u32, max_attempts: u32) -> String {
    match lang {
        LanguageCode::En => format!(
            "No profile found with this username or name. Create a new profile. ({}/{} attempts)",
            attempts, max_attempts
        ),
        LanguageCode::Fr => format!(
            "Aucun profil trouvé pour cet identifiant. Créez un nouveau profil. ({}/{} essais)",
            attempts, max_attempts
        ),
    }
}

/// 注册失败提示，`detail` 为服务端返回的原因
pub fn registration_failed(lang: LanguageCode, detail: Option<&str>) -> String {
    match (lang, detail) {
        (LanguageCode::En, Some(detail)) => format!("Registration failed: {}", detail),
        (LanguageCode::En, None) => "Registration failed: Please try again.".to_string(),
        (LanguageCode::Fr, Some(detail)) => format!("Échec de l'inscription : {}", detail),
        (LanguageCode::Fr, None) => "Échec de l'inscription : veuillez réessayer.".to_string(),
    }
}

pub fn avatar_upload_failed(lang: LanguageCode) -> &'static str {
    match lang {
        LanguageCode::En => "Avatar upload failed; your profile was created without a photo.",
        LanguageCode::Fr => "Le téléversement de la photo a échoué ; profil créé sans photo.",
    }
}

pub fn profile_save_failed(lang: LanguageCode) -> &'static str {
    match lang {
        LanguageCode::En => "Profile updated, but it could not be saved on this device.",
        LanguageCode::Fr => "Profil mis à jour, mais impossible de l'enregistrer sur cet appareil.",
    }
}

pub fn request_in_progress(lang: LanguageCode) -> &'static str {
    pick(
        lang,
        "A request is already in progress, please wait.",
        "Une requête est déjà en cours, veuillez patienter.",
    )
}
