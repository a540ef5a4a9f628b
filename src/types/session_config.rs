//! The three mandatory consultation filters and their selection state.
//!
//! A consultation cannot begin until a language, a legal area, and a user
//! type have all been chosen. Each filter is a fixed enumeration with a
//! wire code (what the backend receives) and a display label (what a UI
//! shows).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the twelve supported consultation locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
    Bengali,
    Telugu,
    Tamil,
    Marathi,
    Gujarati,
    Kannada,
    Malayalam,
    Punjabi,
    Odia,
    Assamese,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 12] = [
        Language::English,
        Language::Hindi,
        Language::Bengali,
        Language::Telugu,
        Language::Tamil,
        Language::Marathi,
        Language::Gujarati,
        Language::Kannada,
        Language::Malayalam,
        Language::Punjabi,
        Language::Odia,
        Language::Assamese,
    ];

    /// The wire code sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Bengali => "Bengali",
            Language::Telugu => "Telugu",
            Language::Tamil => "Tamil",
            Language::Marathi => "Marathi",
            Language::Gujarati => "Gujarati",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Punjabi => "Punjabi",
            Language::Odia => "Odia",
            Language::Assamese => "Assamese",
        }
    }

    /// The native display label.
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Bengali => "বাংলা",
            Language::Telugu => "తెలుగు",
            Language::Tamil => "தமிழ்",
            Language::Marathi => "मराठी",
            Language::Gujarati => "ગુજરાતી",
            Language::Kannada => "ಕನ್ನಡ",
            Language::Malayalam => "മലയാളം",
            Language::Punjabi => "ਪੰਜਾਬੀ",
            Language::Odia => "ଓଡ଼ିଆ",
            Language::Assamese => "অসমীয়া",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid language code.
#[derive(Debug)]
pub struct LanguageParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for LanguageParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown language: {}", self.invalid_value)
    }
}

impl std::error::Error for LanguageParseError {}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| LanguageParseError {
                invalid_value: s.to_string(),
            })
    }
}

/// The legal area a consultation is scoped to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalArea {
    /// Indian Penal Code.
    #[serde(rename = "IPC")]
    Ipc,

    /// Right to Information.
    #[serde(rename = "RTI")]
    Rti,

    /// Labor law.
    Labor,

    /// Anything else.
    Other,
}

impl LegalArea {
    /// All selectable legal areas, in display order.
    pub const ALL: [LegalArea; 4] = [
        LegalArea::Ipc,
        LegalArea::Rti,
        LegalArea::Labor,
        LegalArea::Other,
    ];

    /// The wire code sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegalArea::Ipc => "IPC",
            LegalArea::Rti => "RTI",
            LegalArea::Labor => "Labor",
            LegalArea::Other => "Other",
        }
    }

    /// The display label.
    pub fn label(&self) -> &'static str {
        match self {
            LegalArea::Ipc => "IPC",
            LegalArea::Rti => "RTI",
            LegalArea::Labor => "Labor Laws",
            LegalArea::Other => "Other",
        }
    }
}

impl fmt::Display for LegalArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid legal-area code.
#[derive(Debug)]
pub struct LegalAreaParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for LegalAreaParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown legal area: {}", self.invalid_value)
    }
}

impl std::error::Error for LegalAreaParseError {}

impl FromStr for LegalArea {
    type Err = LegalAreaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LegalArea::ALL
            .iter()
            .find(|area| area.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| LegalAreaParseError {
                invalid_value: s.to_string(),
            })
    }
}

/// The kind of person asking.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// A member of the public.
    Common,

    /// A practicing advocate.
    Advocate,

    /// A judge.
    Judge,
}

impl UserType {
    /// All selectable user types, in display order.
    pub const ALL: [UserType; 3] = [UserType::Common, UserType::Advocate, UserType::Judge];

    /// The wire code sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Common => "common",
            UserType::Advocate => "advocate",
            UserType::Judge => "judge",
        }
    }

    /// The display label.
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Common => "Common User",
            UserType::Advocate => "Advocate",
            UserType::Judge => "Judge",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid user-type code.
#[derive(Debug)]
pub struct UserTypeParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for UserTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown user type: {}", self.invalid_value)
    }
}

impl std::error::Error for UserTypeParseError {}

impl FromStr for UserType {
    type Err = UserTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserType::ALL
            .iter()
            .find(|ut| ut.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UserTypeParseError {
                invalid_value: s.to_string(),
            })
    }
}

/// The three mandatory filters gating entry into a consultation.
///
/// A fresh configuration preselects English and the common user type; the
/// legal area always starts unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Consultation language.
    pub language: Option<Language>,

    /// Legal area the consultation is scoped to.
    pub legal_area: Option<LegalArea>,

    /// The kind of person asking.
    pub user_type: Option<UserType>,
}

impl SessionConfig {
    /// Creates a new configuration with the default preselections.
    pub fn new() -> Self {
        Self {
            language: Some(Language::English),
            legal_area: None,
            user_type: Some(UserType::Common),
        }
    }

    /// Returns true iff all three filters are set.
    pub fn is_complete(&self) -> bool {
        self.language.is_some() && self.legal_area.is_some() && self.user_type.is_some()
    }

    /// Names of the filters that are still unset, in display order.
    pub fn missing_filters(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.language.is_none() {
            missing.push("language".to_string());
        }
        if self.legal_area.is_none() {
            missing.push("legal area".to_string());
        }
        if self.user_type.is_none() {
            missing.push("user type".to_string());
        }
        missing
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
