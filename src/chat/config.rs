//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! configuration handed to a session at construction.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

use crate::error::{Error, Result};
use crate::types::{Language, LegalArea, UserType};

/// Command-line arguments for the nyaya-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Backend query endpoint.
    #[arrrg(optional, "Backend query URL (default: http://localhost:8080/query)", "URL")]
    pub url: Option<String>,

    /// Preselect the consultation language.
    #[arrrg(optional, "Consultation language (default: English)", "LANGUAGE")]
    pub language: Option<String>,

    /// Preselect the legal area.
    #[arrrg(optional, "Legal area (IPC, RTI, Labor, Other)", "AREA")]
    pub area: Option<String>,

    /// Preselect the user type.
    #[arrrg(optional, "User type (common, advocate, judge)", "TYPE")]
    pub user_type: Option<String>,

    /// Attach a document before the first turn.
    #[arrrg(optional, "Path of a document to attach", "PATH")]
    pub attach: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Resolved configuration for a chat session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Backend query endpoint; `None` uses the client default.
    pub query_url: Option<String>,

    /// Preselected consultation language.
    pub language: Option<Language>,

    /// Preselected legal area.
    pub legal_area: Option<LegalArea>,

    /// Preselected user type.
    pub user_type: Option<UserType>,

    /// Document to attach before the first turn.
    pub attach_path: Option<PathBuf>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values: no preselections
    /// beyond the session's own defaults, color enabled.
    pub fn new() -> Self {
        Self {
            query_url: None,
            language: None,
            legal_area: None,
            user_type: None,
            attach_path: None,
            use_color: true,
        }
    }

    /// Sets the backend query URL.
    pub fn with_query_url(mut self, query_url: impl Into<String>) -> Self {
        self.query_url = Some(query_url.into());
        self
    }

    /// Preselects the consultation language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Preselects the legal area.
    pub fn with_legal_area(mut self, legal_area: LegalArea) -> Self {
        self.legal_area = Some(legal_area);
        self
    }

    /// Preselects the user type.
    pub fn with_user_type(mut self, user_type: UserType) -> Self {
        self.user_type = Some(user_type);
        self
    }

    /// Sets a document to attach before the first turn.
    pub fn with_attach_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.attach_path = Some(path.into());
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = Error;

    fn try_from(args: ChatArgs) -> Result<Self> {
        let language = args
            .language
            .map(|s| {
                s.parse::<Language>()
                    .map_err(|e| Error::validation(e.to_string(), Some("language".to_string())))
            })
            .transpose()?;
        let legal_area = args
            .area
            .map(|s| {
                s.parse::<LegalArea>()
                    .map_err(|e| Error::validation(e.to_string(), Some("area".to_string())))
            })
            .transpose()?;
        let user_type = args
            .user_type
            .map(|s| {
                s.parse::<UserType>()
                    .map_err(|e| Error::validation(e.to_string(), Some("user-type".to_string())))
            })
            .transpose()?;

        Ok(ChatConfig {
            query_url: args.url,
            language,
            legal_area,
            user_type,
            attach_path: args.attach.map(PathBuf::from),
            use_color: !args.no_color,
        })
    }
}
