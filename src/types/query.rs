//! Wire types for the backend query endpoint.
//!
//! The backend accepts one structured payload whether or not a document is
//! attached; the attachment only changes the transport encoding (JSON body
//! vs multipart form, see the client). The conversation history travels
//! inside the payload as `history_pq`, a JSON-serialized array embedded as
//! a string. The double encoding is what the backend expects and is
//! reproduced exactly.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::message::{Message, MessageRole};
use crate::types::session_config::{Language, LegalArea, UserType};

/// One history entry as the backend sees it: role and content only.
#[derive(Serialize)]
struct HistoryTurn<'a> {
    role: MessageRole,
    content: &'a str,
}

/// The structured payload for a consultation query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The just-typed question.
    pub question: String,

    /// Wire code of the consultation language.
    pub selected_language: String,

    /// Wire code of the legal area.
    pub legal_area: String,

    /// Wire code of the user type.
    pub user_type: String,

    /// JSON-serialized array of `{role, content}` entries covering the
    /// full conversation including the current turn.
    pub history_pq: String,
}

impl QueryRequest {
    /// Builds the payload for one outgoing turn.
    ///
    /// `history` must already include the current turn appended to the
    /// prior conversation; the builder does not infer it. `question` is
    /// expected to be non-blank after trimming; callers guard before
    /// invoking.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialization`] if the history cannot be
    /// serialized.
    pub fn new<'a, I>(
        question: impl Into<String>,
        history: I,
        language: Language,
        legal_area: LegalArea,
        user_type: UserType,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Message>,
    {
        let turns: Vec<HistoryTurn> = history
            .into_iter()
            .map(|message| HistoryTurn {
                role: message.role,
                content: &message.content,
            })
            .collect();
        let history_pq = serde_json::to_string(&turns)?;
        Ok(Self {
            question: question.into(),
            selected_language: language.as_str().to_string(),
            legal_area: legal_area.as_str().to_string(),
            user_type: user_type.as_str().to_string(),
            history_pq,
        })
    }
}

/// A successful answer from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Markup-bearing answer text intended for direct rendering.
    pub ai_answer: String,

    /// Short label naming the retrieval source behind the answer.
    pub source: String,
}
