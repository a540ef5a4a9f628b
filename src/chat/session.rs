//! Core consultation session management.
//!
//! This module provides [`SessionState`], the explicit value holding
//! everything a session knows, and [`ChatSession`], which owns one state
//! value plus a backend and performs the only side-effecting operation:
//! dispatching a query. State transitions are synchronous methods so the
//! whole machine is unit-testable without a network or a rendering
//! surface.

use serde::{Deserialize, Serialize};

use crate::chat::config::ChatConfig;
use crate::chat::store::{ConversationStore, TurnId};
use crate::client::{Nyaya, QueryBackend};
use crate::error::{Error, Result};
use crate::observability;
use crate::types::attachment::SIZE_EXCEEDED_MESSAGE;
use crate::types::{
    Attachment, Language, LegalArea, Message, QueryRequest, QueryResponse, SessionConfig, UserType,
};

/// The inline message recorded when start is attempted with unset filters.
const MISSING_FILTERS_MESSAGE: &str = "Please fill all filters";

/// Which half of the session a user is in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Choosing filters; the conversation has not begun.
    #[default]
    Configuring,

    /// Filters locked in; turns may be submitted.
    Chatting,
}

/// Everything one consultation session knows, as a plain value.
///
/// One dispatch may be outstanding at a time (`in_flight`); the draft
/// stays editable while a dispatch is pending but a second submit is
/// rejected until the first resolves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    phase: SessionPhase,
    config: SessionConfig,
    store: ConversationStore,
    draft: String,
    attachment: Option<Attachment>,
    attachment_error: Option<String>,
    in_flight: bool,
    last_error: Option<String>,
    next_turn: u64,
}

impl SessionState {
    /// Creates a fresh session in the configuring phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The current filter selections.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The conversation so far.
    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// The draft input awaiting submission.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The currently held attachment, if any.
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// The inline attachment error, if any.
    pub fn attachment_error(&self) -> Option<&str> {
        self.attachment_error.as_deref()
    }

    /// True while a dispatch is outstanding.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// The current error banner, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Selects the consultation language.
    pub fn set_language(&mut self, language: Language) {
        self.config.language = Some(language);
    }

    /// Selects the legal area.
    pub fn set_legal_area(&mut self, legal_area: LegalArea) {
        self.config.legal_area = Some(legal_area);
    }

    /// Selects the user type.
    pub fn set_user_type(&mut self, user_type: UserType) {
        self.config.user_type = Some(user_type);
    }

    /// Replaces the draft input.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// Dismisses the error banner.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Validates and holds a candidate attachment.
    ///
    /// Rejection discards any previously held attachment and records the
    /// inline size error; acceptance clears any prior attachment error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttachmentTooLarge`] when the candidate exceeds
    /// the size policy.
    pub fn attach(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        match Attachment::new(name, bytes) {
            Ok(attachment) => {
                self.attachment = Some(attachment);
                self.attachment_error = None;
                Ok(())
            }
            Err(err) => {
                observability::SESSION_REJECTED_ATTACHMENTS.click();
                self.attachment = None;
                self.attachment_error = Some(SIZE_EXCEEDED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Drops the held attachment and any attachment error.
    pub fn detach(&mut self) {
        self.attachment = None;
        self.attachment_error = None;
    }

    /// Whether the start action should be offered at all.
    ///
    /// Mirrors the start button's disable condition: a legal area must be
    /// selected and no attachment error may be pending.
    pub fn can_start(&self) -> bool {
        self.config.legal_area.is_some() && self.attachment_error.is_none()
    }

    /// Attempts to enter the chatting phase.
    ///
    /// All three filters must be set; there is no partial start. On
    /// success any prior start error is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationIncomplete`] naming the unset
    /// filters, and records the inline banner message.
    pub fn start(&mut self) -> Result<()> {
        if !self.config.is_complete() {
            self.last_error = Some(MISSING_FILTERS_MESSAGE.to_string());
            return Err(Error::configuration_incomplete(
                MISSING_FILTERS_MESSAGE,
                self.config.missing_filters(),
            ));
        }
        self.last_error = None;
        self.phase = SessionPhase::Chatting;
        Ok(())
    }

    /// The submit half of the dispatch transition.
    ///
    /// Returns `None` without touching anything when the trimmed draft is
    /// blank or a dispatch is already outstanding. Otherwise atomically:
    /// marks the session in flight, clears the draft and any prior
    /// request error, and appends the user turn optimistically, returning
    /// the tag to resolve it with plus the submitted text.
    pub fn begin_turn(&mut self) -> Option<(TurnId, String)> {
        if self.in_flight {
            return None;
        }
        let question = self.draft.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();
        self.draft.clear();
        self.in_flight = true;
        self.last_error = None;
        let turn = TurnId::new(self.next_turn);
        self.next_turn += 1;
        self.store.append_pending(Message::user(question.clone()), turn);
        Some((turn, question))
    }

    /// Resolves an outstanding turn with a successful backend answer.
    pub fn complete_turn(&mut self, turn: TurnId, response: QueryResponse) {
        self.store.confirm(turn);
        self.store
            .append(Message::assistant(response.ai_answer).with_source(response.source));
        self.in_flight = false;
    }

    /// Resolves an outstanding turn with a failure.
    ///
    /// The optimistic user turn is reverted so the conversation reflects
    /// only turns that round-tripped, and the derived message becomes the
    /// error banner.
    pub fn fail_turn(&mut self, turn: TurnId, error: &Error) {
        self.store.revert(turn);
        self.last_error = Some(error.user_message());
        self.in_flight = false;
    }

    /// Tears the session down to the configuring phase.
    ///
    /// Clears the conversation, draft, attachment, and all error fields,
    /// and unsets the legal area and user type; the selected language is
    /// kept. Does not wait for or cancel an outstanding dispatch: a
    /// response resolving afterwards finds its turn tag gone.
    pub fn reset(&mut self) {
        self.store.clear();
        self.draft.clear();
        self.attachment = None;
        self.attachment_error = None;
        self.last_error = None;
        self.phase = SessionPhase::Configuring;
        self.config.legal_area = None;
        self.config.user_type = None;
    }
}

/// A consultation session: one state value plus the backend it queries.
pub struct ChatSession<B: QueryBackend = Nyaya> {
    backend: B,
    state: SessionState,
}

impl ChatSession<Nyaya> {
    /// Creates a new session with the given client and configuration.
    pub fn new(client: Nyaya, config: ChatConfig) -> Self {
        Self::with_backend(client, config)
    }
}

impl<B: QueryBackend> ChatSession<B> {
    /// Creates a new session over any backend implementation.
    pub fn with_backend(backend: B, config: ChatConfig) -> Self {
        let mut state = SessionState::new();
        if let Some(language) = config.language {
            state.set_language(language);
        }
        if let Some(legal_area) = config.legal_area {
            state.set_legal_area(legal_area);
        }
        if let Some(user_type) = config.user_type {
            state.set_user_type(user_type);
        }
        Self { backend, state }
    }

    /// Read access to the full session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Mutable access to the session state for configuration-phase
    /// transitions (filter selection, draft editing, attach/detach,
    /// start).
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.state.store().len()
    }

    /// Submits the current draft as one consultation turn.
    ///
    /// Blank drafts and submits while a dispatch is outstanding are
    /// precondition no-ops returning `Ok(None)`; so is a submit outside
    /// the chatting phase. Otherwise the user turn is appended
    /// optimistically, exactly one request is dispatched (multipart when
    /// an attachment is held, JSON otherwise), and the store is
    /// reconciled on resolution.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error after reverting the optimistic turn
    /// and recording the error banner. The session is back in an
    /// interactive idle state either way.
    pub async fn send(&mut self) -> Result<Option<&Message>> {
        if self.state.phase() != SessionPhase::Chatting {
            return Ok(None);
        }
        let config = self.state.config();
        let (Some(language), Some(legal_area), Some(user_type)) =
            (config.language, config.legal_area, config.user_type)
        else {
            // the gate guarantees completeness before chatting begins
            return Ok(None);
        };

        let Some((turn, question)) = self.state.begin_turn() else {
            return Ok(None);
        };
        observability::SESSION_TURNS.click();

        let request = match QueryRequest::new(
            &question,
            self.state.store.messages(),
            language,
            legal_area,
            user_type,
        ) {
            Ok(request) => request,
            Err(err) => {
                observability::SESSION_ROLLBACKS.click();
                self.state.fail_turn(turn, &err);
                return Err(err);
            }
        };

        let outcome = match &self.state.attachment {
            Some(attachment) => self.backend.query_with_attachment(&request, attachment).await,
            None => self.backend.query(&request).await,
        };

        match outcome {
            Ok(response) => {
                self.state.complete_turn(turn, response);
                Ok(self.state.store().last())
            }
            Err(err) => {
                observability::SESSION_ROLLBACKS.click();
                self.state.fail_turn(turn, &err);
                Err(err)
            }
        }
    }

    /// Resets the session to the configuring phase.
    pub fn reset(&mut self) {
        observability::SESSION_RESETS.click();
        self.state.reset();
    }
}
