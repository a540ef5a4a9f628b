// Public modules
pub mod attachment;
pub mod message;
pub mod query;
pub mod session_config;

// Re-exports
pub use attachment::{ADVISORY_EXTENSIONS, Attachment, MAX_ATTACHMENT_BYTES, SIZE_EXCEEDED_MESSAGE};
pub use message::{Message, MessageRole};
pub use query::{QueryRequest, QueryResponse};
pub use session_config::{
    Language, LanguageParseError, LegalArea, LegalAreaParseError, SessionConfig, UserType,
    UserTypeParseError,
};
