// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod observability;
pub mod types;

// Re-exports
pub use client::{Nyaya, QueryBackend};
pub use error::{Error, Result};
pub use types::*;
