//! Document attachments and the size policy that admits them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum accepted attachment size: 5 MiB.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// The inline message recorded when a candidate exceeds the size policy.
pub const SIZE_EXCEEDED_MESSAGE: &str = "File size exceeds 5MB.";

/// File extensions a UI should offer in its picker.
///
/// Advisory only: nothing validates that an accepted attachment actually
/// has one of these extensions, and the backend contract does not specify
/// enforcement either.
pub const ADVISORY_EXTENSIONS: [&str; 3] = [".pdf", ".txt", ".docx"];

/// A document riding along with outgoing consultation turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name, surfaced to the backend as the multipart file name.
    pub name: String,

    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Validates and accepts a candidate attachment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttachmentTooLarge`] iff the candidate exceeds
    /// [`MAX_ATTACHMENT_BYTES`].
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let name = name.into();
        let byte_size = bytes.len() as u64;
        if byte_size > MAX_ATTACHMENT_BYTES {
            return Err(Error::attachment_too_large(
                name,
                byte_size,
                MAX_ATTACHMENT_BYTES,
            ));
        }
        Ok(Self { name, bytes })
    }

    /// Size of the attachment content in bytes.
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
