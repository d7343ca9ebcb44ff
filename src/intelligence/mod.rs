//! Generative-text collaborator (Gemini).
//!
//! Drafts emails, analyzes interaction history, summarizes meeting notes,
//! writes service proposals, and answers questions about attached documents.
//! The engine never depends on the *content* of what comes back: results
//! re-enter the contact set only through the normal mutation paths, and
//! every public call here is total: missing key, transport failure, or a
//! malformed response all resolve to a fixed human-readable string rather
//! than an error. A dead collaborator can never block or corrupt a contact.

pub mod gemini;
pub mod prompts;
pub mod slot;

pub use gemini::{Collaborator, GeminiClient, GenerativeProvider, NoteSummary};
pub use slot::ResponseSlot;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntelError {
    #[error("API key not configured")]
    MissingKey,

    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}
