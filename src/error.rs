//! Engine error types.
//!
//! Errors are classified by how they surface:
//! - User-visible: rejected imports, invalid new-contact drafts
//! - Silent fallback: missing or corrupt persisted blobs (treated as first run)
//! - Internal: store I/O and serialization failures

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrmError {
    #[error("Champ obligatoire manquant: {0}")]
    MissingField(&'static str),

    #[error("Format de fichier invalide: {0}")]
    ImportRejected(String),

    #[error("Contact introuvable: {0}")]
    ContactNotFound(String),

    #[error("Could not resolve data directory")]
    DataDirUnavailable,

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CrmError {
    /// Whether this error should be shown to the user as-is.
    ///
    /// Store failures are logged and reported generically; validation and
    /// import rejections carry their own user-facing message.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            CrmError::MissingField(_) | CrmError::ImportRejected(_) | CrmError::ContactNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_user_visible() {
        assert!(CrmError::MissingField("firstName").is_user_visible());
        assert!(CrmError::ImportRejected("not an array".into()).is_user_visible());
        assert!(!CrmError::DataDirUnavailable.is_user_visible());
    }
}
