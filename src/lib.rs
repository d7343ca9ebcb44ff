//! Contact lifecycle and pipeline engine for a single-operator consulting
//! practice.
//!
//! The engine tracks companies and contacts, logs interactions, scores each
//! contact's heat from its history, routes contacts through a configurable
//! sales pipeline, and persists everything as whole-snapshot JSON blobs.
//! A generative-text collaborator drafts emails and proposals; it is
//! failure-tolerant by construction and never gates a mutation.
//!
//! [`state::AppState`] is the entry point a UI layer drives; everything
//! below it is pure or store-backed and testable in isolation.

pub mod contact;
pub mod error;
pub mod intelligence;
pub mod notify;
pub mod pipeline;
pub mod presets;
pub mod scoring;
pub mod state;
pub mod store;
pub mod types;

pub use contact::NewActivity;
pub use error::CrmError;
pub use pipeline::{Board, InterestConfig, PipelineConfig};
pub use scoring::Temperature;
pub use state::AppState;
pub use store::Store;
pub use types::{Activity, ActivityKind, Contact, ContactDraft, Note, Proposal, Toast, ToastKind};

/// Initialize env_logger once, defaulting to info when RUST_LOG is unset.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .try_init();
}
