//! Core entity definitions: contacts, activities, notes, proposals, toasts.
//!
//! Serde shapes are camelCase and tolerant (`#[serde(default)]` on anything
//! optional) so blobs exported by older builds, or hand-edited backups,
//! still deserialize. `score` is persisted for export fidelity but is a
//! derived value: every load and import path recomputes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of interaction logged against a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Task,
    Note,
    Proposal,
}

impl ActivityKind {
    /// String label as stored in activity JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Call => "call",
            ActivityKind::Email => "email",
            ActivityKind::Meeting => "meeting",
            ActivityKind::Task => "task",
            ActivityKind::Note => "note",
            ActivityKind::Proposal => "proposal",
        }
    }

    /// Whether logging this kind counts as having been in touch.
    ///
    /// Note and proposal entries are bookkeeping companions to their own
    /// records and do not advance `lastContact`.
    pub fn is_outreach(&self) -> bool {
        matches!(
            self,
            ActivityKind::Call | ActivityKind::Email | ActivityKind::Meeting | ActivityKind::Task
        )
    }
}

/// A timestamped interaction record. Immutable once logged, except for
/// `is_done` on task-like entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub description: String,
    pub date: DateTime<Utc>,
    /// Reminder timestamp for follow-ups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Only meaningful for reminder-bearing entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
}

/// A free-text note attached to a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub author: String,
}

/// Lifecycle of a commercial proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    Draft,
    Sent,
    Accepted,
}

/// A generated service offer attached to a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub content: String,
    pub value: u64,
    pub status: ProposalStatus,
    pub created_at: DateTime<Utc>,
}

/// The root aggregate: one company/person sales target.
///
/// Collections are newest-first. `activities` is append-only at the head;
/// nothing in the engine deletes or reorders entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Current pipeline stage name. Not validated against the stage list:
    /// a contact may hold a stage that has since been deleted.
    pub status: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub last_contact: DateTime<Utc>,
    #[serde(default)]
    pub certification_interest: String,
    #[serde(default)]
    pub contract_value: u64,
    /// Derived heat metric. Recomputed on every mutation and on load;
    /// never authoritative when read back from disk.
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl Contact {
    /// Display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// New-contact form payload. Identity fields are validated before a
/// `Contact` is ever constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub certification_interest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Severity of a user-facing toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// A short-lived user-facing message. Self-removes from the queue a fixed
/// delay after enqueue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub created_at: DateTime<Utc>,
}
