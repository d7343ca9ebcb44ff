//! Contact construction and snapshot mutations.
//!
//! Every operation here is pure: it takes a contact snapshot and returns a
//! new one. Side effects (score recompute, persistence, toasts) belong to
//! the [`crate::state`] facade, which commits the returned snapshot.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::CrmError;
use crate::types::{Activity, ActivityKind, Contact, ContactDraft, Note, Proposal, ProposalStatus};

/// Payload for logging a new activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: ActivityKind,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewActivity {
    pub fn new(kind: ActivityKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            due_date: None,
        }
    }

    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }
}

fn require(value: &str, field: &'static str) -> Result<String, CrmError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CrmError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

/// Build a new contact from a validated draft.
///
/// Rejects empty identity fields before any record exists, so a half-formed
/// contact can never reach the store. The id is assigned here, once.
pub fn create_contact(draft: ContactDraft, status: &str) -> Result<Contact, CrmError> {
    let first_name = require(&draft.first_name, "firstName")?;
    let last_name = require(&draft.last_name, "lastName")?;
    let company = require(&draft.company, "company")?;
    let email = require(&draft.email, "email")?;

    Ok(Contact {
        id: Uuid::new_v4().to_string(),
        first_name,
        last_name,
        company,
        email,
        phone: draft.phone.trim().to_string(),
        siret: draft.siret,
        address: draft.address,
        status: status.to_string(),
        tags: Vec::new(),
        last_contact: Utc::now(),
        certification_interest: draft.certification_interest,
        contract_value: 0,
        score: 0,
        files: Vec::new(),
        proposals: Vec::new(),
        notes: Vec::new(),
        activities: Vec::new(),
    })
}

/// Prepend an activity to the history.
///
/// Outreach kinds (call/email/meeting/task) also refresh `last_contact`;
/// note and proposal companion entries leave it untouched.
pub fn append_activity(contact: &Contact, activity: NewActivity) -> Contact {
    let now = Utc::now();
    let mut next = contact.clone();
    next.activities.insert(
        0,
        Activity {
            id: Uuid::new_v4().to_string(),
            kind: activity.kind,
            description: activity.description,
            date: now,
            due_date: activity.due_date,
            is_done: activity.due_date.map(|_| false),
        },
    );
    if activity.kind.is_outreach() {
        next.last_contact = now;
    }
    next
}

/// Flip the done flag on one activity. Unknown ids are a no-op.
pub fn toggle_activity_done(contact: &Contact, activity_id: &str) -> Contact {
    let mut next = contact.clone();
    if let Some(a) = next.activities.iter_mut().find(|a| a.id == activity_id) {
        a.is_done = Some(!a.is_done.unwrap_or(false));
    }
    next
}

/// Prepend a note, plus its companion `note` activity entry.
pub fn add_note(contact: &Contact, content: impl Into<String>, author: impl Into<String>) -> Contact {
    let now = Utc::now();
    let mut next = contact.clone();
    next.notes.insert(
        0,
        Note {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            date: now,
            author: author.into(),
        },
    );
    next.activities.insert(
        0,
        Activity {
            id: Uuid::new_v4().to_string(),
            kind: ActivityKind::Note,
            description: "Note ajoutée".to_string(),
            date: now,
            due_date: None,
            is_done: None,
        },
    );
    next
}

/// Build a draft proposal record.
pub fn new_proposal(title: impl Into<String>, content: impl Into<String>, value: u64) -> Proposal {
    Proposal {
        id: Uuid::new_v4().to_string(),
        title: title.into(),
        content: content.into(),
        value,
        status: ProposalStatus::Draft,
        created_at: Utc::now(),
    }
}

/// Prepend a proposal, log its companion activity, and lift the contact's
/// estimated contract value to the proposal's.
pub fn attach_proposal(contact: &Contact, proposal: Proposal) -> Contact {
    let mut next = contact.clone();
    next.contract_value = proposal.value;
    next.activities.insert(
        0,
        Activity {
            id: Uuid::new_v4().to_string(),
            kind: ActivityKind::Proposal,
            description: format!("Offre générée: {}", proposal.title),
            date: Utc::now(),
            due_date: None,
            is_done: None,
        },
    );
    next.proposals.insert(0, proposal);
    next
}

/// Record a filename against the contact. Duplicate names are kept once.
pub fn attach_file(contact: &Contact, filename: impl Into<String>) -> Contact {
    let filename = filename.into();
    let mut next = contact.clone();
    if !next.files.contains(&filename) {
        next.files.push(filename);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ContactDraft {
        ContactDraft {
            first_name: "Jean".into(),
            last_name: "Dupont".into(),
            company: "AgroSaveur S.A.".into(),
            email: "j.dupont@agrosaveur.fr".into(),
            phone: "+33 6 12 34 56 78".into(),
            certification_interest: "IFS Food".into(),
            ..Default::default()
        }
    }

    #[test]
    fn create_assigns_defaults() {
        let c = create_contact(draft(), "Lead").unwrap();
        assert_eq!(c.status, "Lead");
        assert_eq!(c.score, 0);
        assert_eq!(c.contract_value, 0);
        assert!(c.activities.is_empty() && c.notes.is_empty() && c.proposals.is_empty());
    }

    #[test]
    fn create_rejects_blank_identity_fields() {
        let mut d = draft();
        d.company = "   ".into();
        match create_contact(d, "Lead") {
            Err(CrmError::MissingField(field)) => assert_eq!(field, "company"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn identical_drafts_get_distinct_ids() {
        let a = create_contact(draft(), "Lead").unwrap();
        let b = create_contact(draft(), "Lead").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn outreach_refreshes_last_contact_notes_do_not() {
        let c = create_contact(draft(), "Lead").unwrap();
        let stale = c.last_contact;

        let called = append_activity(&c, NewActivity::new(ActivityKind::Call, "left voicemail"));
        assert!(called.last_contact >= stale);
        assert_eq!(called.activities.len(), 1);

        let noted = append_activity(&called, NewActivity::new(ActivityKind::Note, "Note ajoutée"));
        assert_eq!(noted.last_contact, called.last_contact);
    }

    #[test]
    fn activities_prepend_newest_first() {
        let mut c = create_contact(draft(), "Lead").unwrap();
        c = append_activity(&c, NewActivity::new(ActivityKind::Email, "first"));
        c = append_activity(&c, NewActivity::new(ActivityKind::Call, "second"));
        assert_eq!(c.activities[0].description, "second");
        assert_eq!(c.activities[1].description, "first");
    }

    #[test]
    fn toggle_done_twice_restores_original() {
        let mut c = create_contact(draft(), "Lead").unwrap();
        let due = Utc::now();
        c = append_activity(
            &c,
            NewActivity::new(ActivityKind::Task, "send docs").with_due_date(due),
        );
        let id = c.activities[0].id.clone();
        assert_eq!(c.activities[0].is_done, Some(false));

        let once = toggle_activity_done(&c, &id);
        assert_eq!(once.activities[0].is_done, Some(true));
        let twice = toggle_activity_done(&once, &id);
        assert_eq!(twice.activities[0].is_done, Some(false));
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let c = create_contact(draft(), "Lead").unwrap();
        let same = toggle_activity_done(&c, "nope");
        assert_eq!(same.activities.len(), c.activities.len());
    }

    #[test]
    fn add_note_logs_companion_activity() {
        let c = create_contact(draft(), "Lead").unwrap();
        let noted = add_note(&c, "Besoin de formation Food Defense.", "Moi");
        assert_eq!(noted.notes.len(), 1);
        assert_eq!(noted.activities.len(), 1);
        assert_eq!(noted.activities[0].kind, ActivityKind::Note);
    }

    #[test]
    fn attach_proposal_updates_contract_value() {
        let c = create_contact(draft(), "Qualified").unwrap();
        let p = new_proposal("Accompagnement IFS v8", "# Proposition", 15_000);
        let next = attach_proposal(&c, p);
        assert_eq!(next.contract_value, 15_000);
        assert_eq!(next.proposals.len(), 1);
        assert_eq!(next.activities[0].kind, ActivityKind::Proposal);
        assert_eq!(next.proposals[0].status, ProposalStatus::Draft);
    }

    #[test]
    fn attach_file_dedupes() {
        let c = create_contact(draft(), "Lead").unwrap();
        let once = attach_file(&c, "Audit_Report_2022.pdf");
        let twice = attach_file(&once, "Audit_Report_2022.pdf");
        assert_eq!(twice.files.len(), 1);
    }
}
