//! Pipeline stages and interest options.
//!
//! Both lists are user-editable at runtime and persisted independently of
//! the contact set. A contact's `status` is a plain string: moving a card
//! replaces it, deleting a stage migrates nothing. Contacts whose status no
//! longer matches any stage are "orphaned": valid, visible in list views,
//! absent from every column. [`board`] surfaces them in a separate bucket
//! instead of dropping them on the floor.

use serde::{Deserialize, Serialize};

use crate::types::Contact;

/// Stage used for newly created contacts when the list is empty.
const FALLBACK_STAGE: &str = "Lead";

/// Ordered, user-editable list of pipeline stage names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineConfig {
    pub stages: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: ["Lead", "Qualified", "Proposal", "Active", "Closed"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Stage assigned to freshly created contacts.
    pub fn new_stage(&self) -> &str {
        self.stages.first().map(String::as_str).unwrap_or(FALLBACK_STAGE)
    }

    /// Append a stage at the end of the list. Blank or duplicate names are
    /// ignored; returns whether the list changed.
    pub fn add_stage(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.stages.iter().any(|s| s == name) {
            return false;
        }
        self.stages.push(name.to_string());
        true
    }

    /// Remove a stage from the list. Contacts holding this status keep it
    /// and become orphaned; no migration happens here.
    pub fn remove_stage(&mut self, name: &str) -> bool {
        let before = self.stages.len();
        self.stages.retain(|s| s != name);
        self.stages.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s == name)
    }
}

/// User-editable set of certification/offer interests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestConfig {
    pub options: Vec<String>,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            options: [
                "IFS Food",
                "BRCGS",
                "FSSC 22000",
                "ISO 9001",
                "Audit Blanc",
                "Formation",
                "HACCP",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl InterestConfig {
    pub fn add_option(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.options.iter().any(|o| o == name) {
            return false;
        }
        self.options.push(name.to_string());
        true
    }

    pub fn remove_option(&mut self, name: &str) -> bool {
        let before = self.options.len();
        self.options.retain(|o| o != name);
        self.options.len() != before
    }
}

/// Replace a contact's stage. Any string is legal: there is no ordering,
/// no directionality, and deliberately no membership check.
pub fn set_status(contact: &Contact, stage: &str) -> Contact {
    let mut next = contact.clone();
    next.status = stage.to_string();
    next
}

/// One pipeline column: a stage and the contacts currently in it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageColumn {
    pub stage: String,
    pub contacts: Vec<Contact>,
}

/// The grouped pipeline view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: Vec<StageColumn>,
    /// Contacts whose status matches no configured stage.
    pub orphans: Vec<Contact>,
}

/// Group contacts into stage columns, in configured stage order.
pub fn board(contacts: &[Contact], pipeline: &PipelineConfig) -> Board {
    let columns = pipeline
        .stages
        .iter()
        .map(|stage| StageColumn {
            stage: stage.clone(),
            contacts: contacts
                .iter()
                .filter(|c| &c.status == stage)
                .cloned()
                .collect(),
        })
        .collect();
    let orphans = contacts
        .iter()
        .filter(|c| !pipeline.contains(&c.status))
        .cloned()
        .collect();
    Board { columns, orphans }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::test_contact;

    #[test]
    fn default_stages_are_seeded_in_order() {
        let p = PipelineConfig::default();
        assert_eq!(
            p.stages,
            vec!["Lead", "Qualified", "Proposal", "Active", "Closed"]
        );
        assert_eq!(p.new_stage(), "Lead");
    }

    #[test]
    fn add_stage_appends_and_dedupes() {
        let mut p = PipelineConfig::default();
        assert!(p.add_stage("Dormant"));
        assert_eq!(p.stages.last().map(String::as_str), Some("Dormant"));
        assert!(!p.add_stage("Dormant"));
        assert!(!p.add_stage("  "));
    }

    #[test]
    fn backward_moves_are_legal() {
        let c = set_status(&test_contact("Marie", "Curie"), "Active");
        let back = set_status(&c, "Lead");
        assert_eq!(back.status, "Lead");
    }

    #[test]
    fn unknown_stage_is_accepted_but_orphaned() {
        let p = PipelineConfig::default();
        let c = set_status(&test_contact("Jean", "Dupont"), "Archived");
        assert_eq!(c.status, "Archived");

        let b = board(&[c.clone()], &p);
        assert!(b.columns.iter().all(|col| col.contacts.is_empty()));
        assert_eq!(b.orphans.len(), 1);
        assert_eq!(b.orphans[0].id, c.id);
    }

    #[test]
    fn removing_a_stage_leaves_holders_untouched() {
        let mut p = PipelineConfig::default();
        let c = set_status(&test_contact("Pierre", "Martin"), "Qualified");
        assert!(p.remove_stage("Qualified"));

        // Status field unchanged, contact now orphaned.
        assert_eq!(c.status, "Qualified");
        let b = board(&[c], &p);
        assert_eq!(b.orphans.len(), 1);
    }

    #[test]
    fn empty_stage_list_degenerates_gracefully() {
        let p = PipelineConfig { stages: Vec::new() };
        assert_eq!(p.new_stage(), "Lead");
        let c = test_contact("Jean", "Dupont");
        let b = board(&[c], &p);
        assert!(b.columns.is_empty());
        assert_eq!(b.orphans.len(), 1);
    }

    #[test]
    fn board_groups_by_configured_order() {
        let p = PipelineConfig::default();
        let lead = set_status(&test_contact("A", "A"), "Lead");
        let active = set_status(&test_contact("B", "B"), "Active");
        let b = board(&[active.clone(), lead.clone()], &p);
        assert_eq!(b.columns[0].stage, "Lead");
        assert_eq!(b.columns[0].contacts[0].id, lead.id);
        assert_eq!(b.columns[3].stage, "Active");
        assert_eq!(b.columns[3].contacts[0].id, active.id);
    }

    #[test]
    fn interests_dedupe_like_stages() {
        let mut i = InterestConfig::default();
        assert!(i.add_option("SQF"));
        assert!(!i.add_option("SQF"));
        assert!(i.remove_option("SQF"));
        assert!(!i.remove_option("SQF"));
    }
}
