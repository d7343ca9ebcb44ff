//! First-run seed data.
//!
//! When no contact blob exists on disk the engine starts from this small
//! demo portfolio instead of an empty screen, mirroring the starter data
//! the product ships with. Users wipe it with the normal clear operation.

use chrono::{DateTime, Utc};

use crate::types::{
    Activity, ActivityKind, Contact, Note, Proposal, ProposalStatus,
};

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("seed timestamp is valid RFC 3339")
        .with_timezone(&Utc)
}

fn activity(id: &str, kind: ActivityKind, date: &str, description: &str) -> Activity {
    Activity {
        id: id.to_string(),
        kind,
        description: description.to_string(),
        date: ts(date),
        due_date: None,
        is_done: None,
    }
}

/// The built-in demo contacts. Scores are left at zero here; the loader
/// recomputes them before the set is ever exposed.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: "seed-1".to_string(),
            first_name: "Jean".to_string(),
            last_name: "Dupont".to_string(),
            company: "AgroSaveur S.A.".to_string(),
            email: "j.dupont@agrosaveur.fr".to_string(),
            phone: "+33 6 12 34 56 78".to_string(),
            siret: Some("123 456 789 00012".to_string()),
            address: Some("12 Zone Industrielle Nord, 69000 Lyon".to_string()),
            status: "Proposal".to_string(),
            tags: vec![
                "IFS Food".to_string(),
                "Training".to_string(),
                "Urgent".to_string(),
            ],
            last_contact: ts("2023-10-25T10:00:00Z"),
            certification_interest: "IFS Food v8".to_string(),
            contract_value: 15_000,
            score: 0,
            files: vec![
                "Audit_Report_2022.pdf".to_string(),
                "Organigramme.png".to_string(),
            ],
            proposals: vec![Proposal {
                id: "seed-p1".to_string(),
                title: "Accompagnement IFS v8".to_string(),
                content: "# Proposition Commerciale\n\n## Contexte\nAgroSaveur souhaite passer la certification IFS Food v8...\n\n## Méthodologie\n1. Diagnostic Initial\n2. Formation Équipe HACCP\n3. Mise à jour documentaire\n4. Audit à blanc\n\n## Budget\nTotal: 15,000€ HT".to_string(),
                value: 15_000,
                status: ProposalStatus::Sent,
                created_at: ts("2023-10-22T14:30:00Z"),
            }],
            notes: vec![Note {
                id: "seed-n1".to_string(),
                author: "Moi".to_string(),
                date: ts("2023-10-20T09:00:00Z"),
                content: "Besoin de formation pour 15 employés sur la Food Defense.".to_string(),
            }],
            activities: vec![
                activity(
                    "seed-a1",
                    ActivityKind::Call,
                    "2023-10-25T10:00:00Z",
                    "Discussion détails proposition. Budget approuvé.",
                ),
                activity(
                    "seed-a2",
                    ActivityKind::Email,
                    "2023-10-22T14:30:00Z",
                    "Envoi proposition initiale v1.pdf",
                ),
                activity(
                    "seed-a3",
                    ActivityKind::Meeting,
                    "2023-10-15T11:00:00Z",
                    "Réunion découverte usine.",
                ),
            ],
        },
        Contact {
            id: "seed-2".to_string(),
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
            company: "Laboratoire BioTest".to_string(),
            email: "m.curie@biotest.com".to_string(),
            phone: "+33 1 98 76 54 32".to_string(),
            siret: Some("987 654 321 00055".to_string()),
            address: Some("5 Avenue des Sciences, 75005 Paris".to_string()),
            status: "Active".to_string(),
            tags: vec!["ISO 17025".to_string(), "Audit".to_string()],
            last_contact: ts("2023-10-26T16:00:00Z"),
            certification_interest: "ISO 17025 Accréditation".to_string(),
            contract_value: 25_000,
            score: 0,
            files: vec!["Scope_Extension_Request.docx".to_string()],
            proposals: Vec::new(),
            notes: Vec::new(),
            activities: vec![activity(
                "seed-a4",
                ActivityKind::Email,
                "2023-10-26T16:00:00Z",
                "Contrat signé reçu.",
            )],
        },
        Contact {
            id: "seed-3".to_string(),
            first_name: "Pierre".to_string(),
            last_name: "Martin".to_string(),
            company: "Logistique Froid".to_string(),
            email: "p.martin@logfroid.fr".to_string(),
            phone: "+33 7 00 11 22 33".to_string(),
            siret: None,
            address: None,
            status: "Lead".to_string(),
            tags: vec!["BRCGS".to_string(), "Storage".to_string()],
            last_contact: ts("2023-09-15T09:00:00Z"),
            certification_interest: "BRCGS Storage & Dist".to_string(),
            contract_value: 8_000,
            score: 0,
            files: Vec::new(),
            proposals: Vec::new(),
            notes: Vec::new(),
            activities: vec![activity(
                "seed-a5",
                ActivityKind::Call,
                "2023-09-15T09:00:00Z",
                "Laissé message vocal.",
            )],
        },
    ]
}

/// Bare contact fixture for unit tests: empty history, default stage.
#[cfg(test)]
pub fn test_contact(first: &str, last: &str) -> Contact {
    Contact {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        company: format!("{} SARL", last),
        email: format!(
            "{}.{}@example.fr",
            first.to_lowercase(),
            last.to_lowercase()
        ),
        phone: String::new(),
        siret: None,
        address: None,
        status: "Lead".to_string(),
        tags: Vec::new(),
        last_contact: Utc::now(),
        certification_interest: String::new(),
        contract_value: 0,
        score: 0,
        files: Vec::new(),
        proposals: Vec::new(),
        notes: Vec::new(),
        activities: Vec::new(),
    }
}
