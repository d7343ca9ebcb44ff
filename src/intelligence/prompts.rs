//! Prompt construction for the collaborator.
//!
//! Pure string builders over contact snapshots. History prompts include at
//! most the ten most recent activities to keep prompt size bounded.

use crate::types::Contact;

/// Instruction used when the user asks for a draft without typing one.
pub const DEFAULT_EMAIL_INSTRUCTION: &str = "Suivi concernant notre dernière conversation.";

/// Most recent activities included in the history analysis prompt.
const HISTORY_LIMIT: usize = 10;

/// Email draft: tone + client context + the user's instruction.
pub fn email_draft(contact: &Contact, instruction: &str, tone: &str) -> String {
    let interest = if contact.certification_interest.is_empty() {
        "General Consulting"
    } else {
        &contact.certification_interest
    };
    format!(
        "You are an expert consultant assistant for a firm specializing in GFSI standards \
         (BRCGS, IFS, FSSC 22000, SQF) and quality management.\n\n\
         Task: Draft a {tone} email to a client.\n\n\
         Client Context:\n\
         Name: {name}\n\
         Company: {company}\n\
         Interest: {interest}\n\
         Recent History: Last contact was on {last_contact}.\n\n\
         User Instruction: {instruction}\n\n\
         Please provide only the body of the email. Do not include subject lines or \
         placeholders unless necessary.",
        tone = tone,
        name = contact.full_name(),
        company = contact.company,
        interest = interest,
        last_contact = contact.last_contact.format("%Y-%m-%d"),
        instruction = instruction,
    )
}

/// History analysis: recent interactions plus a next-step ask.
pub fn history_analysis(contact: &Contact) -> String {
    let history = contact
        .activities
        .iter()
        .take(HISTORY_LIMIT)
        .map(|a| {
            format!(
                "- [{}] {}: {}",
                a.date.format("%Y-%m-%d"),
                a.kind.as_str().to_uppercase(),
                a.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze the recent interaction history for this consulting lead and suggest the \
         next best action.\n\n\
         Client: {company} ({first_name})\n\
         Status: {status}\n\n\
         History:\n{history}\n\n\
         Output a concise summary (max 3 bullet points) and one concrete \"Next Step\" \
         recommendation.",
        company = contact.company,
        first_name = contact.first_name,
        status = contact.status,
        history = history,
    )
}

/// Meeting-note summarization. The model is asked for JSON with a summary
/// and action items.
pub fn note_summary(raw_notes: &str) -> String {
    format!(
        "Summarize the following meeting notes for a quality consulting session.\n\
         Extract key decisions and a list of action items.\n\n\
         Return JSON format: {{ \"summary\": \"...\", \"actionItems\": [\"...\", \"...\"] }}\n\n\
         Notes:\n{raw_notes}"
    )
}

/// Commercial proposal (Offre de Service), in French, structured Markdown.
pub fn consulting_proposal(contact: &Contact, needs: &str, standard: &str) -> String {
    format!(
        "Rédige une proposition commerciale détaillée (Offre de Service) pour une mission \
         de conseil.\n\n\
         Client : {company}\n\
         Contact : {name}\n\
         Référentiel cible : {standard}\n\
         Besoins spécifiques : {needs}\n\n\
         Structure de l'offre attendue :\n\
         1. Contexte et Compréhension du besoin\n\
         2. Méthodologie proposée (ex: Diagnostic, Formation, Mise en place documentaire, \
         Audit à blanc)\n\
         3. Livrables\n\
         4. Planning estimatif\n\
         5. Budget estimatif (laisser des xxxx€)\n\n\
         Ton : Professionnel, persuasif, expert en Qualité/GFSI.\n\
         Langue : Français.\n\
         Format : Markdown propre.",
        company = contact.company,
        name = contact.full_name(),
        standard = standard,
        needs = needs,
    )
}

/// Document Q&A. The file content is never read: the model is told to
/// answer from what such a document usually contains. Deliberate stub.
pub fn document_question(file_name: &str, question: &str) -> String {
    format!(
        "User is asking a question about a document named \"{file_name}\".\n\
         Since I cannot physically read the file in this demo environment,\n\
         please provide a helpful, generic answer based on what such a document usually \
         contains in a GFSI/Quality context.\n\n\
         If it's an \"Audit Report\", talk about non-conformities and scoring.\n\
         If it's a \"Scope Extension\", talk about product categories.\n\n\
         User Question: \"{question}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::{append_activity, NewActivity};
    use crate::presets::test_contact;
    use crate::types::ActivityKind;

    #[test]
    fn email_prompt_carries_client_context() {
        let mut c = test_contact("Jean", "Dupont");
        c.certification_interest = "IFS Food v8".into();
        let p = email_draft(&c, "Relance sur le devis", "professional");
        assert!(p.contains("Jean Dupont"));
        assert!(p.contains("IFS Food v8"));
        assert!(p.contains("Relance sur le devis"));
        assert!(p.contains("professional email"));
    }

    #[test]
    fn empty_interest_defaults_to_general_consulting() {
        let c = test_contact("Marie", "Curie");
        assert!(email_draft(&c, "x", "formal").contains("General Consulting"));
    }

    #[test]
    fn history_prompt_caps_at_ten_entries() {
        let mut c = test_contact("Pierre", "Martin");
        for i in 0..15 {
            c = append_activity(
                &c,
                NewActivity::new(ActivityKind::Email, format!("mail {i}")),
            );
        }
        let p = history_analysis(&c);
        // Newest first: mail 14 down to mail 5.
        assert!(p.contains("mail 14"));
        assert!(p.contains("mail 5"));
        assert!(!p.contains("mail 4"));
    }

    #[test]
    fn document_prompt_never_claims_file_access() {
        let p = document_question("Audit_Report_2022.pdf", "Quel est le score ?");
        assert!(p.contains("Audit_Report_2022.pdf"));
        assert!(p.contains("cannot physically read"));
    }
}
