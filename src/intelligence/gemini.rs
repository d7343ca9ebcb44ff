//! Gemini generateContent client and the fail-closed collaborator facade.
//!
//! `GeminiClient` is the real HTTP provider; `GenerativeProvider` is the
//! seam tests plug canned providers into. `Collaborator` wraps a provider
//! (or the absence of one, when no API key is stored) and exposes one total
//! method per product feature: each resolves to fallback text on any
//! failure, so callers never branch on errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{prompts, IntelError};
use crate::types::Contact;

/// Model used for all features.
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Per-request timeout. Generation is slow but not minutes-slow.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

const MSG_MISSING_KEY: &str = "Clé API manquante.";
const MSG_MISSING_KEY_SETTINGS: &str =
    "Clé API manquante. Veuillez configurer la clé dans les paramètres.";

// ============================================================================
// Provider seam
// ============================================================================

/// Anything that can turn a prompt into text.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, IntelError>;

    /// Variant for features expecting a JSON payload back. The default
    /// implementation just generates text; the HTTP provider asks the API
    /// for a JSON mime type.
    async fn generate_json(&self, prompt: &str) -> Result<String, IntelError> {
        self.generate(prompt).await
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate's parts.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ============================================================================
// HTTP provider
// ============================================================================

/// Direct client for the generateContent REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn endpoint(&self) -> Result<Url, IntelError> {
        let raw = format!("{}/{}:generateContent", API_BASE, self.model);
        let url = Url::parse_with_params(&raw, &[("key", self.api_key.as_str())]).map_err(|e| {
            IntelError::Api {
                status: 0,
                message: format!("invalid endpoint: {e}"),
            }
        })?;
        Ok(url)
    }

    async fn call(&self, prompt: &str, json_mode: bool) -> Result<String, IntelError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: json_mode.then(|| GenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let response = self.http.post(self.endpoint()?).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            log::warn!("generateContent failed with {}: {}", status, message);
            return Err(IntelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.text().ok_or(IntelError::EmptyResponse)
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, IntelError> {
        self.call(prompt, false).await
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, IntelError> {
        self.call(prompt, true).await
    }
}

// ============================================================================
// Collaborator facade
// ============================================================================

/// Parsed meeting-note summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub summary: String,
    #[serde(default)]
    pub action_items: Vec<String>,
}

/// Fail-closed wrapper over an optional provider. `None` means no API key
/// is configured; every feature then answers with its missing-key text.
pub struct Collaborator {
    provider: Option<Box<dyn GenerativeProvider>>,
}

impl Collaborator {
    /// Build from a stored key, if any.
    pub fn from_key(api_key: Option<String>) -> Self {
        Self {
            provider: api_key
                .map(|key| Box::new(GeminiClient::new(key)) as Box<dyn GenerativeProvider>),
        }
    }

    /// Inject a provider directly (tests, alternative backends).
    pub fn with_provider(provider: Box<dyn GenerativeProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Draft a client email. Total: always returns displayable text.
    pub async fn draft_email(&self, contact: &Contact, instruction: &str, tone: &str) -> String {
        let Some(provider) = &self.provider else {
            return MSG_MISSING_KEY_SETTINGS.to_string();
        };
        let instruction = if instruction.trim().is_empty() {
            prompts::DEFAULT_EMAIL_INSTRUCTION
        } else {
            instruction
        };
        match provider
            .generate(&prompts::email_draft(contact, instruction, tone))
            .await
        {
            Ok(text) => text,
            Err(IntelError::EmptyResponse) => "Impossible de générer le brouillon.".to_string(),
            Err(e) => {
                log::warn!("email draft failed: {e}");
                "Erreur lors de la génération. Veuillez vérifier votre clé API.".to_string()
            }
        }
    }

    /// Summarize recent history and recommend a next step.
    pub async fn analyze_history(&self, contact: &Contact) -> String {
        let Some(provider) = &self.provider else {
            return MSG_MISSING_KEY.to_string();
        };
        match provider.generate(&prompts::history_analysis(contact)).await {
            Ok(text) => text,
            Err(IntelError::EmptyResponse) => "Aucune analyse disponible.".to_string(),
            Err(e) => {
                log::warn!("history analysis failed: {e}");
                "Erreur lors de l'analyse de l'historique.".to_string()
            }
        }
    }

    /// Summarize raw meeting notes into a summary plus action items.
    pub async fn summarize_notes(&self, raw_notes: &str) -> NoteSummary {
        let Some(provider) = &self.provider else {
            return NoteSummary {
                summary: MSG_MISSING_KEY.to_string(),
                action_items: Vec::new(),
            };
        };
        let fallback = || NoteSummary {
            summary: "Échec du résumé".to_string(),
            action_items: Vec::new(),
        };
        match provider.generate_json(&prompts::note_summary(raw_notes)).await {
            Ok(text) => {
                serde_json::from_str(strip_code_fences(&text)).unwrap_or_else(|e| {
                    log::warn!("note summary was not valid JSON: {e}");
                    fallback()
                })
            }
            Err(e) => {
                log::warn!("note summary failed: {e}");
                fallback()
            }
        }
    }

    /// Write a full service proposal body.
    pub async fn draft_proposal(&self, contact: &Contact, needs: &str, standard: &str) -> String {
        let Some(provider) = &self.provider else {
            return MSG_MISSING_KEY.to_string();
        };
        match provider
            .generate(&prompts::consulting_proposal(contact, needs, standard))
            .await
        {
            Ok(text) => text,
            Err(IntelError::EmptyResponse) => "Impossible de générer l'offre.".to_string(),
            Err(e) => {
                log::warn!("proposal generation failed: {e}");
                "Erreur lors de la génération de l'offre.".to_string()
            }
        }
    }

    /// Answer a question about an attached document (filename-only stub).
    pub async fn ask_document(&self, file_name: &str, question: &str) -> String {
        let Some(provider) = &self.provider else {
            return MSG_MISSING_KEY.to_string();
        };
        match provider
            .generate(&prompts::document_question(file_name, question))
            .await
        {
            Ok(text) => text,
            Err(IntelError::EmptyResponse) => "Je n'ai pas pu analyser ce document.".to_string(),
            Err(e) => {
                log::warn!("document answer failed: {e}");
                "Erreur lors de l'analyse du document.".to_string()
            }
        }
    }
}

/// Models wrap JSON answers in Markdown fences often enough to matter.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open.strip_suffix("```").unwrap_or(without_open).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::test_contact;

    struct Canned(&'static str);

    #[async_trait]
    impl GenerativeProvider for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String, IntelError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl GenerativeProvider for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String, IntelError> {
            Err(IntelError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn missing_key_yields_fixed_text() {
        let ai = Collaborator::disabled();
        assert!(!ai.is_available());
        let c = test_contact("Jean", "Dupont");
        let text = ai.draft_email(&c, "", "professional").await;
        assert_eq!(
            text,
            "Clé API manquante. Veuillez configurer la clé dans les paramètres."
        );
        assert_eq!(ai.analyze_history(&c).await, "Clé API manquante.");
        let summary = ai.summarize_notes("notes").await;
        assert_eq!(summary.summary, "Clé API manquante.");
        assert!(summary.action_items.is_empty());
    }

    #[tokio::test]
    async fn provider_failure_degrades_not_errors() {
        let ai = Collaborator::with_provider(Box::new(Failing));
        let c = test_contact("Marie", "Curie");
        assert_eq!(
            ai.draft_email(&c, "relance", "formal").await,
            "Erreur lors de la génération. Veuillez vérifier votre clé API."
        );
        assert_eq!(
            ai.draft_proposal(&c, "HACCP", "IFS Food").await,
            "Erreur lors de la génération de l'offre."
        );
        assert_eq!(
            ai.ask_document("Audit_Report_2022.pdf", "score ?").await,
            "Erreur lors de l'analyse du document."
        );
    }

    #[tokio::test]
    async fn successful_generation_passes_through() {
        let ai = Collaborator::with_provider(Box::new(Canned("Bonjour Jean,")));
        let c = test_contact("Jean", "Dupont");
        assert_eq!(ai.draft_email(&c, "suivi", "professional").await, "Bonjour Jean,");
    }

    #[tokio::test]
    async fn note_summary_parses_fenced_json() {
        let ai = Collaborator::with_provider(Box::new(Canned(
            "```json\n{\"summary\": \"Décisions clés\", \"actionItems\": [\"Envoyer devis\"]}\n```",
        )));
        let summary = ai.summarize_notes("réunion du 12").await;
        assert_eq!(summary.summary, "Décisions clés");
        assert_eq!(summary.action_items, vec!["Envoyer devis"]);
    }

    #[tokio::test]
    async fn note_summary_falls_back_on_prose() {
        let ai = Collaborator::with_provider(Box::new(Canned("not json at all")));
        let summary = ai.summarize_notes("réunion").await;
        assert_eq!(summary.summary, "Échec du résumé");
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Bonjour "}, {"text": "Jean"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Bonjour Jean"));
    }

    #[test]
    fn empty_candidates_read_as_no_text() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn fence_stripping_handles_plain_and_fenced() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }
}
