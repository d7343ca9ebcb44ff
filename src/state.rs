//! Engine state and mutation API.
//!
//! `AppState` owns the contact set and both configuration lists behind
//! non-poisoning locks, plus the store and the toast queue. Every mutation
//! follows the same shape: build the new snapshot through the pure entity
//! operations, recompute the derived score, persist the affected blob, then
//! enqueue a toast where the product surfaces one. There is exactly one
//! logical actor (the interactive user), so operations are effectively
//! atomic with respect to each other.

use parking_lot::Mutex;

use crate::contact::{self, NewActivity};
use crate::error::CrmError;
use crate::notify::ToastQueue;
use crate::pipeline::{self, Board, InterestConfig, PipelineConfig};
use crate::presets;
use crate::scoring;
use crate::store::Store;
use crate::types::{Contact, ContactDraft};

/// Note author used for all single-operator installs.
const NOTE_AUTHOR: &str = "Moi";

pub struct AppState {
    contacts: Mutex<Vec<Contact>>,
    pipeline: Mutex<PipelineConfig>,
    interests: Mutex<InterestConfig>,
    store: Store,
    toasts: ToastQueue,
}

impl AppState {
    /// Load all four blobs, seeding defaults on first run, and recompute
    /// every contact's score before the set is exposed. Stored scores are
    /// never trusted.
    pub fn load(store: Store) -> Self {
        let mut contacts = store.load_contacts(presets::seed_contacts);
        for c in &mut contacts {
            scoring::rescore(c);
        }
        let pipeline = store.load_pipeline();
        let interests = store.load_interests();
        log::info!(
            "loaded {} contacts, {} stages, {} interest options",
            contacts.len(),
            pipeline.stages.len(),
            interests.options.len()
        );

        Self {
            contacts: Mutex::new(contacts),
            pipeline: Mutex::new(pipeline),
            interests: Mutex::new(interests),
            store,
            toasts: ToastQueue::new(),
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().clone()
    }

    pub fn get_contact(&self, id: &str) -> Option<Contact> {
        self.contacts.lock().iter().find(|c| c.id == id).cloned()
    }

    pub fn pipeline(&self) -> PipelineConfig {
        self.pipeline.lock().clone()
    }

    pub fn interests(&self) -> InterestConfig {
        self.interests.lock().clone()
    }

    /// The grouped pipeline view over the current contact set.
    pub fn board(&self) -> Board {
        pipeline::board(&self.contacts.lock(), &self.pipeline.lock())
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ------------------------------------------------------------------
    // Contact mutations
    // ------------------------------------------------------------------

    /// Create a contact from a validated draft, at the head of the list.
    pub fn create_contact(&self, draft: ContactDraft) -> Result<Contact, CrmError> {
        let status = self.pipeline.lock().new_stage().to_string();
        let contact = contact::create_contact(draft, &status)?;
        {
            let mut guard = self.contacts.lock();
            guard.insert(0, contact.clone());
            self.store.save_contacts(&guard)?;
        }
        self.toasts.success("Nouveau contact créé");
        Ok(contact)
    }

    /// Generic field-edit path: rescore the snapshot and replace by id.
    pub fn update_contact(&self, updated: Contact) -> Result<Contact, CrmError> {
        self.commit(updated)
    }

    /// Drag-and-drop / stage-edit path. Replaces `status` and nothing else;
    /// a drop on the contact's current column is a no-op.
    pub fn move_contact(&self, id: &str, stage: &str) -> Result<Contact, CrmError> {
        let current = self
            .get_contact(id)
            .ok_or_else(|| CrmError::ContactNotFound(id.to_string()))?;
        if current.status == stage {
            return Ok(current);
        }
        self.commit(pipeline::set_status(&current, stage))
    }

    /// Log an interaction and refresh the contact's heat.
    pub fn log_activity(&self, id: &str, activity: NewActivity) -> Result<Contact, CrmError> {
        let current = self
            .get_contact(id)
            .ok_or_else(|| CrmError::ContactNotFound(id.to_string()))?;
        let committed = self.commit(contact::append_activity(&current, activity))?;
        self.toasts.success("Activité enregistrée");
        Ok(committed)
    }

    /// Flip a reminder's done flag. Tasks weigh nothing, so the score is
    /// unchanged by construction.
    pub fn toggle_activity(&self, id: &str, activity_id: &str) -> Result<Contact, CrmError> {
        let current = self
            .get_contact(id)
            .ok_or_else(|| CrmError::ContactNotFound(id.to_string()))?;
        self.commit(contact::toggle_activity_done(&current, activity_id))
    }

    pub fn add_note(&self, id: &str, content: &str) -> Result<Contact, CrmError> {
        let current = self
            .get_contact(id)
            .ok_or_else(|| CrmError::ContactNotFound(id.to_string()))?;
        let committed = self.commit(contact::add_note(&current, content, NOTE_AUTHOR))?;
        self.toasts.success("Note ajoutée");
        Ok(committed)
    }

    /// Attach a generated proposal; the contact's estimated contract value
    /// follows the proposal's.
    pub fn create_proposal(
        &self,
        id: &str,
        title: &str,
        content: &str,
        value: u64,
    ) -> Result<Contact, CrmError> {
        let current = self
            .get_contact(id)
            .ok_or_else(|| CrmError::ContactNotFound(id.to_string()))?;
        let proposal = contact::new_proposal(title, content, value);
        let committed = self.commit(contact::attach_proposal(&current, proposal))?;
        self.toasts.success("Offre générée et ajoutée");
        Ok(committed)
    }

    pub fn attach_file(&self, id: &str, filename: &str) -> Result<Contact, CrmError> {
        let current = self
            .get_contact(id)
            .ok_or_else(|| CrmError::ContactNotFound(id.to_string()))?;
        self.commit(contact::attach_file(&current, filename))
    }

    /// Wipe the entire contact set. The only destruction path; there is no
    /// per-contact delete.
    pub fn clear_contacts(&self) -> Result<(), CrmError> {
        {
            let mut guard = self.contacts.lock();
            guard.clear();
            self.store.save_contacts(&guard)?;
        }
        self.toasts.success("Données supprimées. Le CRM est vide.");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    /// Serialize the whole contact set, stored scores included. A later
    /// import recomputes them anyway.
    pub fn export_contacts(&self) -> Result<String, CrmError> {
        Ok(serde_json::to_string_pretty(&*self.contacts.lock())?)
    }

    /// All-or-nothing replacement of the contact set.
    ///
    /// Anything other than a parsable JSON array of contacts is rejected
    /// with a user-visible toast and leaves the existing set untouched.
    /// Imported scores are discarded and recomputed.
    pub fn import_contacts(&self, raw: &str) -> Result<usize, CrmError> {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(raw);
        let value = match parsed {
            Ok(v) => v,
            Err(e) => {
                self.toasts.error("Erreur lors de la lecture du fichier JSON.");
                return Err(CrmError::ImportRejected(e.to_string()));
            }
        };
        if !value.is_array() {
            self.toasts.error("Format de fichier invalide.");
            return Err(CrmError::ImportRejected("expected a JSON array".to_string()));
        }
        let mut imported: Vec<Contact> = match serde_json::from_value(value) {
            Ok(contacts) => contacts,
            Err(e) => {
                self.toasts.error("Format de fichier invalide.");
                return Err(CrmError::ImportRejected(e.to_string()));
            }
        };
        for c in &mut imported {
            scoring::rescore(c);
        }

        let count = imported.len();
        {
            let mut guard = self.contacts.lock();
            *guard = imported;
            self.store.save_contacts(&guard)?;
        }
        self.toasts.success("Données importées avec succès");
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Configuration lists
    // ------------------------------------------------------------------

    pub fn add_stage(&self, name: &str) -> Result<bool, CrmError> {
        let mut guard = self.pipeline.lock();
        let changed = guard.add_stage(name);
        if changed {
            self.store.save_pipeline(&guard)?;
        }
        Ok(changed)
    }

    /// Remove a stage without migrating its contacts; holders keep their
    /// now-orphaned status.
    pub fn remove_stage(&self, name: &str) -> Result<bool, CrmError> {
        let mut guard = self.pipeline.lock();
        let changed = guard.remove_stage(name);
        if changed {
            self.store.save_pipeline(&guard)?;
        }
        Ok(changed)
    }

    pub fn add_interest(&self, name: &str) -> Result<bool, CrmError> {
        let mut guard = self.interests.lock();
        let changed = guard.add_option(name);
        if changed {
            self.store.save_interests(&guard)?;
        }
        Ok(changed)
    }

    pub fn remove_interest(&self, name: &str) -> Result<bool, CrmError> {
        let mut guard = self.interests.lock();
        let changed = guard.remove_option(name);
        if changed {
            self.store.save_interests(&guard)?;
        }
        Ok(changed)
    }

    // ------------------------------------------------------------------
    // API credential
    // ------------------------------------------------------------------

    pub fn api_key(&self) -> Option<String> {
        self.store.load_api_key()
    }

    pub fn set_api_key(&self, key: &str) -> Result<(), CrmError> {
        self.store.save_api_key(key)?;
        self.toasts.success("Clé API enregistrée avec succès !");
        Ok(())
    }

    pub fn clear_api_key(&self) -> Result<(), CrmError> {
        self.store.clear_api_key()
    }

    /// Rescore, replace by id, persist. The single write path for an
    /// existing contact; `score` can only change here or at load.
    fn commit(&self, mut updated: Contact) -> Result<Contact, CrmError> {
        scoring::rescore(&mut updated);
        let mut guard = self.contacts.lock();
        let slot = guard
            .iter_mut()
            .find(|c| c.id == updated.id)
            .ok_or_else(|| CrmError::ContactNotFound(updated.id.clone()))?;
        *slot = updated.clone();
        self.store.save_contacts(&guard)?;
        Ok(updated)
    }
}
