//! Durable snapshot store.
//!
//! Four independently-keyed JSON blobs under the data directory
//! (`~/.consultai/` by default): the contact set, the pipeline stage list,
//! the interest options, and the Gemini API key. Reads fall back to a
//! caller-supplied default on a missing or corrupt blob, so first run and a
//! damaged file look identical to the caller. Writes always serialize the
//! whole value and replace the file atomically (temp file + rename), so a
//! crash mid-save can never leave a torn blob behind.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CrmError;
use crate::pipeline::{InterestConfig, PipelineConfig};
use crate::types::Contact;

const CONTACTS_FILE: &str = "contacts.json";
const PIPELINE_FILE: &str = "pipeline.json";
const INTERESTS_FILE: &str = "interests.json";
const API_KEY_FILE: &str = "api_key.json";

/// Handle to the on-disk blob store.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Open the store at the canonical location (`~/.consultai/`),
    /// creating the directory if needed.
    pub fn open() -> Result<Self, CrmError> {
        let home = dirs::home_dir().ok_or(CrmError::DataDirUnavailable)?;
        Self::at(home.join(".consultai"))
    }

    /// Open the store at an explicit directory (tests, portable installs).
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, CrmError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// Deserialize a blob, or hand back the default on a missing key or
    /// unparsable content. Corruption is logged, never surfaced.
    fn load_or<T, F>(&self, file: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.path(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("{} not readable ({}), using default", path.display(), e);
                return default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "{} is corrupt ({}), falling back to default",
                    path.display(),
                    e
                );
                default()
            }
        }
    }

    /// Serialize the whole value and replace the blob atomically.
    fn save<T: Serialize>(&self, file: &str, value: &T) -> Result<(), CrmError> {
        let path = self.path(file);
        let content = serde_json::to_string_pretty(value)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(&path).map_err(|e| CrmError::WriteFailed {
            path: path.clone(),
            source: e.error,
        })?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Contact set
    // ------------------------------------------------------------------

    pub fn load_contacts(&self, default: impl FnOnce() -> Vec<Contact>) -> Vec<Contact> {
        self.load_or(CONTACTS_FILE, default)
    }

    pub fn save_contacts(&self, contacts: &[Contact]) -> Result<(), CrmError> {
        self.save(CONTACTS_FILE, &contacts)
    }

    // ------------------------------------------------------------------
    // Configuration lists
    // ------------------------------------------------------------------

    pub fn load_pipeline(&self) -> PipelineConfig {
        self.load_or(PIPELINE_FILE, PipelineConfig::default)
    }

    pub fn save_pipeline(&self, pipeline: &PipelineConfig) -> Result<(), CrmError> {
        self.save(PIPELINE_FILE, pipeline)
    }

    pub fn load_interests(&self) -> InterestConfig {
        self.load_or(INTERESTS_FILE, InterestConfig::default)
    }

    pub fn save_interests(&self, interests: &InterestConfig) -> Result<(), CrmError> {
        self.save(INTERESTS_FILE, interests)
    }

    // ------------------------------------------------------------------
    // API credential
    // ------------------------------------------------------------------

    /// The stored Gemini key, if any. Absence only disables the AI
    /// collaborator; the engine runs without it.
    pub fn load_api_key(&self) -> Option<String> {
        let key: Option<String> = self.load_or(API_KEY_FILE, || None);
        key.filter(|k| !k.trim().is_empty())
    }

    pub fn save_api_key(&self, key: &str) -> Result<(), CrmError> {
        self.save(API_KEY_FILE, &key.trim())
    }

    pub fn clear_api_key(&self) -> Result<(), CrmError> {
        let path = self.path(API_KEY_FILE);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
