//! Draft Store binding
//!
//! Mirrors the in-progress entry into a [`KvStore`] under one well-known key.
//! At most one draft exists at a time.

use draftstore::{KvStore, StoreError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::entry::Entry;

/// Fixed key holding the in-progress entry
pub const DRAFT_KEY: &str = "journalEntry";

/// Errors from draft persistence
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Draft store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to serialize draft: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Single-slot draft persistence over an injected key-value store
pub struct DraftStore {
    store: Box<dyn KvStore>,
}

impl DraftStore {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        debug!(key = DRAFT_KEY, "DraftStore::new: called");
        Self { store }
    }

    /// Write the whole entry, replacing any previous draft
    pub fn persist(&mut self, entry: &Entry) -> Result<(), DraftError> {
        let json = serde_json::to_string(entry)?;
        self.store.set(DRAFT_KEY, &json)?;
        debug!(bytes = json.len(), "DraftStore::persist: saved");
        Ok(())
    }

    /// Load the saved draft
    ///
    /// A missing, unreadable, unparsable or invalid record yields `None`:
    /// the caller starts a fresh entry instead of surfacing the fault.
    pub fn restore(&self) -> Option<Entry> {
        debug!("DraftStore::restore: called");
        let raw = match self.store.get(DRAFT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("DraftStore::restore: no draft");
                return None;
            }
            Err(e) => {
                warn!("Could not read draft: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Entry>(&raw) {
            Ok(entry) if entry.has_distinct_prompts() => {
                info!("Restored draft '{}'", entry.title());
                Some(entry)
            }
            Ok(_) => {
                warn!("Ignoring draft with repeated prompts");
                None
            }
            Err(e) => {
                warn!("Ignoring unreadable draft: {}", e);
                None
            }
        }
    }

    /// Remove the saved draft
    pub fn clear(&mut self) -> Result<(), DraftError> {
        debug!("DraftStore::clear: called");
        self.store.remove(DRAFT_KEY)?;
        Ok(())
    }

    /// The stored record as-is, if any
    pub fn raw(&self) -> Result<Option<String>, DraftError> {
        Ok(self.store.get(DRAFT_KEY)?)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use draftstore::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn entry() -> Entry {
        Entry::new(["One?".to_string(), "Two?".to_string(), "Three?".to_string()])
            .with_title("My Day!")
            .with_answers(["a".to_string(), String::new(), "c".to_string()])
            .with_locks([false, true, false])
    }

    #[test]
    fn test_restore_persist_roundtrip() {
        let mut drafts = DraftStore::new(Box::new(MemoryStore::new()));
        drafts.persist(&entry()).unwrap();
        assert_eq!(drafts.restore(), Some(entry()));
    }

    fn drafts_holding(raw: &str) -> DraftStore {
        let mut store = MemoryStore::new();
        store.set(DRAFT_KEY, raw).unwrap();
        DraftStore::new(Box::new(store))
    }

    #[test]
    fn test_restore_without_locks_defaults_unlocked() {
        let drafts = drafts_holding(r#"{"title":"Old","answers":["x","",""],"prompts":["One?","Two?","Three?"]}"#);

        let restored = drafts.restore().unwrap();
        assert_eq!(restored.locks(), &[false, false, false]);
        assert_eq!(restored.title(), "Old");
    }

    #[test]
    fn test_corrupted_draft_is_none() {
        assert_eq!(drafts_holding("{not json").restore(), None);
        assert_eq!(drafts_holding(r#"{"prompts":["A?","A?","B?"]}"#).restore(), None);
    }

    #[test]
    fn test_clear_removes_key() {
        let temp = TempDir::new().unwrap();
        let mut drafts = DraftStore::new(Box::new(FileStore::open(temp.path()).unwrap()));
        drafts.persist(&entry()).unwrap();
        assert!(drafts.raw().unwrap().is_some());

        drafts.clear().unwrap();
        assert_eq!(drafts.raw().unwrap(), None);
        assert_eq!(drafts.restore(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let mut drafts = DraftStore::new(Box::new(MemoryStore::new()));
        drafts.persist(&entry()).unwrap();
        let newer = entry().with_title("Later");
        drafts.persist(&newer).unwrap();
        assert_eq!(drafts.restore(), Some(newer));
    }
}
