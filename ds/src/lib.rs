//! DraftStore - local key-value persistence for in-progress documents
//!
//! A tiny stand-in for a browser's `localStorage`: string values keyed by
//! short well-known identifiers, one file per key.
//!
//! # Architecture
//!
//! ```text
//! drafts/
//! ├── journalEntry.json     # one record per key
//! └── .journalEntry.json.tmp  # transient, renamed over the record on write
//! ```
//!
//! # Example
//!
//! ```ignore
//! use draftstore::{FileStore, KvStore};
//!
//! let mut store = FileStore::open("drafts")?;
//! store.set("journalEntry", r#"{"title":"x"}"#)?;
//! let raw = store.get("journalEntry")?;
//! store.remove("journalEntry")?;
//! ```

pub mod cli;
pub mod config;
mod store;

pub use store::{FileStore, KvStore, MemoryStore, StoreError, validate_key};

/// File extension used for stored records
pub const RECORD_EXTENSION: &str = "json";
