//! Aided Journal - prompted daily journaling
//!
//! An entry is a title plus answers to three prompts drawn at random from a
//! catalog. The in-progress entry is mirrored to a draft store on every edit
//! and can be exported as a dated markdown file.
//!
//! # Modules
//!
//! - [`prompts`] - the prompt catalog and random draws
//! - [`entry`] - the entry value
//! - [`draft`] - draft persistence over a [`draftstore::KvStore`]
//! - [`form`] - the operations a user performs on an entry
//! - [`export`] - markdown rendering, file naming and document sinks
//! - [`leave`] - unsaved-changes guard
//! - [`tui`] - the terminal editor
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod draft;
pub mod entry;
pub mod export;
pub mod form;
pub mod leave;
pub mod prompts;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, ThemePreference};
pub use draft::{DRAFT_KEY, DraftError, DraftStore};
pub use entry::{Entry, SLOTS};
pub use export::{
    Clock, DirectorySink, Document, DocumentSink, ExportError, FixedClock, MARKDOWN_MIME, MemorySink, SystemClock,
    date_stamp, filename, render, slugify,
};
pub use form::{Exported, FormError, JournalForm, Reroll};
pub use leave::{Leave, LeaveGuard};
pub use prompts::{Catalog, CatalogLoader, PromptError, RandomSource, RngSource, SequenceSource, draw, draw_initial};
