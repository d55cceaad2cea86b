//! Prompt Catalog and Selector
//!
//! The catalog is the pool of reflection prompts; the selector draws distinct
//! prompts from it for the entry's slots.
//!
//! Catalog loading chain:
//! 1. Explicit file from config (`prompts.file`)
//! 2. `.aidedjournal/prompts.yml` (project override)
//! 3. `~/.config/aidedjournal/prompts.yml` (user override)
//! 4. Embedded fallback in code
//!
//! Catalog files are YAML lists of strings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod embedded;
mod loader;
mod selector;

pub use loader::{Catalog, CatalogLoader};
pub use selector::{RandomSource, RngSource, SequenceSource, draw, draw_initial};

/// Errors from loading or drawing prompts
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt catalog needs at least {needed} distinct prompts, found {found}")]
    CatalogTooSmall { needed: usize, found: usize },

    #[error("Failed to read prompt file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse prompt file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
