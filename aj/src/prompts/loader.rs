//! Catalog Loader
//!
//! Loads the prompt catalog from override files or falls back to the embedded list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{PromptError, embedded};
use crate::entry::SLOTS;

/// A validated pool of distinct prompts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    prompts: Vec<String>,
}

impl Catalog {
    /// Build a catalog, trimming entries and dropping blanks and duplicates
    ///
    /// Fails when fewer than [`SLOTS`] distinct prompts remain, since the
    /// initial draw could not fill every slot.
    pub fn new(prompts: Vec<String>) -> Result<Self, PromptError> {
        debug!(input = prompts.len(), "Catalog::new: called");
        let mut seen = HashSet::new();
        let prompts: Vec<String> = prompts
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .collect();

        if prompts.len() < SLOTS {
            return Err(PromptError::CatalogTooSmall {
                needed: SLOTS,
                found: prompts.len(),
            });
        }

        Ok(Self { prompts })
    }

    /// The built-in catalog
    pub fn embedded() -> Self {
        // CATALOG is statically checked to be larger than SLOTS
        Self {
            prompts: embedded::catalog(),
        }
    }

    /// Parse a YAML list of prompts from a file
    pub fn load_from_file(path: &Path) -> Result<Self, PromptError> {
        debug!(?path, "Catalog::load_from_file: called");
        let content = std::fs::read_to_string(path).map_err(|source| PromptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let prompts: Vec<String> = serde_yaml::from_str(&content).map_err(|source| PromptError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(prompts)
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn contains(&self, prompt: &str) -> bool {
        self.prompts.iter().any(|p| p == prompt)
    }
}

/// Resolves which catalog to use
pub struct CatalogLoader {
    /// Project override (e.g., `.aidedjournal/prompts.yml`)
    project_file: Option<PathBuf>,
    /// User override (e.g., `~/.config/aidedjournal/prompts.yml`)
    user_file: Option<PathBuf>,
}

impl CatalogLoader {
    /// Create a loader that looks for overrides relative to `worktree` and the user config dir
    pub fn new(worktree: impl AsRef<Path>) -> Self {
        let worktree = worktree.as_ref();
        debug!(?worktree, "CatalogLoader::new: called");
        let project_file = worktree.join(".aidedjournal").join("prompts.yml");
        let user_file = dirs::config_dir().map(|d| d.join("aidedjournal").join("prompts.yml"));

        Self {
            project_file: project_file.exists().then_some(project_file),
            user_file: user_file.filter(|p| p.exists()),
        }
    }

    /// Create a loader that only uses the embedded catalog (for testing)
    pub fn embedded_only() -> Self {
        debug!("CatalogLoader::embedded_only: called");
        Self {
            project_file: None,
            user_file: None,
        }
    }

    /// Load the catalog
    ///
    /// An explicitly configured file must load; discovered override files
    /// that fail to load are skipped with a warning.
    pub fn load(&self, explicit: Option<&Path>) -> Result<Catalog, PromptError> {
        debug!(?explicit, "CatalogLoader::load: called");
        if let Some(path) = explicit {
            let catalog = Catalog::load_from_file(path)?;
            info!("Loaded {} prompts from {}", catalog.len(), path.display());
            return Ok(catalog);
        }

        for path in [&self.project_file, &self.user_file].into_iter().flatten() {
            match Catalog::load_from_file(path) {
                Ok(catalog) => {
                    info!("Loaded {} prompts from {}", catalog.len(), path.display());
                    return Ok(catalog);
                }
                Err(e) => {
                    warn!("Skipping prompt file {}: {}", path.display(), e);
                }
            }
        }

        debug!("CatalogLoader::load: using embedded catalog");
        Ok(Catalog::embedded())
    }
}
