//! The journaling form
//!
//! Owns the current [`Entry`] and applies every user action to it:
//! title and answer edits, prompt rerolls, lock toggles and the two-stage
//! export. Each mutation is mirrored to the [`DraftStore`] so a crash or
//! quit never loses more than the keystroke in flight.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::draft::{DraftError, DraftStore};
use crate::entry::{Entry, SLOTS};
use crate::export::{Document, DocumentSink, ExportError};
use crate::leave::LeaveGuard;
use crate::prompts::{Catalog, PromptError, RandomSource, draw, draw_initial};

/// Errors from form operations
#[derive(Debug, Error)]
pub enum FormError {
    #[error("No slot {0}: entries have 3 slots")]
    NoSuchSlot(usize),

    #[error("Nothing to save yet: write at least one answer")]
    NothingToExport,

    #[error("Export was not requested")]
    NotRequested,

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Outcome of a reroll request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reroll {
    /// The slot now shows a different prompt
    Replaced { previous: String },
    /// The slot is locked; nothing changed
    Locked,
    /// Every catalog prompt is already in use; nothing changed
    Exhausted,
}

/// A completed export
///
/// The document is written once `path` exists. Dropping the draft afterwards
/// can still fail; that is reported in `draft_error` rather than undoing the export.
#[derive(Debug)]
pub struct Exported {
    pub path: PathBuf,
    pub draft_error: Option<DraftError>,
}

pub struct JournalForm {
    entry: Entry,
    catalog: Catalog,
    rng: Box<dyn RandomSource>,
    drafts: DraftStore,
    unsaved: Rc<Cell<bool>>,
    unexported: bool,
    export_requested: bool,
    restored: bool,
}

impl JournalForm {
    /// Restore the saved draft, or start a fresh entry with newly drawn prompts
    ///
    /// A restored draft matches what is on disk, so it starts without unsaved
    /// changes. It has never been exported though, so it may still be exported.
    pub fn load(catalog: Catalog, drafts: DraftStore, mut rng: Box<dyn RandomSource>) -> Result<Self, FormError> {
        debug!(catalog = catalog.len(), "JournalForm::load: called");
        let (entry, restored) = match drafts.restore() {
            Some(entry) => (entry, true),
            None => (Entry::new(draw_initial(&catalog, rng.as_mut())?), false),
        };
        info!(restored, "Journal form ready");

        Ok(Self {
            entry,
            catalog,
            rng,
            drafts,
            unsaved: Rc::new(Cell::new(false)),
            unexported: restored,
            export_requested: false,
            restored,
        })
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn drafts(&self) -> &DraftStore {
        &self.drafts
    }

    /// Whether the current entry came from a saved draft
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved.get()
    }

    pub fn export_requested(&self) -> bool {
        self.export_requested
    }

    /// Register a guard that asks for confirmation while changes are unsaved
    pub fn leave_guard(&self) -> LeaveGuard {
        LeaveGuard::new(self.unsaved.clone())
    }

    fn check_slot(slot: usize) -> Result<(), FormError> {
        if slot < SLOTS { Ok(()) } else { Err(FormError::NoSuchSlot(slot)) }
    }

    /// Flag the entry as diverged and mirror it to the draft store
    fn mark_changed(&mut self) -> Result<(), FormError> {
        self.unsaved.set(true);
        self.unexported = true;
        self.drafts.persist(&self.entry)?;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), FormError> {
        let title = title.into();
        debug!(len = title.len(), "JournalForm::set_title: called");
        self.entry.set_title(title);
        self.mark_changed()
    }

    pub fn set_answer(&mut self, slot: usize, text: impl Into<String>) -> Result<(), FormError> {
        Self::check_slot(slot)?;
        let text = text.into();
        debug!(slot, len = text.len(), "JournalForm::set_answer: called");
        self.entry.set_answer(slot, text);
        self.mark_changed()
    }

    /// Swap the slot's prompt for one not shown in any slot
    ///
    /// The slot's answer is kept as typed.
    pub fn reroll(&mut self, slot: usize) -> Result<Reroll, FormError> {
        Self::check_slot(slot)?;
        debug!(slot, "JournalForm::reroll: called");

        if self.entry.is_locked(slot) {
            debug!(slot, "JournalForm::reroll: slot locked");
            return Ok(Reroll::Locked);
        }

        let in_use = self.entry.prompts().to_vec();
        let Some(replacement) = draw(&self.catalog, &in_use, self.rng.as_mut()) else {
            debug!(slot, "JournalForm::reroll: catalog exhausted");
            return Ok(Reroll::Exhausted);
        };

        let previous = self.entry.prompt(slot).to_string();
        self.entry.replace_prompt(slot, replacement);
        self.mark_changed()?;
        Ok(Reroll::Replaced { previous })
    }

    /// Flip the slot's lock; returns the new state
    pub fn toggle_lock(&mut self, slot: usize) -> Result<bool, FormError> {
        Self::check_slot(slot)?;
        let locked = self.entry.toggle_lock(slot);
        debug!(slot, locked, "JournalForm::toggle_lock: called");
        self.mark_changed()?;
        Ok(locked)
    }

    /// Discard the current entry and draft, and draw fresh prompts
    pub fn start_new(&mut self) -> Result<(), FormError> {
        debug!("JournalForm::start_new: called");
        let prompts = draw_initial(&self.catalog, self.rng.as_mut())?;
        self.drafts.clear()?;
        self.entry = Entry::new(prompts);
        self.unsaved.set(false);
        self.unexported = false;
        self.export_requested = false;
        self.restored = false;
        info!("Started a new entry");
        Ok(())
    }

    /// Export is offered while the entry holds answers that were never exported
    pub fn can_export(&self) -> bool {
        self.unexported && !self.entry.is_blank()
    }

    /// First stage of export: record the intent, pending confirmation
    pub fn request_export(&mut self) -> Result<(), FormError> {
        debug!("JournalForm::request_export: called");
        if !self.can_export() {
            return Err(FormError::NothingToExport);
        }
        self.export_requested = true;
        Ok(())
    }

    /// Back out of a pending export
    pub fn cancel_export(&mut self) {
        debug!("JournalForm::cancel_export: called");
        self.export_requested = false;
    }

    /// The document an export would produce today
    pub fn preview(&self, today: NaiveDate) -> Document {
        Document::build(&self.entry, today)
    }

    /// Second stage of export: save the document, then drop the draft
    ///
    /// If saving fails the draft and the unsaved flag are left untouched.
    /// Once saved, the export stands even if the draft cannot be dropped.
    pub fn confirm_export(&mut self, sink: &mut dyn DocumentSink, today: NaiveDate) -> Result<Exported, FormError> {
        debug!(%today, "JournalForm::confirm_export: called");
        if !self.export_requested {
            return Err(FormError::NotRequested);
        }
        self.export_requested = false;

        let doc = Document::build(&self.entry, today);
        let path = sink.save(&doc)?;
        info!("Entry exported to {}", path.display());

        self.unsaved.set(false);
        self.unexported = false;
        let draft_error = match self.drafts.clear() {
            Ok(()) => None,
            Err(e) => {
                warn!("Exported, but could not remove draft: {}", e);
                Some(e)
            }
        };
        Ok(Exported { path, draft_error })
    }
}
