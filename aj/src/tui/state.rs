//! TUI state types
//!
//! Everything the views need besides the form itself: focus and cursor,
//! the active overlay, transient messages and the theme.

use tracing::debug;

use super::theme::Theme;
use crate::entry::SLOTS;

/// Which field receives typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Title,
    Answer(usize),
}

impl Focus {
    /// Title, then each answer in order, then back to the title
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Answer(0),
            Self::Answer(i) if i + 1 < SLOTS => Self::Answer(i + 1),
            Self::Answer(_) => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Answer(SLOTS - 1),
            Self::Answer(0) => Self::Title,
            Self::Answer(i) => Self::Answer(i - 1),
        }
    }

    /// The slot index when an answer is focused
    pub fn slot(self) -> Option<usize> {
        match self {
            Self::Title => None,
            Self::Answer(i) => Some(i),
        }
    }
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Default)]
pub enum InteractionMode {
    /// Editing the focused field
    #[default]
    Normal,
    /// Confirmation dialog
    Confirm(ConfirmDialog),
    /// Help overlay
    Help,
    /// Rendered markdown of the export
    Preview,
}

impl InteractionMode {
    /// Whether keys go to the focused field
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Two-button confirmation dialog
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub message: String,
    pub action: ConfirmAction,
    pub cancel_label: &'static str,
    pub confirm_label: &'static str,
    pub selected_button: bool, // false = cancel, true = confirm
}

impl ConfirmDialog {
    pub fn new(action: ConfirmAction, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action,
            cancel_label: "No",
            confirm_label: "Yes",
            selected_button: false,
        }
    }

    pub fn quit() -> Self {
        Self::new(
            ConfirmAction::Quit,
            "You have unsaved changes. Leave anyway? The draft is kept.",
        )
    }

    pub fn export(filename: &str) -> Self {
        Self {
            cancel_label: "Cancel",
            confirm_label: "Save Entry",
            ..Self::new(ConfirmAction::ExportEntry, format!("Save this entry as {}?", filename))
        }
    }

    pub fn new_entry() -> Self {
        Self::new(
            ConfirmAction::NewEntry,
            "Start a new entry? Unsaved changes and the draft are discarded.",
        )
    }
}

/// Action to perform on confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Quit,
    ExportEntry,
    NewEntry,
}

/// Main TUI application state
#[derive(Debug)]
pub struct AppState {
    /// Focused field
    pub focus: Focus,

    /// Byte offset of the cursor in the focused field
    pub cursor_pos: usize,

    /// Current overlay, if any
    pub interaction_mode: InteractionMode,

    /// Active palette
    pub theme: Theme,

    /// Scroll offset of the preview overlay
    pub preview_scroll: u16,

    /// Transient confirmation, e.g. where an export landed
    pub status_message: Option<String>,

    /// Transient error
    pub error_message: Option<String>,

    /// Set once the user has left
    pub should_quit: bool,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        debug!(?theme, "AppState::new: called");
        Self {
            focus: Focus::Title,
            cursor_pos: 0,
            interaction_mode: InteractionMode::Normal,
            theme,
            preview_scroll: 0,
            status_message: None,
            error_message: None,
            should_quit: false,
        }
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_error: called");
        self.status_message = None;
        self.error_message = Some(msg);
    }

    /// Set a status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_status: called");
        self.error_message = None;
        self.status_message = Some(msg);
    }

    /// Clear both transient messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }
}
