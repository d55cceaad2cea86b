//! TUI application - event handling and state management
//!
//! The App owns the journal form and the AppState and turns key events into
//! form operations. It does not do any rendering - that's delegated to the
//! views module.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, trace, warn};

use super::state::{AppState, ConfirmAction, ConfirmDialog, Focus, InteractionMode};
use super::theme::Theme;
use crate::export::{Clock, DocumentSink};
use crate::form::{Exported, JournalForm, Reroll};
use crate::leave::{Leave, LeaveGuard};

/// TUI application
pub struct App {
    state: AppState,
    form: JournalForm,
    sink: Box<dyn DocumentSink>,
    clock: Box<dyn Clock>,
    guard: LeaveGuard,
}

impl App {
    /// Create the application around a loaded form
    ///
    /// Holds the form's leave guard for as long as the App lives.
    pub fn new(form: JournalForm, sink: Box<dyn DocumentSink>, clock: Box<dyn Clock>, theme: Theme) -> Self {
        debug!(restored = form.was_restored(), "App::new: called");
        let guard = form.leave_guard();
        let mut state = AppState::new(theme);
        state.cursor_pos = form.entry().title().len();
        if form.was_restored() {
            state.set_status("Restored your unsaved draft");
        }
        Self {
            state,
            form,
            sink,
            clock,
            guard,
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    pub fn form(&self) -> &JournalForm {
        &self.form
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        match &self.state.interaction_mode {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::Confirm(_) => self.handle_confirm_key(key),
            InteractionMode::Help => self.handle_help_key(key),
            InteractionMode::Preview => self.handle_preview_key(key),
        }
        self.state.should_quit
    }

    /// Handle key while editing
    fn handle_normal_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_normal_key: called");
        // Any key dismisses the previous message
        self.state.clear_messages();

        match (key.code, key.modifiers) {
            // === Leaving ===
            (KeyCode::Char('q'), KeyModifiers::CONTROL)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Esc, _) => self.request_quit(),

            // === Overlays ===
            (KeyCode::F(1), _) => {
                debug!("App::handle_normal_key: showing help");
                self.state.interaction_mode = InteractionMode::Help;
            }
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                debug!("App::handle_normal_key: showing preview");
                self.state.preview_scroll = 0;
                self.state.interaction_mode = InteractionMode::Preview;
            }

            // === Form actions ===
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => self.handle_reroll(),
            (KeyCode::Char('l'), KeyModifiers::CONTROL) => self.handle_toggle_lock(),
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.handle_request_export(),
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                // A restored draft is on disk but may never have been exported
                if self.form.has_unsaved_changes() || self.form.can_export() {
                    self.state.interaction_mode = InteractionMode::Confirm(ConfirmDialog::new_entry());
                } else {
                    self.start_new_entry();
                }
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                self.state.theme = self.state.theme.toggled();
                debug!(theme = self.state.theme.name(), "App::handle_normal_key: theme toggled");
            }

            // === Focus ===
            (KeyCode::Tab, _) => self.set_focus(self.state.focus.next()),
            (KeyCode::BackTab, _) => self.set_focus(self.state.focus.prev()),
            (KeyCode::Enter, _) => match self.state.focus {
                Focus::Title => self.set_focus(Focus::Answer(0)),
                Focus::Answer(_) => self.insert_char('\n'),
            },

            // === Editing ===
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => self.insert_char(c),
            (KeyCode::Backspace, _) => {
                if self.state.cursor_pos > 0 {
                    let start = prev_char_boundary(self.focused_text(), self.state.cursor_pos);
                    let mut text = self.focused_text().to_string();
                    text.drain(start..self.state.cursor_pos);
                    self.state.cursor_pos = start;
                    self.commit_text(text);
                }
            }
            (KeyCode::Delete, _) => {
                if self.state.cursor_pos < self.focused_text().len() {
                    let end = next_char_boundary(self.focused_text(), self.state.cursor_pos);
                    let mut text = self.focused_text().to_string();
                    text.drain(self.state.cursor_pos..end);
                    self.commit_text(text);
                }
            }
            (KeyCode::Left, _) => {
                self.state.cursor_pos = prev_char_boundary(self.focused_text(), self.state.cursor_pos);
            }
            (KeyCode::Right, _) => {
                self.state.cursor_pos = next_char_boundary(self.focused_text(), self.state.cursor_pos);
            }
            (KeyCode::Home, _) => self.state.cursor_pos = 0,
            (KeyCode::End, _) => self.state.cursor_pos = self.focused_text().len(),
            _ => {
                debug!("App::handle_normal_key: unhandled key");
            }
        }
    }

    /// Ask the leave guard; confirm first when changes are unsaved
    fn request_quit(&mut self) {
        debug!("App::request_quit: called");
        match self.guard.check() {
            Leave::Allow => self.state.should_quit = true,
            Leave::Confirm => {
                self.state.interaction_mode = InteractionMode::Confirm(ConfirmDialog::quit());
            }
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        debug!(?focus, "App::set_focus: called");
        self.state.focus = focus;
        self.state.cursor_pos = self.focused_text().len();
    }

    fn focused_text(&self) -> &str {
        match self.state.focus {
            Focus::Title => self.form.entry().title(),
            Focus::Answer(slot) => self.form.entry().answer(slot),
        }
    }

    fn insert_char(&mut self, c: char) {
        // Titles are a single line
        if c == '\n' && self.state.focus == Focus::Title {
            return;
        }
        let mut text = self.focused_text().to_string();
        let pos = self.state.cursor_pos.min(text.len());
        text.insert(pos, c);
        self.state.cursor_pos = pos + c.len_utf8();
        self.commit_text(text);
    }

    /// Push the focused field's new text into the form
    fn commit_text(&mut self, text: String) {
        let result = match self.state.focus {
            Focus::Title => self.form.set_title(text),
            Focus::Answer(slot) => self.form.set_answer(slot, text),
        };
        if let Err(e) = result {
            warn!(error = %e, "App::commit_text: failed to save draft");
            self.state.set_error(e.to_string());
        }
    }

    fn handle_reroll(&mut self) {
        let Some(slot) = self.state.focus.slot() else {
            self.state.set_error("Move to a prompt (Tab) to get a new one");
            return;
        };
        match self.form.reroll(slot) {
            Ok(Reroll::Replaced { previous }) => {
                debug!(slot, %previous, "App::handle_reroll: replaced");
            }
            Ok(Reroll::Locked) => self.state.set_error("This prompt is locked (Ctrl+L to unlock)"),
            Ok(Reroll::Exhausted) => self.state.set_error("No other prompts are available"),
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    fn handle_toggle_lock(&mut self) {
        let Some(slot) = self.state.focus.slot() else {
            self.state.set_error("Move to a prompt (Tab) to lock it");
            return;
        };
        match self.form.toggle_lock(slot) {
            Ok(locked) => debug!(slot, locked, "App::handle_toggle_lock: toggled"),
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    fn handle_request_export(&mut self) {
        debug!("App::handle_request_export: called");
        match self.form.request_export() {
            Ok(()) => {
                let doc = self.form.preview(self.clock.today());
                self.state.interaction_mode = InteractionMode::Confirm(ConfirmDialog::export(&doc.filename));
            }
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    fn start_new_entry(&mut self) {
        match self.form.start_new() {
            Ok(()) => {
                self.state.focus = Focus::Title;
                self.state.cursor_pos = 0;
                self.state.set_status("Started a new entry");
            }
            Err(e) => self.state.set_error(e.to_string()),
        }
    }

    /// Handle key in a confirmation dialog
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_confirm_key: called");
        let InteractionMode::Confirm(dialog) = &mut self.state.interaction_mode else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                debug!("App::handle_confirm_key: cancel confirm");
                let action = dialog.action;
                self.close_confirm(action, false);
            }
            KeyCode::Enter => {
                let action = dialog.action;
                let confirmed = dialog.selected_button;
                debug!(?action, confirmed, "App::handle_confirm_key: Enter");
                self.close_confirm(action, confirmed);
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                dialog.selected_button = !dialog.selected_button;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                dialog.selected_button = true;
            }
            _ => {
                debug!("App::handle_confirm_key: unhandled key");
            }
        }
    }

    fn close_confirm(&mut self, action: ConfirmAction, confirmed: bool) {
        self.state.interaction_mode = InteractionMode::Normal;
        match (action, confirmed) {
            (ConfirmAction::Quit, true) => {
                info!("Leaving with unsaved changes; draft kept");
                self.state.should_quit = true;
            }
            (ConfirmAction::NewEntry, true) => self.start_new_entry(),
            (ConfirmAction::ExportEntry, true) => {
                let today = self.clock.today();
                match self.form.confirm_export(self.sink.as_mut(), today) {
                    Ok(Exported { path, draft_error: None }) => {
                        self.state.set_status(format!("Saved to {}", path.display()))
                    }
                    Ok(Exported {
                        path,
                        draft_error: Some(e),
                    }) => self
                        .state
                        .set_error(format!("Saved to {}, but the draft was kept: {}", path.display(), e)),
                    Err(e) => self.state.set_error(e.to_string()),
                }
            }
            (ConfirmAction::ExportEntry, false) => self.form.cancel_export(),
            (_, false) => {}
        }
    }

    /// Handle key in help mode
    fn handle_help_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_help_key: called");
        match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {}
        }
    }

    /// Handle key in the preview overlay
    fn handle_preview_key(&mut self, key: KeyEvent) {
        debug!(?key, "App::handle_preview_key: called");
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('p'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
                self.state.interaction_mode = InteractionMode::Normal;
            }
            (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => {
                self.state.interaction_mode = InteractionMode::Help;
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.state.preview_scroll = self.state.preview_scroll.saturating_add(1);
            }
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.state.preview_scroll = self.state.preview_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }
}

/// Find the previous character boundary in `text`
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    let mut new_pos = pos.min(text.len()).saturating_sub(1);
    while new_pos > 0 && !text.is_char_boundary(new_pos) {
        new_pos -= 1;
    }
    new_pos
}

/// Find the next character boundary in `text`
fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut new_pos = pos + 1;
    while new_pos < text.len() && !text.is_char_boundary(new_pos) {
        new_pos += 1;
    }
    new_pos.min(text.len())
}
