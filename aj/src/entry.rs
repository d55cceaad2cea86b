//! Journal entry model
//!
//! An entry is three index-aligned slots (prompt, answer, lock) plus an
//! optional title. The serialized form doubles as the persisted draft layout:
//!
//! ```json
//! { "title": "", "answers": ["", "", ""], "prompts": ["..", "..", ".."], "locks": [false, false, false] }
//! ```
//!
//! `title`, `answers` and `locks` default when absent so older drafts still load.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Number of prompt/answer slots in every entry
pub const SLOTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    answers: [String; SLOTS],
    prompts: [String; SLOTS],
    #[serde(default)]
    locks: [bool; SLOTS],
}

impl Entry {
    /// Fresh entry: given prompts, no title, empty answers, nothing locked
    pub fn new(prompts: [String; SLOTS]) -> Self {
        Self {
            title: String::new(),
            answers: Default::default(),
            prompts,
            locks: [false; SLOTS],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_answers(mut self, answers: [String; SLOTS]) -> Self {
        self.answers = answers;
        self
    }

    pub fn with_locks(mut self, locks: [bool; SLOTS]) -> Self {
        self.locks = locks;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn answers(&self) -> &[String; SLOTS] {
        &self.answers
    }

    pub fn prompts(&self) -> &[String; SLOTS] {
        &self.prompts
    }

    pub fn locks(&self) -> &[bool; SLOTS] {
        &self.locks
    }

    /// Answer text for a slot; panics on an out-of-range slot like slice indexing
    pub fn answer(&self, slot: usize) -> &str {
        &self.answers[slot]
    }

    pub fn prompt(&self, slot: usize) -> &str {
        &self.prompts[slot]
    }

    pub fn is_locked(&self, slot: usize) -> bool {
        self.locks[slot]
    }

    /// True when no prompt repeats across slots
    pub fn has_distinct_prompts(&self) -> bool {
        self.prompts.iter().collect::<HashSet<_>>().len() == SLOTS
    }

    /// True when every answer is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.answers.iter().all(|a| a.trim().is_empty())
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_answer(&mut self, slot: usize, text: String) {
        self.answers[slot] = text;
    }

    pub(crate) fn replace_prompt(&mut self, slot: usize, prompt: String) {
        self.prompts[slot] = prompt;
    }

    pub(crate) fn toggle_lock(&mut self, slot: usize) -> bool {
        self.locks[slot] = !self.locks[slot];
        self.locks[slot]
    }
}
