//! # Search Input
//!
//! Text of the search box plus the debounce timer that turns typing into
//! search intents. Time is passed in so the behavior is deterministic.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearchInput {
    text: String,
    debounce: Duration,
    /// Set while an edit is waiting for the quiet period to pass
    last_edit: Option<Instant>,
    /// Last term handed out, to avoid re-issuing an identical search
    last_issued: Option<String>,
}

impl SearchInput {
    pub fn new(debounce: Duration) -> Self {
        Self {
            text: String::new(),
            debounce,
            last_edit: None,
            last_issued: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    pub fn push(&mut self, ch: char, now: Instant) {
        self.text.push(ch);
        self.last_edit = Some(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.text.pop().is_some() {
            self.last_edit = Some(now);
        }
    }

    pub fn clear(&mut self, now: Instant) {
        if !self.text.is_empty() {
            self.text.clear();
            self.last_edit = Some(now);
        }
    }

    /// Term to search for once the quiet period has elapsed
    pub fn take_due(&mut self, now: Instant) -> Option<String> {
        let last_edit = self.last_edit?;
        if now.saturating_duration_since(last_edit) < self.debounce {
            return None;
        }
        self.last_edit = None;

        let term = self.text.clone();
        if self.last_issued.as_deref() == Some(term.as_str()) {
            return None;
        }
        self.last_issued = Some(term.clone());
        Some(term)
    }

    /// Term to search for right away (Enter)
    pub fn submit(&mut self) -> String {
        self.last_edit = None;
        let term = self.text.clone();
        self.last_issued = Some(term.clone());
        term
    }

    /// Forget the text without scheduling a search (view unmounted)
    pub fn reset(&mut self) {
        self.text.clear();
        self.last_edit = None;
        self.last_issued = None;
    }
}
