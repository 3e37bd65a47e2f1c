//! Typeahead narrowing over an option list.
//!
//! [`OptionFilter`] is the state of one autocomplete input: a text buffer, the
//! candidate options, the subset currently matching the buffer, and whether the
//! dropdown is open. It knows nothing about vehicles or the network.

use std::fmt::Display;

/// Case-insensitive substring filter with dropdown state for one input.
///
/// Each instance owns its open/closed state; dismissing one filter never
/// affects another.
#[derive(Debug, Clone)]
pub struct OptionFilter<T = String> {
    buffer: String,
    seed: String,
    candidates: Vec<T>,
    visible: Vec<T>,
    open: bool,
    disabled: bool,
}

impl<T> Default for OptionFilter<T> {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            seed: String::new(),
            candidates: Vec::new(),
            visible: Vec::new(),
            open: false,
            disabled: false,
        }
    }
}

impl<T: Display + Clone> OptionFilter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the committed value and the currently valid options.
    ///
    /// The text buffer is reseeded only when `current_value` differs from the
    /// previous seed, so a refreshed option list does not wipe typed text.
    pub fn configure(&mut self, current_value: &str, candidates: Vec<T>) {
        if current_value != self.seed {
            self.seed = current_value.to_string();
            self.buffer = current_value.to_string();
        }
        self.candidates = candidates;
        self.refilter();
    }

    /// Drop any typed text and reseed from `current_value`, closing the dropdown.
    /// Used when the field's value was rewritten by an upstream change.
    pub fn reset(&mut self, current_value: &str) {
        self.seed = current_value.to_string();
        self.buffer = current_value.to_string();
        self.open = false;
        self.refilter();
    }

    /// Enable or disable the input. Disabling closes the dropdown.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.open = false;
        }
    }

    pub fn on_focus(&mut self) {
        if !self.disabled {
            self.open = true;
        }
    }

    pub fn on_text_input(&mut self, text: &str) {
        if self.disabled {
            return;
        }
        self.buffer = text.to_string();
        self.open = true;
        self.refilter();
    }

    /// Commit `option`, closing the dropdown. Returns the value to forward
    /// upstream, or `None` when the input is disabled.
    pub fn on_commit(&mut self, option: T) -> Option<T> {
        if self.disabled {
            return None;
        }
        self.buffer = option.to_string();
        self.seed = self.buffer.clone();
        self.open = false;
        self.refilter();
        Some(option)
    }

    /// Outside interaction or cancellation key.
    pub fn on_dismiss(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Open with at least one matching option.
    pub fn is_dropdown_visible(&self) -> bool {
        self.open && !self.visible.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    pub fn visible_options(&self) -> &[T] {
        &self.visible
    }

    fn refilter(&mut self) {
        self.visible = filter_options(&self.candidates, &self.buffer);
    }
}

/// Candidates whose string form contains `query`, compared case-insensitively.
/// Order is preserved; an empty query matches everything.
pub fn filter_options<T: Display + Clone>(candidates: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return candidates.to_vec();
    }
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.to_string().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
