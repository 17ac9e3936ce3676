use crate::tokenize::{extract_last, split_terms};

/// Capability surface required of the completion widget. Any concrete
/// widget sits behind this trait, which keeps the bridge testable with a
/// fake and the widget swappable.
pub trait Suggestable {
    /// Replace the candidate list backing the widget.
    fn set_source(&mut self, items: Vec<String>);
    /// Re-run the menu against `query`, redisplaying it immediately.
    fn trigger_search(&mut self, query: &str);
    /// Whether the first match is highlighted automatically when the menu
    /// opens.
    fn set_auto_focus(&mut self, enabled: bool);
    /// Whether a candidate is currently highlighted in the open menu.
    fn is_menu_active(&self) -> bool;
}

/// Bridges published suggestion snapshots into the completion widget and
/// owns the selection/focus/keyboard edge cases around it.
pub struct CompletionBridge<W: Suggestable> {
    widget: W,
}

impl<W: Suggestable> CompletionBridge<W> {
    pub fn new(widget: W) -> Self {
        Self { widget }
    }

    /// Push a freshly published snapshot into the widget: new source, an
    /// empty-query search so an already-open menu re-evaluates immediately
    /// instead of waiting for the next keystroke, and auto-focus-first
    /// reasserted.
    pub fn refresh(&mut self, items: Vec<String>) {
        self.widget.set_source(items);
        self.widget.trigger_search("");
        self.widget.set_auto_focus(true);
    }

    /// Candidates matching the in-progress token of `term`, for the
    /// widget's dynamic-source callback.
    pub fn matches(&self, items: &[String], term: &str) -> Vec<String> {
        filter_matches(items, extract_last(term))
    }

    /// Focus alone never pre-fills the field; only an explicit selection
    /// commits.
    pub fn fill_on_focus(&self) -> bool {
        false
    }

    /// Suppress Tab's default focus navigation while a candidate is
    /// highlighted, so Tab accepts instead of leaving the field.
    pub fn intercept_tab(&self) -> bool {
        self.widget.is_menu_active()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }
}

/// Case-insensitive substring filter, the widget's generic filter
/// capability.
pub fn filter_matches(items: &[String], needle: &str) -> Vec<String> {
    let needle = needle.to_lowercase();
    items
        .iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// The new field value after an explicit selection: drop the in-progress
/// token, append the selected candidate plus one empty placeholder token,
/// rejoin on single spaces. The placeholder guarantees a trailing separator
/// so the field is immediately ready for the next token.
pub fn commit_selection(value: &str, candidate: &str) -> String {
    let mut terms = split_terms(value);
    terms.pop();
    terms.push(candidate);
    terms.push("");
    terms.join(" ")
}
