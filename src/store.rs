use tracing::debug;

/// Number of fixed suggestion slots, matching the five display fields.
pub const SLOT_COUNT: usize = 5;

/// Fixed-capacity suggestion slots plus the snapshot last handed to the
/// completion widget.
///
/// The slots are mutated only by [`apply`](SuggestionStore::apply); the
/// widget only ever sees the result of [`reconcile`](SuggestionStore::reconcile),
/// which suppresses publication when the candidate set is value-equal to the
/// one already published. A stable set across keystrokes therefore never
/// re-opens or flickers the menu.
#[derive(Debug, Default)]
pub struct SuggestionStore {
    slots: [String; SLOT_COUNT],
    published: Vec<String>,
}

impl SuggestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the slots from index 0 with the response values and clear any
    /// remaining slots. Responses longer than the slot count are truncated;
    /// the server caps at [`SLOT_COUNT`] but the client does not rely on it.
    pub fn apply(&mut self, items: &[String]) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            match items.get(i) {
                Some(item) => slot.clone_from(item),
                None => slot.clear(),
            }
        }
    }

    /// Non-empty slots, in slot order.
    pub fn snapshot(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect()
    }

    /// Compare the current snapshot against the last published one by
    /// element-wise value equality. Returns the new snapshot when it
    /// differs, `None` when nothing changed. An empty snapshot publishes
    /// like any other change: "no suggestions" must clear an open menu.
    pub fn reconcile(&mut self) -> Option<Vec<String>> {
        let snapshot = self.snapshot();
        if snapshot == self.published {
            return None;
        }
        debug!(len = snapshot.len(), "publishing suggestion snapshot");
        self.published = snapshot.clone();
        Some(snapshot)
    }

    /// The snapshot the widget currently holds.
    pub fn published(&self) -> &[String] {
        &self.published
    }

    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(String::clear);
        self.published.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_apply_pads_short_response() {
        let mut store = SuggestionStore::new();
        store.apply(&items(&["cat", "dog"]));
        assert_eq!(store.snapshot(), items(&["cat", "dog"]));
        // Slots three through five were cleared, not left stale.
        store.apply(&items(&["cat", "dog", "emu", "fox", "gnu"]));
        store.apply(&items(&["cat", "dog"]));
        assert_eq!(store.snapshot(), items(&["cat", "dog"]));
    }

    #[test]
    fn test_apply_truncates_long_response() {
        let mut store = SuggestionStore::new();
        store.apply(&items(&["a", "b", "c", "d", "e", "f"]));
        assert_eq!(store.snapshot(), items(&["a", "b", "c", "d", "e"]));
    }

    #[test]
    fn test_reconcile_suppresses_unchanged() {
        let mut store = SuggestionStore::new();
        store.apply(&items(&["cat", "dog"]));
        assert_eq!(store.reconcile(), Some(items(&["cat", "dog"])));
        // Same payload again: no publish.
        store.apply(&items(&["cat", "dog"]));
        assert_eq!(store.reconcile(), None);
        // Reconcile without an intervening apply: no publish either.
        assert_eq!(store.reconcile(), None);
    }

    #[test]
    fn test_empty_snapshot_publishes_once() {
        let mut store = SuggestionStore::new();
        store.apply(&items(&["cat"]));
        assert!(store.reconcile().is_some());
        store.apply(&[]);
        // Transition to empty is a real change: the menu must clear.
        assert_eq!(store.reconcile(), Some(Vec::new()));
        store.apply(&[]);
        assert_eq!(store.reconcile(), None);
    }

    #[test]
    fn test_initial_empty_is_not_a_change() {
        let mut store = SuggestionStore::new();
        store.apply(&[]);
        assert_eq!(store.reconcile(), None);
    }

    #[test]
    fn test_reset() {
        let mut store = SuggestionStore::new();
        store.apply(&items(&["cat"]));
        store.reconcile();
        store.reset();
        assert!(store.snapshot().is_empty());
        assert!(store.published().is_empty());
    }
}
