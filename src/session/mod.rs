//! Session state: the single owner of suggestion slots, settings sync, and
//! request sequencing, constructed once at load and passed into every
//! handler.
//!
//! Responses may arrive out of issuance order; every outgoing request
//! carries a sequence number from one monotonic counter, and each response
//! stream tracks the last-applied number so a stale response for an
//! already-superseded token is discarded instead of overwriting newer state.


use tracing::{debug, debug_span};

use crate::net::{AutoRequest, SettingsEcho, UpdateRequest};
use crate::settings::{LedOutcome, Settings, SettingsSync, Toggle};
use crate::store::SuggestionStore;
use crate::tokenize::{extract_last, extract_prev};

/// Edit classification for the tracked input. The four cursor-navigation
/// keys change nothing textual and issue no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Arrow,
    Other,
}

/// Sequence-tagged suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestRequest {
    pub seq: u64,
    pub req: AutoRequest,
}

/// Sequence-tagged settings request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsRequest {
    pub seq: u64,
    pub req: UpdateRequest,
}

/// Outcome of an LED edit at the session level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedEdit {
    Unchanged,
    Rejected,
    Send(SettingsRequest),
}

pub struct EditorSession {
    store: SuggestionStore,
    settings: SettingsSync,
    next_seq: u64,
    last_auto_seq: u64,
    last_update_seq: u64,
    active: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            store: SuggestionStore::new(),
            settings: SettingsSync::new(),
            next_seq: 0,
            last_auto_seq: 0,
            last_update_seq: 0,
            active: false,
        }
    }

    fn alloc_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn tag(&mut self, req: UpdateRequest) -> SettingsRequest {
        SettingsRequest {
            seq: self.alloc_seq(),
            req,
        }
    }

    // -----------------------------------------------------------------
    // Input tracking
    // -----------------------------------------------------------------

    /// Handle an edit to the tracked input. Every qualifying edit issues a
    /// new request immediately; there is no debouncing. Also marks the
    /// field active for the cosmetic highlight.
    pub fn handle_edit(&mut self, text: &str, key: EditKey) -> Option<SuggestRequest> {
        if key == EditKey::Arrow {
            return None;
        }
        self.active = true;
        let seq = self.alloc_seq();
        let _span = debug_span!("handle_edit", seq).entered();
        Some(SuggestRequest {
            seq,
            req: AutoRequest {
                word: extract_last(text).to_string(),
                prev: extract_prev(text).to_string(),
                on: true,
            },
        })
    }

    /// Apply a suggestion response. Stale responses (older than the last
    /// applied one) are discarded. Returns the new snapshot only when the
    /// published candidate set actually changed.
    pub fn receive_suggestions(&mut self, seq: u64, items: &[String]) -> Option<Vec<String>> {
        if seq < self.last_auto_seq {
            debug!(seq, last = self.last_auto_seq, "discarding stale /auto response");
            return None;
        }
        self.last_auto_seq = seq;
        self.store.apply(items);
        self.store.reconcile()
    }

    /// The snapshot currently published to the widget.
    pub fn suggestions(&self) -> &[String] {
        self.store.published()
    }

    /// Whether the tracked input has been edited this session.
    pub fn is_active(&self) -> bool {
        self.active
    }

    // -----------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------

    pub fn start(&mut self) -> SettingsRequest {
        let req = self.settings.start();
        self.tag(req)
    }

    pub fn toggle(&mut self, toggle: Toggle, checked: bool) -> SettingsRequest {
        let req = self.settings.toggle(toggle, checked);
        self.tag(req)
    }

    pub fn edit_led(&mut self, raw: &str) -> LedEdit {
        match self.settings.edit_led(raw) {
            LedOutcome::Unchanged => LedEdit::Unchanged,
            LedOutcome::Rejected => LedEdit::Rejected,
            LedOutcome::Send(req) => LedEdit::Send(self.tag(req)),
        }
    }

    /// Apply a settings echo unless it is stale. Returns the new canonical
    /// settings when applied.
    pub fn receive_settings(&mut self, seq: u64, echo: SettingsEcho) -> Option<Settings> {
        if seq < self.last_update_seq {
            debug!(seq, last = self.last_update_seq, "discarding stale /update response");
            return None;
        }
        self.last_update_seq = seq;
        Some(*self.settings.apply_echo(echo))
    }

    pub fn settings(&self) -> &Settings {
        self.settings.settings()
    }

    pub fn led_error(&self) -> bool {
        self.settings.led_error()
    }

    /// Restore the just-constructed state. Test isolation hook.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}
