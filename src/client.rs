//! Blocking driver wiring the session to a transport and a completion
//! widget.
//!
//! This is also the crate's error boundary: a failed or unparsable round
//! trip is logged and swallowed here — no retry, no timeout, no
//! user-visible error — leaving every control in its last-known-good
//! canonical state. That silent degradation is the documented contract,
//! not an accident: local validation errors never reach the network, and
//! network errors never reach application state.

use tracing::warn;

use crate::net::{NetError, NetworkClient};
use crate::session::{EditKey, EditorSession, LedEdit, SettingsRequest};
use crate::settings::{Settings, Toggle};
use crate::source::{commit_selection, CompletionBridge, Suggestable};

/// View instructions emitted by the handlers. UI elements are rendered
/// from these and from the widget capability calls; they are never read
/// back as authoritative state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Highlight the tracked input as actively edited.
    MarkActive,
    /// Re-render the settings controls from the new canonical state.
    RenderSettings(Settings),
    /// Show the LED validation error indicator.
    LedRejected,
    /// Clear the LED validation error indicator.
    LedAccepted,
}

pub struct AutocorrectClient<N: NetworkClient, W: Suggestable> {
    session: EditorSession,
    net: N,
    bridge: CompletionBridge<W>,
}

impl<N: NetworkClient, W: Suggestable> AutocorrectClient<N, W> {
    pub fn new(net: N, widget: W) -> Self {
        Self {
            session: EditorSession::new(),
            net,
            bridge: CompletionBridge::new(widget),
        }
    }

    /// Fetch the initial canonical settings, before any user interaction.
    pub fn start(&mut self) -> Vec<ViewEvent> {
        let request = self.session.start();
        let mut events = Vec::new();
        match self.net.update(&request.req) {
            Ok(echo) => {
                if let Some(settings) = self.session.receive_settings(request.seq, echo) {
                    events.push(ViewEvent::RenderSettings(settings));
                }
            }
            Err(err) => swallow("/update", &err),
        }
        events
    }

    /// An edit to the tracked input: request suggestions, apply the
    /// response, and refresh the widget when the published snapshot
    /// changed.
    pub fn on_edit(&mut self, text: &str, key: EditKey) -> Vec<ViewEvent> {
        let Some(request) = self.session.handle_edit(text, key) else {
            return Vec::new();
        };
        let events = vec![ViewEvent::MarkActive];
        match self.net.auto(&request.req) {
            Ok(candidates) => {
                if let Some(snapshot) = self.session.receive_suggestions(request.seq, &candidates)
                {
                    self.bridge.refresh(snapshot);
                }
            }
            Err(err) => swallow("/auto", &err),
        }
        events
    }

    /// A click on one of the three boolean controls.
    pub fn on_toggle(&mut self, toggle: Toggle, checked: bool) -> Vec<ViewEvent> {
        let request = self.session.toggle(toggle, checked);
        self.exchange_settings(request)
    }

    /// An edit to the LED field: memoization and validation first, then the
    /// round trip.
    pub fn on_led_edit(&mut self, raw: &str) -> Vec<ViewEvent> {
        match self.session.edit_led(raw) {
            LedEdit::Unchanged => Vec::new(),
            LedEdit::Rejected => vec![ViewEvent::LedRejected],
            LedEdit::Send(request) => {
                let mut events = vec![ViewEvent::LedAccepted];
                events.extend(self.exchange_settings(request));
                events
            }
        }
    }

    fn exchange_settings(&mut self, request: SettingsRequest) -> Vec<ViewEvent> {
        let mut events = Vec::new();
        match self.net.update(&request.req) {
            Ok(echo) => {
                if let Some(settings) = self.session.receive_settings(request.seq, echo) {
                    events.push(ViewEvent::RenderSettings(settings));
                }
            }
            Err(err) => swallow("/update", &err),
        }
        events
    }

    /// The new field value after an explicit selection commit.
    pub fn on_select(&self, value: &str, candidate: &str) -> String {
        commit_selection(value, candidate)
    }

    /// Candidates for the widget's dynamic-source callback, filtered
    /// against the in-progress token of `term`.
    pub fn matches(&self, term: &str) -> Vec<String> {
        self.bridge.matches(self.session.suggestions(), term)
    }

    /// Whether Tab should be intercepted instead of moving focus.
    pub fn intercept_tab(&self) -> bool {
        self.bridge.intercept_tab()
    }

    /// Whether focusing a candidate may pre-fill the field. Always false.
    pub fn fill_on_focus(&self) -> bool {
        self.bridge.fill_on_focus()
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn widget(&self) -> &W {
        self.bridge.widget()
    }

    pub fn widget_mut(&mut self) -> &mut W {
        self.bridge.widget_mut()
    }
}

/// Boundary policy: failures never propagate into application state.
fn swallow(endpoint: &str, err: &NetError) {
    warn!(endpoint, %err, "request failed; keeping last-known-good state");
}
