//! Client-side core for a live word-completion editor.
//!
//! Two jobs, both about keeping client state consistent with a remote
//! suggestion service:
//!
//! * **Suggestion diffing** — five fixed slots are filled from every
//!   `/auto` response, and the completion widget is only refreshed when the
//!   value-equal snapshot of non-empty slots actually changed, so a stable
//!   candidate set across keystrokes causes no visual churn.
//! * **Settings synchronization** — three boolean toggles and one bounded
//!   integer are validated locally, posted to `/update`, and then replaced
//!   wholesale by the server-echoed canonical 4-tuple; the server is the
//!   single source of truth and the last echo wins.
//!
//! Suggestion generation itself, presentation, and the widget's rendering
//! are external; the widget is consumed through the [`Suggestable`]
//! capability trait and the transport through [`NetworkClient`], so both
//! can be faked. All state lives in one [`EditorSession`] value; responses
//! are sequence-tagged and stale ones are discarded on arrival.

pub mod client;
pub mod net;
pub mod session;
pub mod settings;
pub mod source;
pub mod store;
pub mod tokenize;
pub mod trace_init;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{AutocorrectClient, ViewEvent};
pub use net::{
    AutoRequest, HttpClient, NetError, NetworkClient, SettingChange, SettingsEcho, UpdateRequest,
};
pub use session::{EditKey, EditorSession, LedEdit, SettingsRequest, SuggestRequest};
pub use settings::{ControlState, LedOutcome, Settings, SettingsSync, Toggle, LED_MAX, LED_MIN};
pub use source::{commit_selection, filter_matches, CompletionBridge, Suggestable};
pub use store::{SuggestionStore, SLOT_COUNT};
