use serde::Serialize;
use tracing::debug;

use crate::net::{SettingChange, SettingsEcho, UpdateRequest};

pub const LED_MIN: i64 = 0;
pub const LED_MAX: i64 = 11;

/// Behavior flags as last echoed by the server. This value is only ever
/// replaced wholesale by [`SettingsSync::apply_echo`]; nothing mutates it
/// optimistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Settings {
    pub prefix_mode: bool,
    pub whitespace_mode: bool,
    pub smart_mode: bool,
    pub led_threshold: u8,
}

/// One of the three boolean controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Prefix,
    Whitespace,
    Smart,
}

impl Toggle {
    fn change(self) -> SettingChange {
        match self {
            Self::Prefix => SettingChange::Prefix,
            Self::Whitespace => SettingChange::Whitespace,
            Self::Smart => SettingChange::Smart,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Prefix => 0,
            Self::Whitespace => 1,
            Self::Smart => 2,
        }
    }
}

/// Observable state of one control. A control sits in `AwaitingEcho` from
/// the moment its change is sent until any echo arrives; there is no
/// timeout, so a never-resolving request parks it there indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    #[default]
    Idle,
    AwaitingEcho,
}

/// Outcome of an edit to the bounded-integer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedOutcome {
    /// Raw value equals the memoized last-observed one; nothing to do.
    Unchanged,
    /// Failed local validation; error indicator shown, nothing sent.
    Rejected,
    /// Validated; send this request.
    Send(UpdateRequest),
}

/// Reconciles optimistic local settings edits against server-echoed
/// canonical state. Local validation never reaches the network; every echo
/// replaces the whole [`Settings`] value, last response wins.
#[derive(Debug, Default)]
pub struct SettingsSync {
    settings: Settings,
    // states[0..3] follow Toggle::index, states[3] is the LED control.
    states: [ControlState; 4],
    last_led_raw: String,
    led_error: bool,
}

impl SettingsSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn toggle_state(&self, toggle: Toggle) -> ControlState {
        self.states[toggle.index()]
    }

    pub fn led_state(&self) -> ControlState {
        self.states[3]
    }

    /// Whether the LED control is showing its validation error indicator.
    pub fn led_error(&self) -> bool {
        self.led_error
    }

    /// A toggle click posts its new checked state immediately; there is no
    /// local validation to fail.
    pub fn toggle(&mut self, toggle: Toggle, checked: bool) -> UpdateRequest {
        self.states[toggle.index()] = ControlState::AwaitingEcho;
        UpdateRequest {
            change: toggle.change(),
            value: i64::from(checked),
        }
    }

    /// An edit to the LED field. Unchanged raw values are a no-op; changed
    /// ones must parse as an integer in `[LED_MIN, LED_MAX]` before anything
    /// is sent. The raw value is memoized whether or not it validates.
    pub fn edit_led(&mut self, raw: &str) -> LedOutcome {
        if raw == self.last_led_raw {
            return LedOutcome::Unchanged;
        }
        self.last_led_raw = raw.to_string();

        let value = match raw.parse::<i64>() {
            Ok(v) if (LED_MIN..=LED_MAX).contains(&v) => v,
            _ => {
                debug!(raw, "led value rejected");
                self.led_error = true;
                return LedOutcome::Rejected;
            }
        };

        self.led_error = false;
        self.states[3] = ControlState::AwaitingEcho;
        LedOutcome::Send(UpdateRequest {
            change: SettingChange::Led,
            value,
        })
    }

    /// The load-time request that fetches the initial canonical state.
    pub fn start(&self) -> UpdateRequest {
        UpdateRequest {
            change: SettingChange::Start,
            value: 0,
        }
    }

    /// Apply a server echo unconditionally: the server is the single source
    /// of truth, and the last echo wins regardless of which control
    /// triggered it. Every control returns to `Idle`, and the LED memo is
    /// re-seeded from the canonical value so rendering it back into the
    /// field does not look like a fresh edit.
    pub fn apply_echo(&mut self, echo: SettingsEcho) -> &Settings {
        self.settings = echo.into();
        self.states = [ControlState::Idle; 4];
        self.last_led_raw = self.settings.led_threshold.to_string();
        self.led_error = false;
        &self.settings
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_posts_checked_state() {
        let mut sync = SettingsSync::new();
        let req = sync.toggle(Toggle::Prefix, true);
        assert_eq!(req.change, SettingChange::Prefix);
        assert_eq!(req.value, 1);
        assert_eq!(sync.toggle_state(Toggle::Prefix), ControlState::AwaitingEcho);

        let req = sync.toggle(Toggle::Smart, false);
        assert_eq!(req.change, SettingChange::Smart);
        assert_eq!(req.value, 0);
    }

    #[test]
    fn test_led_accepts_in_range_integer() {
        let mut sync = SettingsSync::new();
        match sync.edit_led("5") {
            LedOutcome::Send(req) => {
                assert_eq!(req.change, SettingChange::Led);
                assert_eq!(req.value, 5);
            }
            other => panic!("expected Send, got {other:?}"),
        }
        assert!(!sync.led_error());
        assert_eq!(sync.led_state(), ControlState::AwaitingEcho);
    }

    #[test]
    fn test_led_rejects_out_of_range() {
        let mut sync = SettingsSync::new();
        assert_eq!(sync.edit_led("12"), LedOutcome::Rejected);
        assert!(sync.led_error());
        assert_eq!(sync.led_state(), ControlState::Idle);
        assert_eq!(sync.edit_led("-1"), LedOutcome::Rejected);
    }

    #[test]
    fn test_led_rejects_non_integer() {
        let mut sync = SettingsSync::new();
        assert_eq!(sync.edit_led("abc"), LedOutcome::Rejected);
        assert_eq!(sync.edit_led("5.5"), LedOutcome::Rejected);
        assert!(sync.led_error());
    }

    #[test]
    fn test_led_memoizes_raw_value() {
        let mut sync = SettingsSync::new();
        assert!(matches!(sync.edit_led("5"), LedOutcome::Send(_)));
        // Same raw value again: no-op, no second request.
        assert_eq!(sync.edit_led("5"), LedOutcome::Unchanged);
        // Rejected values are memoized too.
        assert_eq!(sync.edit_led("abc"), LedOutcome::Rejected);
        assert_eq!(sync.edit_led("abc"), LedOutcome::Unchanged);
        assert!(sync.led_error());
    }

    #[test]
    fn test_echo_overwrites_wholesale() {
        let mut sync = SettingsSync::new();
        // A prefix change is pending when the echo arrives.
        sync.toggle(Toggle::Prefix, true);
        let settings = *sync.apply_echo(SettingsEcho(true, false, true, 7));
        assert_eq!(
            settings,
            Settings {
                prefix_mode: true,
                whitespace_mode: false,
                smart_mode: true,
                led_threshold: 7,
            }
        );
        assert_eq!(sync.toggle_state(Toggle::Prefix), ControlState::Idle);
        // The LED memo follows the canonical value.
        assert_eq!(sync.edit_led("7"), LedOutcome::Unchanged);
    }

    #[test]
    fn test_last_echo_wins() {
        let mut sync = SettingsSync::new();
        sync.apply_echo(SettingsEcho(true, true, true, 3));
        sync.apply_echo(SettingsEcho(false, false, false, 9));
        assert_eq!(sync.settings().led_threshold, 9);
        assert!(!sync.settings().prefix_mode);
    }

    #[test]
    fn test_start_request_shape() {
        let sync = SettingsSync::new();
        let req = sync.start();
        assert_eq!(req.change, SettingChange::Start);
        assert_eq!(req.value, 0);
    }
}
