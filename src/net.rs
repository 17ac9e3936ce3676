//! Wire types and transport for the `/auto` and `/update` endpoints.
//!
//! Requests go out form-encoded (the encoding the original browser client
//! used); responses come back as JSON. `/auto` answers with an
//! order-significant array of 0–5 candidate strings, `/update` with the
//! canonical 4-tuple `[prefix, whitespace, smart, led]`.

use serde::Deserialize;

use crate::settings::Settings;

/// Suggestion request for `POST /auto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoRequest {
    /// The in-progress token.
    pub word: String,
    /// The token immediately preceding it ("" when absent).
    pub prev: String,
    /// Suggestion generation enabled flag; always true from this client.
    pub on: bool,
}

/// Which setting an `/update` request changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Prefix,
    Whitespace,
    Smart,
    Led,
    /// Initial canonical fetch at load time, before any interaction.
    Start,
}

impl SettingChange {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Whitespace => "whitespace",
            Self::Smart => "smart",
            Self::Led => "led",
            Self::Start => "start",
        }
    }
}

/// Settings change request for `POST /update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRequest {
    pub change: SettingChange,
    pub value: i64,
}

/// Server echo for `/update`: `[prefixMode, whitespaceMode, smartMode,
/// ledThreshold]`, order-significant, exactly four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SettingsEcho(pub bool, pub bool, pub bool, pub u8);

impl From<SettingsEcho> for Settings {
    fn from(echo: SettingsEcho) -> Self {
        Settings {
            prefix_mode: echo.0,
            whitespace_mode: echo.1,
            smart_mode: echo.2,
            led_threshold: echo.3,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Request/response exchange with the suggestion service. Blocking; the
/// caller decides where the round trip happens.
pub trait NetworkClient {
    fn auto(&self, req: &AutoRequest) -> Result<Vec<String>, NetError>;
    fn update(&self, req: &UpdateRequest) -> Result<SettingsEcho, NetError>;
}

/// `ureq`-backed transport against a base URL like `http://localhost:4567`.
pub struct HttpClient {
    base: String,
}

impl HttpClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<String, NetError> {
        let body = ureq::post(format!("{}{path}", self.base))
            .send_form(form.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|e| NetError::Http(format!("{path}: {e}")))?
            .into_body()
            .read_to_string()
            .map_err(|e| NetError::Http(format!("{path}: {e}")))?;
        Ok(body)
    }
}

impl NetworkClient for HttpClient {
    fn auto(&self, req: &AutoRequest) -> Result<Vec<String>, NetError> {
        let body = self.post_form(
            "/auto",
            &[
                ("word", req.word.clone()),
                ("prev", req.prev.clone()),
                ("on", req.on.to_string()),
            ],
        )?;
        serde_json::from_str(&body).map_err(|e| NetError::Malformed(format!("/auto: {e}")))
    }

    fn update(&self, req: &UpdateRequest) -> Result<SettingsEcho, NetError> {
        let body = self.post_form(
            "/update",
            &[
                ("change", req.change.as_str().to_string()),
                ("value", req.value.to_string()),
            ],
        )?;
        serde_json::from_str(&body).map_err(|e| NetError::Malformed(format!("/update: {e}")))
    }
}
