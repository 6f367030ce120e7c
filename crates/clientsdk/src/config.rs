//! Dispatcher configuration
//!
//! Every field has a default, so hosts can embed a partial `"sdk": {...}`
//! object in their own JSON config and deserialize it directly.

use serde::{Deserialize, Serialize};

/// uid used for uploads when the model reports none
pub const DEFAULT_UID: &str = "default";

/// Filename of every uploaded file part, whatever the local file is called
pub const UPLOAD_FILE_NAME: &str = "config.properties";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub default_uid: String,
    /// Print the status line and body of every response to stdout
    pub echo_response: bool,
    /// Whole-request timeout; `None` leaves it to the OS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub use_system_proxy: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            default_uid: DEFAULT_UID.to_string(),
            echo_response: true,
            timeout_secs: None,
            use_system_proxy: true,
        }
    }
}

impl DispatcherConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn default_uid(mut self, uid: impl Into<String>) -> Self {
        self.default_uid = uid.into();
        self
    }

    pub fn echo_response(mut self, echo: bool) -> Self {
        self.echo_response = echo;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn use_system_proxy(mut self, enabled: bool) -> Self {
        self.use_system_proxy = enabled;
        self
    }
}
