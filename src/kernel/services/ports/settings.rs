use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEARDOWN_GRACE_MS: u64 = 500;
pub const DEFAULT_SUGGESTION_ENDPOINT: &str = "http://localhost:3000/api/code/suggestions";
pub const DEFAULT_SUGGESTION_KIND: &str = "completion";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub sandbox: SandboxSettings,
    #[serde(default)]
    pub suggestions: SuggestionSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxSettings {
    #[serde(default = "default_teardown_grace_ms")]
    pub teardown_grace_ms: u64,
    /// Directory backing the local sandbox; a temp directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_kind")]
    pub kind: String,
}

impl SandboxSettings {
    pub fn teardown_grace(&self) -> Duration {
        Duration::from_millis(self.teardown_grace_ms)
    }
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            teardown_grace_ms: DEFAULT_TEARDOWN_GRACE_MS,
            root: None,
        }
    }
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            kind: default_kind(),
        }
    }
}

fn default_teardown_grace_ms() -> u64 {
    DEFAULT_TEARDOWN_GRACE_MS
}

fn default_true() -> bool {
    true
}

fn default_endpoint() -> String {
    DEFAULT_SUGGESTION_ENDPOINT.to_string()
}

fn default_kind() -> String {
    DEFAULT_SUGGESTION_KIND.to_string()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
