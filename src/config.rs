use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::state::Setup;

/// Element id of the `<script type="application/json">` block the page embeds its settings in.
pub const CONFIG_ELEMENT_ID: &str = "nim-config";

/// Delay between automated moves, so each move stays visible.
pub const DEFAULT_PACE_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prefix joined onto every `/api/...` path. Empty means same origin.
    #[serde(default)]
    pub api_base: String,
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u32,
    /// Used for any selector that is empty when a game is created.
    #[serde(default)]
    pub defaults: Setup,
}

fn default_pace_ms() -> u32 {
    DEFAULT_PACE_MS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            pace_ms: DEFAULT_PACE_MS,
            defaults: Setup::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parse the embedded settings block; a blank or broken block yields the defaults.
    pub fn from_page_text(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(raw) => Self::from_json(raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring malformed client config");
                Self::default()
            }),
        }
    }

    pub fn pace(&self) -> Duration {
        Duration::from_millis(u64::from(self.pace_ms))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}
