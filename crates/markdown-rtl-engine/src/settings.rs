use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a direction request treats markdown tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableHandling {
    /// Correct the whole table through its first header cell.
    #[default]
    HeaderCell,
    /// Leave tables untouched and tell the user once per request.
    Refuse,
}

/// Persisted plugin settings. Every field has a default so partial files load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub table_handling: TableHandling,
    /// Swap typed brackets for their mirror image inside RTL lines.
    pub mirror_brackets: bool,
    pub notice_duration_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            table_handling: TableHandling::HeaderCell,
            mirror_brackets: true,
            notice_duration_ms: 2500,
        }
    }
}

impl Settings {
    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}
