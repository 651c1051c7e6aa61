use serde::{Deserialize, Serialize};
use spend_domain::{Granularity, WeekStart};
use std::path::{Path, PathBuf};

use crate::paths;

/// Stores user-configurable preferences for the tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// First day of the weekly window.
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default)]
    pub default_granularity: Granularity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for stored records. Defaults to `<app dir>/data`.
    pub data_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional JSON file with the predefined `{ "category": ... }` list.
    pub predefined_categories: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            week_start: WeekStart::default(),
            default_granularity: Granularity::default(),
            data_dir: None,
            predefined_categories: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => paths::data_dir_in(base),
        }
    }
}
