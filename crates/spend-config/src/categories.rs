//! Static list of predefined spending categories.

use std::{fs, path::Path};

use spend_domain::PredefinedCategory;

use crate::ConfigError;

/// Built-in categories used when no category file is configured.
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Rent",
    "Utilities",
    "Shopping",
    "Entertainment",
    "Health",
    "Education",
];

/// Reads a `[{ "category": "..." }]` file, or returns the built-in list when
/// `path` is `None`.
pub fn load_predefined_categories(
    path: Option<&Path>,
) -> Result<Vec<PredefinedCategory>, ConfigError> {
    let Some(path) = path else {
        return Ok(DEFAULT_CATEGORIES
            .iter()
            .map(|name| PredefinedCategory::new(*name))
            .collect());
    };
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
}
