//! Domain types representing spending categories.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Selection value that asks for a user-typed category name.
pub const OTHERS_SENTINEL: &str = "Others";

/// Entry of the static predefined category list (`{ "category": "Food" }`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredefinedCategory {
    pub category: String,
}

impl PredefinedCategory {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl NamedEntity for PredefinedCategory {
    fn name(&self) -> &str {
        &self.category
    }
}

/// What the user picked in the category selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryChoice {
    /// An existing category, predefined or previously registered.
    Predefined(String),
    /// Free text entered after choosing "Others".
    Custom(String),
}

impl CategoryChoice {
    /// Builds a choice from the raw selector value plus the "Others" text box.
    pub fn from_selection(selected: &str, other_text: &str) -> Self {
        if selected == OTHERS_SENTINEL {
            CategoryChoice::Custom(other_text.to_string())
        } else {
            CategoryChoice::Predefined(selected.to_string())
        }
    }

    /// Effective category name; `None` when a custom request is blank.
    pub fn resolve(&self) -> Option<String> {
        match self {
            CategoryChoice::Predefined(name) => Some(name.clone()),
            CategoryChoice::Custom(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, CategoryChoice::Custom(_))
    }
}

impl fmt::Display for CategoryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryChoice::Predefined(name) => f.write_str(name),
            CategoryChoice::Custom(raw) => write!(f, "{OTHERS_SENTINEL} ({})", raw.trim()),
        }
    }
}

/// Predefined categories followed by user-defined ones, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    predefined: Vec<String>,
    custom: Vec<String>,
}

impl CategorySet {
    pub fn new(predefined: &[PredefinedCategory]) -> Self {
        Self {
            predefined: predefined
                .iter()
                .map(|entry| entry.name().to_string())
                .collect(),
            custom: Vec::new(),
        }
    }

    /// Exact, case-sensitive membership across both lists.
    pub fn contains(&self, name: &str) -> bool {
        self.predefined.iter().any(|existing| existing == name)
            || self.custom.iter().any(|existing| existing == name)
    }

    /// Adds a custom category; returns `false` when it already exists.
    pub fn insert_custom(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.custom.push(name.to_string());
        true
    }

    /// Replaces the custom list, dropping entries that duplicate earlier ones.
    pub fn set_custom(&mut self, names: Vec<String>) {
        self.custom.clear();
        for name in names {
            self.insert_custom(&name);
        }
    }

    pub fn predefined(&self) -> &[String] {
        &self.predefined
    }

    pub fn custom(&self) -> &[String] {
        &self.custom
    }

    /// Every selectable category in display order.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.predefined
            .iter()
            .chain(self.custom.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.predefined.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
