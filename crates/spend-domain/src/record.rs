//! Domain model for a single logged spending entry.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// Immutable spending entry as persisted under the `spendingData` key.
///
/// Fields default when absent so partially written entries still load; such
/// entries are later excluded by date filters instead of failing the load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: f64,
}

impl SpendingRecord {
    pub fn new(date: impl Into<String>, category: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount,
        }
    }

    /// Calendar day of the entry, or `None` when the stored date is unusable.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_record_date(&self.date)
    }

    /// Returns `true` when the entry satisfies the creation invariants.
    pub fn is_well_formed(&self) -> bool {
        self.parsed_date().is_some()
            && !self.category.trim().is_empty()
            && self.amount.is_finite()
            && self.amount > 0.0
    }
}

impl Amounted for SpendingRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for SpendingRecord {
    fn display_label(&self) -> String {
        format!("{} {} ${:.2}", self.date, self.category, self.amount)
    }
}

impl fmt::Display for SpendingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}
