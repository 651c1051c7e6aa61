//! Append-only record and custom-category store with write-through persistence.

use serde::de::DeserializeOwned;
use spend_domain::{
    date_key, parse_record_date, CategoryChoice, CategorySet, PredefinedCategory,
    SpendingRecord,
};
use tracing::{debug, info, warn};

use crate::{
    storage::{StoragePort, CUSTOM_CATEGORIES_KEY, RECORDS_KEY},
    CoreError, CoreResult, RecordField,
};

/// Outcome of hydrating the store from storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub records: Vec<SpendingRecord>,
    pub custom_categories: Vec<String>,
    pub warnings: Vec<String>,
}

/// Raw journal-form input, validated as a whole by [`RecordStore::submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft {
    pub date: String,
    pub choice: CategoryChoice,
    pub amount: String,
}

impl RecordDraft {
    pub fn new(date: impl Into<String>, choice: CategoryChoice, amount: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            choice,
            amount: amount.into(),
        }
    }
}

/// Resolves the category selector plus the "Others" text into a category name.
pub fn resolve_category(selected: &str, other_text: &str) -> CoreResult<String> {
    resolve_choice(&CategoryChoice::from_selection(selected, other_text))
}

fn resolve_choice(choice: &CategoryChoice) -> CoreResult<String> {
    match choice.resolve() {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ if choice.is_custom() => Err(CoreError::invalid(RecordField::OtherCategory)),
        _ => Err(CoreError::invalid(RecordField::Category)),
    }
}

/// Owns the authoritative record list and category set for a session.
pub struct RecordStore {
    records: Vec<SpendingRecord>,
    categories: CategorySet,
    storage: Box<dyn StoragePort>,
}

impl RecordStore {
    /// Creates an empty store; call [`RecordStore::load`] to hydrate it.
    pub fn new(storage: Box<dyn StoragePort>, predefined: &[PredefinedCategory]) -> Self {
        Self {
            records: Vec::new(),
            categories: CategorySet::new(predefined),
            storage,
        }
    }

    /// Creates and hydrates a store in one step.
    pub fn open(
        storage: Box<dyn StoragePort>,
        predefined: &[PredefinedCategory],
    ) -> (Self, LoadReport) {
        let mut store = Self::new(storage, predefined);
        let report = store.load();
        (store, report)
    }

    /// Replaces in-memory state with what storage holds. Missing or malformed
    /// data yields empty collections; problems are reported as warnings.
    pub fn load(&mut self) -> LoadReport {
        let mut warnings = Vec::new();
        let records: Vec<SpendingRecord> =
            read_collection(self.storage.as_ref(), RECORDS_KEY, &mut warnings);
        let custom: Vec<String> =
            read_collection(self.storage.as_ref(), CUSTOM_CATEGORIES_KEY, &mut warnings);

        let unusable = records.iter().filter(|r| !r.is_well_formed()).count();
        if unusable > 0 {
            let message = format!("{unusable} stored record(s) have a missing or invalid field");
            warn!("{message}");
            warnings.push(message);
        }

        self.records = records;
        self.categories.set_custom(custom);
        info!(
            records = self.records.len(),
            custom_categories = self.categories.custom().len(),
            "record store loaded"
        );

        LoadReport {
            records: self.records.clone(),
            custom_categories: self.categories.custom().to_vec(),
            warnings,
        }
    }

    pub fn records(&self) -> &[SpendingRecord] {
        &self.records
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn custom_categories(&self) -> &[String] {
        self.categories.custom()
    }

    /// Validates and appends a record, then writes the full list to storage.
    pub fn add_record(
        &mut self,
        date: &str,
        category: &str,
        amount: f64,
    ) -> CoreResult<&[SpendingRecord]> {
        let mut invalid = Vec::new();
        let parsed = parse_record_date(date);
        if parsed.is_none() {
            invalid.push(RecordField::Date);
        }
        if category.trim().is_empty() {
            invalid.push(RecordField::Category);
        }
        if !valid_amount(amount) {
            invalid.push(RecordField::Amount);
        }
        match parsed {
            Some(day) if invalid.is_empty() => {
                self.append(date_key(day), category, amount)?;
                Ok(&self.records)
            }
            _ => {
                debug!(?invalid, "rejected spending record");
                Err(CoreError::Validation { fields: invalid })
            }
        }
    }

    /// Registers a user-defined category unless it already exists.
    /// Returns `true` when the category was added.
    pub fn add_custom_category(&mut self, name: &str) -> CoreResult<bool> {
        if name.trim().is_empty() {
            return Err(CoreError::invalid(RecordField::Category));
        }
        if self.categories.contains(name) {
            return Ok(false);
        }
        let previous = self.categories.clone();
        self.categories.insert_custom(name);
        if let Err(err) = write_collection(
            self.storage.as_mut(),
            CUSTOM_CATEGORIES_KEY,
            self.categories.custom(),
        ) {
            self.categories = previous;
            return Err(err);
        }
        info!(category = name, "custom category registered");
        Ok(true)
    }

    /// Runs the journal-form flow: resolve the category, validate every field,
    /// register a new category, then append the record. A failed record write
    /// also withdraws a category registered by this call.
    pub fn submit(&mut self, draft: &RecordDraft) -> CoreResult<&[SpendingRecord]> {
        let mut invalid = Vec::new();
        let parsed = parse_record_date(&draft.date);
        if parsed.is_none() {
            invalid.push(RecordField::Date);
        }
        let category = match resolve_choice(&draft.choice) {
            Ok(name) => Some(name),
            Err(err) => {
                invalid.extend_from_slice(err.invalid_fields());
                None
            }
        };
        let amount = draft
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| valid_amount(*value));
        if amount.is_none() {
            invalid.push(RecordField::Amount);
        }

        match (parsed, category, amount) {
            (Some(day), Some(category), Some(amount)) => {
                let previous = self.categories.clone();
                let registered = self.add_custom_category(&category)?;
                if let Err(err) = self.append(date_key(day), &category, amount) {
                    if registered {
                        self.withdraw_categories(previous);
                    }
                    return Err(err);
                }
                Ok(&self.records)
            }
            _ => {
                debug!(?invalid, "rejected journal entry");
                Err(CoreError::Validation { fields: invalid })
            }
        }
    }

    fn append(&mut self, date: String, category: &str, amount: f64) -> CoreResult<()> {
        self.records
            .push(SpendingRecord::new(date, category.to_string(), amount));
        if let Err(err) = write_collection(self.storage.as_mut(), RECORDS_KEY, &self.records) {
            self.records.pop();
            warn!(error = %err, "failed to persist spending records");
            return Err(err);
        }
        info!(
            category,
            amount,
            total_records = self.records.len(),
            "spending record added"
        );
        Ok(())
    }

    fn withdraw_categories(&mut self, previous: CategorySet) {
        self.categories = previous;
        if let Err(err) = write_collection(
            self.storage.as_mut(),
            CUSTOM_CATEGORIES_KEY,
            self.categories.custom(),
        ) {
            warn!(error = %err, "failed to restore persisted custom categories");
        }
    }
}

fn valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

fn read_collection<T: DeserializeOwned>(
    storage: &dyn StoragePort,
    key: &str,
    warnings: &mut Vec<String>,
) -> Vec<T> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            let message = format!("could not read `{key}`: {err}");
            warn!("{message}");
            warnings.push(message);
            return Vec::new();
        }
    };
    let entries = match serde_json::from_str::<Option<Vec<serde_json::Value>>>(&raw) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(err) => {
            let message = format!("discarding malformed `{key}`: {err}");
            warn!("{message}");
            warnings.push(message);
            return Vec::new();
        }
    };

    // A bad entry only drops itself.
    let total = entries.len();
    let values: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    let skipped = total - values.len();
    if skipped > 0 {
        let message = format!("skipped {skipped} malformed entry(ies) in `{key}`");
        warn!("{message}");
        warnings.push(message);
    }
    values
}

fn write_collection<T: serde::Serialize>(
    storage: &mut dyn StoragePort,
    key: &str,
    values: &[T],
) -> CoreResult<()> {
    let json = serde_json::to_string(values)?;
    storage.write(key, &json)?;
    debug!(key, bytes = json.len(), "collection persisted");
    Ok(())
}
