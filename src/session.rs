//! Application session: one record store, one aggregation engine, and the
//! dashboard view state (granularity plus reference date).

use std::path::Path;

use chrono::NaiveDate;
use spend_config::{load_predefined_categories, Config};
use spend_core::{
    AggregationEngine, Clock, DashboardSummary, LoadReport, RecordDraft, RecordStore,
    StoragePort, SystemClock,
};
use spend_domain::{CategorySet, Granularity, PredefinedCategory, SpendingRecord};
use spend_storage_json::JsonFileStorage;
use tracing::{debug, info};

use crate::errors::TrackerError;

/// Owns the store and the view state. Every successful mutation bumps
/// [`Session::revision`]; a dashboard computed at an older revision is stale.
pub struct Session {
    store: RecordStore,
    engine: AggregationEngine,
    clock: Box<dyn Clock>,
    granularity: Granularity,
    reference: NaiveDate,
    revision: u64,
    load_warnings: Vec<String>,
}

impl Session {
    /// Opens the file-backed session described by `config`, with `base` as the
    /// application directory.
    pub fn open(config: &Config, base: &Path) -> Result<Self, TrackerError> {
        let storage = JsonFileStorage::new(config.resolve_data_dir(base))?;
        let predefined = load_predefined_categories(config.predefined_categories.as_deref())?;
        info!(data_dir = %storage.root().display(), "opening spending session");
        let (session, _) =
            Self::with_storage(Box::new(storage), &predefined, config, Box::new(SystemClock));
        Ok(session)
    }

    /// Builds a session over any storage port and clock.
    pub fn with_storage(
        storage: Box<dyn StoragePort>,
        predefined: &[PredefinedCategory],
        config: &Config,
        clock: Box<dyn Clock>,
    ) -> (Self, LoadReport) {
        let (store, report) = RecordStore::open(storage, predefined);
        let reference = clock.today();
        let session = Self {
            store,
            engine: AggregationEngine::new(config.week_start),
            clock,
            granularity: config.default_granularity,
            reference,
            revision: 0,
            load_warnings: report.warnings.clone(),
        };
        (session, report)
    }

    pub fn records(&self) -> &[SpendingRecord] {
        self.store.records()
    }

    pub fn categories(&self) -> &CategorySet {
        self.store.categories()
    }

    pub fn engine(&self) -> AggregationEngine {
        self.engine
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Problems found while loading persisted data.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
        debug!(%granularity, "view granularity changed");
    }

    pub fn set_reference(&mut self, reference: NaiveDate) {
        self.reference = reference;
        debug!(%reference, "view reference date changed");
    }

    pub fn reset_reference(&mut self) {
        let today = self.clock.today();
        self.set_reference(today);
    }

    pub fn add_record(
        &mut self,
        date: &str,
        category: &str,
        amount: f64,
    ) -> Result<&SpendingRecord, TrackerError> {
        self.store.add_record(date, category, amount)?;
        self.revision += 1;
        self.last_record()
    }

    /// Runs the journal form: resolve "Others", validate, register, append.
    pub fn submit(&mut self, draft: &RecordDraft) -> Result<&SpendingRecord, TrackerError> {
        self.store.submit(draft)?;
        self.revision += 1;
        self.last_record()
    }

    pub fn add_custom_category(&mut self, name: &str) -> Result<bool, TrackerError> {
        let added = self.store.add_custom_category(name)?;
        if added {
            self.revision += 1;
        }
        Ok(added)
    }

    /// Recomputes the dashboard for the current view state.
    pub fn dashboard(&self) -> DashboardSummary {
        self.engine
            .summarize(self.store.records(), self.granularity, self.reference)
    }

    fn last_record(&self) -> Result<&SpendingRecord, TrackerError> {
        self.store.records().last().ok_or_else(|| {
            TrackerError::Core(spend_core::CoreError::Storage(
                "record list empty after append".into(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spend_core::{FixedClock, MemoryStorage};
    use spend_domain::CategoryChoice;

    fn session_on(day: NaiveDate) -> (Session, MemoryStorage) {
        let storage = MemoryStorage::new();
        let predefined = vec![PredefinedCategory::new("Food")];
        let (session, _) = Session::with_storage(
            Box::new(storage.clone()),
            &predefined,
            &Config::default(),
            Box::new(FixedClock(day)),
        );
        (session, storage)
    }

    #[test]
    fn revision_advances_only_on_successful_mutations() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (mut session, _) = session_on(day);
        assert_eq!(session.revision(), 0);

        session.add_record("2024-03-15", "Food", 4.0).unwrap();
        assert_eq!(session.revision(), 1);

        assert!(session.add_record("", "Food", 4.0).is_err());
        assert_eq!(session.revision(), 1);

        assert!(!session.add_custom_category("Food").unwrap());
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn view_state_defaults_to_config_and_clock() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (mut session, _) = session_on(day);
        assert_eq!(session.granularity(), Granularity::Monthly);
        assert_eq!(session.reference(), day);

        session.set_reference(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        session.reset_reference();
        assert_eq!(session.reference(), day);
    }

    #[test]
    fn submit_with_custom_category_updates_dashboard() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (mut session, storage) = session_on(day);
        let draft = RecordDraft::new(
            "2024-03-14",
            CategoryChoice::from_selection("Others", "Gifts"),
            "20",
        );
        let record = session.submit(&draft).unwrap();
        assert_eq!(record.category, "Gifts");

        session.set_granularity(Granularity::Weekly);
        let summary = session.dashboard();
        assert_eq!(summary.total_in_window, 20.0);
        assert_eq!(summary.by_category.labels(), vec!["Gifts"]);
        assert!(storage
            .raw(spend_core::CUSTOM_CATEGORIES_KEY)
            .unwrap()
            .contains("Gifts"));
    }

    #[test]
    fn failed_submit_changes_nothing() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (mut session, _) = session_on(day);
        let draft = RecordDraft::new(
            "2024-03-14",
            CategoryChoice::from_selection("Others", "Gifts"),
            "abc",
        );
        let err = session.submit(&draft).unwrap_err();
        assert!(err.is_validation());
        assert!(session.records().is_empty());
        assert!(session.categories().custom().is_empty());
        assert_eq!(session.revision(), 0);
    }
}
