//! Window filtering, category grouping, and chart-series shaping.

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
};

use chrono::NaiveDate;
use serde::Serialize;
use spend_domain::{
    date_key, Amounted, DateWindow, Granularity, NamedEntity, SpendingRecord, WeekStart,
};

use crate::CoreResult;

/// Parses a granularity name, failing with a configuration error for anything
/// other than Daily, Weekly or Monthly.
pub fn parse_granularity(raw: &str) -> CoreResult<Granularity> {
    Ok(raw.parse::<Granularity>()?)
}

/// Summed amount for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

impl NamedEntity for CategoryTotal {
    fn name(&self) -> &str {
        &self.category
    }
}

impl Amounted for CategoryTotal {
    fn amount(&self) -> f64 {
        self.total
    }
}

/// Per-category totals in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.total)
    }

    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    /// Category names aligned with [`CategoryBreakdown::amounts`].
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name()).collect()
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.total).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Date labels and aligned totals for the spending-over-time chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    pub labels: Vec<String>,
    pub totals: Vec<f64>,
}

impl TimeSeries {
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.totals.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Everything the dashboard shows for one granularity and reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub granularity: Granularity,
    pub reference: NaiveDate,
    pub window: DateWindow,
    pub label: String,
    pub total_all_time: f64,
    pub total_in_window: f64,
    pub record_count: usize,
    pub by_category: CategoryBreakdown,
    pub series: TimeSeries,
}

/// Pure transformations from records to filtered subsets and chart shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationEngine {
    week_start: WeekStart,
}

impl AggregationEngine {
    pub fn new(week_start: WeekStart) -> Self {
        Self { week_start }
    }

    /// Concrete date range selected by `granularity` around `reference`.
    pub fn active_window(&self, granularity: Granularity, reference: NaiveDate) -> DateWindow {
        DateWindow::for_granularity(granularity, reference, self.week_start)
    }

    /// Headline text for the selected period.
    pub fn window_label(&self, granularity: Granularity, reference: NaiveDate) -> String {
        granularity.describe(&self.active_window(granularity, reference))
    }

    /// Records dated inside the active window, in input order. Records whose
    /// date is missing or unparseable never match.
    pub fn filter<'a>(
        &self,
        records: &'a [SpendingRecord],
        granularity: Granularity,
        reference: NaiveDate,
    ) -> Vec<&'a SpendingRecord> {
        let window = self.active_window(granularity, reference);
        records
            .iter()
            .filter(|record| {
                record
                    .parsed_date()
                    .map(|date| window.contains(date))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Sums amounts per category, keeping the order categories first appear in.
    pub fn group_by_category<R: Borrow<SpendingRecord>>(records: &[R]) -> CategoryBreakdown {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut entries: Vec<CategoryTotal> = Vec::new();
        for record in records {
            let record: &SpendingRecord = record.borrow();
            match index.get(record.category.as_str()) {
                Some(&slot) => entries[slot].total += record.amount,
                None => {
                    index.insert(record.category.as_str(), entries.len());
                    entries.push(CategoryTotal {
                        category: record.category.clone(),
                        total: record.amount,
                    });
                }
            }
        }
        CategoryBreakdown { entries }
    }

    /// Buckets already-filtered records for the spending-over-time chart.
    ///
    /// Daily yields one bucket for the reference date. Weekly always yields the
    /// seven days of the window, zero-filled. Monthly yields only the dates that
    /// have spending, ascending.
    pub fn time_series<R: Borrow<SpendingRecord>>(
        &self,
        filtered: &[R],
        granularity: Granularity,
        reference: NaiveDate,
    ) -> TimeSeries {
        match granularity {
            Granularity::Daily => TimeSeries {
                labels: vec![date_key(reference)],
                totals: vec![Self::total(
                    filtered.iter().map(Borrow::<SpendingRecord>::borrow),
                )],
            },
            Granularity::Weekly => {
                let sums = sums_by_date(filtered);
                let window = self.active_window(granularity, reference);
                let (labels, totals) = window
                    .days()
                    .map(|day| (date_key(day), sums.get(&day).copied().unwrap_or(0.0)))
                    .unzip();
                TimeSeries { labels, totals }
            }
            Granularity::Monthly => {
                let (labels, totals) = sums_by_date(filtered)
                    .into_iter()
                    .map(|(day, total)| (date_key(day), total))
                    .unzip();
                TimeSeries { labels, totals }
            }
        }
    }

    /// Sum of amounts; zero for an empty collection.
    pub fn total<I>(records: I) -> f64
    where
        I: IntoIterator,
        I::Item: Amounted,
    {
        records.into_iter().map(|record| record.amount()).sum()
    }

    /// Builds the full dashboard snapshot for the selected period.
    pub fn summarize(
        &self,
        records: &[SpendingRecord],
        granularity: Granularity,
        reference: NaiveDate,
    ) -> DashboardSummary {
        let window = self.active_window(granularity, reference);
        let filtered = self.filter(records, granularity, reference);
        DashboardSummary {
            granularity,
            reference,
            window,
            label: granularity.describe(&window),
            total_all_time: Self::total(records),
            total_in_window: Self::total(&filtered),
            record_count: filtered.len(),
            by_category: Self::group_by_category(&filtered),
            series: self.time_series(&filtered, granularity, reference),
        }
    }
}

fn sums_by_date<R: Borrow<SpendingRecord>>(records: &[R]) -> BTreeMap<NaiveDate, f64> {
    let mut sums = BTreeMap::new();
    for record in records {
        let record: &SpendingRecord = record.borrow();
        if let Some(day) = record.parsed_date() {
            *sums.entry(day).or_insert(0.0) += record.amount;
        }
    }
    sums
}
