//! Shared traits, time utilities, and enums for spending aggregation.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// Canonical textual representation of a record date (`YYYY-MM-DD`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

impl<T: Amounted + ?Sized> Amounted for &T {
    fn amount(&self) -> f64 {
        (**self).amount()
    }
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Parses a stored record date. Accepts plain ISO dates as well as
/// ISO date-times (with or without an offset), keeping only the calendar day.
pub fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|stamp| stamp.date())
}

/// Formats a date as the ISO key used for chart labels and persistence.
pub fn date_key(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Enumerates the aggregation window kinds offered by the dashboard.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Granularity {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [
        Granularity::Daily,
        Granularity::Weekly,
        Granularity::Monthly,
    ];

    /// Describes the selected period the way the dashboard headline shows it.
    pub fn describe(self, window: &DateWindow) -> String {
        match self {
            Granularity::Daily => window.start.format("%B %-d, %Y").to_string(),
            Granularity::Weekly => format!(
                "{} - {}",
                window.start.format("%-m/%-d/%Y"),
                window.end.format("%-m/%-d/%Y")
            ),
            Granularity::Monthly => window.start.format("%B %Y").to_string(),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Daily => "Daily",
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
        };
        f.write_str(label)
    }
}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Granularity::Daily),
            "weekly" => Ok(Granularity::Weekly),
            "monthly" => Ok(Granularity::Monthly),
            _ => Err(ParseGranularityError(value.to_string())),
        }
    }
}

/// Raised when a granularity name is not one of Daily, Weekly or Monthly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGranularityError(pub String);

impl fmt::Display for ParseGranularityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported granularity `{}`", self.0)
    }
}

impl std::error::Error for ParseGranularityError {}

/// First day of the weekly window. Pinned explicitly instead of following the
/// runtime locale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekStart(Weekday);

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(Weekday::Sun);
    pub const MONDAY: WeekStart = WeekStart(Weekday::Mon);

    pub fn new(day: Weekday) -> Self {
        Self(day)
    }

    pub fn weekday(self) -> Weekday {
        self.0
    }

    /// Most recent week-start day on or before `reference`.
    pub fn week_containing(self, reference: NaiveDate) -> NaiveDate {
        let current = reference.weekday().num_days_from_monday();
        let first = self.0.num_days_from_monday();
        let offset = (current + 7 - first) % 7;
        reference
            .checked_sub_days(Days::new(u64::from(offset)))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for WeekStart {
    fn default() -> Self {
        WeekStart::SUNDAY
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.0 {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        };
        f.write_str(label)
    }
}

impl FromStr for WeekStart {
    type Err = ParseWeekStartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<Weekday>()
            .map(WeekStart)
            .map_err(|_| ParseWeekStartError(value.to_string()))
    }
}

impl TryFrom<String> for WeekStart {
    type Error = ParseWeekStartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekStart> for String {
    fn from(value: WeekStart) -> Self {
        value.to_string()
    }
}

/// Raised when a configured week start is not a weekday name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWeekStartError(pub String);

impl fmt::Display for ParseWeekStartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported week start `{}`", self.0)
    }
}

impl std::error::Error for ParseWeekStartError {}

/// Inclusive range of calendar days selected by a granularity and reference date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Resolves the active window for `granularity` around `reference`.
    pub fn for_granularity(
        granularity: Granularity,
        reference: NaiveDate,
        week_start: WeekStart,
    ) -> Self {
        match granularity {
            Granularity::Daily => Self {
                start: reference,
                end: reference,
            },
            Granularity::Weekly => {
                let start = week_start.week_containing(reference);
                let end = start
                    .checked_add_days(Days::new(6))
                    .unwrap_or(NaiveDate::MAX);
                Self { start, end }
            }
            Granularity::Monthly => {
                let start = reference - chrono::Duration::days(i64::from(reference.day0()));
                let end = start
                    .checked_add_months(Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                Self { start, end }
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every calendar day of the window in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_window_starts_on_sunday_by_default() {
        // 2024-03-15 is a Friday.
        let window = DateWindow::for_granularity(
            Granularity::Weekly,
            date(2024, 3, 15),
            WeekStart::default(),
        );
        assert_eq!(window.start, date(2024, 3, 10));
        assert_eq!(window.end, date(2024, 3, 16));
        assert_eq!(window.days().count(), 7);
    }

    #[test]
    fn weekly_window_honours_monday_start() {
        let window =
            DateWindow::for_granularity(Granularity::Weekly, date(2024, 3, 10), WeekStart::MONDAY);
        assert_eq!(window.start, date(2024, 3, 4));
        assert_eq!(window.end, date(2024, 3, 10));
    }

    #[test]
    fn weekly_window_on_week_start_begins_that_day() {
        let window = DateWindow::for_granularity(
            Granularity::Weekly,
            date(2024, 3, 10),
            WeekStart::SUNDAY,
        );
        assert_eq!(window.start, date(2024, 3, 10));
    }

    #[test]
    fn monthly_window_covers_leap_february() {
        let window = DateWindow::for_granularity(
            Granularity::Monthly,
            date(2024, 2, 10),
            WeekStart::default(),
        );
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.days().count(), 29);
    }

    #[test]
    fn monthly_window_handles_december() {
        let window = DateWindow::for_granularity(
            Granularity::Monthly,
            date(2023, 12, 31),
            WeekStart::default(),
        );
        assert_eq!(window.start, date(2023, 12, 1));
        assert_eq!(window.end, date(2023, 12, 31));
    }

    #[test]
    fn granularity_parsing_rejects_unknown_values() {
        assert_eq!("weekly".parse::<Granularity>(), Ok(Granularity::Weekly));
        assert_eq!(" Monthly ".parse::<Granularity>(), Ok(Granularity::Monthly));
        let err = "yearly".parse::<Granularity>().unwrap_err();
        assert!(err.to_string().contains("yearly"));
    }

    #[test]
    fn describe_matches_dashboard_labels() {
        let reference = date(2024, 3, 15);
        let week_start = WeekStart::default();
        let daily = DateWindow::for_granularity(Granularity::Daily, reference, week_start);
        let weekly = DateWindow::for_granularity(Granularity::Weekly, reference, week_start);
        let monthly = DateWindow::for_granularity(Granularity::Monthly, reference, week_start);
        assert_eq!(Granularity::Daily.describe(&daily), "March 15, 2024");
        assert_eq!(Granularity::Weekly.describe(&weekly), "3/10/2024 - 3/16/2024");
        assert_eq!(Granularity::Monthly.describe(&monthly), "March 2024");
    }

    #[test]
    fn parse_record_date_accepts_iso_variants() {
        assert_eq!(parse_record_date("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(
            parse_record_date("2024-03-15T10:30:00"),
            Some(date(2024, 3, 15))
        );
        assert_eq!(
            parse_record_date("2024-03-15T23:30:00+02:00"),
            Some(date(2024, 3, 15))
        );
        assert_eq!(parse_record_date(""), None);
        assert_eq!(parse_record_date("yesterday"), None);
    }

    #[test]
    fn week_start_round_trips_through_serde() {
        let json = serde_json::to_string(&WeekStart::MONDAY).unwrap();
        assert_eq!(json, "\"monday\"");
        let parsed: WeekStart = serde_json::from_str("\"Sunday\"").unwrap();
        assert_eq!(parsed, WeekStart::SUNDAY);
        assert!(serde_json::from_str::<WeekStart>("\"someday\"").is_err());
    }
}
