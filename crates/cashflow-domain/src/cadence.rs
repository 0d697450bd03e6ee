//! Recurrence cadences and the calendar arithmetic that advances them.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Recurrence frequency attached to a movement.
///
/// The store persists cadences as free-form strings; values outside the known
/// set are kept verbatim in [`Cadence::Unrecognized`] and never recur.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Cadence {
    /// One-off movement.
    #[default]
    None,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
    Unrecognized(String),
}

impl Cadence {
    /// Every cadence a user can pick, in menu order.
    pub fn known() -> [Cadence; 6] {
        [
            Cadence::None,
            Cadence::Daily,
            Cadence::Weekly,
            Cadence::Biweekly,
            Cadence::Monthly,
            Cadence::Yearly,
        ]
    }

    /// Parses a stored cadence value. Older dashboard builds wrote `fortnite`
    /// and `montly`, so those spellings are accepted as well.
    pub fn parse(raw: &str) -> Cadence {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Cadence::None,
            "daily" => Cadence::Daily,
            "weekly" => Cadence::Weekly,
            "biweekly" | "fortnightly" | "fortnite" => Cadence::Biweekly,
            "monthly" | "montly" => Cadence::Monthly,
            "yearly" => Cadence::Yearly,
            _ => Cadence::Unrecognized(raw.to_string()),
        }
    }

    /// Canonical storage key.
    pub fn key(&self) -> &str {
        match self {
            Cadence::None => "none",
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Biweekly => "biweekly",
            Cadence::Monthly => "monthly",
            Cadence::Yearly => "yearly",
            Cadence::Unrecognized(raw) => raw,
        }
    }

    /// Human-readable label; unrecognized values fall back to the raw value.
    pub fn label(&self) -> &str {
        match self {
            Cadence::None => "One-off",
            Cadence::Daily => "Daily",
            Cadence::Weekly => "Weekly",
            Cadence::Biweekly => "Fortnightly",
            Cadence::Monthly => "Monthly",
            Cadence::Yearly => "Yearly",
            Cadence::Unrecognized(raw) => raw,
        }
    }

    pub fn is_one_off(&self) -> bool {
        matches!(self, Cadence::None)
    }

    /// Whether [`Cadence::next_occurrence`] can ever produce a date.
    pub fn recurs(&self) -> bool {
        !matches!(self, Cadence::None | Cadence::Unrecognized(_))
    }

    /// Returns the occurrence following `from`, keeping the time of day.
    ///
    /// Monthly steps clamp to the last day of the target month (Jan 31 becomes
    /// Feb 28 or Feb 29) and yearly steps move Feb 29 to Feb 28 on non-leap
    /// years. Terminal cadences return `None`, as does any step that would
    /// leave the representable calendar.
    pub fn next_occurrence(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = from.date_naive();
        let next = match self {
            Cadence::None | Cadence::Unrecognized(_) => return None,
            Cadence::Daily => date.checked_add_signed(Duration::days(1))?,
            Cadence::Weekly => date.checked_add_signed(Duration::days(7))?,
            Cadence::Biweekly => date.checked_add_signed(Duration::days(14))?,
            Cadence::Monthly => shift_month(date, 1)?,
            Cadence::Yearly => shift_year(date, 1)?,
        };
        Some(DateTime::from_naive_utc_and_offset(
            next.and_time(from.time()),
            Utc,
        ))
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Cadence {
    fn from(value: String) -> Self {
        Cadence::parse(&value)
    }
}

impl From<&str> for Cadence {
    fn from(value: &str) -> Self {
        Cadence::parse(value)
    }
}

impl From<Cadence> for String {
    fn from(value: Cadence) -> Self {
        match value {
            Cadence::Unrecognized(raw) => raw,
            known => known.key().to_string(),
        }
    }
}

fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32)?);
    NaiveDate::from_ymd_opt(year, month as u32, day)
}

fn shift_year(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    let day = date.day().min(days_in_month(year, date.month())?);
    NaiveDate::from_ymd_opt(year, date.month(), day)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    first_next.pred_opt().map(|last| last.day())
}
