use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("malformed year-month {0:?}, expected YYYY-MM")]
    Malformed(String),
    #[error("month {0} is out of range")]
    MonthOutOfRange(u32),
}

/// A calendar month. Experience dates carry no day precision.
///
/// Ordering is chronological. Serialized as `"YYYY-MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month of the year, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Absolute number of months since year 0.
    pub fn month_index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    pub fn from_month_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Whole months from `self` to `later`; negative if `later` is earlier.
    pub fn months_until(&self, later: YearMonth) -> i64 {
        later.month_index() - self.month_index()
    }

    #[must_use]
    pub fn add_months(&self, months: i64) -> Self {
        Self::from_month_index(self.month_index() + months)
    }

    /// `"May 2025"`
    pub fn long_label(&self) -> String {
        self.format("%B %Y")
    }

    /// `"Jan 2024"`, used for axis ticks.
    pub fn short_label(&self) -> String {
        self.format("%b %Y")
    }

    fn format(&self, pattern: &str) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format(pattern).to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = DateError;

    /// Accepts `YYYY-MM`, and `YYYY-MM-DD` with the day ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed.matches('-').count() {
            1 => NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"),
            2 => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"),
            _ => return Err(DateError::Malformed(trimmed.to_string())),
        };
        parsed
            .map(Self::from_date)
            .map_err(|_| DateError::Malformed(trimmed.to_string()))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
