//! Reporting periods.
//!
//! Dates are calendar dates with no time of day and no timezone: a record
//! belongs to a month when its date falls between the first and the last day
//! of that month, both inclusive.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use stonedesk_core::{DomainError, DomainResult};

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DomainResult<Self> {
        if end < start {
            return Err(DomainError::validation("end", "must not be before start"));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// One calendar month, written `YYYY-MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthWindow {
    year: i32,
    month: u32,
    range: DateRange,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::containing)
            .ok_or_else(|| DomainError::validation("month", "must be a valid calendar month"))
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);

        Self {
            year: date.year(),
            month: date.month(),
            range: DateRange { start, end },
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let malformed = || DomainError::validation("month", "must look like YYYY-MM");

        let (year, month) = input.trim().split_once('-').ok_or_else(malformed)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(malformed());
        }
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.range.start
    }

    pub fn last_day(&self) -> NaiveDate {
        self.range.end
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }

    pub fn previous(&self) -> Self {
        self.range
            .start
            .pred_opt()
            .map(Self::containing)
            .unwrap_or(*self)
    }
}

impl core::fmt::Display for MonthWindow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl core::str::FromStr for MonthWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MonthWindow {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MonthWindow> for String {
    fn from(value: MonthWindow) -> Self {
        value.to_string()
    }
}
