//! Reporting window filtering
//!
//! A run covers exactly one calendar month. Conversations and transfers are
//! kept when their EHR request falls inside the half-open window
//! `[start, end)`, where `end` is the first instant of the next month.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use crate::error::{MetricsError, Result};
use crate::models::{ParsedConversation, Transfer};

/// Half-open instant range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeRange {
    /// First instant in the range (inclusive)
    pub start: DateTime<Utc>,
    /// First instant after the range (exclusive)
    pub end: DateTime<Utc>,
}

impl DateTimeRange {
    /// Create a new range
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Check if the instant lies inside the range
    #[must_use]
    pub fn contains(&self, time: &DateTime<Utc>) -> bool {
        &self.start <= time && time < &self.end
    }
}

/// Calendar month a report is produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReportingMonth {
    year: i32,
    month: u32,
}

impl ReportingMonth {
    /// Create a reporting month
    ///
    /// # Errors
    /// Returns an error if `month` is not in `1..=12`
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(MetricsError::InvalidReportingMonth { year, month });
        }
        Ok(Self { year, month })
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month containing the given instant
    #[must_use]
    pub fn containing(time: &DateTime<Utc>) -> Self {
        Self {
            year: time.year(),
            month: time.month(),
        }
    }

    /// The window from the first instant of this month to the first of the next
    ///
    /// # Errors
    /// Returns an error if the month falls outside the representable calendar
    pub fn time_range(&self) -> Result<DateTimeRange> {
        let invalid = || MetricsError::InvalidReportingMonth {
            year: self.year,
            month: self.month,
        };

        let start = Utc
            .with_ymd_and_hms(self.year, self.month, 1, 0, 0, 0)
            .single()
            .ok_or_else(invalid)?;
        let end = start.checked_add_months(Months::new(1)).ok_or_else(invalid)?;

        Ok(DateTimeRange::new(start, end))
    }
}

impl fmt::Display for ReportingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl FromStr for ReportingMonth {
    type Err = MetricsError;

    /// Parse a reporting month
    ///
    /// Supported formats:
    /// - "2020-01" - Year and month (YYYY-MM)
    /// - "202001" - Year and month (YYYYMM)
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year_str, month_str) = match s.split_once('-') {
            Some(parts) => parts,
            None if s.len() == 6 && s.is_char_boundary(4) => s.split_at(4),
            None => {
                return Err(MetricsError::Config(format!("Invalid reporting month format: {s}")));
            }
        };

        let year = year_str
            .parse::<i32>()
            .map_err(|e| MetricsError::Config(format!("Invalid year in {s}: {e}")))?;
        let month = month_str
            .parse::<u32>()
            .map_err(|e| MetricsError::Config(format!("Invalid month in {s}: {e}")))?;

        Self::new(year, month)
    }
}

/// Conversations whose EHR request falls inside the range
pub fn filter_conversations_by_request_started_time(
    conversations: impl IntoIterator<Item = ParsedConversation>,
    time_range: DateTimeRange,
) -> impl Iterator<Item = ParsedConversation> {
    conversations
        .into_iter()
        .filter(move |conversation| time_range.contains(&conversation.request_started.time))
}

/// Transfers requested inside the range
pub fn filter_transfers_by_date_requested<'a>(
    transfers: impl IntoIterator<Item = &'a Transfer>,
    time_range: DateTimeRange,
) -> impl Iterator<Item = &'a Transfer> {
    transfers
        .into_iter()
        .filter(move |transfer| time_range.contains(&transfer.date_requested))
}
