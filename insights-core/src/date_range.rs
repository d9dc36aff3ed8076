//! Reporting period parsing.
//!
//! A period is either a whole month (`YYYY-MM`) or an explicit pair of
//! inclusive dates (`YYYY-MM-DD`). All dates are anchored to midnight at
//! UTC+8.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use regex::Regex;

use crate::constants::REPORT_UTC_OFFSET_HOURS;
use crate::error::{InsightsError, InsightsResult};

static PERIOD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").unwrap());

/// The fixed offset every report is computed in.
pub fn report_offset() -> FixedOffset {
    FixedOffset::east_opt(REPORT_UTC_OFFSET_HOURS * 3600).unwrap()
}

/// Midnight of `date` at UTC+8.
pub fn anchor(date: NaiveDate) -> DateTime<FixedOffset> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap();
    report_offset().from_local_datetime(&midnight).unwrap()
}

/// Parse YYYY-MM-DD (surrounding whitespace is ignored).
pub fn parse_date(input: &str) -> InsightsResult<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| InsightsError::InvalidDate(input.to_string()))
}

/// What the first answer to the period prompt turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodInput {
    /// `YYYY-MM`: the whole month, nothing more to ask.
    Month(DateRange),
    /// `YYYY-MM-DD`: the start of an explicit range, an end date is still needed.
    Start(NaiveDate),
}

impl PeriodInput {
    pub fn parse(input: &str) -> InsightsResult<Self> {
        if DateRange::is_period(input) {
            DateRange::parse_period(input).map(PeriodInput::Month)
        } else {
            parse_date(input).map(PeriodInput::Start)
        }
    }
}

/// Inclusive date range. `end` is never before `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> InsightsResult<Self> {
        if end < start {
            return Err(InsightsError::EndBeforeStart { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// The full calendar month, first day to last day.
    pub fn month(year: i32, month: u32) -> InsightsResult<Self> {
        let invalid = || InsightsError::InvalidPeriod(format!("{year:04}-{month:02}"));

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .ok_or_else(invalid)?;

        DateRange::new(start, end)
    }

    /// Whether `input` has the shape of a month period (YYYY-MM).
    pub fn is_period(input: &str) -> bool {
        PERIOD_PATTERN.is_match(input.trim())
    }

    /// Parse a YYYY-MM period into the range covering that month.
    pub fn parse_period(input: &str) -> InsightsResult<Self> {
        let input = input.trim();
        if !Self::is_period(input) {
            return Err(InsightsError::InvalidPeriod(input.to_string()));
        }

        let (year, month) = input
            .split_once('-')
            .and_then(|(y, m)| Some((y.parse::<i32>().ok()?, m.parse::<u32>().ok()?)))
            .ok_or_else(|| InsightsError::InvalidPeriod(input.to_string()))?;

        Self::month(year, month)
    }

    /// Build a range from two YYYY-MM-DD strings.
    pub fn from_args(start: &str, end: &str) -> InsightsResult<Self> {
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Midnight (UTC+8) at the start of the first day.
    pub fn start_instant(&self) -> DateTime<FixedOffset> {
        anchor(self.start)
    }

    /// Midnight (UTC+8) after the last day, so the whole last day is covered.
    pub fn end_instant_exclusive(&self) -> DateTime<FixedOffset> {
        anchor(self.end) + Duration::days(1)
    }

    /// Number of days in the range, both ends included.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
