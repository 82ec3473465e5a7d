//! Calendar primitives for the aggregation engine
//!
//! Every computation in the engine is anchored to local calendar days, never
//! to raw UTC instants. The types here make that translation explicit: a
//! [`TzOffset`] resolves a UTC timestamp to its local day, a [`DateRange`] is
//! an inclusive run of days, and a [`Clock`] supplies "now" so that
//! window-relative queries stay deterministic under test.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

// ============================================================================
// Timezone offset
// ============================================================================

/// Largest representable offset either side of UTC (UTC-14 .. UTC+14 covers
/// every real zone with margin).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Fixed offset from UTC, in minutes, used to resolve local calendar days.
///
/// The engine deliberately works with a fixed offset rather than a named
/// zone: callers that care about DST resolve the offset before handing it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TzOffset(i32);

impl TzOffset {
    pub const UTC: TzOffset = TzOffset(0);

    /// Build an offset from minutes east of UTC. Returns `None` outside
    /// UTC-14..UTC+14.
    pub fn from_minutes(minutes: i32) -> Option<Self> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return None;
        }
        Some(Self(minutes))
    }

    pub fn minutes(&self) -> i32 {
        self.0
    }

    /// The local calendar day this UTC instant falls on.
    pub fn local_day(&self, instant: DateTime<Utc>) -> NaiveDate {
        (instant + Duration::minutes(i64::from(self.0))).date_naive()
    }
}

impl Default for TzOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for TzOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.abs();
        write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
    }
}

// ============================================================================
// Date ranges
// ============================================================================

/// Inclusive range of local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `end < start`. `start == end` is a valid
    /// one-day range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// One-day range.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Range of `days` calendar days ending at `end` (inclusive). A zero
    /// count is treated as one day.
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let span = days.max(1) - 1;
        let start = end
            .checked_sub_days(Days::new(u64::from(span)))
            .unwrap_or(end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, always >= 1.
    pub fn day_count(&self) -> u32 {
        let days = (self.end - self.start).num_days() + 1;
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Iterate the days of the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .take(self.day_count() as usize)
    }
}

// ============================================================================
// Month identifiers
// ============================================================================

/// A calendar month identified as `YYYY-MM`.
///
/// Internally stored as the first day of the month so the full day range can
/// be derived without re-validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthId {
    first: NaiveDate,
}

impl MonthId {
    /// Build a month from numeric parts. Years outside 1970..=9999 are
    /// rejected so downstream date arithmetic can never overflow.
    pub fn new(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1970..=9999).contains(&year) {
            return Err(EngineError::InvalidMonth(format!("{year:04}-{month:02}")));
        }
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(first) => Ok(Self { first }),
            None => Err(EngineError::InvalidMonth(format!("{year:04}-{month:02}"))),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Inclusive range covering every day of the month.
    pub fn range(&self) -> DateRange {
        let end = self
            .first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first);
        DateRange {
            start: self.first,
            end,
        }
    }
}

impl FromStr for MonthId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for MonthId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl TryFrom<String> for MonthId {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthId> for String {
    fn from(value: MonthId) -> Self {
        value.to_string()
    }
}

/// Short weekday label used on correlation chart points ("Mon".."Sun").
pub fn weekday_label(day: NaiveDate) -> &'static str {
    match day.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

// ============================================================================
// Clock
// ============================================================================

/// Source of the current instant.
///
/// Window-relative operations (trailing consistency and correlation windows)
/// take their notion of "today" from an injected clock instead of reading
/// ambient time, which keeps them reproducible.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}
