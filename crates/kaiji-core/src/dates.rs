//! Inclusive calendar date ranges and CLI date-token parsing.

use chrono::{Days, NaiveDate};

/// Errors for date range construction and date-token parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    /// `start` is after `end`.
    #[error("date range start {start} is after end {end}")]
    Reversed {
        /// Requested range start.
        start: NaiveDate,
        /// Requested range end.
        end: NaiveDate,
    },

    /// The token is neither `yesterday` nor a valid `YYYY-MM-DD` date.
    #[error("invalid date token {token:?}, expected YYYY-MM-DD or \"yesterday\"")]
    InvalidToken {
        /// The offending input.
        token: String,
    },
}

/// An inclusive range of calendar dates.
///
/// Normalizes to a sequence of individual dates, one fetch unit per date.
/// Construction enforces `start <= end`; a single-day range yields exactly
/// one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create an inclusive range. Fails when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateError> {
        if start > end {
            return Err(DateError::Reversed { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering a single day.
    #[must_use]
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// First day of the range.
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range (at least 1).
    #[must_use]
    pub fn days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Iterate the individual dates, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |d| {
            d.checked_add_days(Days::new(1)).filter(|next| *next <= end)
        })
    }
}

/// Parse a CLI date token relative to `today`.
///
/// Accepts a literal `YYYY-MM-DD` date or the token `yesterday`, meaning one
/// calendar day before `today`. `today` is passed explicitly so callers (and
/// tests) control the clock.
pub fn parse_date_token(token: &str, today: NaiveDate) -> Result<NaiveDate, DateError> {
    if token.eq_ignore_ascii_case("yesterday") {
        return today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| DateError::InvalidToken {
                token: token.to_owned(),
            });
    }
    NaiveDate::parse_from_str(token, "%Y-%m-%d").map_err(|_| DateError::InvalidToken {
        token: token.to_owned(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
