/// Day-granularity date helpers
///
/// Every date in the system is a calendar day in a single reference
/// calendar, persisted as an ISO `yyyy-MM-dd` string.

use chrono::{Datelike, Duration, NaiveDate};
use crate::domain::DomainError;

/// Byte offsets of the two dashes in `yyyy-MM-dd`
const DASHES: [usize; 2] = [4, 7];

/// Format used for every persisted date
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO day string, rejecting anything else
///
/// Only the exact ten-character form is accepted. chrono on its own also
/// takes signed years wider than four digits.
pub fn parse_day(value: &str) -> Result<NaiveDate, DomainError> {
    let invalid = || DomainError::InvalidDate {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| {
            if DASHES.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(trimmed, DAY_FORMAT).map_err(|_| invalid())
}

/// Canonical day string for a date
pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// The day before `date`, `None` at the start of the calendar
pub fn previous_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(1))
}

/// Monday of the week containing `date`
pub fn start_of_week(date: NaiveDate) -> Result<NaiveDate, DomainError> {
    date.checked_sub_signed(Duration::days(date.weekday().num_days_from_monday() as i64))
        .ok_or_else(|| DomainError::InvalidDate {
            value: format_day(date),
        })
}

/// `date` moved forward by `days`
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DomainError> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| DomainError::InvalidDate {
            value: format_day(date),
        })
}
