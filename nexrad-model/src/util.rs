//!
//! Small shared helpers used across the data model, gated behind the `chrono` feature.
//!

#![cfg(feature = "chrono")]

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Converts a Modified Julian Date (days since 1970-01-01, per the archive convention used
/// throughout this format) plus an offset into that day to a UTC instant.
pub fn get_datetime(modified_julian_date: u16, past_midnight: Duration) -> Option<DateTime<Utc>> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    let date = epoch.checked_add_signed(Duration::days(modified_julian_date as i64 - 1))?;
    let naive = date.and_time(chrono::NaiveTime::MIN).checked_add_signed(past_midnight)?;
    Some(DateTime::from_naive_utc_and_offset(naive, Utc))
}
