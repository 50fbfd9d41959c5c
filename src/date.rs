//! Date handling for package versions.
//!
//! Package versions are derived from the manifest's `lastUpdated` timestamp,
//! so a republished manifest entry always yields a newer version without any
//! manual bookkeeping:
//!
//! ```text
//! lastUpdated  2023-01-05T10:20:30.123Z
//! version      2023.01.05-102030123Z
//! ```
//!
//! The date portion uses `.` separators so it reads as a semver core; the time
//! portion lands in the pre-release slot with the `:` and `.` separators of the
//! ISO form stripped out.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DateError {
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),
}

/// `YYYY-MM-DDTHH:mm:ss[.f{1,3}]Z?` — fraction and trailing `Z` are optional.
///
/// ASCII digits only; `\d` would also admit other scripts' decimal digits.
static UTC_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]{1,3}))?Z?$",
    )
    .expect("timestamp pattern must compile")
});

/// Format an instant as a semver-compatible date: `YYYY.MM.DD-HHmmssSSSZ`.
pub fn semver_date(date: &DateTime<Utc>) -> String {
    date.format("%Y.%m.%d-%H%M%S%3fZ").to_string()
}

/// [`semver_date`] for the current time.
pub fn semver_date_now() -> String {
    semver_date(&Utc::now())
}

/// Parse a UTC timestamp such as `2023-01-05T10:20:30.123Z`.
///
/// The value is always interpreted as UTC, whether or not the trailing `Z` is
/// present. The fractional part is a decimal fraction of a second, so `.5` is
/// 500 ms; without it the millisecond is 0. Strings that fit the pattern but
/// name an impossible calendar value (month 13, Feb 30, second 60) are
/// rejected with the same error as malformed ones.
pub fn parse_utc_date(input: &str) -> Result<DateTime<Utc>, DateError> {
    let invalid = || DateError::InvalidFormat(input.to_string());
    let caps = UTC_TIMESTAMP.captures(input).ok_or_else(invalid)?;

    let field = |i: usize| -> Result<u32, DateError> { caps[i].parse().map_err(|_| invalid()) };
    let millis = match caps.get(7) {
        Some(m) => {
            let digits = m.as_str();
            let value: u32 = digits.parse().map_err(|_| invalid())?;
            let pad = 3u32
                .checked_sub(digits.len() as u32)
                .ok_or_else(invalid)?;
            value * 10u32.pow(pad)
        }
        None => 0,
    };

    let year = i32::try_from(field(1)?).map_err(|_| invalid())?;
    let (hour, minute, second) = (field(4)?, field(5)?, field(6)?);
    NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)
        .and_then(|d| d.and_hms_milli_opt(hour, minute, second, millis))
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)
}
