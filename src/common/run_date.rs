//! Converts the compact run date written by the instrument into a calendar date.

use chrono::NaiveDate;

use crate::error::{Error, Result};


/// Parse a `YYMMDD` or `YYYYMMDD` run date. Two-digit years are taken to be
/// in the 2000s. The result displays as `YYYY-MM-DD`.
pub fn parse_run_date(raw: &str) -> Result<NaiveDate> {
    let invalid = || Error::InvalidDate(raw.to_owned());

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let iso = match raw.len() {
        6 => format!("20{}-{}-{}", &raw[0..2], &raw[2..4], &raw[4..6]),
        8 => format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8]),
        _ => return Err(invalid()),
    };

    NaiveDate::parse_from_str(&iso, "%Y-%m-%d").map_err(|_| invalid())
}
