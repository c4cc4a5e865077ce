//! Encoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as ISO 8601 strings (`YYYY-MM-DD`).

use chrono::NaiveDate;

use crate::{Error, Result};

pub fn encode_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn date_round_trip() {
    let date = NaiveDate::from_ymd_opt(2020, 1, 15).unwrap();
    assert_eq!(encode_date(date), "2020-01-15");
    assert_eq!(decode_date("2020-01-15").unwrap(), date);
  }

  #[test]
  fn malformed_date_is_an_error() {
    assert!(decode_date("15/01/2020").is_err());
  }
}
