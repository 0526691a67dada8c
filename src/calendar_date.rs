//! Serde helpers for zone-less calendar dates.
//!
//! Dates are written as `YYYY-MM-DD`. When reading, an RFC 3339 timestamp is
//! also accepted and its date part is used, since browsers tend to send
//! `Date.toISOString()` output.

use std::ops::RangeInclusive;

use serde::{Deserialize, Deserializer, Serializer, de};
use time::{
    Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

use crate::Error;

/// The years that can be stored. Dates are compared and grouped as text,
/// which only orders correctly for four-digit, unsigned years.
const SUPPORTED_YEARS: RangeInclusive<i32> = 0..=9999;

/// Parse `text` as either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` matches neither format or the year
/// is outside 0 to 9999.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|timestamp| timestamp.date()))
        .ok()
        .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
        .ok_or_else(|| Error::InvalidDate(text.to_owned()))
}

/// Serialize a date as `YYYY-MM-DD`.
pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(date)
}

/// Deserialize a date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_date(&text).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::{Date, macros::date};

    use crate::Error;

    use super::parse_date;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Dated {
        #[serde(with = "crate::calendar_date")]
        date: Date,
    }

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_date("2024-01-31"), Ok(date!(2024 - 01 - 31)));
    }

    #[test]
    fn parses_timestamp_as_its_date() {
        assert_eq!(
            parse_date("2024-03-05T00:00:00.000Z"),
            Ok(date!(2024 - 03 - 05))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_date("05/03/2024"),
            Err(Error::InvalidDate("05/03/2024".to_owned()))
        );
    }

    #[test]
    fn rejects_negative_year() {
        assert_eq!(
            parse_date("-0001-06-01"),
            Err(Error::InvalidDate("-0001-06-01".to_owned()))
        );
    }

    #[test]
    fn accepts_boundary_years() {
        assert_eq!(parse_date("0000-01-01"), Ok(date!(0000 - 01 - 01)));
        assert_eq!(parse_date("9999-12-31"), Ok(date!(9999 - 12 - 31)));
    }

    #[test]
    fn serializes_as_iso_date() {
        let json = serde_json::to_string(&Dated {
            date: date!(2024 - 02 - 09),
        })
        .unwrap();

        assert_eq!(json, r#"{"date":"2024-02-09"}"#);
    }

    #[test]
    fn deserialize_reports_invalid_date() {
        let result = serde_json::from_str::<Dated>(r#"{"date":"yesterday"}"#);

        assert!(result.is_err());
    }
}
