//! Show start times: parsing what a form submits and formatting for display.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a recognised date and time")]
pub struct DateParseError(pub String);

/// Named display styles for a start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
    /// `Tue 05, 21, 2019 9:30PM`
    #[default]
    Medium,
    /// `05/21/2019`
    Short,
}

impl DateStyle {
    fn pattern(self) -> &'static str {
        match self {
            DateStyle::Full => "%A %B, %-d, %Y at %-I:%M%p",
            DateStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
            DateStyle::Short => "%m/%d/%Y",
        }
    }
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(DateStyle::Full),
            "medium" => Ok(DateStyle::Medium),
            "short" => Ok(DateStyle::Short),
            other => Err(format!("unknown date style '{other}'")),
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateStyle::Full => "full",
            DateStyle::Medium => "medium",
            DateStyle::Short => "short",
        };
        f.write_str(name)
    }
}

pub fn format_datetime(value: DateTime<Utc>, style: DateStyle) -> String {
    value.format(style.pattern()).to_string()
}

/// Accepts RFC 3339, `YYYY-MM-DD[ T]HH:MM[:SS[.frac]]` and bare dates.
/// Inputs without an offset are taken as UTC.
pub fn parse_datetime(value: &str) -> Result<DateTime<Utc>, DateParseError> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DateParseError(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap()
    }

    #[test]
    fn test_format_styles() {
        assert_eq!(
            format_datetime(sample(), DateStyle::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
        assert_eq!(
            format_datetime(sample(), DateStyle::Medium),
            "Tue 05, 21, 2019 9:30PM"
        );
        assert_eq!(format_datetime(sample(), DateStyle::Short), "05/21/2019");
    }

    #[test]
    fn test_style_names() {
        assert_eq!("FULL".parse::<DateStyle>(), Ok(DateStyle::Full));
        assert_eq!(DateStyle::default().to_string(), "medium");
        assert!("long".parse::<DateStyle>().is_err());
    }

    #[test]
    fn test_parse_accepted_forms() {
        for input in [
            "2019-05-21T21:30:00Z",
            "2019-05-21T23:30:00+02:00",
            "2019-05-21 21:30:00",
            "2019-05-21 21:30:00.000000",
            "2019-05-21T21:30",
            " 2019-05-21 21:30 ",
        ] {
            assert_eq!(parse_datetime(input), Ok(sample()), "input {input:?}");
        }
        assert_eq!(
            parse_datetime("2019-05-21"),
            Ok(Utc.with_ymd_and_hms(2019, 5, 21, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("next tuesday").is_err());
        assert!(parse_datetime("").is_err());
        assert!(parse_datetime("2019-13-40 25:00").is_err());
    }
}
