use chrono::{Duration, NaiveDate};

use crate::error::ErrorKind;

/// Parses an ISO-8601 `YYYY-MM-DD` date (spec §6 "dates are ISO-8601").
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, ErrorKind> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| ErrorKind::InvalidInput(format!("invalid date '{s}': {e}")))
}

/// Parses a wall-clock `HH:MM` string down to its hour-of-day component
/// (spec §6: "wall-clock times are `HH:MM` strings parsed to hour-of-day
/// integers"). Minutes are intentionally discarded, matching the source's
/// hour-granularity rostering arithmetic (spec §9 "Night-shift hour
/// arithmetic").
pub fn parse_hour_of_day(s: &str) -> Result<u32, ErrorKind> {
    let hour_part = s
        .split(':')
        .next()
        .ok_or_else(|| ErrorKind::InvalidInput(format!("invalid wall-clock time '{s}'")))?;
    hour_part
        .parse::<u32>()
        .map_err(|e| ErrorKind::InvalidInput(format!("invalid wall-clock time '{s}': {e}")))
}

/// Expands a (start, length_days) horizon into the list of calendar dates it covers.
pub fn horizon_dates(start: NaiveDate, length_days: u32) -> Vec<NaiveDate> {
    (0..length_days).map(|i| start + Duration::days(i as i64)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_iso_date("2025-01-01").unwrap(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(parse_iso_date("01/01/2025").is_err());
    }

    #[test]
    fn parses_hour_discarding_minutes() {
        assert_eq!(parse_hour_of_day("07:30").unwrap(), 7);
        assert_eq!(parse_hour_of_day("23:00").unwrap(), 23);
    }

    #[test]
    fn horizon_expands_consecutive_days() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let days = horizon_dates(start, 3);
        assert_eq!(days.len(), 3);
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
    }
}
