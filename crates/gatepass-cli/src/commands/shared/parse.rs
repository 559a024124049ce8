use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parse an enum flag through its `FromStr`, naming the flag on failure.
pub fn parse_flag<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Which end of a day a bare date stands for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DayBound {
    Start,
    End,
}

/// Parse an RFC 3339 timestamp, or a `YYYY-MM-DD` date expanded to the start
/// or end of that UTC day.
pub fn parse_time_bound(raw: &str, bound: DayBound, field: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("invalid {field} '{raw}': expected RFC 3339 or YYYY-MM-DD"))?;
    let time = match bound {
        DayBound::Start => NaiveTime::MIN,
        DayBound::End => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
            .ok_or_else(|| anyhow::anyhow!("invalid end-of-day time"))?,
    };
    Ok(date.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};
    use gatepass_core::enums::{Direction, HostelType};

    use super::*;

    #[test]
    fn parses_direction_case_insensitively() {
        let direction: Direction = parse_flag("out", "direction").expect("direction should parse");
        assert_eq!(direction, Direction::Out);
    }

    #[test]
    fn errors_on_invalid_hostel() {
        let err = parse_flag::<HostelType>("mixed", "hostel").expect_err("should fail");
        assert!(err.to_string().contains("invalid hostel 'mixed'"));
    }

    #[test]
    fn date_expands_to_day_bounds() {
        let start = parse_time_bound("2026-03-14", DayBound::Start, "from").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());

        let end = parse_time_bound("2026-03-14", DayBound::End, "to").unwrap();
        assert_eq!(end.hour(), 23);
        assert_eq!(end.nanosecond(), 999_999_000);
    }

    #[test]
    fn rfc3339_is_normalized_to_utc() {
        let ts = parse_time_bound("2026-03-14T18:30:00+05:30", DayBound::Start, "from").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 3, 14, 13, 0, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_time_bound("yesterday", DayBound::Start, "from").is_err());
    }
}
