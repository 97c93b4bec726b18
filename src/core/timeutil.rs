use crate::domain::model::Frequency;
use crate::utils::error::{EngineError, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::Regex;
use std::sync::OnceLock;

/// Fallback window applied when a stored time string fails to parse; batch
/// generation keeps going instead of failing on one bad record.
pub const DEFAULT_START_TIME: &str = "9:00 AM";
pub const DEFAULT_END_TIME: &str = "12:00 PM";
pub const DEFAULT_DURATION_HOURS: f64 = 3.0;
pub const DEFAULT_HORIZON_WEEKS: u32 = 8;

fn twelve_hour_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*([AaPp])[Mm]\s*$").unwrap())
}

fn twenty_four_hour_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*$").unwrap())
}

/// Parses `"H:MM AM/PM"` (case-insensitive) or bare 24-hour `"HH:MM"` into
/// minutes since midnight. Anything else is `InvalidTimeFormat`; callers
/// decide whether to fall back to the defaults above.
pub fn parse_clock_time(s: &str) -> Result<u32> {
    if let Some(caps) = twelve_hour_re().captures(s) {
        let hour: u32 = caps[1].parse().map_err(|_| bad_time(s))?;
        let minute: u32 = caps[2].parse().map_err(|_| bad_time(s))?;
        if hour == 0 || hour > 12 || minute > 59 {
            return Err(bad_time(s));
        }
        let pm = caps[3].eq_ignore_ascii_case("p");
        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        return Ok(hour24 * 60 + minute);
    }

    if let Some(caps) = twenty_four_hour_re().captures(s) {
        let hour: u32 = caps[1].parse().map_err(|_| bad_time(s))?;
        let minute: u32 = caps[2].parse().map_err(|_| bad_time(s))?;
        if hour > 23 || minute > 59 {
            return Err(bad_time(s));
        }
        return Ok(hour * 60 + minute);
    }

    Err(bad_time(s))
}

fn bad_time(s: &str) -> EngineError {
    EngineError::InvalidTimeFormat {
        value: s.to_string(),
    }
}

/// 12-hour form used for job storage, e.g. `"9:00 AM"` / `"12:30 PM"`.
pub fn format_clock_time(minutes_since_midnight: u32) -> String {
    let total = minutes_since_midnight % (24 * 60);
    let hour24 = total / 60;
    let minute = total % 60;
    let (hour, suffix) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };
    format!("{}:{:02} {}", hour, minute, suffix)
}

/// `(end - start) / 60`. A non-positive result is reported as-is; the
/// generation path substitutes `DEFAULT_DURATION_HOURS` in that case.
pub fn duration_hours(start_min: u32, end_min: u32) -> f64 {
    (end_min as f64 - start_min as f64) / 60.0
}

/// Weekday names as stored on client records, full or 3-letter,
/// case-insensitive.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    s.trim().parse::<Weekday>().ok()
}

/// Smallest date >= `on_or_after` falling on `weekday`. Returns
/// `on_or_after` itself on a same-day match; sync-mode cursor math
/// depends on that.
pub fn next_occurrence_of_weekday(weekday: Weekday, on_or_after: NaiveDate) -> NaiveDate {
    let current = on_or_after.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let ahead = (target + 7 - current) % 7;
    on_or_after + Days::new(ahead as u64)
}

/// Period advancement for generation cursors. Monthly is a fixed 28 days
/// rather than a calendar month; the period length must stay constant.
pub fn advance_by_frequency(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    let days = match frequency {
        Frequency::Weekly => 7,
        Frequency::BiWeekly => 14,
        Frequency::Monthly => 28,
    };
    date + Days::new(days)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_clock_time_twelve_hour() {
        assert_eq!(parse_clock_time("9:00 AM").unwrap(), 9 * 60);
        assert_eq!(parse_clock_time("12:00 PM").unwrap(), 12 * 60);
        assert_eq!(parse_clock_time("12:30 am").unwrap(), 30);
        assert_eq!(parse_clock_time("1:15pm").unwrap(), 13 * 60 + 15);
        assert_eq!(parse_clock_time(" 11:59 PM ").unwrap(), 23 * 60 + 59);
    }

    #[test]
    fn test_parse_clock_time_twenty_four_hour() {
        assert_eq!(parse_clock_time("09:00").unwrap(), 9 * 60);
        assert_eq!(parse_clock_time("0:05").unwrap(), 5);
        assert_eq!(parse_clock_time("23:45").unwrap(), 23 * 60 + 45);
    }

    #[test]
    fn test_parse_clock_time_rejects_garbage() {
        for bad in ["", "noon", "25:00", "13:00 PM", "9:99 AM", "0:00 AM"] {
            assert!(parse_clock_time(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_format_clock_time() {
        assert_eq!(format_clock_time(9 * 60), "9:00 AM");
        assert_eq!(format_clock_time(0), "12:00 AM");
        assert_eq!(format_clock_time(12 * 60), "12:00 PM");
        assert_eq!(format_clock_time(12 * 60 + 30), "12:30 PM");
        assert_eq!(format_clock_time(23 * 60 + 5), "11:05 PM");
    }

    #[test]
    fn test_duration_hours_reports_non_positive() {
        assert_eq!(duration_hours(9 * 60, 12 * 60), 3.0);
        assert_eq!(duration_hours(9 * 60, 10 * 60 + 30), 1.5);
        assert_eq!(duration_hours(12 * 60, 9 * 60), -3.0);
        assert_eq!(duration_hours(9 * 60, 9 * 60), 0.0);
    }

    #[test]
    fn test_next_occurrence_same_day_is_identity() {
        // 2025-03-10 is a Monday
        let monday = date(2025, 3, 10);
        assert_eq!(next_occurrence_of_weekday(Weekday::Mon, monday), monday);
    }

    #[test]
    fn test_next_occurrence_within_following_week() {
        let monday = date(2025, 3, 10);
        assert_eq!(
            next_occurrence_of_weekday(Weekday::Tue, monday),
            date(2025, 3, 11)
        );
        assert_eq!(
            next_occurrence_of_weekday(Weekday::Fri, monday),
            date(2025, 3, 14)
        );
        // Sunday wraps to the end of the same week
        assert_eq!(
            next_occurrence_of_weekday(Weekday::Sun, monday),
            date(2025, 3, 16)
        );
    }

    #[test]
    fn test_next_occurrence_all_weekdays_in_range() {
        let reference = date(2025, 6, 4);
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            let found = next_occurrence_of_weekday(weekday, reference);
            assert!(found >= reference && found <= reference + Days::new(6));
            assert_eq!(found.weekday(), weekday);
        }
    }

    #[test]
    fn test_advance_by_frequency() {
        let start = date(2025, 1, 6);
        assert_eq!(advance_by_frequency(start, Frequency::Weekly), date(2025, 1, 13));
        assert_eq!(advance_by_frequency(start, Frequency::BiWeekly), date(2025, 1, 20));
        assert_eq!(advance_by_frequency(start, Frequency::Monthly), date(2025, 2, 3));
    }

    #[test]
    fn test_parse_weekday() {
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("tue"), Some(Weekday::Tue));
        assert_eq!(parse_weekday(" friday "), Some(Weekday::Fri));
        assert_eq!(parse_weekday("someday"), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(49.999), 50.0);
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(-0.005), -0.01);
    }
}
