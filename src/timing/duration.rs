use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::timing::parse::parse_time_of_day;

/// Placeholder shown when a duration cannot be computed.
pub const UNKNOWN_LABEL: &str = "—";

/// Elapsed wall-clock time between check-in and check-out (or now), broken
/// into whole hours plus remainder minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Elapsed {
    pub hours: i64,
    pub minutes: i64,
    pub total_minutes: i64,
}

impl Elapsed {
    pub fn label(&self) -> String {
        format!("{}h {}m", self.hours, self.minutes)
    }
}

/// Elapsed time between two instants, or `None` for a non-positive span.
pub fn elapsed_between(start: NaiveDateTime, end: NaiveDateTime) -> Option<Elapsed> {
    let diff = end.signed_duration_since(start);
    if diff.num_milliseconds() <= 0 {
        return None;
    }

    let total_minutes = diff.num_minutes();
    Some(Elapsed {
        hours: total_minutes / 60,
        minutes: total_minutes % 60,
        total_minutes,
    })
}

/// Duration of one device test from its raw time strings.
///
/// `now` supplies both the calendar day the time-of-day strings anchor to and
/// the live endpoint for a test that has not checked out yet. Keeping the
/// clock a parameter keeps this a pure function.
///
/// Both endpoints anchor to the same day, so a test that crosses midnight
/// comes out non-positive and reads as unknown.
pub fn record_duration(
    time_in: &str,
    time_out: Option<&str>,
    now: DateTime<Utc>,
) -> Option<Elapsed> {
    let today = now.date_naive();
    let start = today.and_time(parse_time_of_day(time_in)?);
    let end = match time_out {
        Some(raw) => today.and_time(parse_time_of_day(raw)?),
        None => now.naive_utc(),
    };

    elapsed_between(start, end)
}

/// Render a duration for display, falling back to the unknown placeholder.
pub fn duration_label(elapsed: Option<&Elapsed>) -> String {
    match elapsed {
        Some(elapsed) => elapsed.label(),
        None => UNKNOWN_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn computes_hours_and_remainder_minutes() {
        let elapsed = record_duration("8:00 AM", Some("3:30 PM"), noon_utc()).unwrap();
        assert_eq!(elapsed.hours, 7);
        assert_eq!(elapsed.minutes, 30);
        assert_eq!(elapsed.total_minutes, 450);
        assert_eq!(elapsed.label(), "7h 30m");
    }

    #[test]
    fn live_duration_uses_injected_now() {
        let elapsed = record_duration("8:00 AM", None, noon_utc()).unwrap();
        assert_eq!(elapsed.total_minutes, 240);
        assert_eq!(elapsed.label(), "4h 0m");
    }

    #[test]
    fn unknown_when_end_precedes_or_equals_start() {
        assert_eq!(record_duration("3:00 PM", Some("8:00 AM"), noon_utc()), None);
        assert_eq!(record_duration("8:00 AM", Some("8:00 AM"), noon_utc()), None);
    }

    #[test]
    fn unknown_when_either_endpoint_is_unparsable() {
        assert_eq!(record_duration("junk", Some("3:00 PM"), noon_utc()), None);
        assert_eq!(record_duration("8:00 AM", Some("junk"), noon_utc()), None);
        assert_eq!(record_duration("", None, noon_utc()), None);
    }

    #[test]
    fn same_day_durations_are_additive() {
        let now = noon_utc();
        let ab = record_duration("8:00 AM", Some("11:15 AM"), now).unwrap();
        let bc = record_duration("11:15 AM", Some("3:00 PM"), now).unwrap();
        let ac = record_duration("8:00 AM", Some("3:00 PM"), now).unwrap();
        assert_eq!(ab.total_minutes + bc.total_minutes, ac.total_minutes);
    }

    #[test]
    fn label_falls_back_to_placeholder() {
        assert_eq!(duration_label(None), UNKNOWN_LABEL);
        let elapsed = record_duration("8:00 AM", Some("3:00 PM"), noon_utc());
        assert_eq!(duration_label(elapsed.as_ref()), "7h 0m");
    }
}
