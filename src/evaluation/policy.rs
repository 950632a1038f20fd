//! Pass/fail policy for completed stress tests.
//!
//! The policy is fixed: a test passes only once it has run long enough to be
//! meaningful (six-hour floor) and the device still holds real charge
//! (strictly more than 30%). A device drained to near-zero fails regardless
//! of how long it ran.

use chrono::{DateTime, Utc};

use crate::db::models::{DeviceRecord, Verdict};
use crate::timing::{record_duration, Elapsed};

pub const MIN_TEST_HOURS: i64 = 6;
pub const MIN_AFTER_BATTERY: i64 = 30;

/// Outcome of evaluating one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Verdict(Verdict),
    /// No verdict is meaningful: the test is still running, or its duration
    /// is unknown. Not an error.
    NotApplicable,
}

impl Evaluation {
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Evaluation::Verdict(verdict) => Some(*verdict),
            Evaluation::NotApplicable => None,
        }
    }
}

/// Classify a known duration and ending battery reading.
pub fn classify(elapsed: &Elapsed, after_battery: i64) -> Verdict {
    if elapsed.hours >= MIN_TEST_HOURS && after_battery > MIN_AFTER_BATTERY {
        Verdict::Pass
    } else {
        Verdict::Fail
    }
}

/// Evaluate a record against the policy. Pure: depends only on the record's
/// fields and the injected `now`, so repeated calls with the same inputs
/// always yield the same outcome.
pub fn evaluate(record: &DeviceRecord, now: DateTime<Utc>) -> Evaluation {
    let Some(time_out) = record.time_out() else {
        return Evaluation::NotApplicable;
    };

    match record_duration(&record.time_in, Some(time_out), now) {
        Some(elapsed) => Evaluation::Verdict(classify(&elapsed, record.after_battery)),
        None => Evaluation::NotApplicable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon_utc() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    fn completed(time_in: &str, time_out: &str, after_battery: i64) -> DeviceRecord {
        let now = noon_utc();
        DeviceRecord {
            id: "dev-1".into(),
            imei: "356938035643809".into(),
            sn: "SN-0042".into(),
            model: "Pixel 8".into(),
            os_version: "14".into(),
            before_battery: 100,
            after_battery,
            time_in: time_in.into(),
            time_out: Some(time_out.into()),
            status: crate::db::models::DeviceStatus::Testing,
            condition: None,
            remarks: String::new(),
            notes: String::new(),
            assigned: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn six_hours_and_healthy_battery_passes() {
        // Exactly 6h00m with battery just above the floor.
        let record = completed("8:00 AM", "2:00 PM", 31);
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::Verdict(Verdict::Pass));
    }

    #[test]
    fn one_minute_short_fails_despite_full_battery() {
        let record = completed("8:00 AM", "1:59 PM", 100);
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::Verdict(Verdict::Fail));
    }

    #[test]
    fn battery_floor_is_strict() {
        // 6h01m but battery exactly 30 is not "> 30".
        let record = completed("8:00 AM", "2:01 PM", 30);
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::Verdict(Verdict::Fail));
    }

    #[test]
    fn running_test_has_no_verdict() {
        let mut record = completed("8:00 AM", "3:00 PM", 100);
        record.time_out = None;
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::NotApplicable);
        record.time_out = Some("  ".into());
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::NotApplicable);
    }

    #[test]
    fn unknown_duration_has_no_verdict() {
        let record = completed("bad time", "3:00 PM", 100);
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::NotApplicable);

        // Overnight test anchors both endpoints to the same day and comes
        // out non-positive.
        let record = completed("8:00 PM", "6:00 AM", 80);
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::NotApplicable);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let record = completed("8:00 AM", "3:00 PM", 40);
        let now = noon_utc();
        let first = evaluate(&record, now);
        for _ in 0..10 {
            assert_eq!(evaluate(&record, now), first);
        }
        assert_eq!(first, Evaluation::Verdict(Verdict::Pass));
    }

    #[test]
    fn documented_scenarios() {
        // 8:00 AM -> 3:00 PM, battery 100 -> 40: 7h 0m, Pass.
        let record = completed("8:00 AM", "3:00 PM", 40);
        let elapsed =
            crate::timing::record_duration(&record.time_in, record.time_out(), noon_utc()).unwrap();
        assert_eq!(elapsed.label(), "7h 0m");
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::Verdict(Verdict::Pass));

        // 8:00 AM -> 2:00 PM, battery 100 -> 20: 6h 0m, Fail on battery.
        let record = completed("8:00 AM", "2:00 PM", 20);
        let elapsed =
            crate::timing::record_duration(&record.time_in, record.time_out(), noon_utc()).unwrap();
        assert_eq!(elapsed.label(), "6h 0m");
        assert_eq!(evaluate(&record, noon_utc()), Evaluation::Verdict(Verdict::Fail));
    }
}
