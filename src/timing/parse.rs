use chrono::NaiveTime;

/// Parse an operator-entered 12-hour clock string like `"8:00 PM"` into a
/// time of day.
///
/// The input must be exactly two whitespace-separated tokens: an `H:MM`
/// clock token (hour 0-12, minute 0-59) and an `AM`/`PM` modifier. Anything
/// else is unparsable and yields `None`; malformed operator input must never
/// surface as an error.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let mut tokens = raw.split_whitespace();
    let clock = tokens.next()?;
    let modifier = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    let (hour_raw, minute_raw) = clock.split_once(':')?;
    let hour: u32 = hour_raw.parse().ok()?;
    let minute: u32 = minute_raw.parse().ok()?;
    if hour > 12 || minute > 59 {
        return None;
    }

    // 12 AM is midnight; 1-11 PM shift into the afternoon.
    let hour_of_day = match modifier {
        "AM" if hour == 12 => 0,
        "AM" => hour,
        "PM" if hour < 12 => hour + 12,
        "PM" => hour,
        _ => return None,
    };

    NaiveTime::from_hms_opt(hour_of_day, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn parses_midnight_and_noon() {
        assert_eq!(parse_time_of_day("12:00 AM"), Some(hm(0, 0)));
        assert_eq!(parse_time_of_day("12:00 PM"), Some(hm(12, 0)));
    }

    #[test]
    fn shifts_afternoon_hours() {
        assert_eq!(parse_time_of_day("1:30 PM"), Some(hm(13, 30)));
        assert_eq!(parse_time_of_day("11:59 PM"), Some(hm(23, 59)));
        assert_eq!(parse_time_of_day("8:00 AM"), Some(hm(8, 0)));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_time_of_day("  9:15 AM "), Some(hm(9, 15)));
    }

    #[test]
    fn rejects_missing_tokens() {
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("8:00"), None);
        assert_eq!(parse_time_of_day("PM"), None);
        assert_eq!(parse_time_of_day("8:00 PM extra"), None);
    }

    #[test]
    fn rejects_malformed_clock_tokens() {
        assert_eq!(parse_time_of_day("800 PM"), None);
        assert_eq!(parse_time_of_day("8: PM"), None);
        assert_eq!(parse_time_of_day(":30 PM"), None);
        assert_eq!(parse_time_of_day("8:00 XM"), None);
        assert_eq!(parse_time_of_day("8:00 pm"), None);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(parse_time_of_day("13:00 PM"), None);
        assert_eq!(parse_time_of_day("8:60 AM"), None);
    }
}
