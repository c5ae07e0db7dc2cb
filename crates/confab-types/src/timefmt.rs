use chrono::{DateTime, FixedOffset};

/// Format an epoch-seconds start time as a section label, e.g. "10:00 AM".
///
/// The pattern is fixed 12-hour `h:mm AM/PM` regardless of the host locale;
/// chrono does not localize `%p`, which is exactly the contract callers rely
/// on for stable labels across machines.
pub fn short_time_label(epoch_secs: i64, tz: &FixedOffset) -> String {
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(utc) => utc.with_timezone(tz).format("%-I:%M %p").to_string(),
        // Out of chrono's representable range; bad data, not worth a panic.
        None => "--:--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn morning_label() {
        // 2015-06-20 10:00:00 UTC
        assert_eq!(short_time_label(1_434_794_400, &utc()), "10:00 AM");
    }

    #[test]
    fn afternoon_label_has_no_zero_padding() {
        // 2015-06-20 14:05:00 UTC
        assert_eq!(short_time_label(1_434_809_100, &utc()), "2:05 PM");
    }

    #[test]
    fn midnight_and_noon() {
        // 2015-06-20 00:00:00 UTC and 12:00:00 UTC
        assert_eq!(short_time_label(1_434_758_400, &utc()), "12:00 AM");
        assert_eq!(short_time_label(1_434_801_600, &utc()), "12:00 PM");
    }

    #[test]
    fn offset_shifts_the_label() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        // 10:00 UTC renders as 12:00 PM at UTC+2.
        assert_eq!(short_time_label(1_434_794_400, &plus_two), "12:00 PM");
    }

    #[test]
    fn unrepresentable_timestamp_degrades_quietly() {
        assert_eq!(short_time_label(i64::MAX, &utc()), "--:--");
    }
}
