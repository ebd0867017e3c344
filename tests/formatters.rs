#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;
    use taskboard::libs::formatter::{format_date_in, format_relative_time_at};
    use taskboard::libs::timestamp::{convert_timestamp, Timestamp};

    const MINUTE: i64 = 60_000;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 15, 45, 0).unwrap()
    }

    #[test]
    fn test_format_date_afternoon() {
        assert_eq!(format_date_in(1_705_333_500_000, &Utc), "Jan 15, 2024, 3:45 PM");
    }

    #[rstest]
    #[case(2024, 3, 5, 9, 5, "Mar 5, 2024, 9:05 AM")]
    #[case(2023, 12, 31, 0, 0, "Dec 31, 2023, 12:00 AM")]
    #[case(2024, 7, 1, 12, 30, "Jul 1, 2024, 12:30 PM")]
    fn test_format_date_clock(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] expected: &str,
    ) {
        let timestamp = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_date_in(timestamp, &Utc), expected);
    }

    #[rstest]
    #[case(0, "just now")]
    #[case(-30_000, "just now")]
    #[case(-59_999, "just now")]
    #[case(2 * MINUTE, "just now")]
    #[case(-MINUTE, "1 minute ago")]
    #[case(-5 * MINUTE, "5 minutes ago")]
    #[case(-59 * MINUTE, "59 minutes ago")]
    #[case(-HOUR, "1 hour ago")]
    #[case(-23 * HOUR, "23 hours ago")]
    #[case(-DAY, "1 day ago")]
    #[case(-6 * DAY, "6 days ago")]
    #[case(-7 * DAY, "Jan 8")]
    fn test_format_relative_time(#[case] offset: i64, #[case] expected: &str) {
        let timestamp = now().timestamp_millis() + offset;
        assert_eq!(format_relative_time_at(timestamp, &now()), expected);
    }

    #[test]
    fn test_format_relative_time_previous_year() {
        let timestamp = Utc.with_ymd_and_hms(2023, 12, 20, 10, 0, 0).unwrap().timestamp_millis();
        assert_eq!(format_relative_time_at(timestamp, &now()), "Dec 20, 2023");
    }

    #[test]
    fn test_timestamp_to_millis() {
        assert_eq!(Timestamp::new(1_705_333_500, 0).to_millis(), 1_705_333_500_000);
        assert_eq!(Timestamp::new(1_705_333_500, 999_999).to_millis(), 1_705_333_500_000);
        assert_eq!(Timestamp::new(1_705_333_500, 1_500_000).to_millis(), 1_705_333_500_001);
    }

    #[test]
    fn test_timestamp_from_millis_before_epoch() {
        let timestamp = Timestamp::from_millis(-1_500);
        assert_eq!(timestamp, Timestamp::new(-2, 500_000_000));
        assert_eq!(timestamp.to_millis(), -1_500);
    }

    #[test]
    fn test_timestamp_rfc3339() {
        let timestamp = Timestamp::parse_rfc3339("2024-01-15T15:45:00.250Z").unwrap();
        assert_eq!(timestamp, Timestamp::new(1_705_333_500, 250_000_000));
        assert_eq!(timestamp.to_rfc3339(), "2024-01-15T15:45:00.250000000Z");
        assert!(Timestamp::parse_rfc3339("yesterday").is_none());
    }

    #[test]
    fn test_convert_timestamp_missing_is_now() {
        let before = Utc::now().timestamp_millis();
        let converted = convert_timestamp(None);
        let after = Utc::now().timestamp_millis();

        assert!(before <= converted && converted <= after);
        assert_eq!(convert_timestamp(Some(Timestamp::new(10, 0))), 10_000);
    }
}
