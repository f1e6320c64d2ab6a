//! Text formatting for odds, kick-off times and scores

use chrono::{DateTime, Datelike, Local, TimeZone, Utc, Weekday};

/// Decimal odds with two decimals, e.g. `2.4` → `"2.40"`.
pub fn format_price(price: f64) -> String {
    format!("{price:.2}")
}

/// French abbreviated weekday as used in kick-off times.
pub fn french_weekday_short(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lun.",
        Weekday::Tue => "mar.",
        Weekday::Wed => "mer.",
        Weekday::Thu => "jeu.",
        Weekday::Fri => "ven.",
        Weekday::Sat => "sam.",
        Weekday::Sun => "dim.",
    }
}

/// Kick-off as short weekday plus `HH:MM` in the given time zone, e.g. `"mar. 20:00"`.
pub fn format_kickoff_in<Tz: TimeZone>(commence_time: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local = commence_time.with_timezone(tz);
    format!(
        "{} {}",
        french_weekday_short(local.weekday()),
        local.format("%H:%M")
    )
}

/// Kick-off in the machine's local time zone.
pub fn format_kickoff(commence_time: &DateTime<Utc>) -> String {
    format_kickoff_in(commence_time, &Local)
}

/// `"2-1"` when both scores are known.
pub fn format_score(home: Option<&str>, away: Option<&str>) -> Option<String> {
    Some(format!("{}-{}", home?, away?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(2.4), "2.40");
        assert_eq!(format_price(1.0), "1.00");
        assert_eq!(format_price(3.456), "3.46");
        assert_eq!(format_price(12.0), "12.00");
    }

    #[test]
    fn test_format_kickoff_in_paris_time() {
        let kickoff = Utc.with_ymd_and_hms(2024, 3, 12, 20, 0, 0).unwrap();
        let paris_winter = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(format_kickoff_in(&kickoff, &paris_winter), "mar. 21:00");
        assert_eq!(format_kickoff_in(&kickoff, &Utc), "mar. 20:00");
    }

    #[test]
    fn test_format_kickoff_crosses_midnight() {
        let kickoff = Utc.with_ymd_and_hms(2024, 3, 16, 23, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(7200).unwrap();
        assert_eq!(format_kickoff_in(&kickoff, &plus_two), "dim. 01:30");
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(Some("2"), Some("1")), Some("2-1".to_string()));
        assert_eq!(format_score(Some("2"), None), None);
    }
}
