//! Small shared helpers.

use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `earlier` to `later`, rounded toward negative infinity.
///
/// A span of 29 days and 23 hours is 29; a span of minus one hour is -1.
pub fn whole_days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_whole_days_exact() {
        assert_eq!(whole_days_between(base() + Duration::days(30), base()), 30);
        assert_eq!(whole_days_between(base(), base()), 0);
    }

    #[test]
    fn test_whole_days_truncates_partial_day() {
        let later = base() + Duration::days(29) + Duration::hours(23);
        assert_eq!(whole_days_between(later, base()), 29);
    }

    #[test]
    fn test_whole_days_negative_floors() {
        assert_eq!(whole_days_between(base() - Duration::hours(1), base()), -1);
        assert_eq!(whole_days_between(base() - Duration::days(2), base()), -2);
        let later = base() - Duration::days(2) - Duration::seconds(1);
        assert_eq!(whole_days_between(later, base()), -3);
    }
}
