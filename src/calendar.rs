//! Calendar month arithmetic for labelling projection dates

use chrono::{Months, NaiveDate};

/// Add a whole number of months to a date
///
/// The day of month is clamped to the last valid day of the target month,
/// so Jan 31 + 1 month is Feb 28 (or 29), never Mar 3. Negative offsets roll
/// the year back. Results beyond chrono's representable range saturate to
/// `NaiveDate::MIN` / `NaiveDate::MAX`.
pub fn add_months(source: NaiveDate, months: i32) -> NaiveDate {
    let offset = Months::new(months.unsigned_abs());
    if months < 0 {
        source.checked_sub_months(offset).unwrap_or(NaiveDate::MIN)
    } else {
        source.checked_add_months(offset).unwrap_or(NaiveDate::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_of_month_clamp() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2023, 1, 31), 1), date(2023, 2, 28));
        assert_eq!(add_months(date(2023, 3, 31), 1), date(2023, 4, 30));
        assert_eq!(add_months(date(1900, 1, 31), 1), date(1900, 2, 28));
        assert_eq!(add_months(date(2000, 1, 31), 1), date(2000, 2, 29));
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(add_months(date(2024, 11, 15), 3), date(2025, 2, 15));
        assert_eq!(add_months(date(2024, 12, 1), 1), date(2025, 1, 1));
        assert_eq!(add_months(date(2024, 1, 15), 24), date(2026, 1, 15));
    }

    #[test]
    fn test_negative_months() {
        assert_eq!(add_months(date(2024, 1, 15), -1), date(2023, 12, 15));
        assert_eq!(add_months(date(2024, 3, 31), -1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 2, 10), -14), date(2022, 12, 10));
        assert_eq!(add_months(date(2024, 12, 10), -12), date(2023, 12, 10));
    }

    #[test]
    fn test_saturates_at_range_limits() {
        assert_eq!(add_months(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_months(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(add_months(date(2024, 1, 1), i32::MAX), NaiveDate::MAX);
        assert_eq!(add_months(date(2024, 1, 1), i32::MIN), NaiveDate::MIN);
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1i32..1_000_000).prop_map(|days| {
            NaiveDate::from_num_days_from_ce_opt(days).unwrap()
        })
    }

    proptest! {
        #[test]
        fn prop_zero_months_is_identity(d in any_date()) {
            prop_assert_eq!(add_months(d, 0), d);
        }

        #[test]
        fn prop_result_keeps_day_when_it_fits(d in any_date(), months in -1200i32..1200) {
            let result = add_months(d, months);
            prop_assert!(result.day() <= d.day());
            if d.day() <= 28 {
                prop_assert_eq!(result.day(), d.day());
            } else if result.day() < d.day() {
                // clamped onto the last day of the target month
                let next = result.succ_opt().unwrap();
                prop_assert_ne!(next.month(), result.month());
            }
        }

        #[test]
        fn prop_month_offset_is_exact(d in any_date(), months in -1200i32..1200) {
            let result = add_months(d, months);
            let before = i64::from(d.year()) * 12 + i64::from(d.month0());
            let after = i64::from(result.year()) * 12 + i64::from(result.month0());
            prop_assert_eq!(after - before, i64::from(months));
        }
    }
}
