use chrono::NaiveDate;

use crate::error::TemporalError;

/// Whole years between `reference` and `today`, as floor(day count / 365).
/// Not calendar-aware: leap years are ignored on purpose, because the
/// attrition model was trained on ages and tenures derived this exact way.
/// Goes negative when `reference` lies after `today`; callers that care
/// validate the date first.
pub fn years_between(reference: NaiveDate, today: NaiveDate) -> i64 {
    (today - reference).num_days().div_euclid(365)
}

/// Rejects dates that lie after `today`. Used at record creation and on
/// survey submission, so the year derivations never see future anchors.
pub fn check_not_future(
    field: &'static str,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<(), TemporalError> {
    if date > today {
        Err(TemporalError::FutureDate { field, date, today })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_zero_years() {
        let today = day(2026, 8, 29);
        assert_eq!(years_between(today, today), 0);
    }

    #[test]
    fn floors_partial_years() {
        let today = day(2026, 8, 29);
        assert_eq!(years_between(day(2025, 8, 30), today), 0);
        assert_eq!(years_between(day(2025, 8, 29), today), 1);
        assert_eq!(years_between(day(2016, 9, 1), today), 9);
    }

    #[test]
    fn ignores_leap_days() {
        // 16 calendar years spanning 4 leap days is 5844 days, and
        // 5844 / 365 floors to 16, matching the training derivation.
        let today = day(2026, 3, 1);
        assert_eq!(years_between(day(2010, 3, 1), today), 16);
    }

    #[test]
    fn non_increasing_as_reference_advances() {
        let today = day(2026, 8, 29);
        let mut previous = i64::MAX;
        let mut reference = day(1990, 1, 1);
        while reference <= today {
            let years = years_between(reference, today);
            assert!(years <= previous);
            previous = years;
            reference += Duration::days(97);
        }
    }

    #[test]
    fn future_reference_goes_negative_but_is_flagged() {
        let today = day(2026, 8, 29);
        let future = day(2027, 9, 1);
        assert!(years_between(future, today) < 0);
        assert!(check_not_future("BirthDate", future, today).is_err());
        assert!(check_not_future("BirthDate", today, today).is_ok());
    }
}
