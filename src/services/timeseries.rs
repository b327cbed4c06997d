//! Gap-filling of the sparse notes-per-day series.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::errors::ClientError;
use crate::models::dashboard::DailyCount;

/// Expand `sparse` into one entry per day for the `days` days ending at `today`.
///
/// Output is ascending with `today` last. Days missing from `sparse` get a
/// count of 0 and entries outside the window are ignored. When `sparse`
/// repeats a date, the first occurrence wins.
pub fn reconcile(
    days: u32,
    sparse: &[DailyCount],
    today: NaiveDate,
) -> Result<Vec<DailyCount>, ClientError> {
    if days == 0 {
        return Err(ClientError::Validation(
            "day range must be at least 1".to_string(),
        ));
    }

    let first = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .ok_or_else(|| ClientError::Validation(format!("day range {days} is out of range")))?;

    let mut by_date: HashMap<NaiveDate, u64> = HashMap::with_capacity(sparse.len());
    for entry in sparse {
        by_date.entry(entry.date).or_insert(entry.count);
    }

    let dense = first
        .iter_days()
        .take(days as usize)
        .map(|date| DailyCount {
            date,
            count: by_date.get(&date).copied().unwrap_or(0),
        })
        .collect();

    Ok(dense)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(today: NaiveDate, back: u64, count: u64) -> DailyCount {
        DailyCount {
            date: today - Days::new(back),
            count,
        }
    }

    fn assert_dense(series: &[DailyCount], days: u32, today: NaiveDate) {
        assert_eq!(series.len(), days as usize);
        assert_eq!(series.last().map(|d| d.date), Some(today));
        assert!(series.windows(2).all(|w| w[0].date.succ_opt() == Some(w[1].date)));
    }

    #[test]
    fn empty_input_is_all_zeros() {
        let today = day(2024, 3, 10);
        for days in [1, 7, 30, 90, 366] {
            let series = reconcile(days, &[], today).unwrap();
            assert_dense(&series, days, today);
            assert!(series.iter().all(|d| d.count == 0));
        }
    }

    #[test]
    fn single_day_range_is_today() {
        let today = day(2024, 3, 10);
        let series = reconcile(1, &[at(today, 0, 4)], today).unwrap();
        assert_eq!(series, vec![DailyCount { date: today, count: 4 }]);
    }

    #[test]
    fn known_counts_are_kept_and_gaps_zero_filled() {
        let today = day(2024, 3, 10);
        let series = reconcile(7, &[at(today, 2, 5)], today).unwrap();
        assert_dense(&series, 7, today);
        assert_eq!(series[4], at(today, 2, 5));
        assert_eq!(series.iter().filter(|d| d.count == 0).count(), 6);
    }

    #[test]
    fn input_order_does_not_matter() {
        let today = day(2024, 1, 2);
        let sparse = vec![at(today, 0, 1), at(today, 5, 3), at(today, 2, 2)];
        let mut reversed = sparse.clone();
        reversed.reverse();

        let a = reconcile(7, &sparse, today).unwrap();
        let b = reconcile(7, &reversed, today).unwrap();
        assert_eq!(a, b);
        assert_dense(&a, 7, today);
        let counts: Vec<u64> = a.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![0, 3, 0, 0, 2, 0, 1]);
    }

    #[test]
    fn crosses_month_and_leap_day() {
        let today = day(2024, 3, 1);
        let series = reconcile(3, &[DailyCount { date: day(2024, 2, 29), count: 9 }], today).unwrap();
        let dates: Vec<NaiveDate> = series.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![day(2024, 2, 28), day(2024, 2, 29), day(2024, 3, 1)]);
        assert_eq!(series[1].count, 9);
    }

    #[test]
    fn entries_outside_window_are_dropped() {
        let today = day(2024, 3, 10);
        let sparse = vec![at(today, 7, 100), DailyCount { date: day(2024, 3, 11), count: 50 }];
        let series = reconcile(7, &sparse, today).unwrap();
        assert!(series.iter().all(|d| d.count == 0));
    }

    // The backend should never repeat a date; if it does, the earlier row is used.
    #[test]
    fn duplicate_dates_first_match_wins() {
        let today = day(2024, 3, 10);
        let sparse = vec![at(today, 1, 2), at(today, 1, 8)];
        let series = reconcile(3, &sparse, today).unwrap();
        assert_eq!(series[1], at(today, 1, 2));
        assert_dense(&series, 3, today);
    }

    #[test]
    fn zero_days_rejected() {
        let err = reconcile(0, &[], day(2024, 3, 10)).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
