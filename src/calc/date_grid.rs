use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub const DAYS_IN_WEEK: usize = 7;
pub const GRID_ROWS: usize = 6;
pub const GRID_CELLS: usize = DAYS_IN_WEEK * GRID_ROWS;

/// One day shown in a month grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from the adjacent months.
    pub in_month: bool,
}

pub type Grid = [GridCell; GRID_CELLS];

/// Builds the 6×7 grid shown for `year`/`month`.
///
/// `first_day_of_week` uses 1 = Monday … 7 = Sunday. The grid always starts
/// strictly before the 1st: when the 1st already falls on the first day of the
/// week a whole leading week of the previous month is shown.
///
/// Returns `None` for an invalid month or first day of week.
pub fn month_grid(year: i32, month: u32, first_day_of_week: u32) -> Option<Grid> {
    if !(1..=7).contains(&first_day_of_week) {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().number_from_monday() as i64 - first_day_of_week as i64;
    let lead = if offset > 0 { offset } else { offset + 7 };
    let start = first.checked_sub_signed(Duration::days(lead))?;

    let mut cells = [GridCell {
        date: start,
        in_month: false,
    }; GRID_CELLS];
    let mut date = start;
    for cell in cells.iter_mut() {
        *cell = GridCell {
            date,
            in_month: date.month() == month,
        };
        date = date.succ_opt().unwrap_or(date);
    }
    Some(cells)
}

/// Rotates Monday-first weekday labels so the header starts at
/// `first_day_of_week`. Anything other than exactly seven labels yields an
/// empty header.
pub fn rotate_weekdays<T: Clone>(monday_first: &[T], first_day_of_week: u32) -> Vec<T> {
    if monday_first.len() != DAYS_IN_WEEK || !(1..=7).contains(&first_day_of_week) {
        return Vec::new();
    }
    (0..DAYS_IN_WEEK)
        .map(|i| monday_first[(i + first_day_of_week as usize - 1) % DAYS_IN_WEEK].clone())
        .collect()
}

/// Carries out-of-range months into the year: month 13 is January of the next
/// year, month 0 is December of the previous one. None when the carried year
/// does not fit in an `i32`.
pub fn normalize_year_month(year: i32, month: i32) -> Option<(i32, u32)> {
    let zero_based = i64::from(month) - 1;
    let year = i32::try_from(i64::from(year) + zero_based.div_euclid(12)).ok()?;
    Some((year, (zero_based.rem_euclid(12) + 1) as u32))
}

/// `(year, month)` key for month-granularity comparisons.
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    let Some((next_year, next_month)) = normalize_year_month(year, month as i32 + 1) else {
        return 0;
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// The date `day` in `year`/`month`, pulled back to the month's last day when
/// the month is shorter.
pub fn clamp_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month);
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_grid_has_42_contiguous_days() {
        for year in [1999, 2024, 2025, 2100] {
            for month in 1..=12 {
                for fdw in 1..=7 {
                    let grid = month_grid(year, month, fdw).unwrap();
                    assert_eq!(grid.len(), 42);
                    for pair in grid.windows(2) {
                        assert_eq!(pair[1].date, pair[0].date.succ_opt().unwrap());
                    }
                    let first = d(year, month, 1);
                    let lead = (first - grid[0].date).num_days();
                    assert!((1..=7).contains(&lead), "lead {lead} for {year}-{month} fdw {fdw}");
                    assert_eq!(grid[0].date.weekday().number_from_monday(), fdw);
                }
            }
        }
    }

    #[test]
    fn test_grid_january_starting_monday() {
        // 2025-01-01 is a Wednesday
        let grid = month_grid(2025, 1, 1).unwrap();
        assert_eq!(grid[0].date, d(2024, 12, 30));
        assert!(!grid[0].in_month);
        assert!(grid[2].in_month);
        assert_eq!(grid[2].date, d(2025, 1, 1));
    }

    #[test]
    fn test_grid_first_on_week_start_shows_full_leading_week() {
        // 2024-09-01 is a Sunday
        let grid = month_grid(2024, 9, 7).unwrap();
        assert_eq!(grid[0].date, d(2024, 8, 25));
        assert_eq!(grid[7].date, d(2024, 9, 1));
        assert_eq!(grid.iter().filter(|c| c.in_month).count(), 30);
    }

    #[test]
    fn test_grid_rejects_bad_input() {
        assert!(month_grid(2025, 13, 1).is_none());
        assert!(month_grid(2025, 1, 0).is_none());
        assert!(month_grid(2025, 1, 8).is_none());
    }

    #[test]
    fn test_rotate_weekdays_sunday_first() {
        let names = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
        let header = rotate_weekdays(&names, 7);
        assert_eq!(header, vec!["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
        assert_eq!(rotate_weekdays(&names, 1), names.to_vec());
    }

    #[test]
    fn test_rotate_weekdays_wrong_length_is_empty() {
        assert!(rotate_weekdays(&["Mo", "Tu"], 1).is_empty());
    }

    #[test]
    fn test_normalize_year_month_overflow() {
        assert_eq!(normalize_year_month(2024, 13), Some((2025, 1)));
        assert_eq!(normalize_year_month(2024, 0), Some((2023, 12)));
        assert_eq!(normalize_year_month(2024, -12), Some((2022, 12)));
        assert_eq!(normalize_year_month(2024, 25), Some((2026, 1)));
        assert_eq!(normalize_year_month(2024, 6), Some((2024, 6)));
    }

    #[test]
    fn test_normalize_year_month_extreme_months() {
        assert_eq!(normalize_year_month(2024, i32::MIN), Some((-178_954_947, 4)));
        assert_eq!(normalize_year_month(2024, i32::MAX), Some((178_958_994, 7)));
        assert_eq!(normalize_year_month(i32::MAX, 13), None);
        assert_eq!(normalize_year_month(i32::MIN, 0), None);
    }

    #[test]
    fn test_days_in_month_values() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_clamp_day_short_month() {
        assert_eq!(clamp_day(2025, 2, 31), Some(d(2025, 2, 28)));
        assert_eq!(clamp_day(2025, 3, 15), Some(d(2025, 3, 15)));
    }

    #[test]
    fn test_month_name_known_and_unknown() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(0), "Unknown");
    }
}
