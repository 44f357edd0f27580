//! Ramadan date table
//!
//! The Islamic calendar is lunar, so these ranges are approximate and only
//! cover the listed years. Any other year counts as "not Ramadan".

use chrono::{Datelike, NaiveDate};

/// `(year, (start_month, start_day), (end_month, end_day))`.
/// The start day is included, the end day is not.
const RAMADAN_DATES: [(i32, (u32, u32), (u32, u32)); 4] = [
    (2023, (3, 22), (4, 21)),
    (2024, (3, 10), (4, 9)),
    (2025, (3, 1), (3, 30)),
    (2026, (3, 20), (4, 19)),
];

/// Whether `date` falls inside the listed Ramadan range for its year
pub fn is_ramadan(date: NaiveDate) -> bool {
    let Some(&(year, start, end)) = RAMADAN_DATES.iter().find(|(y, _, _)| *y == date.year())
    else {
        return false;
    };

    match (
        NaiveDate::from_ymd_opt(year, start.0, start.1),
        NaiveDate::from_ymd_opt(year, end.0, end.1),
    ) {
        (Some(start), Some(end)) => date >= start && date < end,
        _ => false,
    }
}

/// Ramadan flag for the local calendar date
pub fn is_ramadan_today() -> bool {
    is_ramadan(chrono::Local::now().date_naive())
}
