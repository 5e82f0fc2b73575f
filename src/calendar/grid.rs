use chrono::{Datelike, NaiveDate};

use super::date_key::{DateKey, format_date_key};

/// One square of the month grid. `month` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub outside: bool,
}

impl DayCell {
    pub fn date_key(&self) -> DateKey {
        format_date_key(self.year, self.month, self.day)
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthInfo {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Weekday of the 1st, Monday = 1 ... Sunday = 7.
    pub start_weekday: u32,
}

/// Moves `delta` months away from (year, month0), rolling the year over.
/// Also normalizes a month index outside 0..=11.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year as i64 * 12 + month as i64 + delta as i64;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32;
    (year.clamp(i32::MIN as i64, i32::MAX as i64) as i32, month)
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (year, month) = shift_month(year, month, 0);
    let (next_year, next_month) = shift_month(year, month, 1);
    first_of_month(next_year, next_month)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

pub fn month_info(year: i32, month: u32) -> Option<MonthInfo> {
    let (year, month) = shift_month(year, month, 0);
    let first_day = first_of_month(year, month)?;

    Some(MonthInfo {
        year,
        month,
        days_in_month: days_in_month(year, month),
        start_weekday: first_day.weekday().number_from_monday(),
    })
}

/// Builds the Monday-first grid for a month: trailing days of the previous
/// month, every day of the month, then leading days of the next month until
/// the last row is full. The result length is always 28, 35 or 42.
///
/// Years chrono cannot represent produce an empty grid.
pub fn generate_calendar_days(year: i32, month: u32) -> Vec<DayCell> {
    let Some(info) = month_info(year, month) else {
        return Vec::new();
    };

    let mut days = Vec::with_capacity(42);

    let (prev_year, prev_month) = shift_month(info.year, info.month, -1);
    let days_in_prev_month = days_in_month(prev_year, prev_month);
    let leading = info.start_weekday - 1;

    for i in (1..=leading).rev() {
        days.push(DayCell {
            year: prev_year,
            month: prev_month,
            day: days_in_prev_month - i + 1,
            outside: true,
        });
    }

    for day in 1..=info.days_in_month {
        days.push(DayCell {
            year: info.year,
            month: info.month,
            day,
            outside: false,
        });
    }

    let remainder = days.len() % 7;
    if remainder != 0 {
        let (next_year, next_month) = shift_month(info.year, info.month, 1);
        for day in 1..=(7 - remainder) as u32 {
            days.push(DayCell {
                year: next_year,
                month: next_month,
                day,
                outside: true,
            });
        }
    }

    days
}
