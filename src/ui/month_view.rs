use chrono::NaiveDate;

use crate::app::AppState;
use crate::calendar::{
    DateKey, DayCell, FALLBACK_COLOR, generate_calendar_days, get_month_name,
};

/// Dots that fit under a day number in the rendered grid, whatever the
/// configured limit.
pub const MAX_EVENT_DOTS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub cell: DayCell,
    pub key: DateKey,
    pub is_selected: bool,
    pub is_today: bool,
    pub event_count: usize,
    /// One hex color per event, capped at the configured dot count.
    pub dot_colors: Vec<String>,
}

impl CellView {
    pub fn is_current_month(&self) -> bool {
        !self.cell.outside
    }

    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

pub fn calculate_layout(state: &AppState, today: NaiveDate) -> MonthLayout {
    let year = state.current_year;
    let month = state.current_month;
    let today_key = DateKey::from_date(today);

    let cells: Vec<CellView> = generate_calendar_days(year, month)
        .into_iter()
        .map(|cell| {
            let key = cell.date_key();
            let events = state.events.events_on(&key);
            let dot_colors = events
                .iter()
                .take(state.max_event_dots.min(MAX_EVENT_DOTS))
                .map(|event| {
                    event
                        .category(&state.categories)
                        .map(|c| c.color.clone())
                        .unwrap_or_else(|| FALLBACK_COLOR.to_string())
                })
                .collect();

            CellView {
                is_selected: key == state.selected_key,
                is_today: key == today_key,
                event_count: events.len(),
                dot_colors,
                cell,
                key,
            }
        })
        .collect();

    let weeks = cells
        .chunks(7)
        .map(|days| Week { days: days.to_vec() })
        .collect();

    MonthLayout {
        year,
        month,
        month_name: get_month_name(year, month).name,
        weeks,
    }
}
