pub mod calendar;
pub mod input;
pub mod ui;
pub mod storage;
pub mod app;

pub use calendar::{DateKey, DayCell, Event, EventStore, Category, generate_calendar_days, format_date_key, get_month_name};
pub use app::{AppState, AgendaError, Mode, Screen};

pub use input::{normal_mode, command_mode};
