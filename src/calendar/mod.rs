pub mod grid;
pub mod date_key;
pub mod month_name;
pub mod event;
pub mod category;
pub mod event_store;

pub use grid::{DayCell, MonthInfo, generate_calendar_days, month_info, days_in_month, shift_month};
pub use date_key::{DateKey, DateKeyError, format_date_key};
pub use month_name::{MonthName, get_month_name, long_date_label};
pub use event::{Event, Repeat};
pub use category::{Category, default_categories, FALLBACK_COLOR};
pub use event_store::EventStore;
