use chrono::{Datelike, Days, Local, NaiveDate};
use thiserror::Error;

use crate::calendar::{
    Category, DateKey, Event, EventStore, Repeat, category::normalize_color, shift_month,
};
use crate::storage::Snapshot;
use crate::ui::theme::Theme;

pub const CATEGORY_IN_USE_MESSAGE: &str =
    "Aquesta categoria té esdeveniments associats i no es pot eliminar.";

#[derive(Debug, Error, PartialEq)]
pub enum AgendaError {
    #[error("{}", CATEGORY_IN_USE_MESSAGE)]
    CategoryInUse { id: String },
    #[error("Categoria desconeguda: {0}")]
    UnknownCategory(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    ConfirmDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Calendar,
    Categories,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Field values for a new event, before validation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub time: String,
    pub category_id: String,
    pub all_day: bool,
    pub repeat: Repeat,
}

/// Everything the agenda knows: view position, selection, the two persisted
/// collections and the terminal interaction state. Operations here never
/// touch storage; callers persist after a mutation succeeds.
pub struct AppState {
    pub mode: Mode,
    pub screen: Screen,
    pub current_year: i32,
    /// Zero-based.
    pub current_month: u32,
    pub selected_key: DateKey,
    pub events: EventStore,
    pub categories: Vec<Category>,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub show_event_panel: bool,
    pub theme: Theme,
    pub max_event_dots: usize,
    pub event_form: Option<EventForm>,
    pub selected_event_index: usize,
    pub selected_category_index: usize,
    pub delete_confirmation: Option<(DateKey, usize)>,
    pub status: Option<StatusMessage>,
}

#[derive(Debug, Clone)]
pub struct EventForm {
    pub date: DateKey,
    pub title: String,
    pub description: String,
    pub time_input_buffer: String,
    pub time_buffer_touched: bool,
    pub category_index: usize,
    pub all_day: bool,
    pub repeat: Repeat,
    pub active_field: FormField,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Title,
    Description,
    Time,
    Category,
    AllDay,
    Repeat,
}

impl EventForm {
    pub fn new(date: DateKey, title: String) -> Self {
        Self {
            date,
            title,
            description: String::new(),
            time_input_buffer: String::new(),
            time_buffer_touched: false,
            category_index: 0,
            all_day: true,
            repeat: Repeat::None,
            active_field: FormField::Title,
        }
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::AllDay,
            FormField::AllDay if self.all_day => FormField::Category,
            FormField::AllDay => FormField::Time,
            FormField::Time => FormField::Category,
            FormField::Category => FormField::Repeat,
            FormField::Repeat => FormField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Title => FormField::Repeat,
            FormField::Description => FormField::Title,
            FormField::AllDay => FormField::Description,
            FormField::Time => FormField::AllDay,
            FormField::Category if self.all_day => FormField::AllDay,
            FormField::Category => FormField::Time,
            FormField::Repeat => FormField::Category,
        };
    }

    pub fn toggle_all_day(&mut self) {
        self.all_day = !self.all_day;
        if self.all_day && self.active_field == FormField::Time {
            self.active_field = FormField::AllDay;
        }
    }

    pub fn cycle_category(&mut self, category_count: usize, forward: bool) {
        if category_count == 0 {
            self.category_index = 0;
            return;
        }
        self.category_index = if forward {
            (self.category_index + 1) % category_count
        } else {
            (self.category_index + category_count - 1) % category_count
        };
    }

    /// Normalizes the time buffer to "HH:MM". Accepts "9:30", "9:5", "930",
    /// "0930" or a bare hour; anything else leaves the buffer untouched.
    pub fn parse_time_input(&mut self) {
        let input = self.time_input_buffer.trim();
        let parsed = match input.split_once(':') {
            Some((hour, minute)) => {
                let minute = if minute.is_empty() { Some(0) } else { minute.parse::<u32>().ok() };
                hour.parse::<u32>().ok().zip(minute)
            }
            None => match (input.len(), input.parse::<u32>()) {
                (1..=2, Ok(num)) => Some((num, 0)),
                (3..=4, Ok(num)) => Some((num / 100, num % 100)),
                _ => None,
            },
        };

        if let Some((hour, minute)) = parsed {
            self.time_input_buffer = format!("{:02}:{:02}", hour.min(23), minute.min(59));
        }
    }

    pub fn to_draft(&self, categories: &[Category]) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            time: if self.all_day { String::new() } else { self.time_input_buffer.clone() },
            category_id: categories
                .get(self.category_index)
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            all_day: self.all_day,
            repeat: self.repeat,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            mode: Mode::Normal,
            screen: Screen::Calendar,
            current_year: today.year(),
            current_month: today.month0(),
            selected_key: DateKey::from_date(today),
            events: EventStore::new(),
            categories: crate::calendar::default_categories(),
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            show_event_panel: true,
            theme: Theme::default(),
            max_event_dots: 3,
            event_form: None,
            selected_event_index: 0,
            selected_category_index: 0,
            delete_confirmation: None,
            status: None,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.categories = snapshot.categories;
        self.events = snapshot.events;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_max_event_dots(mut self, max_event_dots: usize) -> Self {
        self.max_event_dots = max_event_dots;
        self
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_key.to_date()
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.go_to_date(today);
    }

    pub fn go_to_date(&mut self, date: NaiveDate) {
        self.current_year = date.year();
        self.current_month = date.month0();
        self.select_date(DateKey::from_date(date));
    }

    pub fn go_to_next_month(&mut self) {
        (self.current_year, self.current_month) = shift_month(self.current_year, self.current_month, 1);
    }

    pub fn go_to_prev_month(&mut self) {
        (self.current_year, self.current_month) = shift_month(self.current_year, self.current_month, -1);
    }

    pub fn select_date(&mut self, key: DateKey) {
        self.selected_key = key;
        self.reset_event_selection();
    }

    /// Moves the selection and brings its month into view.
    pub fn move_selection_by_days(&mut self, delta: i64) {
        let Some(current) = self.selected_date() else {
            return;
        };

        let moved = if delta >= 0 {
            current.checked_add_days(Days::new(delta as u64))
        } else {
            current.checked_sub_days(Days::new(delta.unsigned_abs()))
        };

        if let Some(date) = moved {
            self.go_to_date(date);
        }
    }

    pub fn events_for_selected(&self) -> &[Event] {
        self.events.events_on(&self.selected_key)
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.events_for_selected().get(self.selected_event_index)
    }

    pub fn move_event_selection_down(&mut self) {
        let event_count = self.events_for_selected().len();
        if event_count > 0 && self.selected_event_index < event_count - 1 {
            self.selected_event_index += 1;
        }
    }

    pub fn move_event_selection_up(&mut self) {
        if self.selected_event_index > 0 {
            self.selected_event_index -= 1;
        }
    }

    pub fn reset_event_selection(&mut self) {
        self.selected_event_index = 0;
    }

    /// Stores a new event on `key`. A blank title is rejected without
    /// touching the store.
    pub fn add_event(&mut self, key: DateKey, draft: EventDraft) -> Option<usize> {
        let title = draft.title.trim();
        if title.is_empty() {
            return None;
        }

        let event = Event {
            title: title.to_string(),
            description: draft.description.trim().to_string(),
            time: if draft.all_day { String::new() } else { draft.time },
            category_id: draft.category_id,
            all_day: draft.all_day,
            repeat: draft.repeat,
        };

        tracing::info!("Adding event '{}' on {}", event.title, key);
        Some(self.events.push(key, event))
    }

    pub fn delete_event(&mut self, key: &DateKey, index: usize) -> Option<Event> {
        let removed = self.events.remove(key, index)?;
        tracing::info!("Deleted event '{}' from {}", removed.title, key);

        let remaining = self.events_for_selected().len();
        if self.selected_event_index >= remaining {
            self.selected_event_index = remaining.saturating_sub(1);
        }
        Some(removed)
    }

    pub fn add_category(&mut self, name: &str, color: &str, now_millis: u64) -> Option<&Category> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let category = Category {
            id: Category::generate_id(name, now_millis),
            name: name.to_string(),
            color: normalize_color(color),
        };

        tracing::info!("Adding category {} ({})", category.id, category.color);
        self.categories.push(category);
        self.categories.last()
    }

    /// Removes a category nobody references. On error neither collection
    /// changes.
    pub fn remove_category(&mut self, id: &str) -> Result<Category, AgendaError> {
        let position = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| AgendaError::UnknownCategory(id.to_string()))?;

        if self.events.references_category(id) {
            tracing::warn!("Refusing to remove category {} while events use it", id);
            return Err(AgendaError::CategoryInUse { id: id.to_string() });
        }

        let removed = self.categories.remove(position);
        if self.selected_category_index >= self.categories.len() {
            self.selected_category_index = self.categories.len().saturating_sub(1);
        }
        tracing::info!("Removed category {}", removed.id);
        Ok(removed)
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.selected_category_index)
    }

    pub fn move_category_selection_down(&mut self) {
        if self.selected_category_index + 1 < self.categories.len() {
            self.selected_category_index += 1;
        }
    }

    pub fn move_category_selection_up(&mut self) {
        self.selected_category_index = self.selected_category_index.saturating_sub(1);
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), is_error: false });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage { text: text.into(), is_error: true });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
