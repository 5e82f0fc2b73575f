use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::app::{AppState, EventForm, Mode, Screen};

pub fn handle_key(key: KeyCode, state: &mut AppState, today: NaiveDate) {
    match state.screen {
        Screen::Calendar => handle_calendar_key(key, state, today),
        Screen::Categories => handle_categories_key(key, state),
    }
}

fn handle_calendar_key(key: KeyCode, state: &mut AppState, today: NaiveDate) {
    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_selection_by_days(-1),
        KeyCode::Char('l') | KeyCode::Right => state.move_selection_by_days(1),
        KeyCode::Char('j') | KeyCode::Down => state.move_selection_by_days(7),
        KeyCode::Char('k') | KeyCode::Up => state.move_selection_by_days(-7),
        KeyCode::Char(']') => state.move_event_selection_down(),
        KeyCode::Char('[') => state.move_event_selection_up(),
        KeyCode::Char('}') => state.go_to_next_month(),
        KeyCode::Char('{') => state.go_to_prev_month(),
        KeyCode::Char('t') => state.go_to_today(today),
        KeyCode::Char('a') => enter_insert_mode(state),
        KeyCode::Char('x') => request_delete_selected_event(state),
        KeyCode::Char('c') => state.screen = Screen::Categories,
        KeyCode::Enter => state.show_event_panel = !state.show_event_panel,
        KeyCode::Char(':') => enter_command_mode(state, ":"),
        KeyCode::Char('?') => show_help(state),
        _ => {}
    }
}

fn handle_categories_key(key: KeyCode, state: &mut AppState) {
    match key {
        KeyCode::Char('j') | KeyCode::Down => state.move_category_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_category_selection_up(),
        KeyCode::Char('a') => enter_command_mode(state, ":cat add "),
        KeyCode::Char('x') => {
            if let Some(category) = state.selected_category() {
                let command = format!(":cat rm {}", category.id);
                enter_command_mode(state, &command);
            }
        }
        KeyCode::Char('c') | KeyCode::Esc => state.screen = Screen::Calendar,
        KeyCode::Char(':') => enter_command_mode(state, ":"),
        KeyCode::Char('?') => show_help(state),
        _ => {}
    }
}

fn enter_insert_mode(state: &mut AppState) {
    state.event_form = Some(EventForm::new(state.selected_key.clone(), String::new()));
    state.mode = Mode::Insert;
}

fn request_delete_selected_event(state: &mut AppState) {
    if state.selected_event().is_some() {
        state.delete_confirmation = Some((state.selected_key.clone(), state.selected_event_index));
        state.mode = Mode::ConfirmDelete;
    }
}

fn enter_command_mode(state: &mut AppState, prefill: &str) {
    state.mode = Mode::Command;
    state.command_buffer = prefill.to_string();
}

fn show_help(state: &mut AppState) {
    state.show_help = true;
    state.help_scroll = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EventDraft;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn state_with_event() -> AppState {
        let mut state = AppState::for_date(today());
        let key = state.selected_key.clone();
        state.add_event(key, EventDraft {
            title: "Exam".to_string(),
            category_id: "studies".to_string(),
            all_day: true,
            ..EventDraft::default()
        });
        state
    }

    #[test]
    fn h_moves_to_previous_day() {
        let mut state = AppState::for_date(today());

        handle_key(KeyCode::Char('h'), &mut state, today());

        assert_eq!(state.selected_key.as_str(), "2025-01-14");
    }

    #[test]
    fn j_moves_down_a_week() {
        let mut state = AppState::for_date(today());

        handle_key(KeyCode::Char('j'), &mut state, today());

        assert_eq!(state.selected_key.as_str(), "2025-01-22");
    }

    #[test]
    fn braces_change_month_without_moving_selection() {
        let mut state = AppState::for_date(today());

        handle_key(KeyCode::Char('{'), &mut state, today());

        assert_eq!((state.current_year, state.current_month), (2024, 11));
        assert_eq!(state.selected_key.as_str(), "2025-01-15");
    }

    #[test]
    fn t_jumps_back_to_today() {
        let mut state = AppState::for_date(today());
        handle_key(KeyCode::Char('}'), &mut state, today());
        handle_key(KeyCode::Char('l'), &mut state, today());

        handle_key(KeyCode::Char('t'), &mut state, today());

        assert_eq!(state.selected_key.as_str(), "2025-01-15");
        assert_eq!(state.current_month, 0);
    }

    #[test]
    fn a_opens_form_for_selected_day() {
        let mut state = AppState::for_date(today());

        handle_key(KeyCode::Char('a'), &mut state, today());

        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.event_form.as_ref().map(|f| f.date.as_str()), Some("2025-01-15"));
    }

    #[test]
    fn x_asks_for_confirmation() {
        let mut state = state_with_event();

        handle_key(KeyCode::Char('x'), &mut state, today());

        assert_eq!(state.mode, Mode::ConfirmDelete);
        assert_eq!(state.delete_confirmation, Some((state.selected_key.clone(), 0)));
    }

    #[test]
    fn x_without_events_does_nothing() {
        let mut state = AppState::for_date(today());

        handle_key(KeyCode::Char('x'), &mut state, today());

        assert_eq!(state.mode, Mode::Normal);
        assert!(state.delete_confirmation.is_none());
    }

    #[test]
    fn c_switches_to_categories_and_back() {
        let mut state = AppState::for_date(today());

        handle_key(KeyCode::Char('c'), &mut state, today());
        assert_eq!(state.screen, Screen::Categories);

        handle_key(KeyCode::Esc, &mut state, today());
        assert_eq!(state.screen, Screen::Calendar);
    }

    #[test]
    fn x_on_category_prefills_remove_command() {
        let mut state = AppState::for_date(today());
        state.screen = Screen::Categories;
        handle_key(KeyCode::Char('j'), &mut state, today());

        handle_key(KeyCode::Char('x'), &mut state, today());

        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.command_buffer, ":cat rm training");
    }

    #[test]
    fn colon_enters_command_mode() {
        let mut state = AppState::for_date(today());

        handle_key(KeyCode::Char(':'), &mut state, today());

        assert_eq!(state.mode, Mode::Command);
        assert_eq!(state.command_buffer, ":");
    }
}
