use crossterm::event::KeyCode;
use crate::app::{AppState, FormField};

pub fn handle_key(key: KeyCode, state: &mut AppState) {
    let category_count = state.categories.len();
    let Some(form) = state.event_form.as_mut() else {
        return;
    };

    match key {
        KeyCode::Tab => {
            if form.active_field == FormField::Time {
                form.parse_time_input();
            }
            form.next_field();
        }
        KeyCode::BackTab => {
            if form.active_field == FormField::Time {
                form.parse_time_input();
            }
            form.prev_field();
        }
        KeyCode::Left | KeyCode::Right => {
            let forward = key == KeyCode::Right;
            match form.active_field {
                FormField::Category => form.cycle_category(category_count, forward),
                FormField::Repeat => {
                    form.repeat = if forward { form.repeat.next() } else { form.repeat.prev() };
                }
                FormField::AllDay => form.toggle_all_day(),
                _ => {}
            }
        }
        KeyCode::Backspace => {
            match form.active_field {
                FormField::Title => {
                    form.title.pop();
                }
                FormField::Description => {
                    form.description.pop();
                }
                FormField::Time => {
                    form.time_input_buffer.pop();
                    form.time_buffer_touched = true;
                }
                _ => {}
            }
        }
        KeyCode::Char(c) => {
            match form.active_field {
                FormField::Title => {
                    form.title.push(c);
                }
                FormField::Description => {
                    form.description.push(c);
                }
                FormField::Time => {
                    if c.is_ascii_digit() || c == ':' {
                        if !form.time_buffer_touched {
                            form.time_input_buffer.clear();
                            form.time_buffer_touched = true;
                        }
                        if form.time_input_buffer.len() < 5 {
                            form.time_input_buffer.push(c);
                        }
                    }
                }
                FormField::AllDay if c == ' ' => form.toggle_all_day(),
                FormField::Category if c == ' ' => form.cycle_category(category_count, true),
                FormField::Repeat if c == ' ' => {
                    form.repeat = form.repeat.next();
                }
                _ => {}
            }
        }
        _ => {}
    }
}
