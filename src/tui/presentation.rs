use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use op_agenda::app::{AppState, Mode, Screen};
use crate::tui::{calendar_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState, today: NaiveDate) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let screen_label = match app.screen {
        Screen::Calendar => "Calendari",
        Screen::Categories => "Categories",
    };
    let mode_label = match app.mode {
        Mode::Normal => "Normal",
        Mode::Insert => "Edició",
        Mode::Command => "Ordre",
        Mode::ConfirmDelete => "Confirmació",
    };
    let title = Paragraph::new(format!("op-agenda - {} - Mode {}", screen_label, mode_label))
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    match app.screen {
        Screen::Calendar if app.show_event_panel => {
            let content_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(60),
                    Constraint::Percentage(40),
                ])
                .split(main_chunks[1]);
            calendar_views::month::render(f, app, today, content_chunks[0]);
            calendar_views::event_list::render(f, app, content_chunks[1]);
        }
        Screen::Calendar => calendar_views::month::render(f, app, today, main_chunks[1]),
        Screen::Categories => calendar_views::categories::render(f, app, main_chunks[1]),
    }

    let (status_text, status_color) = if matches!(app.mode, Mode::Command) {
        (app.command_buffer.clone(), app.theme.command_mode)
    } else if let Some(status) = &app.status {
        let color = if status.is_error { app.theme.error } else { app.theme.success };
        (status.text.clone(), color)
    } else {
        (
            format!(
                "Esdeveniments: {} | Categories: {} | 'q' per sortir, '?' per a l'ajuda",
                app.events.total_events(),
                app.categories.len()
            ),
            app.theme.status_bar,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, main_chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.event_form.is_some() {
        dialogs::event_form::render(f, app);
    }

    if app.delete_confirmation.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }
}
