use std::io;
use chrono::{Local, NaiveDate, Utc};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use op_agenda::{
    app::{AppState, EventForm, Mode},
    input::{
        command_mode::{self, Command},
        form_input::{ScriptedInput, request_category_removal, request_new_category},
        insert_mode, normal_mode,
    },
    storage::{KeyValueStore, config::Config, load_snapshot, open_store_or_memory, save_categories, save_events},
    ui::theme::Theme,
};
use crate::tui::presentation::ui;

pub fn run_tui() -> Result<(), io::Error> {
    let config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;

    let mut store = open_store_or_memory(&config.storage.database);
    let snapshot = load_snapshot(store.as_mut());

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new()
        .with_snapshot(snapshot)
        .with_theme(theme)
        .with_max_event_dots(config.ui.max_event_dots);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, store.as_mut());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    store: &mut dyn KeyValueStore,
) -> io::Result<()> {
    loop {
        let today = Local::now().date_naive();
        terminal.draw(|f| ui(f, app, today))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key_event(key.code, app, store, today)
        {
            return Ok(());
        }
    }
}

/// Routes one key press by mode. Returns true when the session should end.
fn handle_key_event(
    code: KeyCode,
    app: &mut AppState,
    store: &mut dyn KeyValueStore,
    today: NaiveDate,
) -> bool {
    match app.mode {
        Mode::Normal => {
            if app.show_help {
                handle_help_keys(code, app);
                return false;
            }
            match code {
                KeyCode::Char('q') => return true,
                KeyCode::Esc if app.status.is_some() => app.status = None,
                _ => normal_mode::handle_key(code, app, today),
            }
            false
        }
        Mode::Command => handle_command_mode(code, app, store, today),
        Mode::Insert => {
            handle_insert_mode(code, app, store);
            false
        }
        Mode::ConfirmDelete => {
            handle_delete_confirmation(code, app, store);
            false
        }
    }
}

fn handle_help_keys(code: KeyCode, app: &mut AppState) {
    match code {
        KeyCode::Char('j') => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_command_mode(
    code: KeyCode,
    app: &mut AppState,
    store: &mut dyn KeyValueStore,
    today: NaiveDate,
) -> bool {
    match code {
        KeyCode::Enter => {
            let cmd = command_mode::parse_command(&app.command_buffer);
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            execute_command(cmd, app, store, today)
        }
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.mode = Mode::Normal;
            false
        }
        KeyCode::Backspace => {
            app.command_buffer.pop();
            if app.command_buffer.is_empty() {
                app.mode = Mode::Normal;
            }
            false
        }
        KeyCode::Char(c) => {
            app.command_buffer.push(c);
            false
        }
        _ => false,
    }
}

fn execute_command(
    cmd: Command,
    app: &mut AppState,
    store: &mut dyn KeyValueStore,
    today: NaiveDate,
) -> bool {
    app.status = None;

    match cmd {
        Command::Quit => return true,
        Command::Today => app.go_to_today(today),
        Command::Goto(key) => match key.to_date() {
            Some(date) => app.go_to_date(date),
            None => app.set_error(format!("Data no vàlida: {}", key)),
        },
        Command::Help => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        Command::Theme(theme_name) => {
            if Theme::available_themes().contains(&theme_name.to_lowercase().as_str()) {
                app.theme = Theme::get_by_name(&theme_name);
                app.set_status(format!("Tema: {}", app.theme.name));
            } else {
                app.set_error(format!(
                    "Tema desconegut '{}' (disponibles: {})",
                    theme_name,
                    Theme::available_themes().join(", ")
                ));
            }
        }
        Command::NewEvent(title) => {
            app.event_form = Some(EventForm::new(app.selected_key.clone(), title.unwrap_or_default()));
            app.mode = Mode::Insert;
        }
        Command::AddCategory { name, color } => {
            let mut input = ScriptedInput::new(std::iter::once(name).chain(color));
            let now_millis = Utc::now().timestamp_millis().max(0) as u64;
            if let Some(category) = request_new_category(app, &mut input, now_millis) {
                app.set_status(format!("Categoria afegida: {} ({})", category.name, category.id));
                persist_categories(app, store);
            }
        }
        Command::RemoveCategory(id) => {
            let mut input = ScriptedInput::default();
            match request_category_removal(app, &mut input, &id) {
                Some(category) => {
                    app.set_status(format!("Categoria eliminada: {}", category.name));
                    persist_categories(app, store);
                }
                None => {
                    let notice = input.notices.join(" ");
                    app.set_error(notice);
                }
            }
        }
        Command::Error(message) => app.set_error(message),
    }

    false
}

fn handle_insert_mode(code: KeyCode, app: &mut AppState, store: &mut dyn KeyValueStore) {
    match code {
        KeyCode::Esc => {
            app.event_form = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let Some(mut form) = app.event_form.take() else {
                app.mode = Mode::Normal;
                return;
            };
            form.parse_time_input();
            let draft = form.to_draft(&app.categories);
            let key = form.date.clone();

            match app.add_event(key.clone(), draft) {
                Some(index) => {
                    app.mode = Mode::Normal;
                    app.show_event_panel = true;
                    if key == app.selected_key {
                        app.selected_event_index = index;
                    }
                    persist_events(app, store);
                }
                None => {
                    // Blank title: keep editing.
                    app.event_form = Some(form);
                }
            }
        }
        _ => insert_mode::handle_key(code, app),
    }
}

fn handle_delete_confirmation(code: KeyCode, app: &mut AppState, store: &mut dyn KeyValueStore) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some((key, index)) = app.delete_confirmation.take()
                && app.delete_event(&key, index).is_some()
            {
                persist_events(app, store);
            }
            app.mode = Mode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.delete_confirmation = None;
            app.mode = Mode::Normal;
        }
        _ => {}
    }
}

fn persist_events(app: &mut AppState, store: &mut dyn KeyValueStore) {
    if let Err(e) = save_events(store, &app.events) {
        tracing::error!("Failed to save events: {}", e);
        app.set_error(format!("No s'han pogut desar els esdeveniments: {}", e));
    }
}

fn persist_categories(app: &mut AppState, store: &mut dyn KeyValueStore) {
    if let Err(e) = save_categories(store, &app.categories) {
        tracing::error!("Failed to save categories: {}", e);
        app.set_error(format!("No s'han pogut desar les categories: {}", e));
    }
}
