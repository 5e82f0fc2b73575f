use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Datelike, Local, Utc};

use op_agenda::{
    app::AppState,
    calendar::{
        Category, DateKey, Event, EventStore, event::NO_EVENTS_LABEL, long_date_label,
        month_name::WEEKDAY_SHORT,
    },
    input::form_input::{FormInput, request_category_removal, request_new_category},
    storage::{
        KeyValueStore, config::Config, load_snapshot, open_store_or_memory, save_categories,
    },
    ui::month_view::{MonthLayout, calculate_layout},
};

pub const USAGE: &str = "Ús: op-agenda [--agenda [YYYY-MM-DD]] [--month [YYYY-MM]] \
    [--categories] [--add-category] [--remove-category <id>]";

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Interactive,
    Agenda(DateKey),
    Month { year: i32, month: u32 },
    ListCategories,
    AddCategory,
    RemoveCategory(String),
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<CliMode, String> {
    let mut mode = CliMode::Interactive;
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        let value = args.next_if(|next| !next.starts_with("--"));
        mode = match arg.as_str() {
            "--agenda" => match value {
                Some(date_str) => CliMode::Agenda(DateKey::parse(&date_str).map_err(|e| e.to_string())?),
                None => CliMode::Agenda(DateKey::today()),
            },
            "--month" => match value {
                Some(month_str) => parse_year_month(&month_str)?,
                None => {
                    let today = Local::now().date_naive();
                    CliMode::Month { year: today.year(), month: today.month0() }
                }
            },
            "--categories" => CliMode::ListCategories,
            "--add-category" => CliMode::AddCategory,
            "--remove-category" => match value {
                Some(id) => CliMode::RemoveCategory(id),
                None => return Err("--remove-category necessita l'identificador d'una categoria".to_string()),
            },
            "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            _ => return Err(format!("Argument desconegut: {}", arg)),
        };
    }

    Ok(mode)
}

fn parse_year_month(input: &str) -> Result<CliMode, String> {
    let invalid = || format!("Mes no vàlid '{}'. Format: AAAA-MM.", input);
    let (year, month) = input.split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(CliMode::Month { year, month: month - 1 })
}

/// Prompts on the terminal. End of input cancels.
struct StdinInput;

impl FormInput for StdinInput {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        if default.is_empty() {
            print!("{} ", message);
        } else {
            print!("{} [{}] ", message, default);
        }
        io::stdout().flush().ok();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let answer = line.trim();
                if answer.is_empty() && !default.is_empty() {
                    Some(default.to_string())
                } else {
                    Some(answer.to_string())
                }
            }
        }
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

pub fn run_cli_mode(mode: CliMode) -> Result<(), io::Error> {
    let config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;
    let mut store = open_store_or_memory(&config.storage.database);
    let snapshot = load_snapshot(store.as_mut());
    let mut app = AppState::new()
        .with_snapshot(snapshot)
        .with_max_event_dots(config.ui.max_event_dots);

    match mode {
        CliMode::Interactive => Ok(()),
        CliMode::Agenda(key) => {
            let agenda = format_agenda_text(&key, &app.events, &app.categories);
            display_with_pager(&agenda)
        }
        CliMode::Month { year, month } => {
            app.current_year = year;
            app.current_month = month;
            let layout = calculate_layout(&app, Local::now().date_naive());
            println!("{}", format_month_text(&layout));
            Ok(())
        }
        CliMode::ListCategories => {
            print!("{}", format_category_list(&app.categories, &app.events));
            Ok(())
        }
        CliMode::AddCategory => {
            let now_millis = Utc::now().timestamp_millis().max(0) as u64;
            match request_new_category(&mut app, &mut StdinInput, now_millis) {
                Some(category) => {
                    persist_categories(store.as_mut(), &app.categories)?;
                    println!("Categoria afegida: {} ({})", category.name, category.id);
                }
                None => println!("No s'ha afegit cap categoria."),
            }
            Ok(())
        }
        CliMode::RemoveCategory(id) => {
            if let Some(category) = request_category_removal(&mut app, &mut StdinInput, &id) {
                persist_categories(store.as_mut(), &app.categories)?;
                println!("Categoria eliminada: {}", category.name);
            }
            Ok(())
        }
    }
}

fn persist_categories(store: &mut dyn KeyValueStore, categories: &[Category]) -> Result<(), io::Error> {
    save_categories(store, categories).map_err(|e| {
        tracing::error!("Failed to save categories: {}", e);
        io::Error::other(e.to_string())
    })
}

fn format_agenda_text(key: &DateKey, events: &EventStore, categories: &[Category]) -> String {
    let heading = match key.to_date() {
        Some(date) => format!("{} {}", long_date_label(date), date.year()),
        None => key.to_string(),
    };

    let mut lines = vec![format!("Agenda – {}", heading), String::new()];

    let day = events.events_on(key);
    if day.is_empty() {
        lines.push(NO_EVENTS_LABEL.to_string());
    } else {
        for event in day {
            lines.push(format!("- {}", build_agenda_line(event, categories)));
            if !event.description.is_empty() {
                lines.push(format!("    {}", event.description));
            }
        }
    }

    lines.join("\n")
}

fn build_agenda_line(event: &Event, categories: &[Category]) -> String {
    format!("{}  ({})", event.title, event.meta_label(categories))
}

fn format_month_text(layout: &MonthLayout) -> String {
    let mut lines = vec![
        format!("{} {}", layout.month_name, layout.year),
        WEEKDAY_SHORT.iter().map(|d| format!(" {} ", d)).collect::<String>(),
    ];

    for week in &layout.weeks {
        let row: String = week
            .days
            .iter()
            .map(|cell| {
                if cell.cell.outside {
                    format!("({:>2})", cell.cell.day)
                } else {
                    let marker = if cell.has_events() { '*' } else { ' ' };
                    format!(" {:>2}{}", cell.cell.day, marker)
                }
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

fn format_category_list(categories: &[Category], events: &EventStore) -> String {
    let mut out = String::new();
    for category in categories {
        let uses = events
            .iter()
            .flat_map(|(_, day)| day)
            .filter(|event| event.category_id == category.id)
            .count();
        out.push_str(&format!("{:<24} {:<16} {:<8} {} esdeveniments\n", category.id, category.name, category.color, uses));
    }
    out
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let cmd = match parts.next() {
        Some(c) => c,
        None => {
            println!("{text}");
            return Ok(());
        }
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd)
        .args(&args)
        .stdin(Stdio::piped())
        .spawn()
    {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => {
            println!("{text}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use op_agenda::app::EventDraft;
    use op_agenda::calendar::{Repeat, default_categories, format_date_key};

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn no_arguments_starts_interactive() {
        assert_eq!(parse_args(args(&[])), Ok(CliMode::Interactive));
    }

    #[test]
    fn agenda_takes_a_date_key() {
        assert_eq!(
            parse_args(args(&["--agenda", "2024-02-05"])),
            Ok(CliMode::Agenda(format_date_key(2024, 1, 5)))
        );
        assert!(parse_args(args(&["--agenda", "2024/02/05"])).is_err());
    }

    #[test]
    fn month_takes_one_based_month() {
        assert_eq!(
            parse_args(args(&["--month", "2024-02"])),
            Ok(CliMode::Month { year: 2024, month: 1 })
        );
        assert!(parse_args(args(&["--month", "2024-13"])).is_err());
    }

    #[test]
    fn remove_category_requires_id() {
        assert!(parse_args(args(&["--remove-category"])).is_err());
        assert_eq!(
            parse_args(args(&["--remove-category", "training"])),
            Ok(CliMode::RemoveCategory("training".to_string()))
        );
    }

    #[test]
    fn unknown_argument_is_rejected() {
        assert!(parse_args(args(&["--sync"])).is_err());
    }

    #[test]
    fn month_text_marks_padding_and_event_days() {
        let mut app = AppState::for_date(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
        let key = format_date_key(2024, 1, 5);
        app.add_event(key, EventDraft {
            title: "Exam".to_string(),
            category_id: "studies".to_string(),
            all_day: true,
            ..EventDraft::default()
        });

        let text = format_month_text(&calculate_layout(&app, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Febrer 2024");
        assert_eq!(lines[1], " Dl  Dt  Dc  Dj  Dv  Ds  Dg ");
        assert_eq!(lines[2], "(29)(30)(31)  1   2   3   4");
        assert!(lines[3].starts_with("  5*"));
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn agenda_text_lists_events_with_meta() {
        let mut events = EventStore::new();
        let key = format_date_key(2024, 1, 5);
        events.push(key.clone(), Event {
            title: "Exam".to_string(),
            description: "Room 2".to_string(),
            time: "10:00".to_string(),
            category_id: "studies".to_string(),
            all_day: false,
            repeat: Repeat::None,
        });

        let text = format_agenda_text(&key, &events, &default_categories());

        assert!(text.starts_with("Agenda – dilluns, 5 de febrer 2024"));
        assert!(text.contains("- Exam  (10:00 · Estudis)"));
        assert!(text.contains("    Room 2"));
    }

    #[test]
    fn agenda_text_for_empty_day() {
        let text = format_agenda_text(&format_date_key(2024, 1, 6), &EventStore::new(), &[]);
        assert!(text.ends_with(NO_EVENTS_LABEL));
    }
}
