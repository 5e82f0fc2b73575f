use crate::calendar::{DateKey, DateKeyError};

#[derive(Debug, PartialEq)]
pub enum Command {
    Quit,
    Today,
    Goto(DateKey),
    NewEvent(Option<String>),
    AddCategory { name: String, color: Option<String> },
    RemoveCategory(String),
    Theme(String),
    Help,
    Error(String),
}

pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();

    let Some(command_text) = trimmed.strip_prefix(':') else {
        return Command::Error("Les ordres comencen amb ':'".to_string());
    };

    let parts: Vec<&str> = command_text.split_whitespace().collect();

    if parts.is_empty() {
        return Command::Error("Ordre buida".to_string());
    }

    match parts[0] {
        "q" | "quit" => Command::Quit,
        "today" => Command::Today,
        "help" => Command::Help,
        "goto" => {
            if parts.len() < 2 {
                Command::Error("goto necessita una data".to_string())
            } else {
                match DateKey::parse(parts[1]) {
                    Ok(key) => Command::Goto(key),
                    Err(DateKeyError::Malformed(_)) => {
                        Command::Error(format!("Format de data no vàlid: {}", parts[1]))
                    }
                    Err(e) => Command::Error(e.to_string()),
                }
            }
        }
        "new" => {
            if parts.len() < 2 {
                Command::NewEvent(None)
            } else {
                Command::NewEvent(Some(parts[1..].join(" ")))
            }
        }
        "cat" | "category" => parse_category_command(&parts[1..]),
        "theme" => {
            if parts.len() < 2 {
                Command::Error("theme necessita el nom d'un tema".to_string())
            } else {
                Command::Theme(parts[1].to_string())
            }
        }
        _ => Command::Error(format!("Ordre desconeguda: {}", parts[0])),
    }
}

fn parse_category_command(args: &[&str]) -> Command {
    match args.first() {
        Some(&"add") => {
            let mut words = &args[1..];
            let color = match words.last() {
                Some(last) if last.starts_with('#') => {
                    let color = last.to_string();
                    words = &words[..words.len() - 1];
                    Some(color)
                }
                _ => None,
            };

            if words.is_empty() {
                Command::Error("cat add necessita un nom".to_string())
            } else {
                Command::AddCategory { name: words.join(" "), color }
            }
        }
        Some(&"rm") | Some(&"remove") => match args.get(1) {
            Some(id) => Command::RemoveCategory(id.to_string()),
            None => Command::Error("cat rm necessita l'identificador de la categoria".to_string()),
        },
        _ => Command::Error("Ús: :cat add <nom> [#color] | :cat rm <id>".to_string()),
    }
}
