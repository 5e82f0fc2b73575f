use std::collections::VecDeque;

use crate::app::AppState;
use crate::calendar::{Category, FALLBACK_COLOR};

pub const CATEGORY_NAME_PROMPT: &str = "Nom de la nova categoria:";
pub const CATEGORY_COLOR_PROMPT: &str = "Color en format HEX (ex: #4f8cff):";

/// Whatever can ask the user a question and show them a notice. Keeps the
/// category flows free of any terminal or widget code.
#[cfg_attr(test, mockall::automock)]
pub trait FormInput {
    /// Returns `None` when the user cancels.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;
    fn notify(&mut self, message: &str);
}

/// Answers prompts from a fixed list, e.g. the arguments of a typed command.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    pub notices: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            notices: Vec::new(),
        }
    }
}

impl FormInput for ScriptedInput {
    fn prompt(&mut self, _message: &str, default: &str) -> Option<String> {
        self.answers
            .pop_front()
            .or_else(|| (!default.is_empty()).then(|| default.to_string()))
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Asks for a name and a color, then adds the category. Cancelling or
/// leaving the name blank adds nothing.
pub fn request_new_category(
    state: &mut AppState,
    input: &mut dyn FormInput,
    now_millis: u64,
) -> Option<Category> {
    let name = input.prompt(CATEGORY_NAME_PROMPT, "")?;
    if name.trim().is_empty() {
        return None;
    }

    let color = input
        .prompt(CATEGORY_COLOR_PROMPT, FALLBACK_COLOR)
        .unwrap_or_else(|| FALLBACK_COLOR.to_string());

    state.add_category(&name, &color, now_millis).cloned()
}

/// Removes the category or tells the user why it cannot be removed.
pub fn request_category_removal(
    state: &mut AppState,
    input: &mut dyn FormInput,
    id: &str,
) -> Option<Category> {
    match state.remove_category(id) {
        Ok(category) => Some(category),
        Err(e) => {
            input.notify(&e.to_string());
            None
        }
    }
}
