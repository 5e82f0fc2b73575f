use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::event::null_as_default;

/// Dot color for events whose category no longer exists.
pub const FALLBACK_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
}

impl Category {
    pub fn new(id: &str, name: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Slug of the name plus a base-36 timestamp, e.g. `"deep-work-lz3k9a1c"`.
    pub fn generate_id(name: &str, now_millis: u64) -> String {
        static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
        let whitespace = WHITESPACE_RE.get_or_init(|| {
            Regex::new(r"\s+").expect("invalid whitespace regex")
        });

        let slug = whitespace.replace_all(&name.trim().to_lowercase(), "-").into_owned();
        format!("{}-{}", slug, to_base36(now_millis))
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("studies", "Estudis", "#4f8cff"),
        Category::new("training", "Entrenaments", "#4ade80"),
        Category::new("projects", "Projectes", "#f97316"),
        Category::new("personal", "Personal", "#e5e5e5"),
    ]
}

pub fn normalize_color(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        FALLBACK_COLOR.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Accepts `#rgb` and `#rrggbb`.
pub fn parse_hex_color(input: &str) -> Option<(u8, u8, u8)> {
    static HEX_RE: OnceLock<Regex> = OnceLock::new();
    let pattern = HEX_RE.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("invalid hex color regex")
    });

    let caps = pattern.captures(input.trim())?;
    let digits = caps.get(1)?.as_str();

    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
