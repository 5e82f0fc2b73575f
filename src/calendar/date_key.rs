use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DateKeyError {
    #[error("Data no vàlida '{0}'. Format: AAAA-MM-DD.")]
    Malformed(String),
    #[error("'{0}' no és una data del calendari")]
    NoSuchDate(String),
}

/// Canonical `YYYY-MM-DD` key joining grid cells to stored events.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

/// Formats a key from a zero-based month. The month is written 1-based.
pub fn format_date_key(year: i32, month: u32, day: u32) -> DateKey {
    DateKey(format!("{}-{:02}-{:02}", year, month + 1, day))
}

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        format_date_key(date.year(), date.month0(), date.day())
    }

    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn parse(input: &str) -> Result<Self, DateKeyError> {
        static KEY_RE: OnceLock<Regex> = OnceLock::new();
        let pattern = KEY_RE.get_or_init(|| {
            Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("invalid date key regex")
        });

        let trimmed = input.trim();
        if !pattern.is_match(trimmed) {
            return Err(DateKeyError::Malformed(input.to_string()));
        }

        let key = DateKey(trimmed.to_string());
        match key.to_date() {
            Some(_) => Ok(key),
            None => Err(DateKeyError::NoSuchDate(trimmed.to_string())),
        }
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        let mut parts = self.0.rsplitn(3, '-');
        let day = parts.next()?.parse::<u32>().ok()?;
        let month = parts.next()?.parse::<u32>().ok()?;
        let year = parts.next()?.parse::<i32>().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
