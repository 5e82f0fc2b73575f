use serde::{Deserialize, Deserializer, Serialize};

use super::category::Category;

pub const ALL_DAY_LABEL: &str = "Tot el dia";
pub const UNKNOWN_REPEAT_LABEL: &str = "Repetitiu";
pub const NO_EVENTS_LABEL: &str = "No hi ha esdeveniments.";

/// Reads `null` as the field's default so hand-edited or older records
/// still load.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    /// Any repetition this version does not know about.
    #[serde(other)]
    Other,
}

impl Repeat {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Repeat::None => None,
            Repeat::Daily => Some("Diari"),
            Repeat::Weekly => Some("Setmanal"),
            Repeat::Monthly => Some("Mensual"),
            Repeat::Other => Some(UNKNOWN_REPEAT_LABEL),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Repeat::None => Repeat::Daily,
            Repeat::Daily => Repeat::Weekly,
            Repeat::Weekly => Repeat::Monthly,
            Repeat::Monthly | Repeat::Other => Repeat::None,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Repeat::None => Repeat::Monthly,
            Repeat::Daily => Repeat::None,
            Repeat::Weekly => Repeat::Daily,
            Repeat::Monthly => Repeat::Weekly,
            Repeat::Other => Repeat::Monthly,
        }
    }
}

/// An agenda entry. Events have no id of their own: they are addressed by
/// their day and position in that day's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// "HH:MM", empty for all-day events.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_day: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repeat: Repeat,
}

impl Event {
    pub fn category<'a>(&self, categories: &'a [Category]) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == self.category_id)
    }

    /// Secondary line shown under the title: time, category, repetition.
    pub fn meta_label(&self, categories: &[Category]) -> String {
        let mut bits = Vec::new();

        if !self.all_day && !self.time.is_empty() {
            bits.push(self.time.as_str());
        } else {
            bits.push(ALL_DAY_LABEL);
        }

        if let Some(category) = self.category(categories) {
            bits.push(category.name.as_str());
        }

        if let Some(label) = self.repeat.label() {
            bits.push(label);
        }

        bits.join(" · ")
    }
}
