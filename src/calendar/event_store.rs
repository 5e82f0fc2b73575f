use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::date_key::DateKey;
use super::event::Event;

/// Events grouped by day. A day with no events has no entry at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventStore {
    days: BTreeMap<DateKey, Vec<Event>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events_on(&self, key: &DateKey) -> &[Event] {
        self.days.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends to the day's list and returns the new event's position.
    pub fn push(&mut self, key: DateKey, event: Event) -> usize {
        let list = self.days.entry(key).or_default();
        list.push(event);
        list.len() - 1
    }

    pub fn remove(&mut self, key: &DateKey, index: usize) -> Option<Event> {
        let list = self.days.get_mut(key)?;
        if index >= list.len() {
            return None;
        }

        let removed = list.remove(index);
        if list.is_empty() {
            self.days.remove(key);
        }
        Some(removed)
    }

    pub fn references_category(&self, category_id: &str) -> bool {
        self.days
            .values()
            .any(|list| list.iter().any(|event| event.category_id == category_id))
    }

    pub fn contains_day(&self, key: &DateKey) -> bool {
        self.days.contains_key(key)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn total_events(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[Event])> {
        self.days.iter().map(|(key, list)| (key, list.as_slice()))
    }

    /// Drops days whose list is empty, which can only come from hand-edited
    /// persisted data.
    pub fn prune_empty_days(&mut self) -> usize {
        let before = self.days.len();
        self.days.retain(|_, list| !list.is_empty());
        before - self.days.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Repeat, format_date_key};

    fn create_test_event(title: &str, category_id: &str) -> Event {
        Event {
            title: title.to_string(),
            description: String::new(),
            time: String::new(),
            category_id: category_id.to_string(),
            all_day: true,
            repeat: Repeat::None,
        }
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut store = EventStore::new();
        let key = format_date_key(2024, 1, 5);

        assert_eq!(store.push(key.clone(), create_test_event("A", "studies")), 0);
        assert_eq!(store.push(key.clone(), create_test_event("B", "studies")), 1);

        let titles: Vec<_> = store.events_on(&key).iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn removing_only_event_drops_the_day() {
        let mut store = EventStore::new();
        let key = format_date_key(2024, 1, 5);
        store.push(key.clone(), create_test_event("A", "studies"));

        let removed = store.remove(&key, 0);

        assert_eq!(removed.map(|e| e.title), Some("A".to_string()));
        assert!(!store.contains_day(&key));
        assert!(store.is_empty());
    }

    #[test]
    fn removing_one_of_many_keeps_the_rest() {
        let mut store = EventStore::new();
        let key = format_date_key(2024, 1, 5);
        store.push(key.clone(), create_test_event("A", "studies"));
        store.push(key.clone(), create_test_event("B", "studies"));

        store.remove(&key, 0);

        assert_eq!(store.events_on(&key).len(), 1);
        assert_eq!(store.events_on(&key)[0].title, "B");
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut store = EventStore::new();
        let key = format_date_key(2024, 1, 5);
        store.push(key.clone(), create_test_event("A", "studies"));

        assert!(store.remove(&key, 3).is_none());
        assert!(store.remove(&format_date_key(2024, 1, 6), 0).is_none());
        assert_eq!(store.total_events(), 1);
    }

    #[test]
    fn detects_category_references() {
        let mut store = EventStore::new();
        store.push(format_date_key(2024, 1, 5), create_test_event("A", "training"));

        assert!(store.references_category("training"));
        assert!(!store.references_category("studies"));
    }

    #[test]
    fn serializes_as_object_keyed_by_date() {
        let mut store = EventStore::new();
        store.push(format_date_key(2024, 1, 5), create_test_event("A", "studies"));

        let json = serde_json::to_value(&store).unwrap();

        assert_eq!(json["2024-02-05"][0]["title"], "A");
    }

    #[test]
    fn prune_removes_empty_lists() {
        let mut store: EventStore =
            serde_json::from_str(r#"{"2024-01-01": [], "2024-01-02": [{"title": "A"}]}"#).unwrap();

        assert_eq!(store.prune_empty_days(), 1);
        assert_eq!(store.day_count(), 1);
    }
}
