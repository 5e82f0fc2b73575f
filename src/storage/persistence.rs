use thiserror::Error;

use crate::calendar::{Category, EventStore, default_categories};
use super::store::{KeyValueStore, StoreError};

pub const CATEGORIES_KEY: &str = "opAgendaCategories";
pub const EVENTS_KEY: &str = "opAgendaEvents";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Error d'emmagatzematge: {0}")]
    StoreError(#[from] StoreError),
    #[error("Error de serialització: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub events: EventStore,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            events: EventStore::new(),
        }
    }
}

/// A stored but empty record counts as absent.
fn read_record<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<String>, StoreError> {
    Ok(store.get(key)?.filter(|raw| !raw.is_empty()))
}

fn read_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> Result<Snapshot, PersistError> {
    let categories = match read_record(store, CATEGORIES_KEY)? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => default_categories(),
    };

    let mut events: EventStore = match read_record(store, EVENTS_KEY)? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => EventStore::new(),
    };

    let pruned = events.prune_empty_days();
    if pruned > 0 {
        tracing::warn!("Dropped {} stored days without events", pruned);
    }

    Ok(Snapshot { categories, events })
}

/// Loads both records. Any read or parse failure yields the defaults for
/// both; a successful load is written straight back.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &mut S) -> Snapshot {
    match read_snapshot(store) {
        Ok(snapshot) => {
            tracing::info!(
                "Loaded {} categories and {} events",
                snapshot.categories.len(),
                snapshot.events.total_events()
            );

            if let Err(e) = save_categories(store, &snapshot.categories) {
                tracing::error!("Failed to write back categories: {}", e);
            }
            if let Err(e) = save_events(store, &snapshot.events) {
                tracing::error!("Failed to write back events: {}", e);
            }

            snapshot
        }
        Err(e) => {
            tracing::warn!("Stored agenda unreadable, starting from defaults: {}", e);
            Snapshot::default()
        }
    }
}

pub fn save_categories<S: KeyValueStore + ?Sized>(
    store: &mut S,
    categories: &[Category],
) -> Result<(), PersistError> {
    let raw = serde_json::to_string(categories)?;
    store.set(CATEGORIES_KEY, &raw)?;
    Ok(())
}

pub fn save_events<S: KeyValueStore + ?Sized>(
    store: &mut S,
    events: &EventStore,
) -> Result<(), PersistError> {
    let raw = serde_json::to_string(events)?;
    store.set(EVENTS_KEY, &raw)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Event, Repeat, format_date_key};
    use crate::storage::store::MemoryStore;
    use pretty_assertions::assert_eq;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::IoError(std::io::Error::other("disk gone")))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::IoError(std::io::Error::other("disk gone")))
        }
    }

    fn sample_event() -> Event {
        Event {
            title: "Exam".to_string(),
            description: "Chapter 4".to_string(),
            time: "10:00".to_string(),
            category_id: "studies".to_string(),
            all_day: false,
            repeat: Repeat::None,
        }
    }

    #[test]
    fn empty_store_yields_defaults_and_writes_them_back() {
        let mut store = MemoryStore::new();

        let snapshot = load_snapshot(&mut store);

        assert_eq!(snapshot, Snapshot::default());
        assert!(store.get(CATEGORIES_KEY).unwrap().is_some());
        assert_eq!(store.get(EVENTS_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn malformed_events_reset_both_records_to_defaults() {
        let mut store = MemoryStore::new()
            .with_value(CATEGORIES_KEY, r##"[{"id":"x","name":"X","color":"#000"}]"##)
            .with_value(EVENTS_KEY, "{not json");

        let snapshot = load_snapshot(&mut store);

        assert_eq!(snapshot.categories, default_categories());
        assert!(snapshot.events.is_empty());
    }

    #[test]
    fn read_failure_falls_back_to_defaults() {
        let snapshot = load_snapshot(&mut FailingStore);

        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn saved_state_loads_back() {
        let mut store = MemoryStore::new();
        let mut events = EventStore::new();
        events.push(format_date_key(2024, 1, 5), sample_event());
        let categories = vec![Category::new("studies", "Estudis", "#4f8cff")];

        save_categories(&mut store, &categories).unwrap();
        save_events(&mut store, &events).unwrap();
        let snapshot = load_snapshot(&mut store);

        assert_eq!(snapshot.categories, categories);
        assert_eq!(snapshot.events, events);
    }

    #[test]
    fn write_failure_is_reported() {
        let result = save_events(&mut FailingStore, &EventStore::new());

        assert!(matches!(result, Err(PersistError::StoreError(_))));
    }

    #[test]
    fn unknown_repeat_and_null_fields_keep_every_event() {
        let raw_events = r#"{
            "2024-02-05":[{"title":"Exam","description":"","time":"","categoryId":"studies","allDay":true,"repeat":"none"}],
            "2024-02-06":[{"title":"Birthday","description":null,"time":null,"categoryId":"personal","allDay":true,"repeat":"yearly"}]
        }"#;
        let mut store = MemoryStore::new().with_value(EVENTS_KEY, raw_events);

        let snapshot = load_snapshot(&mut store);

        assert_eq!(snapshot.events.total_events(), 2);
        let birthday = &snapshot.events.events_on(&format_date_key(2024, 1, 6))[0];
        assert_eq!(birthday.repeat, Repeat::Other);
        assert!(birthday.description.is_empty());

        let mut events = snapshot.events.clone();
        events.push(format_date_key(2024, 1, 7), sample_event());
        save_events(&mut store, &events).unwrap();
        let reloaded = load_snapshot(&mut store);
        assert_eq!(reloaded.events.total_events(), 3);
        assert_eq!(reloaded.events.day_count(), 3);
    }

    #[test]
    fn empty_record_counts_as_absent() {
        let raw_events = r#"{"2024-02-05":[{"title":"Exam","categoryId":"studies","allDay":true}]}"#;
        let mut store = MemoryStore::new()
            .with_value(CATEGORIES_KEY, "")
            .with_value(EVENTS_KEY, raw_events);

        let snapshot = load_snapshot(&mut store);

        assert_eq!(snapshot.categories, default_categories());
        assert_eq!(snapshot.events.total_events(), 1);
    }

    #[test]
    fn reads_records_written_by_the_browser_app() {
        let raw_events = r#"{"2024-02-05":[{"title":"Exam","description":"","time":"","categoryId":"studies","allDay":true,"repeat":"none"}]}"#;
        let mut store = MemoryStore::new().with_value(EVENTS_KEY, raw_events);

        let snapshot = load_snapshot(&mut store);

        let day = snapshot.events.events_on(&format_date_key(2024, 1, 5));
        assert_eq!(day.len(), 1);
        assert!(day[0].all_day);
    }
}
