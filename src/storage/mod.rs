pub mod store;
pub mod persistence;
pub mod config;

pub use store::{KeyValueStore, MemoryStore, SqliteStore, StoreError, open_store_or_memory};
pub use persistence::{Snapshot, PersistError, load_snapshot, save_categories, save_events};
