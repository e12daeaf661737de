//! In-memory record store used when no database is configured.

mod store;

pub use store::InMemoryRecordStore;
