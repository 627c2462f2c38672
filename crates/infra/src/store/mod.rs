//! In-memory record storage.
//!
//! Every mutation replaces a record wholesale. Nothing survives a restart.

pub mod record_store;

pub use record_store::{InMemoryStore, Store};
