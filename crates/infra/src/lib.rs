//! Infrastructure layer: in-memory record stores and the demo dataset.

pub mod repositories;
pub mod seed;
pub mod store;

pub use repositories::{RecordSet, Repositories};
pub use seed::{SeedReport, seed_demo_data};
pub use store::{InMemoryStore, Store};
