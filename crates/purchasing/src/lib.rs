//! Purchasing domain module (stock bought from quarries and suppliers).
//!
//! Pure domain logic only: no IO, no HTTP, no storage.

pub mod purchase;

pub use purchase::{NewPurchase, Purchase, PurchaseFilter, PurchaseStatus};
