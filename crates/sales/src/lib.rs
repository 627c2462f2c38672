//! Sales domain module.
//!
//! Sales of stone material to clients and their status lifecycle, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod sale;

pub use sale::{NewSale, Sale, SaleFilter, SaleStatus};
