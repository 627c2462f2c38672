//! Parties domain module (the company's clients).
//!
//! Client records, their contact and address value objects, and the CNPJ
//! registry-number rules. Pure domain logic (no IO, no HTTP, no storage).

pub mod client;
pub mod cnpj;

pub use client::{Address, Client, ClientFilter, Contact, NewClient};
pub use cnpj::{digits_only, format_cnpj, validate_cnpj};
