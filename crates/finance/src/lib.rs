//! Finance module (income and expense transactions).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod transaction;

pub use transaction::{
    NewTransaction, Transaction, TransactionFilter, TransactionStatus, TransactionType,
};
