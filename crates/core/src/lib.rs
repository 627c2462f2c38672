//! `stonedesk-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, field validation reports and money
//! presentation helpers.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod validation;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ClientId, MaterialId, PurchaseId, SaleId, TransactionId, UserId};
pub use money::{format_brl, round_cents};
pub use validation::{FieldError, ValidationErrors, Validator};
pub use value_object::ValueObject;
