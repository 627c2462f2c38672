//! Inventory domain module.
//!
//! Stone materials (slabs and blocks), their area and stock-value math, and
//! the material form validation. Pure domain logic (no IO, no HTTP, no storage).

pub mod material;

pub use material::{Dimensions, Material, MaterialFilter, MaterialSubtype, NewMaterial};
pub use stonedesk_fiscal::{MaterialType, ProcessingLevel};
