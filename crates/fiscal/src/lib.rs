//! Fiscal classification of stone materials.
//!
//! NCM (Mercosul Common Nomenclature) codes are 8-digit tax classification
//! codes written `DDDD.DD.DD`. This crate holds the stone classification
//! vocabulary, a static suggestion table and format rules. No external
//! lookups, nothing learned, nothing persisted.

pub mod classification;
pub mod ncm;

pub use classification::{MaterialType, ProcessingLevel};
pub use ncm::{
    GRANITE_BLOCKS, GRANITE_MOSAIC, GRANITE_RAW, MARBLE_RAW, MARBLE_WORKED, NcmCode, NcmError,
    QUARTZITE_RAW, QUARTZITE_WORKED, catalog, describe_ncm, normalize_ncm, suggest_ncm,
    validate_ncm_format,
};
