//! NCM suggestion table and format rules.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stonedesk_core::DomainError;

use crate::{MaterialType, ProcessingLevel};

/// Marble, crude or roughly trimmed.
pub const MARBLE_RAW: &str = "2515.11.00";
/// Marble, any further processing.
pub const MARBLE_WORKED: &str = "6802.91.00";
/// Granite, crude or roughly trimmed.
pub const GRANITE_RAW: &str = "2516.11.00";
/// Granite, merely cut into blocks or slabs.
pub const GRANITE_BLOCKS: &str = "2516.12.00";
/// Granite, worked (polished slabs, tiles, mosaic pieces).
pub const GRANITE_MOSAIC: &str = "6802.93.90";
/// Quartzite, crude or roughly trimmed.
pub const QUARTZITE_RAW: &str = "2506.20.00";
/// Quartzite, any further processing.
pub const QUARTZITE_WORKED: &str = "6802.99.90";

static NCM_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}\.[0-9]{2}\.[0-9]{2}$").expect("static NCM pattern compiles"));

const CATALOG: &[(&str, &str)] = &[
    (MARBLE_RAW, "Marble, crude or roughly trimmed"),
    (MARBLE_WORKED, "Marble, worked (polished or otherwise processed)"),
    (GRANITE_RAW, "Granite, crude or roughly trimmed"),
    (GRANITE_BLOCKS, "Granite, merely cut into blocks or slabs"),
    (GRANITE_MOSAIC, "Granite, worked (polished slabs, tiles, mosaic)"),
    (QUARTZITE_RAW, "Quartzite"),
    (QUARTZITE_WORKED, "Quartzite, worked"),
];

/// Suggest an NCM code from the stone family and its processing level.
pub fn suggest_ncm(material_type: MaterialType, processing_level: ProcessingLevel) -> &'static str {
    match (material_type, processing_level) {
        (MaterialType::Marble, ProcessingLevel::Raw) => MARBLE_RAW,
        (MaterialType::Marble, _) => MARBLE_WORKED,
        (MaterialType::Granite, ProcessingLevel::Raw) => GRANITE_RAW,
        (MaterialType::Granite, ProcessingLevel::SemiFinished) => GRANITE_BLOCKS,
        (MaterialType::Granite, ProcessingLevel::Finished) => GRANITE_MOSAIC,
        (MaterialType::Quartzite, ProcessingLevel::Raw) => QUARTZITE_RAW,
        (MaterialType::Quartzite, _) => QUARTZITE_WORKED,
    }
}

/// True iff `code` is exactly `DDDD.DD.DD`.
pub fn validate_ncm_format(code: &str) -> bool {
    NCM_FORMAT.is_match(code)
}

/// Accept `DDDD.DD.DD` or eight bare digits and return the dotted form.
pub fn normalize_ncm(input: &str) -> Option<String> {
    let input = input.trim();
    if validate_ncm_format(input) {
        return Some(input.to_string());
    }
    if input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()) {
        return Some(format!("{}.{}.{}", &input[..4], &input[4..6], &input[6..]));
    }
    None
}

/// Description of a code from the static catalog.
pub fn describe_ncm(code: &str) -> Option<&'static str> {
    CATALOG.iter().find(|(c, _)| *c == code).map(|(_, d)| *d)
}

/// The full static catalog, `(code, description)`.
pub fn catalog() -> &'static [(&'static str, &'static str)] {
    CATALOG
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NcmError {
    #[error("NCM code must look like DDDD.DD.DD, got '{0}'")]
    Malformed(String),
}

impl From<NcmError> for DomainError {
    fn from(value: NcmError) -> Self {
        DomainError::validation("ncm_code", value.to_string())
    }
}

/// A well-formed NCM code (always stored dotted).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NcmCode(String);

impl NcmCode {
    pub fn parse(input: &str) -> Result<Self, NcmError> {
        normalize_ncm(input)
            .map(Self)
            .ok_or_else(|| NcmError::Malformed(input.to_string()))
    }

    pub fn suggested(material_type: MaterialType, processing_level: ProcessingLevel) -> Self {
        Self(suggest_ncm(material_type, processing_level).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Four-digit heading, e.g. `6802`.
    pub fn heading(&self) -> &str {
        &self.0[..4]
    }

    pub fn description(&self) -> Option<&'static str> {
        describe_ncm(&self.0)
    }
}

impl TryFrom<String> for NcmCode {
    type Error = NcmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NcmCode> for String {
    fn from(value: NcmCode) -> Self {
        value.0
    }
}

impl core::fmt::Display for NcmCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
