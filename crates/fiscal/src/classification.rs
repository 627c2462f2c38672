use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stone family.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Marble,
    Granite,
    Quartzite,
}

impl MaterialType {
    pub const ALL: [MaterialType; 3] = [
        MaterialType::Marble,
        MaterialType::Granite,
        MaterialType::Quartzite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::Marble => "marble",
            MaterialType::Granite => "granite",
            MaterialType::Quartzite => "quartzite",
        }
    }
}

impl core::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marble" => Ok(MaterialType::Marble),
            "granite" => Ok(MaterialType::Granite),
            "quartzite" => Ok(MaterialType::Quartzite),
            other => Err(format!("unknown material type '{other}'")),
        }
    }
}

/// How far the stone has been worked.
///
/// - `Raw`: crude or roughly trimmed block.
/// - `SemiFinished`: sawn into blocks/slabs, surface not worked.
/// - `Finished`: polished, honed or otherwise worked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingLevel {
    Raw,
    SemiFinished,
    Finished,
}

impl ProcessingLevel {
    pub const ALL: [ProcessingLevel; 3] = [
        ProcessingLevel::Raw,
        ProcessingLevel::SemiFinished,
        ProcessingLevel::Finished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingLevel::Raw => "raw",
            ProcessingLevel::SemiFinished => "semi_finished",
            ProcessingLevel::Finished => "finished",
        }
    }
}

impl core::fmt::Display for ProcessingLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "raw" => Ok(ProcessingLevel::Raw),
            "semi_finished" => Ok(ProcessingLevel::SemiFinished),
            "finished" => Ok(ProcessingLevel::Finished),
            other => Err(format!("unknown processing level '{other}'")),
        }
    }
}
