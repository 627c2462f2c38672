//! Fiscal classification review over the material catalog.

use serde::Serialize;

use stonedesk_core::MaterialId;
use stonedesk_fiscal::{describe_ncm, validate_ncm_format};
use stonedesk_inventory::Material;

use crate::pipeline::Pipeline;

/// Materials sharing one NCM code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NcmGroup {
    pub code: String,
    pub description: Option<&'static str>,
    pub materials: usize,
    pub quantity: u64,
    pub stock_value: f64,
}

/// A material flagged for review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRef {
    pub id: MaterialId,
    pub name: String,
    pub ncm_code: Option<String>,
    pub suggested: &'static str,
}

impl MaterialRef {
    fn of(m: &Material) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            ncm_code: m.ncm_code.clone(),
            suggested: m.suggested_ncm(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalReport {
    pub material_count: usize,
    /// Well-formed codes, ordered by code.
    pub groups: Vec<NcmGroup>,
    /// No code at all.
    pub unclassified: Vec<MaterialRef>,
    /// Code present but not `DDDD.DD.DD`.
    pub malformed: Vec<MaterialRef>,
    /// Well-formed code that differs from the table suggestion.
    pub divergent: Vec<MaterialRef>,
}

fn code_of(m: &Material) -> Option<&str> {
    m.ncm_code.as_deref().map(str::trim).filter(|c| !c.is_empty())
}

impl FiscalReport {
    pub fn from_materials(materials: &[Material]) -> Self {
        let all = Pipeline::new(materials);
        let refs = |p: Pipeline<'_, Material>| -> Vec<MaterialRef> {
            p.records().iter().map(|m| MaterialRef::of(m)).collect()
        };

        let classified = all
            .clone()
            .filter(|m| code_of(m).is_some_and(validate_ncm_format));
        let key = |m: &Material| code_of(m).unwrap_or_default().to_string();

        let values = classified.group_by(key, Material::stock_value);
        let quantities = classified.group_by(key, |m| f64::from(m.quantity));

        let groups = values
            .into_iter()
            .map(|(code, total)| NcmGroup {
                description: describe_ncm(&code),
                quantity: quantities.get(&code).map_or(0, |q| q.total as u64),
                materials: total.count,
                stock_value: total.total,
                code,
            })
            .collect();

        Self {
            material_count: all.count(),
            groups,
            unclassified: refs(all.clone().filter(|m| code_of(m).is_none())),
            malformed: refs(
                all.clone()
                    .filter(|m| code_of(m).is_some_and(|c| !validate_ncm_format(c))),
            ),
            divergent: refs(
                classified.filter(|m| code_of(m).is_some_and(|c| c != m.suggested_ncm())),
            ),
        }
    }

    /// True when every material carries the suggested, well-formed code.
    pub fn is_clean(&self) -> bool {
        self.unclassified.is_empty() && self.malformed.is_empty() && self.divergent.is_empty()
    }
}
