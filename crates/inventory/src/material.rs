use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stonedesk_core::{DomainResult, Entity, MaterialId, ValueObject, Validator};
use stonedesk_fiscal::{MaterialType, ProcessingLevel, normalize_ncm, suggest_ncm};

/// Physical form of the stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialSubtype {
    Slab,
    Block,
}

impl core::str::FromStr for MaterialSubtype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slab" => Ok(MaterialSubtype::Slab),
            "block" => Ok(MaterialSubtype::Block),
            other => Err(format!("unknown material subtype '{other}'")),
        }
    }
}

/// Piece dimensions: width and height in metres, thickness in centimetres.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
}

impl ValueObject for Dimensions {}

impl Dimensions {
    /// Face area of one piece in m² (`width × height`).
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// A stock lot of one stone material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub subtype: MaterialSubtype,
    pub dimensions: Dimensions,
    pub quantity: u32,
    /// Purchase price per piece.
    pub purchase_price: f64,
    /// Sale price per m², when set.
    #[serde(default)]
    pub price_per_square_meter: Option<f64>,
    pub supplier: String,
    pub location: String,
    #[serde(default)]
    pub ncm_code: Option<String>,
    pub processing_level: ProcessingLevel,
    pub entry_date: NaiveDate,
}

impl Entity for Material {
    type Id = MaterialId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Material {
    /// Face area of one piece in m².
    pub fn area(&self) -> f64 {
        self.dimensions.area()
    }

    /// Total face area across all pieces in stock.
    pub fn total_area(&self) -> f64 {
        self.area() * f64::from(self.quantity)
    }

    /// Price used for valuation: price per m², falling back to purchase price.
    pub fn valuation_price(&self) -> f64 {
        self.price_per_square_meter.unwrap_or(self.purchase_price)
    }

    /// `valuation_price × width × height × quantity`.
    pub fn stock_value(&self) -> f64 {
        self.valuation_price()
            * self.dimensions.width
            * self.dimensions.height
            * f64::from(self.quantity)
    }

    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.quantity < threshold
    }

    pub fn suggested_ncm(&self) -> &'static str {
        suggest_ncm(self.material_type, self.processing_level)
    }
}

/// Material form input (create or full replace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub subtype: MaterialSubtype,
    pub dimensions: Dimensions,
    pub quantity: u32,
    pub purchase_price: f64,
    #[serde(default)]
    pub price_per_square_meter: Option<f64>,
    pub supplier: String,
    pub location: String,
    #[serde(default)]
    pub ncm_code: Option<String>,
    pub processing_level: ProcessingLevel,
    pub entry_date: NaiveDate,
}

impl NewMaterial {
    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        v.min_chars("name", &self.name, 3)
            .positive("dimensions.width", self.dimensions.width)
            .positive("dimensions.height", self.dimensions.height)
            .positive("dimensions.thickness", self.dimensions.thickness)
            .check(self.quantity > 0, "quantity", "must be positive")
            .positive("purchase_price", self.purchase_price)
            .min_chars("supplier", &self.supplier, 3)
            .required("location", &self.location);

        if let Some(price) = self.price_per_square_meter {
            v.positive("price_per_square_meter", price);
        }
        if let Some(code) = self.ncm_code.as_deref().filter(|c| !c.trim().is_empty()) {
            v.check(
                normalize_ncm(code).is_some(),
                "ncm_code",
                "must look like DDDD.DD.DD",
            );
        }

        v.finish()
    }

    /// Validate and build the stored record. The NCM code is stored dotted.
    pub fn into_material(self, id: MaterialId) -> DomainResult<Material> {
        self.validate()?;

        let ncm_code = self
            .ncm_code
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .and_then(normalize_ncm);

        Ok(Material {
            id,
            name: self.name.trim().to_string(),
            material_type: self.material_type,
            subtype: self.subtype,
            dimensions: self.dimensions,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            price_per_square_meter: self.price_per_square_meter,
            supplier: self.supplier.trim().to_string(),
            location: self.location.trim().to_string(),
            ncm_code,
            processing_level: self.processing_level,
            entry_date: self.entry_date,
        })
    }
}

/// List filter for the inventory table. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MaterialFilter {
    #[serde(default, rename = "type")]
    pub material_type: Option<MaterialType>,
    #[serde(default)]
    pub subtype: Option<MaterialSubtype>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Case-insensitive substring match on the material name.
    #[serde(default)]
    pub search: Option<String>,
}

impl MaterialFilter {
    pub fn matches(&self, m: &Material) -> bool {
        fn same(a: &str, b: &str) -> bool {
            a.trim().eq_ignore_ascii_case(b.trim())
        }

        self.material_type.is_none_or(|t| m.material_type == t)
            && self.subtype.is_none_or(|s| m.subtype == s)
            && self.supplier.as_deref().is_none_or(|s| same(s, &m.supplier))
            && self.location.as_deref().is_none_or(|l| same(l, &m.location))
            && self.search.as_deref().is_none_or(|q| {
                m.name.to_lowercase().contains(&q.trim().to_lowercase())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stonedesk_core::DomainError;

    fn form() -> NewMaterial {
        NewMaterial {
            name: "Branco Carrara".to_string(),
            material_type: MaterialType::Marble,
            subtype: MaterialSubtype::Slab,
            dimensions: Dimensions {
                width: 3.0,
                height: 2.0,
                thickness: 2.0,
            },
            quantity: 10,
            purchase_price: 800.0,
            price_per_square_meter: Some(250.0),
            supplier: "Pedreira Vitoria".to_string(),
            location: "Galpao A".to_string(),
            ncm_code: Some("68029100".to_string()),
            processing_level: ProcessingLevel::Finished,
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        }
    }

    #[test]
    fn stock_value_uses_price_per_square_meter() {
        let m = form().into_material(MaterialId::new()).unwrap();
        assert_eq!(m.area(), 6.0);
        assert_eq!(m.stock_value(), 250.0 * 3.0 * 2.0 * 10.0);
        assert_eq!(m.total_area(), 60.0);
    }

    #[test]
    fn stock_value_falls_back_to_purchase_price() {
        let mut f = form();
        f.price_per_square_meter = None;
        let m = f.into_material(MaterialId::new()).unwrap();
        assert_eq!(m.stock_value(), 800.0 * 3.0 * 2.0 * 10.0);
    }

    #[test]
    fn ncm_code_is_stored_dotted() {
        let m = form().into_material(MaterialId::new()).unwrap();
        assert_eq!(m.ncm_code.as_deref(), Some("6802.91.00"));
        assert_eq!(m.suggested_ncm(), "6802.91.00");
    }

    #[test]
    fn blank_ncm_code_is_unclassified() {
        let mut f = form();
        f.ncm_code = Some("  ".to_string());
        let m = f.into_material(MaterialId::new()).unwrap();
        assert_eq!(m.ncm_code, None);
    }

    #[test]
    fn validation_reports_each_bad_field() {
        let mut f = form();
        f.name = "ab".to_string();
        f.quantity = 0;
        f.dimensions.width = -1.0;
        f.price_per_square_meter = Some(0.0);
        f.ncm_code = Some("2516".to_string());

        match f.validate().unwrap_err() {
            DomainError::Validation(errors) => {
                for field in [
                    "name",
                    "quantity",
                    "dimensions.width",
                    "price_per_square_meter",
                    "ncm_code",
                ] {
                    assert!(errors.contains(field), "missing {field}");
                }
                assert!(!errors.contains("supplier"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn serializes_type_field_name() {
        let m = form().into_material(MaterialId::new()).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "marble");
        assert_eq!(json["processing_level"], "finished");
        assert_eq!(json["entry_date"], "2024-03-10");
    }

    #[test]
    fn filter_matches_case_insensitively() {
        let m = form().into_material(MaterialId::new()).unwrap();
        let filter = MaterialFilter {
            material_type: Some(MaterialType::Marble),
            supplier: Some("pedreira vitoria".to_string()),
            search: Some("carrara".to_string()),
            ..MaterialFilter::default()
        };
        assert!(filter.matches(&m));
        assert!(MaterialFilter::default().matches(&m));

        let other = MaterialFilter {
            subtype: Some(MaterialSubtype::Block),
            ..MaterialFilter::default()
        };
        assert!(!other.matches(&m));
    }

    proptest! {
        /// Property: stock value is the product formula and never negative
        /// for non-negative inputs.
        #[test]
        fn stock_value_formula(
            width in 0.0f64..10.0,
            height in 0.0f64..10.0,
            quantity in 0u32..500,
            purchase_price in 0.0f64..10_000.0,
            ppsm in prop::option::of(0.0f64..2_000.0),
        ) {
            let m = Material {
                id: MaterialId::new(),
                name: "Lot".to_string(),
                material_type: MaterialType::Granite,
                subtype: MaterialSubtype::Block,
                dimensions: Dimensions { width, height, thickness: 3.0 },
                quantity,
                purchase_price,
                price_per_square_meter: ppsm,
                supplier: "Supplier".to_string(),
                location: "Yard".to_string(),
                ncm_code: None,
                processing_level: ProcessingLevel::Raw,
                entry_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            };

            let expected = ppsm.unwrap_or(purchase_price) * width * height * f64::from(quantity);
            prop_assert_eq!(m.stock_value(), expected);
            prop_assert!(m.stock_value() >= 0.0);
        }
    }
}
