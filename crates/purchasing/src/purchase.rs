use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stonedesk_core::{DomainError, DomainResult, Entity, MaterialId, PurchaseId, Validator};

/// Purchase status lifecycle: `pending` moves to `received` or `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Pending,
    Received,
    Cancelled,
}

impl PurchaseStatus {
    pub const ALL: [PurchaseStatus; 3] = [
        PurchaseStatus::Pending,
        PurchaseStatus::Received,
        PurchaseStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PurchaseStatus::Pending => "pending",
            PurchaseStatus::Received => "received",
            PurchaseStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PurchaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PurchaseStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown purchase status '{s}'"))
    }
}

/// A purchase of one material from one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub supplier: String,
    pub material_id: MaterialId,
    pub quantity: u32,
    pub unit_price: f64,
    /// `quantity × unit_price`.
    pub total_price: f64,
    pub status: PurchaseStatus,
    pub date: NaiveDate,
}

impl Entity for Purchase {
    type Id = PurchaseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Purchase {
    pub fn is_received(&self) -> bool {
        self.status == PurchaseStatus::Received
    }

    /// Move to `next`. Only pending purchases can change.
    pub fn transition(&mut self, next: PurchaseStatus) -> DomainResult<()> {
        match (self.status, next) {
            (current, next) if current == next => Ok(()),
            (PurchaseStatus::Pending, next) => {
                self.status = next;
                Ok(())
            }
            (current, _) => Err(DomainError::conflict(format!("purchase is already {current}"))),
        }
    }
}

/// Purchase form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPurchase {
    pub supplier: String,
    pub material_id: MaterialId,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default = "pending")]
    pub status: PurchaseStatus,
    pub date: NaiveDate,
}

fn pending() -> PurchaseStatus {
    PurchaseStatus::Pending
}

impl NewPurchase {
    pub fn total_price(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        v.min_chars("supplier", &self.supplier, 3)
            .check(self.quantity > 0, "quantity", "must be positive")
            .positive("unit_price", self.unit_price);
        v.finish()
    }

    pub fn into_purchase(self, id: PurchaseId) -> DomainResult<Purchase> {
        self.validate()?;
        let total_price = self.total_price();
        Ok(Purchase {
            id,
            supplier: self.supplier.trim().to_string(),
            material_id: self.material_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price,
            status: self.status,
            date: self.date,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PurchaseFilter {
    #[serde(default)]
    pub status: Option<PurchaseStatus>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub material_id: Option<MaterialId>,
}

impl PurchaseFilter {
    pub fn matches(&self, p: &Purchase) -> bool {
        self.status.is_none_or(|st| p.status == st)
            && self
                .supplier
                .as_deref()
                .is_none_or(|s| s.trim().eq_ignore_ascii_case(&p.supplier))
            && self.material_id.is_none_or(|m| p.material_id == m)
    }
}
