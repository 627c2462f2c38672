use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stonedesk_core::{ClientId, DomainError, DomainResult, Entity, MaterialId, SaleId, Validator};

/// Sale status lifecycle: `pending` moves to `completed` or `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

impl SaleStatus {
    pub const ALL: [SaleStatus; 3] = [SaleStatus::Pending, SaleStatus::Completed, SaleStatus::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, SaleStatus::Pending)
    }
}

impl core::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SaleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SaleStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown sale status '{s}'"))
    }
}

/// A sale of one material to one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub client_id: ClientId,
    pub material_id: MaterialId,
    pub quantity: u32,
    pub unit_price: f64,
    /// `quantity × unit_price`, fixed when the sale is recorded.
    pub total_value: f64,
    pub status: SaleStatus,
    pub date: NaiveDate,
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Sale {
    pub fn is_completed(&self) -> bool {
        self.status == SaleStatus::Completed
    }

    /// Move to `next`. Completed and cancelled sales are final.
    pub fn transition(&mut self, next: SaleStatus) -> DomainResult<()> {
        if self.status == next {
            return Ok(());
        }
        if self.status.is_terminal() {
            return Err(DomainError::conflict(format!(
                "sale is already {}",
                self.status
            )));
        }
        self.status = next;
        Ok(())
    }
}

/// Sale form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub client_id: ClientId,
    pub material_id: MaterialId,
    pub quantity: u32,
    pub unit_price: f64,
    #[serde(default = "pending")]
    pub status: SaleStatus,
    pub date: NaiveDate,
}

fn pending() -> SaleStatus {
    SaleStatus::Pending
}

impl NewSale {
    pub fn total_value(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        v.check(self.quantity > 0, "quantity", "must be positive")
            .positive("unit_price", self.unit_price);
        v.finish()
    }

    pub fn into_sale(self, id: SaleId) -> DomainResult<Sale> {
        self.validate()?;
        Ok(Sale {
            id,
            client_id: self.client_id,
            material_id: self.material_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_value: self.total_value(),
            status: self.status,
            date: self.date,
        })
    }
}

/// Non-date list filter; month windows are applied by the reporting pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SaleFilter {
    #[serde(default)]
    pub status: Option<SaleStatus>,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub material_id: Option<MaterialId>,
}

impl SaleFilter {
    pub fn matches(&self, s: &Sale) -> bool {
        self.status.is_none_or(|st| s.status == st)
            && self.client_id.is_none_or(|c| s.client_id == c)
            && self.material_id.is_none_or(|m| s.material_id == m)
    }
}
