use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stonedesk_core::{
    ClientId, DomainError, DomainResult, Entity, MaterialId, TransactionId, Validator,
};

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// `+1` for income, `-1` for expense.
    pub fn sign(self) -> f64 {
        match self {
            TransactionType::Income => 1.0,
            TransactionType::Expense => -1.0,
        }
    }
}

impl core::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
        }
    }
}

impl core::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Always positive; direction comes from `transaction_type`.
    pub amount: f64,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<MaterialId>,
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Amount with the direction applied (expenses negative).
    pub fn signed_amount(&self) -> f64 {
        self.transaction_type.sign() * self.amount
    }

    /// Settle a pending transaction. Settled transactions cannot be reopened.
    pub fn set_status(&mut self, next: TransactionStatus) -> DomainResult<()> {
        match (self.status, next) {
            (TransactionStatus::Completed, TransactionStatus::Pending) => Err(
                DomainError::conflict("completed transactions cannot be reopened"),
            ),
            _ => {
                self.status = next;
                Ok(())
            }
        }
    }
}

/// Transaction form input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default = "pending")]
    pub status: TransactionStatus,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub material_id: Option<MaterialId>,
}

fn pending() -> TransactionStatus {
    TransactionStatus::Pending
}

impl NewTransaction {
    pub fn validate(&self) -> DomainResult<()> {
        let mut v = Validator::new();
        v.positive("amount", self.amount)
            .min_chars("category", &self.category, 3);
        v.finish()
    }

    pub fn into_transaction(self, id: TransactionId) -> DomainResult<Transaction> {
        self.validate()?;
        Ok(Transaction {
            id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            date: self.date,
            status: self.status,
            category: self.category.trim().to_string(),
            description: self.description.trim().to_string(),
            client_id: self.client_id,
            material_id: self.material_id,
        })
    }
}

/// Non-date list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionFilter {
    #[serde(default, rename = "type")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        self.transaction_type.is_none_or(|ty| t.transaction_type == ty)
            && self.status.is_none_or(|st| t.status == st)
            && self
                .category
                .as_deref()
                .is_none_or(|c| c.trim().eq_ignore_ascii_case(&t.category))
    }
}
