//! The dashboard's record stores, bundled.

use std::sync::Arc;

use stonedesk_core::{ClientId, MaterialId, PurchaseId, SaleId, TransactionId};
use stonedesk_finance::Transaction;
use stonedesk_inventory::Material;
use stonedesk_parties::Client;
use stonedesk_purchasing::Purchase;
use stonedesk_reporting::DashboardData;
use stonedesk_sales::Sale;

use crate::store::{InMemoryStore, Store};

/// Shared handles to every record store.
#[derive(Debug, Clone, Default)]
pub struct Repositories {
    pub materials: Arc<InMemoryStore<MaterialId, Material>>,
    pub clients: Arc<InMemoryStore<ClientId, Client>>,
    pub sales: Arc<InMemoryStore<SaleId, Sale>>,
    pub purchases: Arc<InMemoryStore<PurchaseId, Purchase>>,
    pub transactions: Arc<InMemoryStore<TransactionId, Transaction>>,
}

impl Repositories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time copy of every store, for reports.
    pub fn snapshot(&self) -> RecordSet {
        RecordSet {
            materials: self.materials.list(),
            clients: self.clients.list(),
            sales: self.sales.list(),
            purchases: self.purchases.list(),
            transactions: self.transactions.list(),
        }
    }

    pub fn clear(&self) {
        self.materials.clear();
        self.clients.clear();
        self.sales.clear();
        self.purchases.clear();
        self.transactions.clear();
    }
}

/// Owned copy of all records.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub materials: Vec<Material>,
    pub clients: Vec<Client>,
    pub sales: Vec<Sale>,
    pub purchases: Vec<Purchase>,
    pub transactions: Vec<Transaction>,
}

impl RecordSet {
    pub fn as_dashboard_data(&self) -> DashboardData<'_> {
        DashboardData {
            materials: &self.materials,
            clients: &self.clients,
            sales: &self.sales,
            purchases: &self.purchases,
            transactions: &self.transactions,
        }
    }
}
