//! Dashboard summaries built on [`Pipeline`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use stonedesk_core::{ClientId, MaterialId};
use stonedesk_finance::{Transaction, TransactionStatus, TransactionType};
use stonedesk_fiscal::MaterialType;
use stonedesk_inventory::Material;
use stonedesk_parties::Client;
use stonedesk_purchasing::{Purchase, PurchaseStatus};
use stonedesk_sales::{Sale, SaleStatus};

use crate::period::MonthWindow;
use crate::pipeline::{GroupTotal, Pipeline};

/// Stock-wide inventory figures (not period bound).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub material_count: usize,
    pub total_quantity: u64,
    /// m², all pieces.
    pub total_area: f64,
    pub total_stock_value: f64,
    /// Stock value per stone family.
    pub by_type: BTreeMap<MaterialType, GroupTotal>,
    pub low_stock_threshold: u32,
    pub low_stock: Vec<LowStockItem>,
    pub top_by_value: Vec<RankedMaterial>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockItem {
    pub id: MaterialId,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMaterial {
    pub id: MaterialId,
    pub name: String,
    pub stock_value: f64,
}

impl InventorySummary {
    pub fn from_materials(materials: &[Material], low_stock_threshold: u32, top_n: usize) -> Self {
        let all = Pipeline::new(materials);

        let low_stock = all
            .clone()
            .filter(|m| m.is_low_stock(low_stock_threshold))
            .records()
            .iter()
            .map(|m| LowStockItem {
                id: m.id,
                name: m.name.clone(),
                quantity: m.quantity,
            })
            .collect();

        let top_by_value = all
            .top_n(top_n, Material::stock_value)
            .into_iter()
            .map(|m| RankedMaterial {
                id: m.id,
                name: m.name.clone(),
                stock_value: m.stock_value(),
            })
            .collect();

        Self {
            material_count: all.count(),
            total_quantity: all.records().iter().map(|m| u64::from(m.quantity)).sum(),
            total_area: all.sum_by(Material::total_area),
            total_stock_value: all.sum_by(Material::stock_value),
            by_type: all.group_by(|m| m.material_type, Material::stock_value),
            low_stock_threshold,
            low_stock,
            top_by_value,
        }
    }
}

/// Income and expenses for one month.
///
/// Income and expense totals count completed transactions only; pending
/// amounts are reported on their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub month: MonthWindow,
    pub transaction_count: usize,
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
    pub pending_income: f64,
    pub pending_expenses: f64,
    pub income_by_category: BTreeMap<String, GroupTotal>,
    pub expenses_by_category: BTreeMap<String, GroupTotal>,
}

impl FinancialSummary {
    pub fn for_month(transactions: &[Transaction], month: MonthWindow) -> Self {
        let in_month = Pipeline::new(transactions).in_month(month);

        let slice = |ty: TransactionType, status: TransactionStatus| {
            in_month
                .clone()
                .filter(move |t| t.transaction_type == ty && t.status == status)
        };

        let income = slice(TransactionType::Income, TransactionStatus::Completed);
        let expenses = slice(TransactionType::Expense, TransactionStatus::Completed);
        let amount = |t: &Transaction| t.amount;
        let category = |t: &Transaction| t.category.clone();

        let income_total = income.sum_by(amount);
        let expenses_total = expenses.sum_by(amount);

        Self {
            month,
            transaction_count: in_month.count(),
            income: income_total,
            expenses: expenses_total,
            balance: income_total - expenses_total,
            pending_income: slice(TransactionType::Income, TransactionStatus::Pending).sum_by(amount),
            pending_expenses: slice(TransactionType::Expense, TransactionStatus::Pending)
                .sum_by(amount),
            income_by_category: income.group_by(category, amount),
            expenses_by_category: expenses.group_by(category, amount),
        }
    }
}

/// Sales for one month. Cancelled sales are counted but carry no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesSummary {
    pub month: MonthWindow,
    pub count: usize,
    /// Pending plus completed.
    pub total_value: f64,
    pub completed_value: f64,
    pub by_status: BTreeMap<SaleStatus, GroupTotal>,
    /// Value per day, non-cancelled sales.
    pub by_day: BTreeMap<NaiveDate, GroupTotal>,
    pub top_clients: Vec<ClientRanking>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientRanking {
    pub client_id: ClientId,
    /// `None` when the client record no longer exists.
    pub company_name: Option<String>,
    pub sales: usize,
    pub total_value: f64,
}

impl SalesSummary {
    pub fn for_month(sales: &[Sale], clients: &[Client], month: MonthWindow, top_n: usize) -> Self {
        let in_month = Pipeline::new(sales).in_month(month);
        let live = in_month.clone().filter(|s| s.status != SaleStatus::Cancelled);
        let value = |s: &Sale| s.total_value;

        let mut ranking: Vec<(ClientId, GroupTotal)> =
            live.group_by(|s| s.client_id, value).into_iter().collect();
        // BTreeMap order (by id) breaks ties deterministically.
        ranking.sort_by(|(_, a), (_, b)| b.total.total_cmp(&a.total));
        ranking.truncate(top_n);

        let top_clients = ranking
            .into_iter()
            .map(|(client_id, total)| ClientRanking {
                client_id,
                company_name: clients
                    .iter()
                    .find(|c| c.id == client_id)
                    .map(|c| c.company_name.clone()),
                sales: total.count,
                total_value: total.total,
            })
            .collect();

        Self {
            month,
            count: in_month.count(),
            total_value: live.sum_by(value),
            completed_value: live.clone().filter(Sale::is_completed).sum_by(value),
            by_status: in_month.group_by(|s| s.status, value),
            by_day: live.group_by(|s| s.date, value),
            top_clients,
        }
    }
}

/// Purchases for one month. Cancelled purchases carry no value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseSummary {
    pub month: MonthWindow,
    pub count: usize,
    pub total_price: f64,
    pub received_value: f64,
    pub by_status: BTreeMap<PurchaseStatus, GroupTotal>,
    pub by_supplier: BTreeMap<String, GroupTotal>,
}

impl PurchaseSummary {
    pub fn for_month(purchases: &[Purchase], month: MonthWindow) -> Self {
        let in_month = Pipeline::new(purchases).in_month(month);
        let live = in_month
            .clone()
            .filter(|p| p.status != PurchaseStatus::Cancelled);
        let price = |p: &Purchase| p.total_price;

        Self {
            month,
            count: in_month.count(),
            total_price: live.sum_by(price),
            received_value: live.clone().filter(Purchase::is_received).sum_by(price),
            by_status: in_month.group_by(|p| p.status, price),
            by_supplier: live.group_by(|p| p.supplier.clone(), price),
        }
    }
}

/// Everything the dashboard home shows for one month.
///
/// Financial and purchase figures are only filled in for viewers allowed to
/// see those sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub month: MonthWindow,
    pub client_count: usize,
    pub inventory: InventorySummary,
    pub sales: SalesSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial: Option<FinancialSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchases: Option<PurchaseSummary>,
}

/// Records a snapshot is computed from.
#[derive(Debug, Clone, Copy)]
pub struct DashboardData<'a> {
    pub materials: &'a [Material],
    pub clients: &'a [Client],
    pub sales: &'a [Sale],
    pub purchases: &'a [Purchase],
    pub transactions: &'a [Transaction],
}

impl DashboardSnapshot {
    pub const TOP_N: usize = 5;

    pub fn build(
        data: DashboardData<'_>,
        month: MonthWindow,
        low_stock_threshold: u32,
        include_management: bool,
    ) -> Self {
        Self {
            month,
            client_count: data.clients.len(),
            inventory: InventorySummary::from_materials(
                data.materials,
                low_stock_threshold,
                Self::TOP_N,
            ),
            sales: SalesSummary::for_month(data.sales, data.clients, month, Self::TOP_N),
            financial: include_management
                .then(|| FinancialSummary::for_month(data.transactions, month)),
            purchases: include_management.then(|| PurchaseSummary::for_month(data.purchases, month)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stonedesk_core::{PurchaseId, SaleId, TransactionId};
    use stonedesk_fiscal::ProcessingLevel;
    use stonedesk_inventory::{Dimensions, MaterialSubtype};
    use stonedesk_parties::{Address, Contact};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn may() -> MonthWindow {
        MonthWindow::parse("2024-05").unwrap()
    }

    fn material(name: &str, material_type: MaterialType, quantity: u32, ppsm: Option<f64>) -> Material {
        Material {
            id: MaterialId::new(),
            name: name.to_string(),
            material_type,
            subtype: MaterialSubtype::Slab,
            dimensions: Dimensions {
                width: 2.0,
                height: 1.5,
                thickness: 2.0,
            },
            quantity,
            purchase_price: 100.0,
            price_per_square_meter: ppsm,
            supplier: "Pedreira".to_string(),
            location: "A1".to_string(),
            ncm_code: None,
            processing_level: ProcessingLevel::Finished,
            entry_date: d(2024, 1, 10),
        }
    }

    fn transaction(
        ty: TransactionType,
        status: TransactionStatus,
        amount: f64,
        category: &str,
        date: NaiveDate,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            transaction_type: ty,
            amount,
            date,
            status,
            category: category.to_string(),
            description: String::new(),
            client_id: None,
            material_id: None,
        }
    }

    fn sale(client_id: ClientId, total: f64, status: SaleStatus, date: NaiveDate) -> Sale {
        Sale {
            id: SaleId::new(),
            client_id,
            material_id: MaterialId::new(),
            quantity: 1,
            unit_price: total,
            total_value: total,
            status,
            date,
        }
    }

    fn client(name: &str) -> Client {
        Client {
            id: ClientId::new(),
            company_name: name.to_string(),
            cnpj: "11.222.333/0001-81".to_string(),
            contact: Contact {
                name: "Contact".to_string(),
                email: "c@example.com".to_string(),
                phone: "123".to_string(),
            },
            address: Address {
                street: "Rua 1".to_string(),
                city: "Vitoria".to_string(),
                state: "ES".to_string(),
                zip_code: "29000-000".to_string(),
            },
        }
    }

    #[test]
    fn inventory_totals_and_low_stock() {
        let materials = vec![
            material("Carrara", MaterialType::Marble, 10, Some(200.0)),
            material("Preto Sao Gabriel", MaterialType::Granite, 2, None),
        ];
        let s = InventorySummary::from_materials(&materials, 5, 1);

        assert_eq!(s.material_count, 2);
        assert_eq!(s.total_quantity, 12);
        assert_eq!(s.total_area, 36.0);
        // 200 × 3 × 10 + 100 × 3 × 2
        assert_eq!(s.total_stock_value, 6600.0);
        assert_eq!(s.by_type[&MaterialType::Granite].total, 600.0);
        assert_eq!(s.low_stock.len(), 1);
        assert_eq!(s.low_stock[0].name, "Preto Sao Gabriel");
        assert_eq!(s.top_by_value.len(), 1);
        assert_eq!(s.top_by_value[0].name, "Carrara");
    }

    #[test]
    fn financial_totals_count_completed_only() {
        use TransactionStatus::*;
        use TransactionType::*;

        let txs = vec![
            transaction(Income, Completed, 1000.0, "Vendas", d(2024, 5, 1)),
            transaction(Income, Pending, 400.0, "Vendas", d(2024, 5, 20)),
            transaction(Expense, Completed, 250.0, "Frete", d(2024, 5, 31)),
            transaction(Expense, Pending, 50.0, "Frete", d(2024, 5, 2)),
            transaction(Income, Completed, 9999.0, "Vendas", d(2024, 6, 1)),
        ];
        let s = FinancialSummary::for_month(&txs, may());

        assert_eq!(s.transaction_count, 4);
        assert_eq!(s.income, 1000.0);
        assert_eq!(s.expenses, 250.0);
        assert_eq!(s.balance, 750.0);
        assert_eq!(s.pending_income, 400.0);
        assert_eq!(s.pending_expenses, 50.0);
        assert_eq!(s.income_by_category["Vendas"], GroupTotal { count: 1, total: 1000.0 });
        assert_eq!(s.expenses_by_category["Frete"].total, 250.0);
    }

    #[test]
    fn sales_summary_ranks_clients_and_ignores_cancelled_value() {
        let acme = client("Acme Pedras");
        let beta = client("Beta Revestimentos");
        let sales = vec![
            sale(acme.id, 500.0, SaleStatus::Completed, d(2024, 5, 3)),
            sale(beta.id, 800.0, SaleStatus::Pending, d(2024, 5, 3)),
            sale(acme.id, 600.0, SaleStatus::Completed, d(2024, 5, 10)),
            sale(beta.id, 5000.0, SaleStatus::Cancelled, d(2024, 5, 11)),
            sale(beta.id, 7000.0, SaleStatus::Completed, d(2024, 4, 30)),
        ];
        let s = SalesSummary::for_month(&sales, &[acme.clone(), beta.clone()], may(), 5);

        assert_eq!(s.count, 4);
        assert_eq!(s.total_value, 1900.0);
        assert_eq!(s.completed_value, 1100.0);
        assert_eq!(s.by_status[&SaleStatus::Cancelled].count, 1);
        assert_eq!(s.by_day[&d(2024, 5, 3)].total, 1300.0);

        assert_eq!(s.top_clients[0].client_id, acme.id);
        assert_eq!(s.top_clients[0].company_name.as_deref(), Some("Acme Pedras"));
        assert_eq!(s.top_clients[0].total_value, 1100.0);
        assert_eq!(s.top_clients[1].total_value, 800.0);
    }

    #[test]
    fn purchase_summary_groups_by_supplier() {
        let purchase = |supplier: &str, total: f64, status| Purchase {
            id: PurchaseId::new(),
            supplier: supplier.to_string(),
            material_id: MaterialId::new(),
            quantity: 1,
            unit_price: total,
            total_price: total,
            status,
            date: d(2024, 5, 15),
        };
        let purchases = vec![
            purchase("Pedreira Norte", 300.0, PurchaseStatus::Received),
            purchase("Pedreira Norte", 200.0, PurchaseStatus::Pending),
            purchase("Granitos Sul", 900.0, PurchaseStatus::Cancelled),
        ];
        let s = PurchaseSummary::for_month(&purchases, may());

        assert_eq!(s.count, 3);
        assert_eq!(s.total_price, 500.0);
        assert_eq!(s.received_value, 300.0);
        assert_eq!(s.by_supplier["Pedreira Norte"].count, 2);
        assert!(!s.by_supplier.contains_key("Granitos Sul"));
    }

    #[test]
    fn snapshot_hides_management_figures() {
        let data = DashboardData {
            materials: &[],
            clients: &[],
            sales: &[],
            purchases: &[],
            transactions: &[],
        };
        let operator_view = DashboardSnapshot::build(data, may(), 5, false);
        assert!(operator_view.financial.is_none());
        let json = serde_json::to_value(&operator_view).unwrap();
        assert!(json.get("financial").is_none());
        assert_eq!(json["month"], "2024-05");

        let manager_view = DashboardSnapshot::build(data, may(), 5, true);
        assert_eq!(manager_view.financial.unwrap().balance, 0.0);
        assert_eq!(manager_view.purchases.unwrap().count, 0);
    }
}
