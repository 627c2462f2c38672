//! Demo dataset.
//!
//! Dates are laid out relative to `today` so the current and previous month
//! dashboards always have something to show. Every record goes through its
//! form validation, exactly like an API submission.

use chrono::{Duration, Months, NaiveDate};
use serde::Serialize;

use stonedesk_core::{
    ClientId, DomainResult, MaterialId, PurchaseId, SaleId, TransactionId,
};
use stonedesk_finance::{NewTransaction, TransactionStatus, TransactionType};
use stonedesk_fiscal::{
    GRANITE_BLOCKS, GRANITE_MOSAIC, GRANITE_RAW, MARBLE_WORKED, MaterialType, ProcessingLevel,
    QUARTZITE_RAW, QUARTZITE_WORKED,
};
use stonedesk_inventory::{Dimensions, MaterialSubtype, NewMaterial};
use stonedesk_parties::{Address, Contact, NewClient};
use stonedesk_purchasing::{NewPurchase, PurchaseStatus};
use stonedesk_reporting::MonthWindow;
use stonedesk_sales::{NewSale, SaleStatus};

use crate::repositories::Repositories;

/// How many records of each kind were loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub materials: usize,
    pub clients: usize,
    pub sales: usize,
    pub purchases: usize,
    pub transactions: usize,
}

/// Day `day` of the month `months_back` months before `today`'s month,
/// clamped to that month and to `today`.
fn dated(today: NaiveDate, months_back: u32, day: u32) -> NaiveDate {
    let current = MonthWindow::containing(today).first_day();
    let first = current
        .checked_sub_months(Months::new(months_back))
        .unwrap_or(current);
    let last = MonthWindow::containing(first).last_day();
    let date = first + Duration::days(i64::from(day.saturating_sub(1)));
    date.min(last).min(today)
}

#[allow(clippy::type_complexity)]
const MATERIALS: &[(
    &str,
    MaterialType,
    MaterialSubtype,
    (f64, f64, f64),
    u32,
    f64,
    Option<f64>,
    &str,
    &str,
    Option<&str>,
    ProcessingLevel,
)] = &[
    ("Branco Carrara", MaterialType::Marble, MaterialSubtype::Slab, (3.0, 1.8, 2.0), 24, 1800.0, Some(420.0), "Pedreira Vitoria", "Galpao A - Rack 1", Some(MARBLE_WORKED), ProcessingLevel::Finished),
    ("Preto Sao Gabriel", MaterialType::Granite, MaterialSubtype::Slab, (3.1, 1.9, 2.0), 40, 950.0, Some(280.0), "Granitos Capixaba", "Galpao A - Rack 3", Some(GRANITE_MOSAIC), ProcessingLevel::Finished),
    ("Verde Ubatuba", MaterialType::Granite, MaterialSubtype::Block, (2.8, 1.6, 180.0), 3, 12000.0, None, "Granitos Capixaba", "Patio Externo", Some(GRANITE_RAW), ProcessingLevel::Raw),
    ("Quartzito Taj Mahal", MaterialType::Quartzite, MaterialSubtype::Slab, (3.2, 2.0, 2.0), 12, 3200.0, Some(890.0), "Quartzitos do Norte", "Galpao B", Some(QUARTZITE_WORKED), ProcessingLevel::Finished),
    ("Travertino Romano", MaterialType::Marble, MaterialSubtype::Slab, (2.9, 1.7, 2.0), 4, 1500.0, Some(390.0), "Importadora Mediterranea", "Galpao B", None, ProcessingLevel::SemiFinished),
    ("Branco Itaunas", MaterialType::Granite, MaterialSubtype::Slab, (3.0, 1.9, 2.0), 30, 700.0, Some(210.0), "Granitos Capixaba", "Galpao A - Rack 2", Some(GRANITE_BLOCKS), ProcessingLevel::SemiFinished),
    ("Quartzito Mont Blanc", MaterialType::Quartzite, MaterialSubtype::Block, (3.0, 1.8, 160.0), 2, 15000.0, None, "Quartzitos do Norte", "Patio Externo", Some(QUARTZITE_RAW), ProcessingLevel::Raw),
    ("Nero Marquina", MaterialType::Marble, MaterialSubtype::Slab, (2.8, 1.6, 2.0), 8, 2100.0, Some(510.0), "Importadora Mediterranea", "Galpao B", Some(QUARTZITE_WORKED), ProcessingLevel::Finished),
];

const CLIENTS: &[(&str, &str, &str, &str, &str, &str, &str, &str)] = &[
    ("Marmoraria Horizonte", "11.222.333/0001-81", "Paula Reis", "paula@horizonte.com.br", "(27) 3222-1000", "Av. Central, 100", "Vitoria", "ES"),
    ("Construtora Alicerce", "11.444.777/0001-61", "Marcos Teixeira", "compras@alicerce.com.br", "(11) 4002-8922", "Rua das Obras, 45", "Sao Paulo", "SP"),
    ("Revestir Interiores", "27.481.593/0001-01", "Helena Castro", "helena@revestir.com.br", "(21) 2555-0101", "Rua do Catete, 310", "Rio de Janeiro", "RJ"),
    ("Pedra Nobre Arquitetura", "03.956.124/0001-33", "Rafael Nunes", "rafael@pedranobre.com.br", "(31) 3333-7788", "Av. Afonso Pena, 1500", "Belo Horizonte", "MG"),
];

/// (client, material, quantity, unit price, status, months back, day)
const SALES: &[(usize, usize, u32, f64, SaleStatus, u32, u32)] = &[
    (0, 0, 6, 2268.0, SaleStatus::Completed, 0, 2),
    (1, 1, 10, 1649.2, SaleStatus::Completed, 0, 5),
    (2, 3, 2, 5696.0, SaleStatus::Pending, 0, 8),
    (3, 5, 8, 1197.0, SaleStatus::Pending, 0, 12),
    (1, 2, 1, 15500.0, SaleStatus::Cancelled, 0, 14),
    (0, 7, 3, 2284.8, SaleStatus::Completed, 1, 3),
    (2, 0, 4, 2268.0, SaleStatus::Completed, 1, 17),
    (3, 1, 12, 1649.2, SaleStatus::Completed, 1, 28),
    (1, 3, 1, 5696.0, SaleStatus::Completed, 2, 9),
];

/// (supplier, material, quantity, unit price, status, months back, day)
const PURCHASES: &[(&str, usize, u32, f64, PurchaseStatus, u32, u32)] = &[
    ("Pedreira Vitoria", 0, 10, 1800.0, PurchaseStatus::Received, 0, 1),
    ("Granitos Capixaba", 1, 20, 950.0, PurchaseStatus::Pending, 0, 6),
    ("Quartzitos do Norte", 6, 1, 15000.0, PurchaseStatus::Pending, 0, 10),
    ("Importadora Mediterranea", 4, 6, 1500.0, PurchaseStatus::Cancelled, 1, 4),
    ("Granitos Capixaba", 5, 15, 700.0, PurchaseStatus::Received, 1, 20),
    ("Quartzitos do Norte", 3, 6, 3200.0, PurchaseStatus::Received, 2, 11),
];

/// (type, amount, status, category, description, months back, day)
const TRANSACTIONS: &[(TransactionType, f64, TransactionStatus, &str, &str, u32, u32)] = &[
    (TransactionType::Income, 13608.0, TransactionStatus::Completed, "Vendas", "Chapas Branco Carrara", 0, 2),
    (TransactionType::Income, 16492.0, TransactionStatus::Completed, "Vendas", "Chapas Preto Sao Gabriel", 0, 5),
    (TransactionType::Income, 11392.0, TransactionStatus::Pending, "Vendas", "Quartzito Taj Mahal", 0, 8),
    (TransactionType::Expense, 18000.0, TransactionStatus::Completed, "Compra de material", "Lote Branco Carrara", 0, 1),
    (TransactionType::Expense, 4200.0, TransactionStatus::Completed, "Frete", "Transporte Cachoeiro - Vitoria", 0, 3),
    (TransactionType::Expense, 19000.0, TransactionStatus::Pending, "Compra de material", "Lote Preto Sao Gabriel", 0, 6),
    (TransactionType::Expense, 8500.0, TransactionStatus::Completed, "Folha de pagamento", "Equipe do galpao", 0, 5),
    (TransactionType::Expense, 2300.0, TransactionStatus::Pending, "Manutencao", "Ponte rolante", 0, 15),
    (TransactionType::Income, 6854.4, TransactionStatus::Completed, "Vendas", "Nero Marquina", 1, 3),
    (TransactionType::Income, 9072.0, TransactionStatus::Completed, "Vendas", "Branco Carrara", 1, 17),
    (TransactionType::Expense, 10500.0, TransactionStatus::Completed, "Compra de material", "Lote Branco Itaunas", 1, 20),
    (TransactionType::Expense, 8500.0, TransactionStatus::Completed, "Folha de pagamento", "Equipe do galpao", 1, 5),
];

/// Load the demo dataset into `repos`, replacing whatever was there.
pub fn seed_demo_data(repos: &Repositories, today: NaiveDate) -> DomainResult<SeedReport> {
    repos.clear();

    let mut material_ids = Vec::with_capacity(MATERIALS.len());
    for (i, row) in MATERIALS.iter().enumerate() {
        let (name, material_type, subtype, (width, height, thickness), quantity, purchase_price, ppsm, supplier, location, ncm, level) = *row;
        let material = NewMaterial {
            name: name.to_string(),
            material_type,
            subtype,
            dimensions: Dimensions { width, height, thickness },
            quantity,
            purchase_price,
            price_per_square_meter: ppsm,
            supplier: supplier.to_string(),
            location: location.to_string(),
            ncm_code: ncm.map(str::to_string),
            processing_level: level,
            entry_date: dated(today, 3, 1 + (i as u32) * 3),
        }
        .into_material(MaterialId::new())?;
        material_ids.push(material.id);
        repos.materials.save(material);
    }

    let mut client_ids = Vec::with_capacity(CLIENTS.len());
    for &(company, cnpj, contact, email, phone, street, city, state) in CLIENTS {
        let client = NewClient {
            company_name: company.to_string(),
            cnpj: cnpj.to_string(),
            contact: Contact {
                name: contact.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
            },
            address: Address {
                street: street.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                zip_code: "00000-000".to_string(),
            },
        }
        .into_client(ClientId::new())?;
        client_ids.push(client.id);
        repos.clients.save(client);
    }

    for &(client, material, quantity, unit_price, status, back, day) in SALES {
        let sale = NewSale {
            client_id: client_ids[client],
            material_id: material_ids[material],
            quantity,
            unit_price,
            status,
            date: dated(today, back, day),
        }
        .into_sale(SaleId::new())?;
        repos.sales.save(sale);
    }

    for &(supplier, material, quantity, unit_price, status, back, day) in PURCHASES {
        let purchase = NewPurchase {
            supplier: supplier.to_string(),
            material_id: material_ids[material],
            quantity,
            unit_price,
            status,
            date: dated(today, back, day),
        }
        .into_purchase(PurchaseId::new())?;
        repos.purchases.save(purchase);
    }

    for &(transaction_type, amount, status, category, description, back, day) in TRANSACTIONS {
        let transaction = NewTransaction {
            transaction_type,
            amount,
            date: dated(today, back, day),
            status,
            category: category.to_string(),
            description: description.to_string(),
            client_id: None,
            material_id: None,
        }
        .into_transaction(TransactionId::new())?;
        repos.transactions.save(transaction);
    }

    let report = SeedReport {
        materials: MATERIALS.len(),
        clients: CLIENTS.len(),
        sales: SALES.len(),
        purchases: PURCHASES.len(),
        transactions: TRANSACTIONS.len(),
    };
    tracing::info!(?report, "demo dataset loaded");
    Ok(report)
}
