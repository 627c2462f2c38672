use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, NaiveDate};
use stonedesk_core::{ClientId, MaterialId, SaleId, TransactionId};
use stonedesk_finance::{Transaction, TransactionStatus, TransactionType};
use stonedesk_reporting::{FinancialSummary, MonthWindow, Pipeline, SalesSummary};
use stonedesk_sales::{Sale, SaleStatus};

fn sales(n: usize, clients: &[ClientId]) -> Vec<Sale> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..n)
        .map(|i| Sale {
            id: SaleId::new(),
            client_id: clients[i % clients.len()],
            material_id: MaterialId::new(),
            quantity: (i % 7 + 1) as u32,
            unit_price: 150.0 + (i % 13) as f64 * 10.0,
            total_value: (i % 7 + 1) as f64 * (150.0 + (i % 13) as f64 * 10.0),
            status: match i % 5 {
                0 => SaleStatus::Cancelled,
                1 | 2 => SaleStatus::Pending,
                _ => SaleStatus::Completed,
            },
            date: base + Duration::days((i % 730) as i64),
        })
        .collect()
}

fn transactions(n: usize) -> Vec<Transaction> {
    let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..n)
        .map(|i| Transaction {
            id: TransactionId::new(),
            transaction_type: if i % 3 == 0 {
                TransactionType::Expense
            } else {
                TransactionType::Income
            },
            amount: 100.0 + (i % 50) as f64,
            date: base + Duration::days((i % 730) as i64),
            status: if i % 4 == 0 {
                TransactionStatus::Pending
            } else {
                TransactionStatus::Completed
            },
            category: format!("cat-{}", i % 8),
            description: String::new(),
            client_id: None,
            material_id: None,
        })
        .collect()
}

fn bench_month_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_month_filter");
    let month = MonthWindow::parse("2023-06").unwrap();
    let clients: Vec<ClientId> = (0..20).map(|_| ClientId::new()).collect();

    for size in [1_000usize, 10_000, 100_000] {
        let data = sales(size, &clients);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let p = Pipeline::new(black_box(data)).in_month(month);
                black_box((p.count(), p.sum_by(|s| s.total_value)))
            })
        });
    }
    group.finish();
}

fn bench_summaries(c: &mut Criterion) {
    let month = MonthWindow::parse("2023-06").unwrap();
    let clients: Vec<ClientId> = (0..20).map(|_| ClientId::new()).collect();
    let sale_data = sales(50_000, &clients);
    let tx_data = transactions(50_000);

    c.bench_function("sales_summary_50k", |b| {
        b.iter(|| SalesSummary::for_month(black_box(&sale_data), &[], month, 5))
    });
    c.bench_function("financial_summary_50k", |b| {
        b.iter(|| FinancialSummary::for_month(black_box(&tx_data), month))
    });
}

criterion_group!(benches, bench_month_filter, bench_summaries);
criterion_main!(benches);
