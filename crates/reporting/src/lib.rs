//! Reporting: filter-and-reduce over in-memory records.
//!
//! A small generic [`Pipeline`] (date window, predicates, count, sum, top-N,
//! group-by) and the dashboard summaries built on it. Everything here is pure
//! and synchronous; running a report twice over the same records gives the
//! same result. Amounts are never rounded here.

pub mod fiscal_report;
pub mod period;
pub mod pipeline;
pub mod summary;

pub use fiscal_report::{FiscalReport, MaterialRef, NcmGroup};
pub use period::{DateRange, MonthWindow};
pub use pipeline::{Dated, GroupTotal, Pipeline};
pub use summary::{
    ClientRanking, DashboardData, DashboardSnapshot, FinancialSummary, InventorySummary, LowStockItem,
    PurchaseSummary, RankedMaterial, SalesSummary,
};
