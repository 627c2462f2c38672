use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::{get, put},
    Json, Router,
};

use stonedesk_auth::Section;
use stonedesk_core::{DomainError, SaleId};
use stonedesk_infra::Store;
use stonedesk_reporting::{DashboardSnapshot, Pipeline, SalesSummary};
use stonedesk_sales::{NewSale, SaleFilter, SaleStatus};

use crate::app::dto::{self, MonthQuery, StatusUpdateRequest};
use crate::app::errors;
use crate::app::services::{AppServices, today};
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_sales).post(create_sale))
        .route("/summary", get(sales_summary))
        .route("/:id", get(get_sale))
        .route("/:id/status", put(update_sale_status))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Sales,
            require_section,
        ))
}

/// `?month=` narrows to one calendar month; without it every sale is listed.
pub async fn list_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Query(month): Query<MonthQuery>,
    Query(filter): Query<SaleFilter>,
) -> Response {
    let month = match dto::optional_month(month.month.as_deref()) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let sales = services.repos().sales.list();
    let mut pipeline = Pipeline::new(&sales).filter(|s| filter.matches(s));
    if let Some(month) = month {
        pipeline = pipeline.in_month(month);
    }
    dto::items(&pipeline.into_records())
}

pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewSale>,
) -> Response {
    services.simulate_latency().await;

    let sale = match body.into_sale(SaleId::new()) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.repos().sales.save(sale.clone());

    tracing::info!(
        sale_id = %sale.id,
        client_id = %sale.client_id,
        total_value = sale.total_value,
        "sale recorded"
    );
    dto::submitted(StatusCode::CREATED, &sale, "Sale recorded successfully.")
}

pub async fn get_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: SaleId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repos().sales.get(&id) {
        Some(s) => dto::ok(&s),
        None => errors::not_found("sale"),
    }
}

pub async fn update_sale_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest<SaleStatus>>,
) -> Response {
    let id: SaleId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.repos().sales.contains(&id) {
        return errors::not_found("sale");
    }

    services.simulate_latency().await;

    let sale = match services.repos().sales.update(&id, |s| s.transition(body.status)) {
        Ok(s) => s,
        Err(DomainError::NotFound) => return errors::not_found("sale"),
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(sale_id = %sale.id, status = %sale.status, "sale status changed");
    dto::submitted(StatusCode::OK, &sale, format!("Sale marked as {}.", sale.status))
}

pub async fn sales_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = match dto::month_or_current(query.month.as_deref(), today()) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let sales = services.repos().sales.list();
    let clients = services.repos().clients.list();
    dto::ok(&SalesSummary::for_month(&sales, &clients, month, DashboardSnapshot::TOP_N))
}
