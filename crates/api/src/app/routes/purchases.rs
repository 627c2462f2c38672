use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::{get, put},
    Json, Router,
};

use stonedesk_auth::Section;
use stonedesk_core::{DomainError, PurchaseId};
use stonedesk_infra::Store;
use stonedesk_purchasing::{NewPurchase, PurchaseFilter, PurchaseStatus};
use stonedesk_reporting::{Pipeline, PurchaseSummary};

use crate::app::dto::{self, MonthQuery, StatusUpdateRequest};
use crate::app::errors;
use crate::app::services::{AppServices, today};
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_purchases).post(create_purchase))
        .route("/summary", get(purchase_summary))
        .route("/:id", get(get_purchase))
        .route("/:id/status", put(update_purchase_status))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Purchases,
            require_section,
        ))
}

pub async fn list_purchases(
    Extension(services): Extension<Arc<AppServices>>,
    Query(month): Query<MonthQuery>,
    Query(filter): Query<PurchaseFilter>,
) -> Response {
    let month = match dto::optional_month(month.month.as_deref()) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let purchases = services.repos().purchases.list();
    let mut pipeline = Pipeline::new(&purchases).filter(|p| filter.matches(p));
    if let Some(month) = month {
        pipeline = pipeline.in_month(month);
    }
    dto::items(&pipeline.into_records())
}

pub async fn create_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewPurchase>,
) -> Response {
    services.simulate_latency().await;

    let purchase = match body.into_purchase(PurchaseId::new()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.repos().purchases.save(purchase.clone());

    tracing::info!(
        purchase_id = %purchase.id,
        supplier = %purchase.supplier,
        total_price = purchase.total_price,
        "purchase recorded"
    );
    dto::submitted(StatusCode::CREATED, &purchase, "Purchase recorded successfully.")
}

pub async fn get_purchase(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: PurchaseId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repos().purchases.get(&id) {
        Some(p) => dto::ok(&p),
        None => errors::not_found("purchase"),
    }
}

pub async fn update_purchase_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest<PurchaseStatus>>,
) -> Response {
    let id: PurchaseId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.repos().purchases.contains(&id) {
        return errors::not_found("purchase");
    }

    services.simulate_latency().await;

    let purchase = match services
        .repos()
        .purchases
        .update(&id, |p| p.transition(body.status))
    {
        Ok(p) => p,
        Err(DomainError::NotFound) => return errors::not_found("purchase"),
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(purchase_id = %purchase.id, status = %purchase.status, "purchase status changed");
    dto::submitted(
        StatusCode::OK,
        &purchase,
        format!("Purchase marked as {}.", purchase.status),
    )
}

pub async fn purchase_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = match dto::month_or_current(query.month.as_deref(), today()) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let purchases = services.repos().purchases.list();
    dto::ok(&PurchaseSummary::for_month(&purchases, month))
}
