use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::{delete, get, put},
    Json, Router,
};

use stonedesk_auth::Section;
use stonedesk_core::{DomainError, TransactionId};
use stonedesk_finance::{NewTransaction, TransactionFilter, TransactionStatus};
use stonedesk_infra::Store;
use stonedesk_reporting::{FinancialSummary, Pipeline};

use crate::app::dto::{self, MonthQuery, StatusUpdateRequest};
use crate::app::errors;
use crate::app::services::{AppServices, today};
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/summary", get(financial_summary))
        .route("/:id", delete(delete_transaction))
        .route("/:id/status", put(update_transaction_status))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Financial,
            require_section,
        ))
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Query(month): Query<MonthQuery>,
    Query(filter): Query<TransactionFilter>,
) -> Response {
    let month = match dto::optional_month(month.month.as_deref()) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let transactions = services.repos().transactions.list();
    let mut pipeline = Pipeline::new(&transactions).filter(|t| filter.matches(t));
    if let Some(month) = month {
        pipeline = pipeline.in_month(month);
    }
    dto::items(&pipeline.into_records())
}

pub async fn create_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewTransaction>,
) -> Response {
    services.simulate_latency().await;

    let transaction = match body.into_transaction(TransactionId::new()) {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.repos().transactions.save(transaction.clone());

    tracing::info!(
        transaction_id = %transaction.id,
        kind = %transaction.transaction_type,
        amount = transaction.amount,
        "transaction recorded"
    );
    dto::submitted(
        StatusCode::CREATED,
        &transaction,
        "Transaction recorded successfully.",
    )
}

pub async fn update_transaction_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateRequest<TransactionStatus>>,
) -> Response {
    let id: TransactionId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.repos().transactions.contains(&id) {
        return errors::not_found("transaction");
    }

    services.simulate_latency().await;

    let transaction = match services
        .repos()
        .transactions
        .update(&id, |t| t.set_status(body.status))
    {
        Ok(t) => t,
        Err(DomainError::NotFound) => return errors::not_found("transaction"),
        Err(e) => return errors::domain_error_to_response(e),
    };

    tracing::info!(
        transaction_id = %transaction.id,
        status = %transaction.status,
        "transaction status changed"
    );
    dto::submitted(
        StatusCode::OK,
        &transaction,
        format!("Transaction marked as {}.", transaction.status),
    )
}

pub async fn delete_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: TransactionId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repos().transactions.remove(&id) {
        Some(t) => {
            tracing::info!(transaction_id = %t.id, "transaction deleted");
            dto::message("Transaction removed.")
        }
        None => errors::not_found("transaction"),
    }
}

pub async fn financial_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = match dto::month_or_current(query.month.as_deref(), today()) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let transactions = services.repos().transactions.list();
    dto::ok(&FinancialSummary::for_month(&transactions, month))
}
