use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;

use stonedesk_auth::Section;
use stonedesk_fiscal::{
    MaterialType, ProcessingLevel, catalog, describe_ncm, normalize_ncm, suggest_ncm,
    validate_ncm_format,
};
use stonedesk_infra::Store;
use stonedesk_reporting::FiscalReport;

use crate::app::dto;
use crate::app::services::AppServices;
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/ncm/suggest", get(suggest))
        .route("/ncm/validate", get(validate))
        .route("/ncm/catalog", get(list_catalog))
        .route("/report", get(report))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Fiscal,
            require_section,
        ))
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(rename = "type")]
    pub material_type: MaterialType,
    pub processing: ProcessingLevel,
}

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    #[serde(default)]
    pub code: String,
}

pub async fn suggest(Query(query): Query<SuggestQuery>) -> Response {
    let code = suggest_ncm(query.material_type, query.processing);
    dto::ok(&serde_json::json!({
        "type": query.material_type,
        "processing": query.processing,
        "code": code,
        "description": describe_ncm(code),
    }))
}

/// Strict format check, plus the dotted form when eight bare digits were sent.
pub async fn validate(Query(query): Query<ValidateQuery>) -> Response {
    let normalized = normalize_ncm(&query.code);
    dto::ok(&serde_json::json!({
        "code": query.code,
        "valid": validate_ncm_format(&query.code),
        "normalized": normalized,
        "description": normalized.as_deref().and_then(describe_ncm),
    }))
}

pub async fn list_catalog() -> Response {
    let entries = catalog()
        .iter()
        .map(|(code, description)| serde_json::json!({ "code": code, "description": description }))
        .collect::<Vec<_>>();
    dto::items(&entries)
}

pub async fn report(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let materials = services.repos().materials.list();
    let report = FiscalReport::from_materials(&materials);

    if !report.is_clean() {
        tracing::info!(
            unclassified = report.unclassified.len(),
            malformed = report.malformed.len(),
            divergent = report.divergent.len(),
            "fiscal report has findings"
        );
    }
    dto::ok(&report)
}
