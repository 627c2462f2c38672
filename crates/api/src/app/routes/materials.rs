use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};

use stonedesk_auth::Section;
use stonedesk_core::{DomainError, MaterialId};
use stonedesk_fiscal::{describe_ncm, normalize_ncm};
use stonedesk_infra::Store;
use stonedesk_inventory::{MaterialFilter, NewMaterial};
use stonedesk_reporting::{DashboardSnapshot, InventorySummary};

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_materials).post(create_material))
        .route("/summary", get(inventory_summary))
        .route(
            "/:id",
            get(get_material).put(update_material).delete(delete_material),
        )
        .route("/:id/ncm-suggestion", get(ncm_suggestion))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Inventory,
            require_section,
        ))
}

pub async fn list_materials(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<MaterialFilter>,
) -> Response {
    let items = services
        .repos()
        .materials
        .list()
        .into_iter()
        .filter(|m| filter.matches(m))
        .collect::<Vec<_>>();
    dto::items(&items)
}

pub async fn create_material(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewMaterial>,
) -> Response {
    services.simulate_latency().await;

    let material = match body.into_material(MaterialId::new()) {
        Ok(m) => m,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.repos().materials.save(material.clone());

    tracing::info!(material_id = %material.id, name = %material.name, "material created");
    dto::submitted(StatusCode::CREATED, &material, "Material saved successfully.")
}

pub async fn get_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: MaterialId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repos().materials.get(&id) {
        Some(m) => dto::ok(&m),
        None => errors::not_found("material"),
    }
}

/// Full replace of the form fields; the id is kept.
pub async fn update_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewMaterial>,
) -> Response {
    let id: MaterialId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.repos().materials.contains(&id) {
        return errors::not_found("material");
    }

    services.simulate_latency().await;

    let material = match body.into_material(id) {
        Ok(m) => m,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.repos().materials.replace(&id, material.clone()) {
        return match e {
            DomainError::NotFound => errors::not_found("material"),
            e => errors::domain_error_to_response(e),
        };
    }

    tracing::info!(material_id = %material.id, "material updated");
    dto::submitted(StatusCode::OK, &material, "Material updated successfully.")
}

pub async fn delete_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: MaterialId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repos().materials.remove(&id) {
        Some(m) => {
            tracing::info!(material_id = %m.id, "material deleted");
            dto::message(format!("{} removed from inventory.", m.name))
        }
        None => errors::not_found("material"),
    }
}

pub async fn inventory_summary(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let materials = services.repos().materials.list();
    let summary = InventorySummary::from_materials(
        &materials,
        services.low_stock_threshold(),
        DashboardSnapshot::TOP_N,
    );
    dto::ok(&summary)
}

/// Suggested code for the material's classification next to the stored one.
pub async fn ncm_suggestion(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: MaterialId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(material) = services.repos().materials.get(&id) else {
        return errors::not_found("material");
    };

    let suggested = material.suggested_ncm();
    let current = material.ncm_code.as_deref();

    dto::ok(&serde_json::json!({
        "material_id": material.id,
        "type": material.material_type,
        "processing_level": material.processing_level,
        "current": current,
        "suggested": suggested,
        "description": describe_ncm(suggested),
        "matches": current.and_then(normalize_ncm).as_deref() == Some(suggested),
    }))
}
