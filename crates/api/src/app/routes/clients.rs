use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};

use stonedesk_auth::Section;
use stonedesk_core::{ClientId, DomainError};
use stonedesk_infra::Store;
use stonedesk_parties::{ClientFilter, NewClient};

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/:id", get(get_client).put(update_client).delete(delete_client))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Clients,
            require_section,
        ))
}

pub async fn list_clients(
    Extension(services): Extension<Arc<AppServices>>,
    Query(filter): Query<ClientFilter>,
) -> Response {
    let items = services
        .repos()
        .clients
        .list()
        .into_iter()
        .filter(|c| filter.matches(c))
        .collect::<Vec<_>>();
    dto::items(&items)
}

pub async fn create_client(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewClient>,
) -> Response {
    services.simulate_latency().await;

    let client = match body.into_client(ClientId::new()) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.repos().clients.save(client.clone());

    tracing::info!(client_id = %client.id, company = %client.company_name, "client created");
    dto::submitted(StatusCode::CREATED, &client, "Client saved successfully.")
}

pub async fn get_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: ClientId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repos().clients.get(&id) {
        Some(c) => dto::ok(&c),
        None => errors::not_found("client"),
    }
}

pub async fn update_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<NewClient>,
) -> Response {
    let id: ClientId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !services.repos().clients.contains(&id) {
        return errors::not_found("client");
    }

    services.simulate_latency().await;

    let client = match body.into_client(id) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    // Deleted while the submission was in flight: stay deleted.
    if let Err(e) = services.repos().clients.replace(&id, client.clone()) {
        return match e {
            DomainError::NotFound => errors::not_found("client"),
            e => errors::domain_error_to_response(e),
        };
    }

    tracing::info!(client_id = %client.id, "client updated");
    dto::submitted(StatusCode::OK, &client, "Client updated successfully.")
}

/// Sales that reference the client are left as they are.
pub async fn delete_client(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: ClientId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.repos().clients.remove(&id) {
        Some(c) => {
            tracing::info!(client_id = %c.id, "client deleted");
            dto::message(format!("{} removed.", c.company_name))
        }
        None => errors::not_found("client"),
    }
}
