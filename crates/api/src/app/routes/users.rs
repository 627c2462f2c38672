use std::sync::Arc;

use axum::{extract::Extension, response::Response, routing::get, Router};

use stonedesk_auth::{Section, visible_sections};

use crate::app::dto;
use crate::app::services::AppServices;
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Users,
            require_section,
        ))
}

/// Directory users with the sections each one can open.
pub async fn list_users(Extension(services): Extension<Arc<AppServices>>) -> Response {
    let items = services
        .users()
        .users()
        .iter()
        .map(|u| {
            serde_json::json!({
                "user": u,
                "sections": visible_sections(u.role),
            })
        })
        .collect::<Vec<_>>();
    dto::items(&items)
}
