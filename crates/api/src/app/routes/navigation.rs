use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::Response,
};

use stonedesk_auth::{SessionStore, gate_path, resolve_route, visible_sections};

use crate::app::dto::{self, MenuEntry, ResolvePathQuery};
use crate::app::services::AppServices;
use crate::context::SessionContext;
use crate::middleware::extract_bearer;

/// Run the access gate for a client-side path. Anonymous callers are allowed;
/// a missing or stale token is treated as "not logged in".
pub async fn resolve(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Query(query): Query<ResolvePathQuery>,
) -> Response {
    let user = extract_bearer(&headers).and_then(|token| services.sessions().load(&token));
    let decision = gate_path(user.as_ref(), &query.path);

    tracing::debug!(path = %query.path, ?decision, "navigation resolved");

    dto::ok(&serde_json::json!({
        "path": query.path,
        "section": resolve_route(&query.path),
        "access": decision,
    }))
}

pub async fn menu(Extension(session): Extension<SessionContext>) -> Response {
    let entries = visible_sections(session.role())
        .into_iter()
        .map(MenuEntry::from)
        .collect::<Vec<_>>();
    dto::items(&entries)
}
