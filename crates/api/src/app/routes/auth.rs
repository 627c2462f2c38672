use std::sync::Arc;

use axum::{extract::Extension, response::Response, Json};

use stonedesk_auth::{DEFAULT_ROUTE, LOGIN_ROUTE, LoginForm, SessionStore, SessionToken, visible_sections};

use crate::app::dto::{self, MenuEntry, SessionResponse};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::SessionContext;

/// Mock login: any password of 3+ characters, lookup by email only.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(form): Json<LoginForm>,
) -> Response {
    services.simulate_latency().await;

    let user = match services.users().login(&form) {
        Ok(u) => u,
        Err(e) => return errors::auth_error_to_response(e),
    };

    let token = SessionToken::new();
    if let Err(e) = services.sessions().save(&token, &user) {
        return errors::auth_error_to_response(e);
    }

    tracing::info!(user_id = %user.id, role = %user.role, "user signed in");

    dto::ok(&SessionResponse {
        token: token.as_str(),
        user: &user,
        redirect: DEFAULT_ROUTE,
        message: format!("Welcome back, {}!", user.name),
    })
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> Response {
    services.end_session(session.token());
    tracing::info!(user_id = %session.user().id, "user signed out");

    dto::ok(&serde_json::json!({
        "message": "You have been signed out.",
        "redirect": LOGIN_ROUTE,
    }))
}

pub async fn me(Extension(session): Extension<SessionContext>) -> Response {
    let sections = visible_sections(session.role())
        .into_iter()
        .map(MenuEntry::from)
        .collect::<Vec<_>>();

    dto::ok(&serde_json::json!({
        "user": session.user(),
        "sections": sections,
    }))
}
