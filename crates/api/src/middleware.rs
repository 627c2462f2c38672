use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use stonedesk_auth::{AccessDecision, Section, SessionStore, SessionToken, check_access};

use crate::app::errors;
use crate::context::SessionContext;

#[derive(Clone)]
pub struct AuthState {
    pub sessions: Arc<dyn SessionStore>,
}

/// Resolve the bearer session token to a user, or answer 401 with a
/// redirect to the login route.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return errors::unauthenticated();
    };

    let Some(user) = state.sessions.load(&token) else {
        tracing::debug!("unknown or unreadable session token");
        return errors::unauthenticated();
    };

    req.extensions_mut().insert(SessionContext::new(token, user));
    next.run(req).await
}

/// Gate a section router: render for allowed roles, otherwise redirect.
pub async fn require_section(
    State(section): State<Section>,
    req: Request,
    next: Next,
) -> Response {
    let user = req.extensions().get::<SessionContext>().map(|s| s.user().clone());

    match check_access(user.as_ref(), section.allowed_roles()) {
        AccessDecision::Render => next.run(req).await,
        AccessDecision::RedirectToLogin { .. } => errors::unauthenticated(),
        AccessDecision::RedirectToDefault { to } => {
            tracing::info!(
                section = section.label(),
                role = ?user.as_ref().map(|u| u.role),
                "section denied for role"
            );
            errors::forbidden(to)
        }
    }
}

/// Bearer token from the `Authorization` header, if well-formed.
pub fn extract_bearer(headers: &HeaderMap) -> Option<SessionToken> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(SessionToken::from_raw(token))
}
