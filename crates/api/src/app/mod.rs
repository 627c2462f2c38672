//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: record stores, sessions and the mock user directory
//! - `routes/`: HTTP routes + handlers (one file per dashboard section)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use stonedesk_core::DomainResult;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> DomainResult<Router> {
    let services = Arc::new(services::build_services(config)?);
    let auth_state = middleware::AuthState {
        sessions: services.session_store(),
    };

    // Protected routes: require a live session.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/login", post(routes::auth::login))
        .route("/navigation/resolve", get(routes::navigation::resolve))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(services))))
}
