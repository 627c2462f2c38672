use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use stonedesk_auth::{AuthError, DEFAULT_ROUTE, LOGIN_ROUTE};
use stonedesk_core::{DomainError, ValidationErrors};

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Field errors for inline display next to each form input.
pub fn validation_error(errors: &ValidationErrors) -> Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": "Please correct the highlighted fields.",
            "details": errors,
        })),
    )
        .into_response()
}

pub fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({
            "error": "unauthenticated",
            "message": "Please sign in to continue.",
            "redirect": LOGIN_ROUTE,
        })),
    )
        .into_response()
}

pub fn forbidden(redirect: &'static str) -> Response {
    (
        StatusCode::FORBIDDEN,
        axum::Json(json!({
            "error": "forbidden",
            "message": "Your role does not have access to this section.",
            "redirect": redirect,
        })),
    )
        .into_response()
}

pub fn not_found(what: &str) -> Response {
    json_error(StatusCode::NOT_FOUND, "not_found", format!("{what} not found"))
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::Validation(errors) => validation_error(&errors),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::Unauthorized => forbidden(DEFAULT_ROUTE),
    }
}

pub fn auth_error_to_response(err: AuthError) -> Response {
    match err {
        AuthError::UnknownEmail(email) => {
            tracing::warn!(%email, "login failed: unknown email");
            json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid email or password.",
            )
        }
        AuthError::Validation(errors) => validation_error(&errors),
        AuthError::SessionCorrupted(msg) => {
            tracing::error!(error = %msg, "could not store session");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "session_error",
                "Could not start a session. Please try again.",
            )
        }
    }
}
