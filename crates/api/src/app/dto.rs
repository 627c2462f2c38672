use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stonedesk_auth::{Section, User};
use stonedesk_core::DomainError;
use stonedesk_reporting::MonthWindow;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest<S> {
    pub status: S,
}

#[derive(Debug, Deserialize)]
pub struct ResolvePathQuery {
    pub path: String,
}

// -------------------------
// Response helpers
// -------------------------

#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub section: Section,
    pub label: &'static str,
    pub path: &'static str,
}

impl From<Section> for MenuEntry {
    fn from(section: Section) -> Self {
        Self {
            section,
            label: section.label(),
            path: section.path(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse<'a> {
    pub token: &'a str,
    pub user: &'a User,
    pub redirect: &'static str,
    pub message: String,
}

/// `{"items": [...], "count": n}`.
pub fn items<T: Serialize>(items: &[T]) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": items, "count": items.len() })),
    )
        .into_response()
}

pub fn ok<T: Serialize>(body: &T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

/// A successful form submission: the stored record plus the toast text.
pub fn submitted<T: Serialize>(status: StatusCode, item: &T, message: impl Into<String>) -> Response {
    (
        status,
        Json(serde_json::json!({ "item": item, "message": message.into() })),
    )
        .into_response()
}

pub fn message(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": message.into() })),
    )
        .into_response()
}

// -------------------------
// Parsing helpers
// -------------------------

/// Parse a path id into its typed newtype.
pub fn parse_id<T: From<Uuid>>(raw: &str) -> Result<T, Response> {
    Uuid::parse_str(raw.trim()).map(T::from).map_err(|_| {
        errors::domain_error_to_response(DomainError::invalid_id(format!("'{raw}' is not a valid id")))
    })
}

/// `?month=YYYY-MM` when present.
pub fn optional_month(raw: Option<&str>) -> Result<Option<MonthWindow>, Response> {
    match raw.map(str::trim).filter(|m| !m.is_empty()) {
        None => Ok(None),
        Some(m) => MonthWindow::parse(m)
            .map(Some)
            .map_err(errors::domain_error_to_response),
    }
}

/// `?month=YYYY-MM`, defaulting to the month of `today`.
pub fn month_or_current(raw: Option<&str>, today: NaiveDate) -> Result<MonthWindow, Response> {
    Ok(optional_month(raw)?.unwrap_or_else(|| MonthWindow::containing(today)))
}
