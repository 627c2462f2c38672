use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::Response,
    routing::get,
    Router,
};

use stonedesk_auth::Section;
use stonedesk_core::format_brl;
use stonedesk_reporting::DashboardSnapshot;

use crate::app::dto::{self, MonthQuery};
use crate::app::services::{AppServices, today};
use crate::context::SessionContext;
use crate::middleware::require_section;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_dashboard))
        .route_layer(axum::middleware::from_fn_with_state(
            Section::Dashboard,
            require_section,
        ))
}

/// Month snapshot. Financial and purchase figures are only included for
/// roles that can open those sections.
pub async fn get_dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let month = match dto::month_or_current(query.month.as_deref(), today()) {
        Ok(m) => m,
        Err(resp) => return resp,
    };

    let records = services.repos().snapshot();
    let snapshot = DashboardSnapshot::build(
        records.as_dashboard_data(),
        month,
        services.low_stock_threshold(),
        Section::Financial.allows(session.role()),
    );

    let mut display = serde_json::json!({
        "stock_value": format_brl(snapshot.inventory.total_stock_value),
        "sales_value": format_brl(snapshot.sales.total_value),
    });
    if let Some(financial) = &snapshot.financial {
        display["balance"] = format_brl(financial.balance).into();
    }

    dto::ok(&serde_json::json!({
        "snapshot": snapshot,
        "display": display,
    }))
}
