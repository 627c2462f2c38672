use axum::{
    routing::{get, post},
    Router,
};

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod fiscal;
pub mod materials;
pub mod navigation;
pub mod purchases;
pub mod sales;
pub mod system;
pub mod transactions;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/navigation/menu", get(navigation::menu))
        .nest("/dashboard", dashboard::router())
        .nest("/materials", materials::router())
        .nest("/clients", clients::router())
        .nest("/sales", sales::router())
        .nest("/purchases", purchases::router())
        .nest("/transactions", transactions::router())
        .nest("/fiscal", fiscal::router())
        .nest("/users", users::router())
}
