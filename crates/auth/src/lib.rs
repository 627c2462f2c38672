//! `stonedesk-auth`: role-based access control for the dashboard.
//!
//! This crate is intentionally decoupled from HTTP: it answers "may this user
//! see this section?" and keeps the logged-in user record, nothing more.

pub mod access;
pub mod roles;
pub mod session;
pub mod user;

pub use access::{
    AccessDecision, DEFAULT_ROUTE, LOGIN_ROUTE, Section, check_access, gate_path, resolve_route,
    visible_sections,
};
pub use roles::{Role, has_permission};
pub use session::{InMemorySessionStore, SESSION_KEY, SessionStore, SessionToken};
pub use user::{AuthError, LoginForm, User, UserDirectory};
