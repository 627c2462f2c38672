//! Access control gate.
//!
//! Given the current user (if any) and the roles a route allows, decide whether
//! the route renders or where the client should be sent instead. Failing the
//! gate is never an error page: anonymous users go to the login route, users
//! with the wrong role go back to their default route.

use serde::Serialize;

use crate::{Role, User, has_permission};

/// Route of the login form.
pub const LOGIN_ROUTE: &str = "/login";

/// Route every role is allowed to see; target of "insufficient role" redirects.
pub const DEFAULT_ROUTE: &str = "/dashboard";

/// Outcome of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    Render,
    RedirectToLogin { to: &'static str },
    RedirectToDefault { to: &'static str },
}

impl AccessDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, AccessDecision::Render)
    }

    /// Redirect target, if the decision is a redirect.
    pub fn redirect_to(&self) -> Option<&'static str> {
        match self {
            AccessDecision::Render => None,
            AccessDecision::RedirectToLogin { to } | AccessDecision::RedirectToDefault { to } => {
                Some(to)
            }
        }
    }
}

/// Protected dashboard sections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dashboard,
    Inventory,
    Sales,
    Clients,
    Purchases,
    Financial,
    Fiscal,
    Users,
}

const EVERYONE: &[Role] = &[Role::Operator, Role::Manager, Role::Admin];
const MANAGEMENT: &[Role] = &[Role::Manager, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl Section {
    /// Navigation order.
    pub const ALL: [Section; 8] = [
        Section::Dashboard,
        Section::Inventory,
        Section::Sales,
        Section::Clients,
        Section::Purchases,
        Section::Financial,
        Section::Fiscal,
        Section::Users,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Section::Dashboard => "/dashboard",
            Section::Inventory => "/inventory",
            Section::Sales => "/sales",
            Section::Clients => "/clients",
            Section::Purchases => "/purchases",
            Section::Financial => "/financial",
            Section::Fiscal => "/fiscal",
            Section::Users => "/users",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Inventory => "Inventory",
            Section::Sales => "Sales",
            Section::Clients => "Clients",
            Section::Purchases => "Purchases",
            Section::Financial => "Financial",
            Section::Fiscal => "Fiscal",
            Section::Users => "Users",
        }
    }

    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Section::Dashboard | Section::Inventory | Section::Sales | Section::Clients => EVERYONE,
            Section::Purchases | Section::Financial | Section::Fiscal => MANAGEMENT,
            Section::Users => ADMIN_ONLY,
        }
    }

    pub fn allows(self, role: Role) -> bool {
        has_permission(Some(role), self.allowed_roles())
    }
}

/// Decide between rendering and redirecting for a route that allows `allowed`.
pub fn check_access(user: Option<&User>, allowed: &[Role]) -> AccessDecision {
    let Some(user) = user else {
        return AccessDecision::RedirectToLogin { to: LOGIN_ROUTE };
    };

    if has_permission(Some(user.role), allowed) {
        AccessDecision::Render
    } else {
        AccessDecision::RedirectToDefault { to: DEFAULT_ROUTE }
    }
}

/// Map a client-side path to the section that owns it.
///
/// Matches on whole path segments (`/sales/new` belongs to `/sales`,
/// `/salesforce` does not). Query strings and trailing slashes are ignored.
pub fn resolve_route(path: &str) -> Option<Section> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');

    Section::ALL.into_iter().find(|section| {
        let prefix = section.path();
        path == prefix
            || path
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Run the gate for a client-side path.
///
/// - `/login` renders for anonymous users and bounces logged-in users home.
/// - Unknown paths behave like an unauthorized route.
pub fn gate_path(user: Option<&User>, path: &str) -> AccessDecision {
    if path.trim_end_matches('/') == LOGIN_ROUTE {
        return match user {
            Some(_) => AccessDecision::RedirectToDefault { to: DEFAULT_ROUTE },
            None => AccessDecision::Render,
        };
    }

    match resolve_route(path) {
        Some(section) => check_access(user, section.allowed_roles()),
        None => check_access(user, &[]),
    }
}

/// Sections shown in the navigation menu for `role`.
pub fn visible_sections(role: Role) -> Vec<Section> {
    Section::ALL.into_iter().filter(|s| s.allows(role)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stonedesk_core::UserId;

    fn user(role: Role) -> User {
        User {
            id: UserId::new(),
            name: "Test".to_string(),
            email: format!("{role}@stonedesk.test"),
            role,
            avatar: None,
        }
    }

    #[test]
    fn anonymous_goes_to_login() {
        assert_eq!(
            check_access(None, &Role::ALL),
            AccessDecision::RedirectToLogin { to: LOGIN_ROUTE }
        );
    }

    #[test]
    fn wrong_role_goes_to_default_route_not_an_error() {
        let op = user(Role::Operator);
        let decision = gate_path(Some(&op), "/financial");
        assert_eq!(decision, AccessDecision::RedirectToDefault { to: DEFAULT_ROUTE });
        assert_eq!(decision.redirect_to(), Some("/dashboard"));
    }

    #[test]
    fn default_route_renders_for_every_role() {
        for role in Role::ALL {
            assert!(gate_path(Some(&user(role)), DEFAULT_ROUTE).is_render());
        }
    }

    #[test]
    fn resolves_nested_paths_on_segment_boundaries() {
        assert_eq!(resolve_route("/sales/new"), Some(Section::Sales));
        assert_eq!(resolve_route("/sales/"), Some(Section::Sales));
        assert_eq!(resolve_route("/inventory?type=granite"), Some(Section::Inventory));
        assert_eq!(resolve_route("/salesforce"), None);
        assert_eq!(resolve_route("/"), None);
    }

    #[test]
    fn unknown_path_redirects() {
        assert_eq!(
            gate_path(Some(&user(Role::Admin)), "/nowhere"),
            AccessDecision::RedirectToDefault { to: DEFAULT_ROUTE }
        );
        assert_eq!(
            gate_path(None, "/nowhere"),
            AccessDecision::RedirectToLogin { to: LOGIN_ROUTE }
        );
    }

    #[test]
    fn login_route_is_public_but_bounces_logged_in_users() {
        assert!(gate_path(None, "/login").is_render());
        assert_eq!(
            gate_path(Some(&user(Role::Manager)), "/login"),
            AccessDecision::RedirectToDefault { to: DEFAULT_ROUTE }
        );
    }

    #[test]
    fn menu_follows_role_table() {
        assert_eq!(
            visible_sections(Role::Operator),
            vec![Section::Dashboard, Section::Inventory, Section::Sales, Section::Clients]
        );
        assert!(!visible_sections(Role::Manager).contains(&Section::Users));
        assert_eq!(visible_sections(Role::Admin).len(), Section::ALL.len());
    }

    #[test]
    fn decision_serializes_with_tag() {
        let json = serde_json::to_value(AccessDecision::RedirectToDefault { to: DEFAULT_ROUTE }).unwrap();
        assert_eq!(json["decision"], "redirect_to_default");
        assert_eq!(json["to"], "/dashboard");
    }
}
