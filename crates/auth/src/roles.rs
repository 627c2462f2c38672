use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dashboard role. Each user holds exactly one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Operator,
    Manager,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Operator, Role::Manager, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "operator",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operator" => Ok(Role::Operator),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// The permission predicate.
///
/// True iff a user is present and `allowed` lists their role. There is no role
/// hierarchy: an admin is only allowed where `Admin` is listed.
pub fn has_permission(user_role: Option<Role>, allowed: &[Role]) -> bool {
    match user_role {
        Some(role) => allowed.contains(&role),
        None => false,
    }
}
