use serde::{Deserialize, Serialize};
use thiserror::Error;

use stonedesk_core::{UserId, ValidationErrors, Validator};

use crate::Role;

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Login form input.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.email("email", &self.email).min_chars("password", &self.password, 3);
        v.into_result()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no user registered with email '{0}'")]
    UnknownEmail(String),

    #[error("invalid login form: {0}")]
    Validation(ValidationErrors),

    #[error("stored session could not be read: {0}")]
    SessionCorrupted(String),
}

/// Mock user directory backing the login form.
///
/// Lookup is by email only (case-insensitive); passwords are not checked.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// One user per role, matching the demo dataset.
    pub fn demo() -> Self {
        let user = |name: &str, email: &str, role| User {
            id: UserId::new(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            avatar: None,
        };

        Self::new(vec![
            user("Ana Souza", "admin@stonedesk.com.br", Role::Admin),
            user("Carlos Lima", "gerente@stonedesk.com.br", Role::Manager),
            user("Joao Pereira", "operador@stonedesk.com.br", Role::Operator),
        ])
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let email = email.trim();
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Validate the form, then look the user up.
    pub fn login(&self, form: &LoginForm) -> Result<User, AuthError> {
        form.validate().map_err(AuthError::Validation)?;

        self.find_by_email(&form.email)
            .cloned()
            .ok_or_else(|| AuthError::UnknownEmail(form.email.trim().to_string()))
    }
}
