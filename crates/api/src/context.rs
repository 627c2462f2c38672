use stonedesk_auth::{Role, SessionToken, User};

/// Logged-in session for a request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: SessionToken,
    user: User,
}

impl SessionContext {
    pub fn new(token: SessionToken, user: User) -> Self {
        Self { token, user }
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}
