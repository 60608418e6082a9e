use serde::{Deserialize, Serialize};

/// Login payload
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// NUSP number or registered email
    pub login: String,
    pub password: String,
}

// Keep the password out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of the session check endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Identifier of the logged in user
    pub user: String,
}

/// Password redefinition request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRedefinition {
    pub email: String,
}
