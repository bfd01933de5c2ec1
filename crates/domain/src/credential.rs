use std::fmt::{Debug, Formatter};

use dochost_core::{AppError, AppResult, NonEmptyString};

/// The single username/password pair accepted by the login check.
///
/// Supplied at startup from configuration; never persisted.
#[derive(Clone)]
pub struct Credential {
    username: NonEmptyString,
    password: NonEmptyString,
}

impl Credential {
    /// Creates a credential, rejecting blank usernames or passwords.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        let username = NonEmptyString::new(username)
            .map_err(|_| AppError::Validation("login username must not be empty".to_owned()))?;
        let password = NonEmptyString::new(password)
            .map_err(|_| AppError::Validation("login password must not be empty".to_owned()))?;

        Ok(Self { username, password })
    }

    /// Returns the configured username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Exact, case-sensitive comparison of both fields.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        // Evaluate both sides so a wrong username costs the same as a wrong password.
        let username_matches = self.username.as_str() == username;
        let password_matches = self.password.as_str() == password;
        username_matches & password_matches
    }
}

impl Debug for Credential {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Credential")
            .field("username", &self.username.as_str())
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Credential;

    fn lab_credential() -> Credential {
        let credential = Credential::new("testuser", "Password123");
        assert!(credential.is_ok());
        credential.unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn matches_only_the_exact_pair() {
        let credential = lab_credential();

        assert!(credential.matches("testuser", "Password123"));
        assert!(!credential.matches("testuser", "password123"));
        assert!(!credential.matches("TestUser", "Password123"));
        assert!(!credential.matches("testuser ", "Password123"));
        assert!(!credential.matches("", ""));
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(Credential::new("", "Password123").is_err());
        assert!(Credential::new("testuser", "   ").is_err());
    }

    #[test]
    fn debug_output_redacts_password() {
        let rendered = format!("{:?}", lab_credential());
        assert!(rendered.contains("testuser"));
        assert!(!rendered.contains("Password123"));
    }
}
