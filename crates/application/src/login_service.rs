use dochost_core::AppResult;
use dochost_domain::{Credential, EventKind, RequestMetadata};

use crate::EventLogService;

/// Result of a credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Username and password both matched.
    Authenticated,
    /// Either field did not match.
    Rejected,
}

/// Application service for the login endpoint.
///
/// Stateless: no lockout, rate limiting or session is involved.
#[derive(Clone)]
pub struct LoginService {
    credential: Credential,
    event_log: EventLogService,
}

impl LoginService {
    /// Creates a service that checks against the configured credential.
    #[must_use]
    pub fn new(credential: Credential, event_log: EventLogService) -> Self {
        Self {
            credential,
            event_log,
        }
    }

    /// Checks a username/password pair and records the attempt.
    ///
    /// Only the username and the outcome are logged.
    pub async fn login(
        &self,
        metadata: &RequestMetadata,
        username: &str,
        password: &str,
    ) -> AppResult<LoginOutcome> {
        let success = self.credential.matches(username, password);

        self.event_log
            .record(
                EventKind::LoginAttempt {
                    username: username.to_owned(),
                    success,
                },
                metadata,
            )
            .await?;

        Ok(if success {
            LoginOutcome::Authenticated
        } else {
            LoginOutcome::Rejected
        })
    }
}
