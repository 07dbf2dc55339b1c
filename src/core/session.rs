//! Admin session gate - password verification and the session capability.
//!
//! Authorization is an explicit value, not ambient state: [`AdminGate`] checks
//! a submitted password against the configured shared secret and, on a match,
//! issues an [`AdminSession`] that callers thread into every privileged
//! operation. Each operation calls [`require_admin`] first and re-derives the
//! decision from the session value alone; nothing is cached between calls.
//!
//! Sessions carry no user identity and there is no logout. The only way back
//! to anonymous is letting the session expire or dropping the value.

use crate::errors::{Error, Result};
use chrono::{DateTime, Duration, Utc};

/// How long an issued session stays valid.
pub const SESSION_TTL_HOURS: i64 = 24;

/// Verifies admin passwords and issues sessions.
#[derive(Debug, Clone)]
pub struct AdminGate {
    secret: String,
}

impl AdminGate {
    /// Creates a gate around the given shared secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Builds the gate from the `ADMIN_PASSWORD` environment variable.
    ///
    /// # Errors
    /// Returns a configuration error when the variable is unset or blank;
    /// there is no fallback secret.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("ADMIN_PASSWORD").map_err(|_| Error::Config {
            message: "ADMIN_PASSWORD is not set".to_string(),
        })?;
        if secret.trim().is_empty() {
            return Err(Error::Config {
                message: "ADMIN_PASSWORD is empty".to_string(),
            });
        }
        Ok(Self::new(secret))
    }

    /// Checks `candidate` against the secret and issues a session on a match.
    ///
    /// Comparison is plain byte equality; there is no hashing, rate limiting,
    /// or lockout.
    ///
    /// # Errors
    /// Returns [`Error::Unauthorized`] on a mismatch; no session is issued.
    pub fn verify_password(&self, candidate: &str) -> Result<AdminSession> {
        if candidate.as_bytes() != self.secret.as_bytes() {
            return Err(Error::Unauthorized);
        }
        Ok(AdminSession::issue(Utc::now()))
    }
}

/// Capability value proving a successful admin login.
///
/// Obtainable only through [`AdminGate::verify_password`]. Valid for
/// [`SESSION_TTL_HOURS`] after issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AdminSession {
    fn issue(now: DateTime<Utc>) -> Self {
        Self {
            issued_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// When this session was issued.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// When this session stops being accepted.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True while the session has not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Per-operation authorization check used by every privileged operation.
///
/// # Errors
/// Returns [`Error::Unauthorized`] when no session is presented or the
/// presented session has expired.
pub fn require_admin(session: Option<&AdminSession>) -> Result<()> {
    match session {
        Some(session) if session.is_active() => Ok(()),
        _ => Err(Error::Unauthorized),
    }
}
