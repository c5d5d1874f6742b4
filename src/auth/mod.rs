//! Authentication collaborator.
//!
//! Credentials live with the [`AuthProvider`], never on the employee record.
//! A successful login yields an [`Identity`] carrying a session token that
//! later calls present.

mod memory;
mod password;

pub use memory::InMemoryAuthProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by an auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong secret.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session token is unknown or has ended.
    #[error("unknown session")]
    UnknownSession,

    /// Credentials for this identifier are already registered.
    #[error("credentials already registered for {0}")]
    AlreadyRegistered(String),

    /// Any other backend failure.
    #[error("auth backend error: {0}")]
    Backend(String),
}

/// An authenticated employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The employee code the session belongs to.
    pub employee_code: String,
    /// Opaque session token.
    pub session_token: String,
}

/// Verifies credentials and tracks sessions.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Checks `secret` for `identifier` and opens a session.
    async fn verify_credentials(&self, identifier: &str, secret: &str)
    -> Result<Identity, AuthError>;

    /// Ends a session. Ending an unknown session is not an error.
    async fn end_session(&self, session_token: &str) -> Result<(), AuthError>;

    /// Resolves a session token to its identity.
    async fn authenticate(&self, session_token: &str) -> Result<Identity, AuthError>;

    /// Stores credentials for a new identifier.
    async fn register_credentials(&self, identifier: &str, secret: &str) -> Result<(), AuthError>;
}
