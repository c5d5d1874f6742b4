use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::{AuthError, AuthProvider, Identity};

/// An [`AuthProvider`] keeping argon2 hashes and sessions in memory.
#[derive(Debug, Default)]
pub struct InMemoryAuthProvider {
    credentials: RwLock<HashMap<String, String>>,
    sessions: RwLock<HashMap<String, String>>,
}

impl InMemoryAuthProvider {
    /// Creates a provider with no credentials.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn verify_credentials(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Identity, AuthError> {
        let hashed = self
            .credentials
            .read()
            .await
            .get(identifier)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(secret, &hashed)? {
            return Err(AuthError::InvalidCredentials);
        }

        let session_token = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(session_token.clone(), identifier.to_string());

        Ok(Identity {
            employee_code: identifier.to_string(),
            session_token,
        })
    }

    async fn end_session(&self, session_token: &str) -> Result<(), AuthError> {
        self.sessions.write().await.remove(session_token);
        Ok(())
    }

    async fn authenticate(&self, session_token: &str) -> Result<Identity, AuthError> {
        self.sessions
            .read()
            .await
            .get(session_token)
            .map(|code| Identity {
                employee_code: code.clone(),
                session_token: session_token.to_string(),
            })
            .ok_or(AuthError::UnknownSession)
    }

    async fn register_credentials(&self, identifier: &str, secret: &str) -> Result<(), AuthError> {
        let hashed = hash_password(secret)?;
        let mut credentials = self.credentials.write().await;
        if credentials.contains_key(identifier) {
            return Err(AuthError::AlreadyRegistered(identifier.to_string()));
        }
        credentials.insert(identifier.to_string(), hashed);
        Ok(())
    }
}
