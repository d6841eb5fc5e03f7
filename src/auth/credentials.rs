// auth/credentials.rs - username/email + password verification
//
// The user lookup is injected at construction time so tests can swap the
// storage backend without touching any process-wide state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{JwtError, TokenService};
use crate::database::models::User;
use crate::database::repository::UserLookup;
use crate::database::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user not found")]
    NotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Token(#[from] JwtError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username or email
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

pub struct CredentialVerifier {
    lookup: Arc<dyn UserLookup>,
    tokens: TokenService,
}

impl CredentialVerifier {
    pub fn new(lookup: Arc<dyn UserLookup>, tokens: TokenService) -> Self {
        Self { lookup, tokens }
    }

    /// Resolve the account by username or email and check the password.
    /// Attempts are not rate limited.
    pub async fn verify(&self, identifier: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .lookup
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::NotFound)?;

        // A malformed stored hash is treated the same as a wrong password
        match bcrypt::verify(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(e) => {
                tracing::warn!("Stored password hash for '{}' could not be checked: {}", user.username, e);
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self.verify(&request.username, &request.password).await?;
        let claims = self.tokens.claims_for(user.id, &user.username, user.role);
        let token = self.tokens.issue(&claims)?;

        tracing::info!("User '{}' logged in as {}", user.username, user.role);
        Ok(LoginResponse { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::testing::{memory::MemoryUserStore, user_with_password};

    fn verifier(users: Vec<User>) -> CredentialVerifier {
        CredentialVerifier::new(
            Arc::new(MemoryUserStore::with_users(users)),
            TokenService::new("test-secret", 1),
        )
    }

    #[tokio::test]
    async fn login_succeeds_with_username_or_email() {
        let verifier = verifier(vec![user_with_password("alice", Role::User, "supersecret")]);

        let by_name = verifier
            .login(&LoginRequest { username: "alice".into(), password: "supersecret".into() })
            .await
            .unwrap();
        assert_eq!(by_name.user.username, "alice");
        assert!(!by_name.token.is_empty());

        let by_email = verifier
            .login(&LoginRequest { username: "alice@example.com".into(), password: "supersecret".into() })
            .await
            .unwrap();
        assert_eq!(by_email.user.username, "alice");
    }

    #[tokio::test]
    async fn username_match_wins_over_email_match() {
        let mut shadow = user_with_password("mallory", Role::User, "shadowpass");
        shadow.email = "alice".to_string();
        let verifier = verifier(vec![shadow, user_with_password("alice", Role::Admin, "alicepass")]);

        let user = verifier.verify("alice", "alicepass").await.unwrap();
        assert_eq!(user.username, "alice");
        assert!(matches!(
            verifier.verify("alice", "shadowpass").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let verifier = verifier(vec![user_with_password("bob", Role::User, "correctpassword")]);

        let err = verifier
            .login(&LoginRequest { username: "bob".into(), password: "wrongpassword".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found() {
        let verifier = verifier(vec![]);

        let err = verifier
            .login(&LoginRequest { username: "nonexistent".into(), password: "whatever".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }

    #[tokio::test]
    async fn issued_token_carries_role() {
        let tokens = TokenService::new("test-secret", 1);
        let verifier = verifier(vec![user_with_password("root", Role::Admin, "pw")]);

        let response = verifier
            .login(&LoginRequest { username: "root".into(), password: "pw".into() })
            .await
            .unwrap();
        let claims = tokens.validate(&response.token).unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.user_id, response.user.id);
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = user_with_password("erin", Role::User, "pw");
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["role"], "user");
    }
}
