//! Mock credential registry and bearer-token table.
//!
//! Credentials are compared in plaintext — this is a demo flow, not a real
//! credential system. Tokens are real in the narrow sense that every
//! authenticated route resolves them against this table and rejects unknown
//! ones.

use std::collections::HashMap;

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use findmy_model::{AuthResponse, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{error::AppError, state::SharedState};

struct Credential {
    user: User,
    password: String,
}

pub struct AuthRegistry {
    users: RwLock<Vec<Credential>>,
    // token -> user id
    tokens: RwLock<HashMap<String, String>>,
}

impl AuthRegistry {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone_number: Option<String>,
    ) -> Result<AuthResponse, AppError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "name, email and password are required".into(),
            ));
        }

        let mut users = self.users.write().await;
        if users.iter().any(|c| c.user.email == email) {
            return Err(AppError::EmailTaken);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number,
        };
        users.push(Credential {
            user: user.clone(),
            password: password.to_string(),
        });
        drop(users);

        let token = self.mint_token(&user.id).await;
        Ok(AuthResponse { user, token })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let users = self.users.read().await;
        let user = users
            .iter()
            .find(|c| c.user.email == email && c.password == password)
            .map(|c| c.user.clone())
            .ok_or(AppError::InvalidCredentials)?;
        drop(users);

        let token = self.mint_token(&user.id).await;
        Ok(AuthResponse { user, token })
    }

    /// Resolves a bearer token to the user id it was minted for.
    pub async fn resolve_token(&self, token: &str) -> Option<String> {
        self.tokens.read().await.get(token).cloned()
    }

    async fn mint_token(&self, user_id: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens
            .write()
            .await
            .insert(token.clone(), user_id.to_string());
        token
    }
}

/// Extractor for the authenticated owner id on `/items` routes.
pub struct Owner(pub String);

impl FromRequestParts<SharedState> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::InvalidToken)?;

        let token = header.strip_prefix("Bearer ").ok_or(AppError::InvalidToken)?;

        let user_id = state
            .auth
            .resolve_token(token)
            .await
            .ok_or(AppError::InvalidToken)?;

        Ok(Owner(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_login_round_trips_the_user() {
        let auth = AuthRegistry::new();

        let registered = auth
            .register("Ada", "ada@example.com", "hunter2", None)
            .await
            .unwrap();
        assert_eq!(registered.user.email, "ada@example.com");

        let logged_in = auth.login("ada@example.com", "hunter2").await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        // each login mints its own token
        assert_ne!(logged_in.token, registered.token);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = AuthRegistry::new();
        auth.register("Ada", "ada@example.com", "hunter2", None)
            .await
            .unwrap();

        let result = auth.register("Eve", "ada@example.com", "pw", None).await;
        assert_eq!(result.unwrap_err(), AppError::EmailTaken);
    }

    #[tokio::test]
    async fn bad_password_is_invalid_credentials() {
        let auth = AuthRegistry::new();
        auth.register("Ada", "ada@example.com", "hunter2", None)
            .await
            .unwrap();

        let result = auth.login("ada@example.com", "wrong").await;
        assert_eq!(result.unwrap_err(), AppError::InvalidCredentials);
    }

    #[tokio::test]
    async fn tokens_resolve_to_their_user_and_nothing_else() {
        let auth = AuthRegistry::new();
        let response = auth
            .register("Ada", "ada@example.com", "hunter2", None)
            .await
            .unwrap();

        assert_eq!(
            auth.resolve_token(&response.token).await,
            Some(response.user.id)
        );
        assert_eq!(auth.resolve_token("forged").await, None);
    }
}
