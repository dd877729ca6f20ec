//! Transport seam between the session and the item store.
//!
//! `ItemApi` is the trait the session and auth gate program against; `HttpApi`
//! is the production implementation speaking JSON over HTTP with a bearer
//! token and a bounded request timeout. Tests substitute an in-memory fake.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use findmy_model::{
    ApiMessage, AuthResponse, CreateItemRequest, Item, LoginRequest, RegisterRequest,
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};

use crate::error::SessionError;

#[async_trait]
pub trait ItemApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, SessionError>;

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone_number: Option<&str>,
    ) -> Result<AuthResponse, SessionError>;

    async fn list_items(&self) -> Result<Vec<Item>, SessionError>;

    async fn create_item(&self, name: &str, kind: &str) -> Result<Item, SessionError>;

    async fn ring_item(&self, id: &str) -> Result<Item, SessionError>;

    async fn delete_item(&self, id: &str) -> Result<(), SessionError>;

    /// Replaces the bearer token used on authenticated calls. `None` drops it.
    fn set_token(&self, token: Option<String>);
}

#[async_trait]
impl<A: ItemApi + ?Sized> ItemApi for Arc<A> {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, SessionError> {
        (**self).login(email, password).await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone_number: Option<&str>,
    ) -> Result<AuthResponse, SessionError> {
        (**self).register(name, email, password, phone_number).await
    }

    async fn list_items(&self) -> Result<Vec<Item>, SessionError> {
        (**self).list_items().await
    }

    async fn create_item(&self, name: &str, kind: &str) -> Result<Item, SessionError> {
        (**self).create_item(name, kind).await
    }

    async fn ring_item(&self, id: &str) -> Result<Item, SessionError> {
        (**self).ring_item(id).await
    }

    async fn delete_item(&self, id: &str) -> Result<(), SessionError> {
        (**self).delete_item(id).await
    }

    fn set_token(&self, token: Option<String>) {
        (**self).set_token(token)
    }
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: Mutex<Option<String>>,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SessionError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        let token = self.token.lock().map(|guard| guard.clone()).unwrap_or(None);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        builder
    }

    fn store_token(&self, token: &str) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
    }

    async fn expect_success(&self, response: Response) -> Result<Response, SessionError> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_for(response).await)
    }
}

fn transport(err: reqwest::Error) -> SessionError {
    // timeouts and connection failures are all retryable from the UI's view
    SessionError::Transient(err.to_string())
}

async fn error_for(response: Response) -> SessionError {
    let status = response.status();
    let message = response
        .json::<ApiMessage>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.to_string());

    match status {
        StatusCode::BAD_REQUEST => SessionError::Validation(message),
        StatusCode::UNAUTHORIZED => SessionError::Auth(message),
        StatusCode::NOT_FOUND => SessionError::NotFound(message),
        _ => SessionError::Transient(message),
    }
}

#[async_trait]
impl ItemApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, SessionError> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(transport)?;

        let auth: AuthResponse = self
            .expect_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        self.store_token(&auth.token);
        Ok(auth)
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone_number: Option<&str>,
    ) -> Result<AuthResponse, SessionError> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(&RegisterRequest {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                phone_number: phone_number.map(str::to_string),
            })
            .send()
            .await
            .map_err(transport)?;

        let auth: AuthResponse = self
            .expect_success(response)
            .await?
            .json()
            .await
            .map_err(transport)?;

        self.store_token(&auth.token);
        Ok(auth)
    }

    async fn list_items(&self) -> Result<Vec<Item>, SessionError> {
        let response = self
            .request(Method::GET, "/items")
            .send()
            .await
            .map_err(transport)?;

        self.expect_success(response)
            .await?
            .json()
            .await
            .map_err(transport)
    }

    async fn create_item(&self, name: &str, kind: &str) -> Result<Item, SessionError> {
        let response = self
            .request(Method::POST, "/items")
            .json(&CreateItemRequest {
                name: name.to_string(),
                kind: kind.to_string(),
            })
            .send()
            .await
            .map_err(transport)?;

        self.expect_success(response)
            .await?
            .json()
            .await
            .map_err(transport)
    }

    async fn ring_item(&self, id: &str) -> Result<Item, SessionError> {
        let response = self
            .request(Method::POST, &format!("/items/{id}/ring"))
            .send()
            .await
            .map_err(transport)?;

        self.expect_success(response)
            .await?
            .json()
            .await
            .map_err(transport)
    }

    async fn delete_item(&self, id: &str) -> Result<(), SessionError> {
        let response = self
            .request(Method::DELETE, &format!("/items/{id}"))
            .send()
            .await
            .map_err(transport)?;

        self.expect_success(response).await?;
        Ok(())
    }

    fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }
}
