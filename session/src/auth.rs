//! Minimal authenticated/unauthenticated gate.
//!
//! Not a security boundary: it records whether login or register succeeded,
//! holds the returned user and bearer token, and hands the token to the
//! transport so item calls are authorized. An embedding app that wants the
//! session to survive restarts persists the user/token pair itself and calls
//! [`AuthGate::restore`] on startup.

use findmy_model::User;

use crate::api::ItemApi;

pub struct AuthGate<A: ItemApi> {
    api: A,
    authenticated: bool,
    user: Option<User>,
    token: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl<A: ItemApi> AuthGate<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            authenticated: false,
            user: None,
            token: None,
            loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn login(&mut self, email: &str, password: &str) {
        self.loading = true;
        self.error = None;

        match self.api.login(email, password).await {
            Ok(auth) => self.adopt(auth.user, auth.token),
            Err(err) => self.reject(err.to_string()),
        }

        self.loading = false;
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        phone_number: Option<&str>,
    ) {
        self.loading = true;
        self.error = None;

        match self.api.register(name, email, password, phone_number).await {
            Ok(auth) => self.adopt(auth.user, auth.token),
            Err(err) => self.reject(err.to_string()),
        }

        self.loading = false;
    }

    /// Re-adopts a previously persisted identity without a network call.
    pub fn restore(&mut self, user: User, token: String) {
        self.api.set_token(Some(token.clone()));
        self.adopt(user, token);
    }

    pub fn logout(&mut self) {
        self.api.set_token(None);
        self.authenticated = false;
        self.user = None;
        self.token = None;
        self.error = None;
    }

    fn adopt(&mut self, user: User, token: String) {
        self.authenticated = true;
        self.user = Some(user);
        self.token = Some(token);
    }

    fn reject(&mut self, message: String) {
        self.authenticated = false;
        self.user = None;
        self.token = None;
        self.error = Some(message);
    }
}
