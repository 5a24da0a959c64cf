use anyhow::{Context, Result};

use crate::model::UserProfile;

mod auth;
mod error;
mod types;

pub use self::error::AuthError;
pub use self::types::TokenResponse;

/// The authentication surface of the backend. Implemented by [`AuthClient`]
/// for real HTTP and by in-memory fakes in tests.
pub trait AuthApi {
    fn login(&self, email: &str, password: &str) -> Result<String, AuthError>;
    fn register(&self, email: &str, password: &str) -> Result<String, AuthError>;
    fn exchange_identity(&self, assertion: &str) -> Result<String, AuthError>;
    fn me(&self, credential: &str) -> Result<UserProfile, AuthError>;
}

/// Blocking HTTP client for the auth server. Authorization is an explicit
/// per-request parameter (`me` takes the credential); nothing is stashed in
/// shared header state.
#[derive(Clone)]
pub struct AuthClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl AuthClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("voltix")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
