use reqwest::StatusCode;

use crate::model::UserProfile;

use super::types::{CredentialsRequest, ErrorBody, ExchangeRequest, TokenResponse};
use super::{AuthApi, AuthClient, AuthError};

impl AuthApi for AuthClient {
    fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&CredentialsRequest { email, password })
            .send()
            .map_err(|err| AuthError::Network(format!("login request failed: {err}")))?;

        let status = resp.status();
        if status.is_success() {
            return parse_token(resp, "login");
        }
        let msg = error_message(resp, "login failed");
        match status {
            StatusCode::UNAUTHORIZED => Err(AuthError::InvalidCredentials(msg)),
            _ => Err(AuthError::Network(msg)),
        }
    }

    fn register(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let resp = self
            .client
            .post(self.url("/auth/register"))
            .json(&CredentialsRequest { email, password })
            .send()
            .map_err(|err| AuthError::Network(format!("register request failed: {err}")))?;

        let status = resp.status();
        if status.is_success() {
            return parse_token(resp, "register");
        }
        let msg = error_message(resp, "registration failed");
        match status {
            StatusCode::CONFLICT => Err(AuthError::AccountExists(msg)),
            StatusCode::BAD_REQUEST => Err(AuthError::WeakPassword(msg)),
            _ => Err(AuthError::Network(msg)),
        }
    }

    fn exchange_identity(&self, assertion: &str) -> Result<String, AuthError> {
        let resp = self
            .client
            .post(self.url("/auth/identity"))
            .json(&ExchangeRequest { assertion })
            .send()
            .map_err(|err| AuthError::Network(format!("identity exchange failed: {err}")))?;

        let status = resp.status();
        if status.is_success() {
            return parse_token(resp, "identity exchange");
        }
        let msg = error_message(resp, "identity exchange failed");
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(AuthError::IdentityExchangeFailed(msg))
            }
            _ => Err(AuthError::Network(msg)),
        }
    }

    fn me(&self, credential: &str) -> Result<UserProfile, AuthError> {
        let resp = self
            .client
            .get(self.url("/me"))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {credential}"),
            )
            .send()
            .map_err(|err| AuthError::Network(format!("identity resolution failed: {err}")))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::Unauthorized);
        }
        if !status.is_success() {
            return Err(AuthError::Network(error_message(
                resp,
                "identity resolution failed",
            )));
        }
        resp.json()
            .map_err(|err| AuthError::Network(format!("malformed /me response: {err}")))
    }
}

fn parse_token(resp: reqwest::blocking::Response, label: &str) -> Result<String, AuthError> {
    let t: TokenResponse = resp
        .json()
        .map_err(|err| AuthError::Network(format!("malformed {label} response: {err}")))?;
    Ok(t.token)
}

/// Best-effort extraction of a human-readable message from a JSON error
/// body; falls back to the generic label.
fn error_message(resp: reqwest::blocking::Response, fallback: &str) -> String {
    match resp.json::<ErrorBody>() {
        Ok(body) => body
            .message
            .or(body.error)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        Err(_) => fallback.to_string(),
    }
}
