//! Request/response payloads for the auth endpoints.

#[derive(Debug, serde::Serialize)]
pub(super) struct CredentialsRequest<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, serde::Serialize)]
pub(super) struct ExchangeRequest<'a> {
    pub(super) assertion: &'a str,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) error: Option<String>,

    #[serde(default)]
    pub(super) message: Option<String>,
}
