/// Failure taxonomy of the auth surface.
///
/// The first four variants are recoverable in place: the entry flow surfaces
/// the message and stays where it is. `Unauthorized` and `Network` raised
/// during identity resolution are not recoverable for the session and force
/// a full logout (fail-closed).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials(String),
    AccountExists(String),
    WeakPassword(String),
    IdentityExchangeFailed(String),
    Unauthorized,
    Network(String),
}

impl AuthError {
    pub fn message(&self) -> &str {
        match self {
            AuthError::InvalidCredentials(m)
            | AuthError::AccountExists(m)
            | AuthError::WeakPassword(m)
            | AuthError::IdentityExchangeFailed(m)
            | AuthError::Network(m) => m,
            AuthError::Unauthorized => "unauthorized (credential invalid or expired)",
        }
    }

    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuthError::Unauthorized | AuthError::Network(_))
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}
