use serde::{Deserialize, Serialize};

use super::AccountType;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub version: u32,

    #[serde(default)]
    pub server: Option<ServerConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: String,
}

/// Durable session state. `credential` is the single persisted key of the
/// authorization model: absent means unauthenticated, present triggers
/// identity resolution on startup.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
}
