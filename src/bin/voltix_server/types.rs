use super::*;

use voltix::model::{Role, SubscriptionPlan};

/// Authenticated caller, attached by the bearer middleware.
#[derive(Clone, Debug)]
pub(super) struct Subject {
    pub(super) user_id: String,
}

#[derive(Clone)]
pub(super) struct AppState {
    pub(super) data_dir: PathBuf,

    pub(super) users: Arc<RwLock<HashMap<String, UserRecord>>>,
    pub(super) email_index: Arc<RwLock<HashMap<String, String>>>,

    pub(super) tokens: Arc<RwLock<HashMap<String, AccessToken>>>,
    pub(super) token_hash_index: Arc<RwLock<HashMap<String, String>>>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct UserRecord {
    pub(super) id: String,
    pub(super) email: String,
    pub(super) role: Role,

    // Absent for provider-identity users; they have no password.
    #[serde(default)]
    pub(super) password_salt: Option<String>,
    #[serde(default)]
    pub(super) password_hash: Option<String>,

    pub(super) plan: SubscriptionPlan,
    /// Subscription end date, `YYYY-MM-DD`.
    pub(super) subscription_end: String,

    pub(super) created_at: String,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(super) struct AccessToken {
    pub(super) id: String,
    pub(super) user_id: String,

    // Stored hash of the bearer token secret.
    pub(super) token_hash: String,

    pub(super) created_at: String,

    #[serde(default)]
    pub(super) revoked_at: Option<String>,
}
