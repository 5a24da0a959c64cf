use super::*;

use voltix::entry::MIN_PASSWORD_LEN;
use voltix::model::{Role, SubscriptionPlan};

pub(super) const TRIAL_DAYS: i64 = 7;

#[derive(serde::Deserialize)]
pub(super) struct CredentialsRequest {
    email: String,
    password: String,
}

#[derive(serde::Deserialize)]
pub(super) struct IdentityRequest {
    assertion: String,
}

fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_ascii_lowercase();
    if email.is_empty() || !email.contains('@') {
        return None;
    }
    Some(email)
}

async fn create_user(
    state: &AppState,
    email: String,
    password: Option<&str>,
) -> Result<UserRecord> {
    let created_at = now_ts();
    let (password_salt, password_hash) = match password {
        Some(password) => {
            let salt = generate_secret()?;
            let hash = hash_password(&salt, password);
            (Some(salt), Some(hash))
        }
        None => (None, None),
    };
    let record = UserRecord {
        id: new_user_id(&email, &created_at),
        email,
        role: Role::User,
        password_salt,
        password_hash,
        plan: SubscriptionPlan::Trial,
        subscription_end: today_plus_days(TRIAL_DAYS)?,
        created_at,
    };
    let mut users = state.users.write().await;
    users.insert(record.id.clone(), record.clone());
    Ok(record)
}

async fn token_response(state: &AppState, user_id: &str) -> Response {
    let secret = match mint_token(state, user_id).await {
        Ok(secret) => secret,
        Err(err) => return internal_error(err),
    };
    if let Err(err) = persist_state(state).await {
        return internal_error(err);
    }
    Json(serde_json::json!({"token": secret})).into_response()
}

pub(super) async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    let Some(email) = normalize_email(&req.email) else {
        return bad_request("invalid_email", "enter a valid email address");
    };
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return bad_request(
            "weak_password",
            &format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }

    // Reserve the email before creating the record so concurrent registers
    // cannot both win.
    {
        let mut idx = state.email_index.write().await;
        if idx.contains_key(&email) {
            return conflict("account_exists", "an account with this email already exists");
        }
        idx.insert(email.clone(), String::new());
    }

    let record = match create_user(&state, email.clone(), Some(&req.password)).await {
        Ok(record) => record,
        Err(err) => {
            let mut idx = state.email_index.write().await;
            idx.remove(&email);
            return internal_error(err);
        }
    };
    {
        let mut idx = state.email_index.write().await;
        idx.insert(email, record.id.clone());
    }

    token_response(&state, &record.id).await
}

pub(super) async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> Response {
    let Some(email) = normalize_email(&req.email) else {
        return invalid_credentials();
    };
    let user_id = {
        let idx = state.email_index.read().await;
        idx.get(&email).cloned()
    };
    let Some(user_id) = user_id else {
        return invalid_credentials();
    };

    {
        let users = state.users.read().await;
        let Some(record) = users.get(&user_id) else {
            return invalid_credentials();
        };
        // Provider-identity users have no password and cannot log in here.
        let (Some(salt), Some(hash)) = (&record.password_salt, &record.password_hash) else {
            return invalid_credentials();
        };
        if hash_password(salt, &req.password) != *hash {
            return invalid_credentials();
        }
    }

    token_response(&state, &user_id).await
}

/// Exchanges a provider identity assertion (`google|<email>`) for a bearer
/// token, creating the account on first sight.
pub(super) async fn identity(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IdentityRequest>,
) -> Response {
    let email = req
        .assertion
        .strip_prefix("google|")
        .and_then(normalize_email);
    let Some(email) = email else {
        return bad_request("identity_exchange_failed", "malformed identity assertion");
    };

    let existing = {
        let idx = state.email_index.read().await;
        idx.get(&email).cloned()
    };
    let user_id = match existing {
        Some(id) => id,
        None => {
            let record = match create_user(&state, email.clone(), None).await {
                Ok(record) => record,
                Err(err) => return internal_error(err),
            };
            let mut idx = state.email_index.write().await;
            idx.insert(email, record.id.clone());
            record.id
        }
    };

    token_response(&state, &user_id).await
}
