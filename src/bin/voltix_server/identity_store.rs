use super::*;

use voltix::model::{Subscription, SubscriptionStatus, UserProfile};

pub(super) fn now_ts() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<time>".to_string())
}

pub(super) fn hash_token(secret: &str) -> String {
    blake3::hash(secret.as_bytes()).to_hex().to_string()
}

pub(super) fn hash_password(salt: &str, password: &str) -> String {
    let mut h = blake3::Hasher::new();
    h.update(salt.as_bytes());
    h.update(b"\n");
    h.update(password.as_bytes());
    h.finalize().to_hex().to_string()
}

pub(super) fn generate_secret() -> Result<String> {
    // 32 bytes of entropy, hex-encoded.
    let mut bytes = [0u8; 32];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
    let mut out = String::with_capacity(64);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

fn date_format() -> Result<Vec<time::format_description::FormatItem<'static>>> {
    time::format_description::parse("[year]-[month]-[day]").context("build date format")
}

pub(super) fn today_plus_days(days: i64) -> Result<String> {
    let date = time::OffsetDateTime::now_utc().date() + time::Duration::days(days);
    date.format(&date_format()?).context("format date")
}

/// Computes the client-facing subscription view. Status and days-remaining
/// are derived here; `status == active` exactly when `days_remaining > 0`.
pub(super) fn subscription_view(record: &UserRecord) -> Result<Subscription> {
    let end = time::Date::parse(&record.subscription_end, &date_format()?)
        .with_context(|| format!("parse subscription end {:?}", record.subscription_end))?;
    let today = time::OffsetDateTime::now_utc().date();
    let days = (end - today).whole_days();
    let (status, days_remaining) = if days > 0 {
        (SubscriptionStatus::Active, days as u32)
    } else {
        (SubscriptionStatus::Expired, 0)
    };
    Ok(Subscription {
        plan: record.plan,
        status,
        days_remaining,
        end_date: record.subscription_end.clone(),
    })
}

pub(super) fn profile_view(record: &UserRecord) -> Result<UserProfile> {
    Ok(UserProfile {
        id: record.id.clone(),
        email: record.email.clone(),
        role: record.role,
        subscription: subscription_view(record)?,
    })
}

pub(super) fn users_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("users.json")
}

pub(super) fn tokens_path(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("tokens.json")
}

pub(super) fn load_identity_from_disk(
    data_dir: &std::path::Path,
) -> Result<(HashMap<String, UserRecord>, HashMap<String, AccessToken>)> {
    let users: HashMap<String, UserRecord> = if users_path(data_dir).exists() {
        let bytes = std::fs::read(users_path(data_dir)).context("read users.json")?;
        let list: Vec<UserRecord> = serde_json::from_slice(&bytes).context("parse users.json")?;
        list.into_iter().map(|u| (u.id.clone(), u)).collect()
    } else {
        HashMap::new()
    };

    let tokens: HashMap<String, AccessToken> = if tokens_path(data_dir).exists() {
        let bytes = std::fs::read(tokens_path(data_dir)).context("read tokens.json")?;
        let list: Vec<AccessToken> = serde_json::from_slice(&bytes).context("parse tokens.json")?;
        list.into_iter().map(|t| (t.id.clone(), t)).collect()
    } else {
        HashMap::new()
    };

    Ok((users, tokens))
}

pub(super) fn persist_identity_to_disk(
    data_dir: &std::path::Path,
    users: &HashMap<String, UserRecord>,
    tokens: &HashMap<String, AccessToken>,
) -> Result<()> {
    let mut user_list: Vec<UserRecord> = users.values().cloned().collect();
    user_list.sort_by(|a, b| a.email.cmp(&b.email));
    let users_bytes = serde_json::to_vec_pretty(&user_list).context("serialize users")?;
    write_atomic_overwrite(&users_path(data_dir), &users_bytes).context("write users.json")?;

    let mut token_list: Vec<AccessToken> = tokens.values().cloned().collect();
    token_list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    let tokens_bytes = serde_json::to_vec_pretty(&token_list).context("serialize tokens")?;
    write_atomic_overwrite(&tokens_path(data_dir), &tokens_bytes).context("write tokens.json")?;

    Ok(())
}

fn write_atomic_overwrite(path: &std::path::Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| format!("rename into {}", path.display()))?;
    Ok(())
}

pub(super) async fn persist_state(state: &AppState) -> Result<()> {
    let users = state.users.read().await;
    let tokens = state.tokens.read().await;
    persist_identity_to_disk(&state.data_dir, &users, &tokens)
}

/// Mints a bearer token for the user and indexes its hash. Returns the
/// secret, which is never stored.
pub(super) async fn mint_token(state: &AppState, user_id: &str) -> Result<String> {
    let secret = generate_secret()?;
    let token_hash = hash_token(&secret);
    let created_at = now_ts();
    let token_id = {
        let mut h = blake3::Hasher::new();
        h.update(user_id.as_bytes());
        h.update(b"\n");
        h.update(token_hash.as_bytes());
        h.finalize().to_hex().to_string()
    };
    let token = AccessToken {
        id: token_id.clone(),
        user_id: user_id.to_string(),
        token_hash: token_hash.clone(),
        created_at,
        revoked_at: None,
    };

    {
        let mut tokens = state.tokens.write().await;
        tokens.insert(token_id.clone(), token);
    }
    {
        let mut idx = state.token_hash_index.write().await;
        idx.insert(token_hash, token_id);
    }
    Ok(secret)
}

pub(super) fn new_user_id(email: &str, created_at: &str) -> String {
    let mut h = blake3::Hasher::new();
    h.update(email.as_bytes());
    h.update(b"\n");
    h.update(created_at.as_bytes());
    h.finalize().to_hex().to_string()
}
