use super::*;

pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };

    let Ok(value) = value.to_str() else {
        return unauthorized();
    };

    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };

    let token_hash = hash_token(token);

    let token_id = {
        let idx = state.token_hash_index.read().await;
        idx.get(&token_hash).cloned()
    };
    let Some(token_id) = token_id else {
        return unauthorized();
    };

    let user_id = {
        let tokens = state.tokens.read().await;
        let Some(t) = tokens.get(&token_id) else {
            return unauthorized();
        };
        if t.revoked_at.is_some() {
            return unauthorized();
        }
        t.user_id.clone()
    };
    {
        let users = state.users.read().await;
        if !users.contains_key(&user_id) {
            return unauthorized();
        }
    }

    req.extensions_mut().insert(Subject { user_id });
    next.run(req).await
}

pub(super) async fn me(
    State(state): State<Arc<AppState>>,
    Extension(subject): Extension<Subject>,
) -> Response {
    let users = state.users.read().await;
    let Some(record) = users.get(&subject.user_id) else {
        return unauthorized();
    };
    match profile_view(record) {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => internal_error(err),
    }
}
