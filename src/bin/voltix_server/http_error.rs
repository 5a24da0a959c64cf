use super::*;

fn error_body(code: &str, message: &str) -> serde_json::Value {
    serde_json::json!({"error": code, "message": message})
}

pub(super) fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(error_body("unauthorized", "invalid or missing credential")),
    )
        .into_response()
}

pub(super) fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(error_body("invalid_credentials", "wrong email or password")),
    )
        .into_response()
}

pub(super) fn bad_request(code: &str, message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(error_body(code, message))).into_response()
}

pub(super) fn conflict(code: &str, message: &str) -> Response {
    (StatusCode::CONFLICT, Json(error_body(code, message))).into_response()
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(error_body("internal", &err.to_string())),
    )
        .into_response()
}
