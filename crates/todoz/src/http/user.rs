use super::error::ApiErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use todoapp::model::UserId;

pub const USER_HEADER: &str = "x-user-id";
pub const MAX_USER_ID_LEN: usize = 128;

/// The caller's user id, taken from the `x-user-id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(USER_HEADER).ok_or_else(|| {
            ApiErrorResponse::bad_request("MISSING_USER", format!("{} header is required", USER_HEADER))
        })?;
        let raw = value
            .to_str()
            .map_err(|_| invalid_user())?;
        parse_user_id(raw).map(CurrentUser).ok_or_else(invalid_user)
    }
}

fn invalid_user() -> ApiErrorResponse {
    ApiErrorResponse::bad_request(
        "INVALID_USER",
        format!(
            "{} must be 1-{} characters of letters, digits, '-', '_', '.', '@'",
            USER_HEADER, MAX_USER_ID_LEN
        ),
    )
}

pub fn parse_user_id(raw: &str) -> Option<UserId> {
    let valid = !raw.is_empty()
        && raw.len() <= MAX_USER_ID_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'));
    valid.then(|| UserId::new(raw))
}
