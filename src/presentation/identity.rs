use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

use crate::domain::UserId;
use crate::presentation::handlers::ErrorResponse;

pub const USER_ID_HEADER: &str = "x-user";

/// Identity of the authenticated caller, resolved by the upstream auth
/// gateway and carried in the `x-user` header. The gateway strips any
/// client-supplied value, so the header is trusted here.
#[derive(Debug, Clone)]
pub struct Identity(pub UserId);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if value.is_empty() {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Authentication required".to_string(),
                }),
            ));
        }

        // The identifier becomes part of the ruleset filename; nothing
        // that could escape the ruleset directory is accepted.
        let valid = value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            tracing::warn!(user = value, "Rejected malformed user identifier");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid user identifier".to_string(),
                }),
            ));
        }

        Ok(Identity(UserId::new(value)))
    }
}
