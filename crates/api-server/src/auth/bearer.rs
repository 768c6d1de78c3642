use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::debug;

use super::jwt::verify_session_token;
use crate::routes::{unauthorized, RouteError};
use crate::state::AppState;

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// A missing header, a non-Bearer scheme, or an empty token are all
/// answered with 401 `{message: "Unauthorized"}`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, RouteError> {
    let auth_header = headers.get(AUTHORIZATION).ok_or_else(unauthorized)?;
    let auth_value = auth_header.to_str().map_err(|_| unauthorized())?;
    let token = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(unauthorized)?
        .trim();

    if token.is_empty() {
        return Err(unauthorized());
    }
    Ok(token)
}

/// Gate for every task endpoint
pub fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), RouteError> {
    let token = extract_bearer_token(headers)?;

    if state.config().strict_tokens {
        verify_session_token(token, &state.config().jwt_secret).map_err(|err| {
            debug!("Rejecting bearer token: {}", err);
            unauthorized()
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_static("Bearer secret-token"),
        );

        let token = extract_bearer_token(&headers).unwrap();
        assert_eq!(token, "secret-token");
    }

    #[test]
    fn rejects_when_authorization_header_missing() {
        let headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn rejects_when_scheme_is_not_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_static("Basic secret-token"),
        );
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn rejects_empty_token() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer   "));
        assert!(extract_bearer_token(&headers).is_err());
    }
}
