use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use taskdeck_core::auth::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

fn session_validation() -> Validation {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation
}

pub fn issue_session_token(user: &User, secret: &str, ttl_hours: i64) -> Result<String, String> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = SessionClaims {
        sub: user.id.clone(),
        username: user.username.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| format!("Failed to sign session token: {}", err))
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, String> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &session_validation(),
    )
    .map(|decoded| decoded.claims)
    .map_err(|err| format!("Invalid session token: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "1".to_string(),
            username: "test".to_string(),
            email: "test@example.com".to_string(),
        }
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let token = issue_session_token(&user(), "secret", 1).unwrap();
        let claims = verify_session_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "1");
        assert_eq!(claims.username, "test");
    }

    #[test]
    fn token_rejected_with_other_secret() {
        let token = issue_session_token(&user(), "secret", 1).unwrap();
        assert!(verify_session_token(&token, "other").is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(verify_session_token("not-a-jwt", "secret").is_err());
    }
}
