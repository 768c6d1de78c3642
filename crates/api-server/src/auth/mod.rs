//! Session tokens and bearer checks for the task endpoints.

mod bearer;
mod jwt;

pub use bearer::{authorize, extract_bearer_token};
pub use jwt::{issue_session_token, verify_session_token, SessionClaims};
