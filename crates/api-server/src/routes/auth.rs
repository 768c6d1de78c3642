//! Login and logout endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use taskdeck_core::auth::{AuthResponse, LoginCredentials, MessageResponse};

use super::{internal_error, route_error, RouteError};
use crate::auth::issue_session_token;
use crate::latency::Endpoint;
use crate::state::AppState;

fn invalid_credentials() -> RouteError {
    route_error(StatusCode::UNAUTHORIZED, "Invalid credentials")
}

/// POST /api/login - Exchange the fixed account's credentials for a token
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginCredentials>, JsonRejection>,
) -> Result<Json<AuthResponse>, RouteError> {
    state.config().latency.wait(Endpoint::Login).await;

    let Json(credentials) = body.map_err(|err| {
        warn!("Rejecting malformed login body: {}", err);
        invalid_credentials()
    })?;

    let config = state.config();
    if credentials.username != config.username || credentials.password != config.password {
        info!("Login rejected for user {:?}", credentials.username);
        return Err(invalid_credentials());
    }

    let token = issue_session_token(&config.user, &config.jwt_secret, config.token_ttl_hours)
        .map_err(internal_error)?;

    info!("Login succeeded for user {}", config.user.username);
    Ok(Json(AuthResponse {
        user: config.user.clone(),
        token,
    }))
}

/// POST /api/logout - Acknowledge the logout; tokens are not tracked server-side
async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    state.config().latency.wait(Endpoint::Logout).await;
    Json(MessageResponse::new("Logged out successfully"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
}
