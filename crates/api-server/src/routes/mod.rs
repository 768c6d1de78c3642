//! Route handlers

pub mod auth;
pub mod health;
pub mod task;

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// `{message}` error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

pub type RouteError = (StatusCode, Json<ErrorResponse>);

pub fn route_error(status: StatusCode, message: impl Into<String>) -> RouteError {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
}

pub fn unauthorized() -> RouteError {
    route_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

pub fn not_found(message: impl Into<String>) -> RouteError {
    route_error(StatusCode::NOT_FOUND, message)
}

pub fn bad_request(message: impl Into<String>) -> RouteError {
    route_error(StatusCode::BAD_REQUEST, message)
}

pub fn internal_error(error: impl std::fmt::Display) -> RouteError {
    route_error(StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
}
