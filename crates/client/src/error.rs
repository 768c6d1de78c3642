//! Error types for the client
//!
//! Every failure is flattened to one human-readable message; the variant
//! only records which family it came from.

use thiserror::Error;

use taskdeck_core::transport::ApiResponse;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Bad credentials, or a missing/expired token
    #[error("{message}")]
    Auth { message: String },

    /// Payload rejected by the API or by a local guard
    #[error("{message}")]
    Validation { message: String },

    /// Operation on a task that does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// API unreachable or its response could not be understood
    #[error("{message}")]
    Network { message: String },

    /// Any other non-2xx answer
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Durable storage could not be written
    #[error("{message}")]
    Storage { message: String },
}

impl ClientError {
    /// Classify a non-2xx response. The body's `message` wins over
    /// `fallback`.
    pub fn from_response(response: &ApiResponse, fallback: &str) -> Self {
        let message = response.message().unwrap_or(fallback).to_string();
        match response.status {
            401 | 403 => Self::Auth { message },
            400 | 422 => Self::Validation { message },
            404 => Self::NotFound { message },
            status => Self::Server { status, message },
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Auth { message }
            | Self::Validation { message }
            | Self::NotFound { message }
            | Self::Network { message }
            | Self::Server { message, .. }
            | Self::Storage { message } => message,
        }
    }
}
