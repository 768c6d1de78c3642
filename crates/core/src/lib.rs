//! Core library for Taskdeck
//!
//! This crate contains the shared building blocks, including:
//! - Task and user models with their wire payloads
//! - The key-value repository used for durable client and mock state
//! - The request/response transport contract

pub mod auth;
pub mod error;
pub mod storage;
pub mod task;
pub mod transport;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
