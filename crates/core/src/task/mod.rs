//! Task module
//!
//! This module contains task-related types and logic.

mod model;

pub use model::*;
