//! Taskdeck client
//!
//! This crate keeps client-side state in sync with the task API:
//! - [`AuthController`] handles login/logout and the persisted session
//! - [`TasksController`] handles fetch/create/update/delete of tasks
//! - [`view`] derives filtered lists and per-status counts
//!
//! Requests go through any [`Transport`](taskdeck_core::transport::Transport):
//! [`HttpTransport`] for a server, or the mock API's in-process interceptor.

mod api;
mod app;
mod auth;
mod error;
mod http;
mod preferences;
mod tasks;
pub mod view;

pub use api::{
    ApiClient, CREATE_TASK_FAILED, DELETE_TASK_FAILED, FETCH_TASKS_FAILED, LOGIN_FAILED,
    LOGOUT_FAILED, UPDATE_TASK_FAILED,
};
pub use app::AppStore;
pub use auth::{AuthController, AuthPhase, AuthState};
pub use error::{ClientError, Result};
pub use http::HttpTransport;
pub use preferences::Preferences;
pub use tasks::{OperationId, TasksController, TasksState};
