//! Auth payloads shared by the mock API and the client.

mod model;

pub use model::*;
