//! Durable key-value storage
//!
//! Auth credentials, the mock backend's task list, and UI preferences all
//! live under named string keys in one [`KeyValueStore`].

mod file_store;
mod memory;
mod repository;

pub use file_store::FileKvStore;
pub use memory::MemoryStore;
pub use repository::{delete_keys, keys, load_json, save_json, KeyValueStore};
