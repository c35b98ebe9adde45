mod error;
mod json;
mod macros;
mod memory;
pub mod models;
mod store;

pub use crate::error::StoreError;
pub use json::JsonStore;
pub use memory::{Dataset, MemoryStore};
pub use store::Store;
