//! Persistence with the actor pattern
//!
//! [`Store`] talks to SQLite synchronously. [`StoreManager`] owns a store
//! inside a tokio task and hands out cheap, cloneable handles.

mod db;
mod manager;
mod messages;

pub use db::Store;
pub use manager::StoreManager;
pub use messages::{StoreCommand, StoreError, StoreResponse};
