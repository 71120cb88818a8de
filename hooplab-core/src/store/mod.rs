//! Document store — the only boundary to the outside world.
//!
//! Trait in `backend`, a HashMap-backed double in `memory`, and the
//! JSON-file backend the CLI runs against in `json`.

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::{DocumentStore, StoreError, BUILDS, POSTS, USERS};
pub use json::JsonStore;
pub use memory::MemoryStore;
