//! # mockstore-adapter-storage-json-file
//!
//! JSON file persistence adapter.
//!
//! ## Responsibilities
//! - Implement the `SnapshotStore` port defined in `mockstore-app::ports`
//! - Load a whole datastore from one JSON file at startup
//! - Rewrite the whole file, pretty-printed, after every mutation
//!   (write to a sibling `.tmp` file, then rename over the target)
//!
//! ## Dependency rule
//! Depends on `mockstore-app` (for the port trait) and `mockstore-domain`
//! (for the error type). The `app` and `domain` crates must never reference
//! this adapter.

pub mod error;
pub mod file_store;

pub use file_store::{Config, JsonFileStore};
