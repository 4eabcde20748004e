//! # mockstore-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** adapters must implement (driven/outbound port):
//!   - `SnapshotStore`: load and save a whole datastore
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CatalogService`: list, find, create, replace, patch, delete typed records
//!   - `DataService`: get, create, replace, patch, delete generic records
//! - Provide the **mirror**: the in-memory copy of a datastore, with a single
//!   writer that persists every mutation before committing it
//!
//! ## Dependency rule
//! Depends on `mockstore-domain` only (plus `tokio::sync` for the mirror lock).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod mirror;
pub mod ports;
pub mod services;
