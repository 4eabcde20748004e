//! # mockstore-domain
//!
//! Pure domain model for the mockstore JSON-backed mock API.
//!
//! ## Responsibilities
//! - Foundational types: record identifiers, error conventions
//! - Define **Records** (open key/value items)
//! - Define **Collections** (declared schema of the typed collections:
//!   primary key and whitelist per collection)
//! - Define the two datastore shapes: the typed **Catalog** (named lists)
//!   and the generic **`DataSet`** (flat `id → record` map)
//! - Contain the lookup and mutation rules (linear scan, first match wins)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Persistence is expressed as a port trait in the `app` crate.

pub mod error;
pub mod id;

pub mod catalog;
pub mod collection;
pub mod dataset;
pub mod record;
