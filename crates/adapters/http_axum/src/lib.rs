//! # mockstore-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **generic API** (`/api/data/:id`) returning raw records
//! - Serve the **catalog API** (`/api/v1/{category|customer|product}/…`)
//!   returning `{"result": …}` envelopes
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application errors into `{"error": …}` responses
//! - Apply request tracing and permissive CORS to every response, and answer
//!   unmatched routes with `501 Not Implemented`
//!
//! ## Dependency rule
//! Depends on `mockstore-app` (for port traits and services) and
//! `mockstore-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
