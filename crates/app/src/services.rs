//! Application services: use-case implementations.
//!
//! Each service struct accepts a port implementation via a generic parameter
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod catalog_service;
pub mod data_service;
