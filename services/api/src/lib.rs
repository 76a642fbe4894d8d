//! services/api/src/lib.rs
//!
//! The HTTP service around the fitness tracker core: configuration, the
//! adapters implementing the core ports, and the axum handlers.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
