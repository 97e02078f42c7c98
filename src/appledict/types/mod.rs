//! Foundational data structures, error types, and container layout.

pub mod entry;
pub mod error;
pub mod models;
