//! TechStore core: catalog, cart line items, request schemas and error types.
//!
//! This crate defines the domain model and error surface shared by the
//! gateway and tooling. It intentionally carries no transport or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `StoreError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod request;

/// Shared result type.
pub use error::{Result, StoreError};
