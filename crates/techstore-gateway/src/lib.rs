//! TechStore gateway library entry.
//!
//! This crate wires configuration, the catalog and cart store, request
//! metrics, and the HTTP routes into one axum service. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod context;
pub mod error;
pub mod obs;
pub mod ops;
pub mod pages;
pub mod router;
pub mod store;
