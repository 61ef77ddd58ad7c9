//! Per-request context resolution.
//!
//! Handlers never read the session header directly; they ask the configured
//! `SessionResolver`, so a real session mechanism can replace the header one
//! without touching cart logic.

pub mod session;

pub use session::{HeaderSessionResolver, SessionResolver};
