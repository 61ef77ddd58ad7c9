//! Top-level facade crate for TechStore.
//!
//! Re-exports the domain types and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use techstore_core::*;
}

pub mod gateway {
    pub use techstore_gateway::*;
}
