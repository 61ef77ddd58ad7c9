//! In-memory state stores. Nothing here outlives the process.

pub mod cart_store;

pub use cart_store::CartStore;
