//! JSON API: catalog browsing and the session cart.

pub mod cart;
pub mod products;
