use std::sync::Arc;

use dashmap::DashMap;

use techstore_core::cart::{Cart, LineItem};
use techstore_core::catalog::Catalog;
use techstore_core::error::{Result, StoreError};

/// Session carts: `session_id -> Cart`.
///
/// Every mutation runs inside the shard entry for its session, so concurrent
/// writers to one cart are serialized and no increment is lost.
pub struct CartStore {
    catalog: Arc<Catalog>,
    carts: DashMap<String, Cart>,
}

impl CartStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            carts: DashMap::new(),
        }
    }

    pub fn get_cart(&self, session_id: &str) -> Vec<LineItem> {
        self.carts
            .get(session_id)
            .map(|c| c.items().to_vec())
            .unwrap_or_default()
    }

    /// Add `quantity` units of a catalog product. Unknown ids leave every
    /// cart untouched.
    pub fn add_item(&self, session_id: &str, product_id: u32, quantity: u32) -> Result<Vec<LineItem>> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or(StoreError::ProductNotFound(product_id))?;

        let mut cart = self.carts.entry(session_id.to_string()).or_default();
        cart.add(product, quantity)?;
        tracing::debug!(session = %session_id, product_id, quantity, "cart add");
        Ok(cart.items().to_vec())
    }

    /// Remove the whole line for `product_id`; absent lines are a no-op.
    pub fn remove_item(&self, session_id: &str, product_id: u32) -> Vec<LineItem> {
        let Some(mut cart) = self.carts.get_mut(session_id) else {
            return Vec::new();
        };
        if cart.remove(product_id) {
            tracing::debug!(session = %session_id, product_id, "cart remove");
        }
        cart.items().to_vec()
    }

    /// Empty the cart, returning what it held.
    pub fn clear(&self, session_id: &str) -> Cart {
        self.carts
            .remove(session_id)
            .map(|(_, cart)| cart)
            .unwrap_or_default()
    }

    /// Number of sessions holding a cart.
    pub fn sessions(&self) -> usize {
        self.carts.len()
    }
}
