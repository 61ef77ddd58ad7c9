//! Cart line-item logic.
//!
//! A `Cart` holds at most one line per product id. Adding a product that is
//! already present bumps its quantity; removal drops the whole line.

use serde::Serialize;

use crate::catalog::Product;
use crate::error::{Result, StoreError};

/// One product-quantity entry within a cart.
///
/// Name, price and image are copied from the catalog at add time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: u32,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Ordered line items for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `product`, merging into an existing line.
    ///
    /// A merged quantity that would not fit in `u32` is a `Validation` error
    /// and leaves the cart as it was.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<()> {
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    StoreError::Validation(format!(
                        "quantity for product {} exceeds {}",
                        product.id,
                        u32::MAX
                    ))
                })?;
            }
            None => self.items.push(LineItem::snapshot(product, quantity)),
        }
        Ok(())
    }

    /// Drop the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: u32) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}
