//! Typed request bodies.
//!
//! Bodies are parsed from raw bytes so that malformed JSON and type mismatches
//! surface as `StoreError::Validation` instead of being coerced.

use serde::Deserialize;

use crate::error::{Result, StoreError};

/// `POST /api/cart` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: u32,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl AddToCart {
    pub fn parse(body: &[u8]) -> Result<Self> {
        let req: AddToCart = serde_json::from_slice(body)
            .map_err(|e| StoreError::Validation(format!("invalid cart body: {e}")))?;
        if req.quantity == Some(0) {
            return Err(StoreError::Validation(
                "quantity must be a positive integer".into(),
            ));
        }
        Ok(req)
    }

    /// Requested quantity, defaulting to one.
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}
