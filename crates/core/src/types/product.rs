//! Catalog product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductId;

/// A product that can be placed in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
}
