//! Cart snapshots and the intents that change them.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s keyed by [`ProductId`].
//! Lines keep the order in which products were first added. The cart page
//! never edits a cart directly; it renders a snapshot and turns shopper
//! clicks into [`CartIntent`]s that the cart store applies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, ProductId, Quantity};

/// Errors raised when applying a cart mutation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// No line in the cart has this product.
    #[error("product {0} is not in the cart")]
    ProductNotFound(ProductId),
    /// Requested amount is zero or negative. Removal goes through
    /// [`CartIntent::Remove`] instead.
    #[error("invalid amount {0}: must be at least 1")]
    InvalidAmount(i64),
    /// Requested amount does not fit in a [`Quantity`].
    #[error("invalid amount {0}: must be at most {max}", max = Quantity::MAX)]
    AmountTooLarge(i64),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    pub amount: Quantity,
}

impl CartLineItem {
    /// Create a line holding one unit of `product`.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            amount: Quantity::ONE,
        }
    }

    /// Unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount.get())
    }

    /// Whether the decrement control is enabled. A single unit can only be
    /// removed, not decremented.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.amount.decrement().is_some()
    }

    /// Request one more unit, or `None` once the line is at [`Quantity::MAX`].
    #[must_use]
    pub fn increment_intent(&self) -> Option<UpdateProductAmount> {
        self.amount.checked_increment().map(|amount| self.set_amount(amount))
    }

    /// Request one fewer unit, or `None` while the control is disabled.
    #[must_use]
    pub fn decrement_intent(&self) -> Option<UpdateProductAmount> {
        self.amount.decrement().map(|amount| self.set_amount(amount))
    }

    fn set_amount(&self, amount: Quantity) -> UpdateProductAmount {
        UpdateProductAmount {
            product_id: self.id,
            amount: i64::from(amount.get()),
        }
    }
}

/// Request to set the amount of a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    /// Requested amount. Kept signed so out-of-range requests can be
    /// reported rather than silently clamped.
    pub amount: i64,
}

/// A change the shopper asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartIntent {
    UpdateAmount(UpdateProductAmount),
    Remove(ProductId),
}

impl From<UpdateProductAmount> for CartIntent {
    fn from(update: UpdateProductAmount) -> Self {
        Self::UpdateAmount(update)
    }
}

/// An ordered snapshot of the shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Find the line for a product.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.id == product_id)
    }

    /// Sum of every line's unit price times amount.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLineItem::subtotal).sum()
    }

    /// Add one unit of `product`. A product already in the cart gets its
    /// amount incremented; a new one is appended with amount 1.
    pub fn add_product(&mut self, product: &Product) {
        match self.lines.iter_mut().find(|line| line.id == product.id) {
            Some(line) => line.amount = line.amount.increment(),
            None => self.lines.push(CartLineItem::from_product(product)),
        }
    }

    /// Remove the line for `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the product is not in the cart.
    pub fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id == product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;
        self.lines.remove(index);
        Ok(())
    }

    /// Set the amount of a product already in the cart.
    ///
    /// The cart is unchanged when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidAmount`] if the amount is below 1. Zero does not
    ///   remove the line.
    /// - [`CartError::AmountTooLarge`] if the amount exceeds [`Quantity::MAX`].
    /// - [`CartError::ProductNotFound`] if the product is not in the cart.
    pub fn update_product_amount(&mut self, update: UpdateProductAmount) -> Result<(), CartError> {
        let amount = match Quantity::from_requested(update.amount) {
            Some(amount) => amount,
            None if update.amount > 0 => return Err(CartError::AmountTooLarge(update.amount)),
            None => return Err(CartError::InvalidAmount(update.amount)),
        };
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.id == update.product_id)
            .ok_or(CartError::ProductNotFound(update.product_id))?;
        line.amount = amount;
        Ok(())
    }

    /// Apply a shopper intent.
    ///
    /// # Errors
    ///
    /// See [`Cart::update_product_amount`] and [`Cart::remove_product`].
    pub fn apply(&mut self, intent: CartIntent) -> Result<(), CartError> {
        match intent {
            CartIntent::UpdateAmount(update) => self.update_product_amount(update),
            CartIntent::Remove(product_id) => self.remove_product(product_id),
        }
    }
}

impl FromIterator<CartLineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartLineItem>>(iter: I) -> Self {
        let mut cart = Self::new();
        for item in iter {
            match cart.lines.iter_mut().find(|line| line.id == item.id) {
                Some(line) => *line = item,
                None => cart.lines.push(item),
            }
        }
        cart
    }
}
