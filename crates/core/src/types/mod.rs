//! Core types for Rocketshoes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart::{Cart, CartError, CartIntent, CartLineItem, UpdateProductAmount};
pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use product::Product;
pub use quantity::Quantity;
