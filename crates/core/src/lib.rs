//! Rocketshoes Core - Shared types library.
//!
//! This crate provides the domain types used by the storefront:
//! - Type-safe product IDs and cart quantities
//! - Prices and currency formatting
//! - Cart snapshots, their mutations, and the intents the cart page issues
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no clocks. This keeps it lightweight and easy to test.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, quantities, prices, products, and carts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
