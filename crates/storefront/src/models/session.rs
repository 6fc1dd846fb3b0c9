//! Session-related types.

/// Session keys for shopper state.
pub mod keys {
    /// Key for storing the shopper's [`CartKey`](crate::cart_store::CartKey).
    pub const CART_ID: &str = "cart_id";
}
