//! Session-scoped cart state.
//!
//! Carts live in memory, keyed by a random [`CartKey`] kept in the shopper's
//! session. Every mutation clones the current snapshot, applies the change,
//! and swaps the new snapshot in whole, so readers never see a half-applied
//! update. Mutations of one cart are serialised; different carts never wait
//! on each other. Carts nobody has touched for the idle timeout are evicted.

use std::convert::Infallible;
use std::fmt;
use std::future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use rocketshoes_core::{Cart, CartError, CartIntent, Product, ProductId, UpdateProductAmount};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on carts held in memory at once.
const MAX_CARTS: u64 = 100_000;

/// Opaque identifier linking a session to its cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartKey(Uuid);

impl CartKey {
    /// Generate a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory cart store shared by all request handlers.
#[derive(Clone)]
pub struct CartStore {
    carts: Cache<CartKey, Arc<Cart>>,
}

impl CartStore {
    /// Create a store whose carts expire after `idle_timeout` without access.
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        let carts = Cache::builder()
            .max_capacity(MAX_CARTS)
            .time_to_idle(idle_timeout)
            .build();

        Self { carts }
    }

    /// Current snapshot of a cart. Unknown or expired keys yield an empty cart.
    pub async fn cart(&self, key: CartKey) -> Arc<Cart> {
        self.carts.get(&key).await.unwrap_or_default()
    }

    /// Add one unit of `product`, appending a new line or incrementing the
    /// existing one.
    pub async fn add_product(&self, key: CartKey, product: &Product) -> Arc<Cart> {
        let Ok(cart) = self
            .modify::<Infallible>(key, |cart| {
                cart.add_product(product);
                Ok(())
            })
            .await;
        tracing::debug!(cart = %key, product_id = %product.id, "Added product to cart");
        cart
    }

    /// Remove a product's line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ProductNotFound`] if the product is not in the cart.
    pub async fn remove_product(
        &self,
        key: CartKey,
        product_id: ProductId,
    ) -> Result<Arc<Cart>, CartError> {
        self.apply(key, CartIntent::Remove(product_id)).await
    }

    /// Set a product's amount.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidAmount`] for amounts below 1,
    /// [`CartError::AmountTooLarge`] for amounts past the quantity limit, and
    /// [`CartError::ProductNotFound`] for products not in the cart. The cart
    /// is unchanged in every case.
    pub async fn update_product_amount(
        &self,
        key: CartKey,
        update: UpdateProductAmount,
    ) -> Result<Arc<Cart>, CartError> {
        self.apply(key, update.into()).await
    }

    /// Apply a shopper intent.
    ///
    /// # Errors
    ///
    /// See [`CartStore::update_product_amount`] and [`CartStore::remove_product`].
    pub async fn apply(&self, key: CartKey, intent: CartIntent) -> Result<Arc<Cart>, CartError> {
        let cart = self.modify(key, |cart| cart.apply(intent)).await?;
        tracing::debug!(cart = %key, ?intent, "Applied cart intent");
        Ok(cart)
    }

    /// Clone, mutate, and swap in a cart snapshot. Nothing is stored when
    /// `change` fails.
    async fn modify<E>(
        &self,
        key: CartKey,
        change: impl FnOnce(&mut Cart) -> Result<(), E>,
    ) -> Result<Arc<Cart>, E> {
        let mut rejected = None;

        let result = self
            .carts
            .entry(key)
            .and_compute_with(|entry| {
                let mut cart = entry.map_or_else(Cart::new, |entry| entry.value().as_ref().clone());
                let op = match change(&mut cart) {
                    Ok(()) => Op::Put(Arc::new(cart)),
                    Err(err) => {
                        rejected = Some(err);
                        Op::Nop
                    }
                };
                future::ready(op)
            })
            .await;

        if let Some(err) = rejected {
            return Err(err);
        }
        match result {
            CompResult::Inserted(entry)
            | CompResult::ReplacedWith(entry)
            | CompResult::Unchanged(entry) => Ok(entry.into_value()),
            CompResult::Removed(_) | CompResult::StillNone(_) => Ok(Arc::default()),
        }
    }
}
