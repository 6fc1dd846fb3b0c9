//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart_store::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the product catalog, and the cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: CartStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products available for sale
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let carts = CartStore::new(config.cart_idle_timeout);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}
