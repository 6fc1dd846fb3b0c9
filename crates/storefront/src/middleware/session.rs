//! Session middleware configuration.
//!
//! Sessions only carry the shopper's cart key, so they are held in a moka
//! cache alongside the carts themselves. Records are evicted once their
//! expiry date passes or the cache is full.

use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "rocketshoes_session";

/// Browsers cap cookie lifetimes at 400 days.
const MAX_SESSION_SECONDS: u64 = 400 * 24 * 60 * 60;

/// Upper bound on sessions held in memory at once.
const MAX_SESSIONS: u64 = 100_000;

/// Create the in-memory session store.
#[must_use]
pub fn create_session_store() -> MokaStore {
    MokaStore::new(Some(MAX_SESSIONS))
}

/// Create the session layer.
///
/// Sessions expire after the same idle window as carts.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    let idle_seconds = config.cart_idle_timeout.as_secs().min(MAX_SESSION_SECONDS);
    let idle_seconds = i64::try_from(idle_seconds).unwrap_or(i64::MAX);

    SessionManagerLayer::new(create_session_store())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
