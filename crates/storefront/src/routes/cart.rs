//! Cart route handlers.
//!
//! The cart page renders a snapshot of the shopper's cart and turns each
//! click into a single cart-store call. Mutations use HTMX for in-place
//! updates and fall back to a redirect to `/cart` for plain form posts.
//! Cart keys are stored in the session and mapped to in-memory carts.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use rocketshoes_core::{Cart, CartError, CurrencyCode, Price, ProductId, UpdateProductAmount};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::CartKey;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

/// HTMX event fired after every cart change so the badge refreshes.
const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub amount: u32,
    /// Formatted unit price.
    pub price: String,
    /// Formatted unit price times amount.
    pub subtotal: String,
    /// Amount requested by the increment control; `None` once the line is
    /// at the quantity limit.
    pub increment_amount: Option<i64>,
    /// Amount requested by the decrement control; `None` while disabled.
    pub decrement_amount: Option<i64>,
}

impl CartItemView {
    /// Whether the increment control renders disabled.
    #[must_use]
    pub const fn increment_disabled(&self) -> bool {
        self.increment_amount.is_none()
    }

    /// Whether the decrement control renders disabled.
    #[must_use]
    pub const fn decrement_disabled(&self) -> bool {
        self.decrement_amount.is_none()
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    /// Formatted grand total.
    pub total: String,
    /// Number of distinct products.
    pub item_count: usize,
}

impl CartView {
    /// Derive the view from a cart snapshot. Recomputed on every render.
    #[must_use]
    pub fn new(cart: &Cart, currency: CurrencyCode) -> Self {
        let format = |amount| Price::new(amount, currency).display();

        let items = cart
            .lines()
            .iter()
            .map(|line| CartItemView {
                id: line.id,
                title: line.title.clone(),
                image: line.image.clone(),
                amount: line.amount.get(),
                price: format(line.price),
                subtotal: format(line.subtotal()),
                increment_amount: line.increment_intent().map(|intent| intent.amount),
                decrement_amount: line.decrement_intent().map(|intent| intent.amount),
            })
            .collect();

        Self {
            items,
            total: format(cart.total()),
            item_count: cart.len(),
        }
    }

    /// Create an empty cart.
    #[must_use]
    pub fn empty(currency: CurrencyCode) -> Self {
        Self::new(&Cart::new(), currency)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart key from the session.
async fn get_cart_key(session: &Session) -> Option<CartKey> {
    session
        .get::<CartKey>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Get the cart key from the session, creating one on first use.
async fn ensure_cart_key(session: &Session) -> Result<CartKey> {
    if let Some(key) = get_cart_key(session).await {
        return Ok(key);
    }
    let key = CartKey::generate();
    session.insert(session_keys::CART_ID, key).await?;
    Ok(key)
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update amount form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    /// Header badge count.
    pub cart_count: usize,
}

/// Cart contents fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub cart_count: usize,
}

/// Answer a cart mutation: the refreshed fragment for HTMX, a redirect back
/// to the cart page otherwise.
fn cart_changed(headers: &HeaderMap, cart: &Cart, currency: CurrencyCode) -> Response {
    if !is_htmx(headers) {
        return Redirect::to("/cart").into_response();
    }
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartItemsTemplate {
            cart: CartView::new(cart, currency),
        },
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> CartShowTemplate {
    let currency = state.config().currency;
    let cart = match get_cart_key(&session).await {
        Some(key) => CartView::new(&*state.carts().cart(key).await, currency),
        None => CartView::empty(currency),
    };

    CartShowTemplate {
        cart_count: cart.item_count,
        cart,
    }
}

/// Add one unit of a catalog product.
///
/// Creates the shopper's cart on first use. HTMX callers get the updated
/// count badge.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?
        .clone();

    let key = ensure_cart_key(&session).await?;
    let cart = state.carts().add_product(key, &product).await;

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/cart").into_response());
    }
    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate {
            cart_count: cart.len(),
        },
    )
        .into_response())
}

/// Set a line's amount. Backs both the increment and decrement controls.
#[instrument(skip(state, session, headers))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let Some(key) = get_cart_key(&session).await else {
        return Err(CartError::ProductNotFound(form.product_id).into());
    };

    let product_id = form.product_id.to_string();
    let amount = form.amount.to_string();
    add_breadcrumb(
        "cart",
        "Updated product amount",
        Some(&[("product_id", product_id.as_str()), ("amount", amount.as_str())]),
    );

    let cart = state
        .carts()
        .update_product_amount(
            key,
            UpdateProductAmount {
                product_id: form.product_id,
                amount: form.amount,
            },
        )
        .await?;

    Ok(cart_changed(&headers, &cart, state.config().currency))
}

/// Remove a line regardless of its amount.
#[instrument(skip(state, session, headers))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let Some(key) = get_cart_key(&session).await else {
        return Err(CartError::ProductNotFound(form.product_id).into());
    };

    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Removed product",
        Some(&[("product_id", product_id.as_str())]),
    );

    let cart = state.carts().remove_product(key, form.product_id).await?;

    Ok(cart_changed(&headers, &cart, state.config().currency))
}

/// Number of distinct products in the session's cart.
pub async fn cart_count(state: &AppState, session: &Session) -> usize {
    match get_cart_key(session).await {
        Some(key) => state.carts().cart(key).await.len(),
        None => 0,
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> CartCountTemplate {
    CartCountTemplate {
        cart_count: cart_count(&state, &session).await,
    }
}

/// Checkout trigger.
///
/// Payment is handled elsewhere; this only marks the point where a checkout
/// flow would start and leaves the cart untouched.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> StatusCode {
    let lines = cart_count(&state, &session).await;
    tracing::info!(lines, "Checkout requested");

    StatusCode::NO_CONTENT
}
