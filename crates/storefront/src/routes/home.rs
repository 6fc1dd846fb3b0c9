//! Catalog home page.
//!
//! Lists every product with an "add to cart" control. This is also where
//! the empty cart page links back to.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use rocketshoes_core::{CurrencyCode, Price, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::cart::cart_count;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    /// Formatted unit price.
    pub price: String,
}

impl ProductView {
    fn new(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            price: Price::new(product.price, currency).display(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    /// Header badge count.
    pub cart_count: usize,
}

/// Display the catalog.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> HomeTemplate {
    let currency = state.config().currency;
    let products = state
        .catalog()
        .products()
        .iter()
        .map(|product| ProductView::new(product, currency))
        .collect();

    HomeTemplate {
        products,
        cart_count: cart_count(&state, &session).await,
    }
}
