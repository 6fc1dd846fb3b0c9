//! Integration tests for the cart page and its mutations.
//!
//! These tests drive the storefront router end to end: session cookie,
//! cart store, view model, and templates.

use axum::http::StatusCode;
use rocketshoes_integration_tests::TestApp;

// =============================================================================
// Empty State
// =============================================================================

#[tokio::test]
async fn test_empty_cart_shows_message_and_catalog_link() {
    let mut app = TestApp::new();

    let response = app.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("O carrinho está vazio"));
    assert!(response.body.contains(r#"<a href="/" class="button">"#));
    assert!(!response.body.contains("<table"));
    assert!(!response.body.contains("Finalizar pedido"));
}

#[tokio::test]
async fn test_removing_last_item_returns_to_empty_state() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.htmx_post_form("/cart/remove", "product_id=1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("O carrinho está vazio"));
    assert!(!response.body.contains("<table"));
}

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test]
async fn test_add_redirects_to_cart_page() {
    let mut app = TestApp::new();

    let response = app.post_form("/cart/add", "product_id=2").await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/cart"));
}

#[tokio::test]
async fn test_cart_page_renders_line_items() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=2").await;
    app.post_form("/cart/add", "product_id=3").await;

    let response = app.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.matches(r#"<tr data-testid="product">"#).count(), 2);
    assert!(response.body.contains("Tênis VR Caminhada"));
    assert!(response.body.contains("https://images.example.com/2.jpg"));
    assert!(response.body.contains("R$ 139,90"));
    assert!(response.body.contains("R$ 219,90"));
    assert!(response.body.contains("Finalizar pedido"));
    assert!(
        response
            .body
            .contains(r#"<strong data-testid="cart-total">R$ 359,80</strong>"#)
    );
}

#[tokio::test]
async fn test_lines_render_in_insertion_order() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=3").await;
    app.post_form("/cart/add", "product_id=1").await;

    let body = app.get("/cart").await.body;

    let third = body.find("Tênis Duramo Lite").unwrap_or(usize::MAX);
    let first = body.find("Tênis de Caminhada").unwrap_or(usize::MAX);
    assert!(third < first, "product 3 was added first");
}

#[tokio::test]
async fn test_subtotal_and_total_for_two_units() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=1").await;

    let body = app.get("/cart").await.body;

    assert!(body.contains(r#"data-testid="product-amount" readonly value="2""#));
    assert!(body.contains("<strong>R$ 200,00</strong>"));
    assert!(body.contains(r#"<strong data-testid="cart-total">R$ 200,00</strong>"#));
}

// =============================================================================
// Quantity Stepper
// =============================================================================

#[tokio::test]
async fn test_decrement_disabled_at_one_unit() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let body = app.get("/cart").await.body;

    assert!(body.contains(r#"data-testid="decrement-product" disabled"#));
}

#[tokio::test]
async fn test_decrement_enabled_above_one_unit() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=1").await;

    let body = app.get("/cart").await.body;

    assert!(!body.contains(r#"data-testid="decrement-product" disabled"#));
    assert!(body.contains(r#"name="amount" value="1""#));
    assert!(body.contains(r#"name="amount" value="3""#));
}

#[tokio::test]
async fn test_increment_via_htmx_returns_fragment() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app
        .htmx_post_form("/cart/update", "product_id=1&amount=2")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(!response.body.contains("<html"));
    assert!(
        response
            .body
            .contains(r#"data-testid="product-amount" readonly value="2""#)
    );
    assert!(
        response
            .body
            .contains(r#"<strong data-testid="cart-total">R$ 200,00</strong>"#)
    );
}

#[tokio::test]
async fn test_decrement_via_plain_post_redirects() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.post_form("/cart/update", "product_id=1&amount=1").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let body = app.get("/cart").await.body;
    assert!(body.contains(r#"data-testid="product-amount" readonly value="1""#));
    assert!(body.contains(r#"data-testid="decrement-product" disabled"#));
}

#[tokio::test]
async fn test_update_to_zero_is_rejected() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.htmx_post_form("/cart/update", "product_id=1&amount=0").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = app.get("/cart").await.body;
    assert!(body.contains(r#"data-testid="product-amount" readonly value="1""#));
}

#[tokio::test]
async fn test_update_to_negative_is_rejected() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.htmx_post_form("/cart/update", "product_id=1&amount=-3").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_product_not_in_cart() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.htmx_post_form("/cart/update", "product_id=2&amount=2").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_without_session() {
    let mut app = TestApp::new();

    let response = app.htmx_post_form("/cart/update", "product_id=1&amount=2").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_malformed_form() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.htmx_post_form("/cart/update", "product_id=1").await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Removal
// =============================================================================

#[tokio::test]
async fn test_remove_ignores_amount() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=2").await;
    app.post_form("/cart/update", "product_id=1&amount=5").await;

    let response = app.htmx_post_form("/cart/remove", "product_id=1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(!response.body.contains("Tênis de Caminhada"));
    assert!(response.body.contains("Tênis VR Caminhada"));
}

#[tokio::test]
async fn test_remove_product_not_in_cart() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.post_form("/cart/remove", "product_id=3").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Add, Count, Checkout
// =============================================================================

#[tokio::test]
async fn test_add_unknown_product() {
    let mut app = TestApp::new();

    let response = app.post_form("/cart/add", "product_id=99").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_htmx_add_returns_count_badge() {
    let mut app = TestApp::new();
    app.htmx_post_form("/cart/add", "product_id=1").await;

    let response = app.htmx_post_form("/cart/add", "product_id=2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains("2 itens"));
}

#[tokio::test]
async fn test_count_counts_distinct_products() {
    let mut app = TestApp::new();
    assert!(app.get("/cart/count").await.body.contains("0 itens"));

    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/add", "product_id=1").await;

    assert!(app.get("/cart/count").await.body.contains("1 item<"));
}

#[tokio::test]
async fn test_checkout_button_posts_without_scripts() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let body = app.get("/cart").await.body;

    assert!(body.contains(r#"<form action="/cart/checkout" method="post">"#));
    assert!(body.contains(r#"<button type="submit" data-testid="checkout-button">Finalizar pedido</button>"#));
}

#[tokio::test]
async fn test_increment_past_quantity_limit_is_too_large() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;
    app.post_form("/cart/update", "product_id=1&amount=4294967295")
        .await;

    let body = app.get("/cart").await.body;
    assert!(body.contains(r#"data-testid="increment-product" disabled"#));

    let response = app
        .htmx_post_form("/cart/update", "product_id=1&amount=4294967296")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body,
        "invalid amount 4294967296: must be at most 4294967295"
    );
}

#[tokio::test]
async fn test_checkout_is_inert() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", "product_id=1").await;

    let response = app.htmx_post_form("/cart/checkout", "").await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let body = app.get("/cart").await.body;
    assert!(body.contains(r#"<strong data-testid="cart-total">R$ 100,00</strong>"#));
}

#[tokio::test]
async fn test_shoppers_have_separate_carts() {
    let mut first = TestApp::new();
    let mut second = first.other_shopper();

    first.post_form("/cart/add", "product_id=1").await;

    assert!(first.get("/cart").await.body.contains("Tênis de Caminhada"));
    assert!(second.get("/cart").await.body.contains("O carrinho está vazio"));
}
