//! Integration tests for the storefront cart.
//!
//! Every button posts `op=action:id` to `/cart/action`; the response carries
//! out-of-band swaps for the cart rows, the total, the badge and the touched
//! card quantities.

use axum::http::StatusCode;
use streuobst_core::cart::{EMPTY_CART_MESSAGE, MAX_QUANTITY};
use streuobst_integration_tests::{APFEL_BIRNE, APFELSAFT, PROBIERPAKET, TestContext};

fn card_quantity_swap(id: &str, quantity: u32) -> String {
    format!(r#"id="qty-{id}" hx-swap-oob="true">{quantity}</span>"#)
}

fn badge(count: u32) -> String {
    format!(r#"<span id="cart-badge" class="cart-badge">{count}</span>"#)
}

// =============================================================================
// Add / Increment
// =============================================================================

#[tokio::test]
async fn test_add_twice_increments_quantity() {
    let mut ctx = TestContext::new();

    let first = ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    assert_eq!(first.status, StatusCode::OK);
    assert!(first.contains(&card_quantity_swap(APFELSAFT, 1)));
    assert!(first.contains(&badge(1)));
    assert!(!first.contains("/ Stück"));

    let second = ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    assert!(second.contains(&card_quantity_swap(APFELSAFT, 2)));
    assert!(second.contains(&badge(2)));
    assert!(second.contains(">€6,00</span>"));
    assert!(second.contains("€3,00 / Stück"));
}

#[tokio::test]
async fn test_increment_alias_matches_add() {
    let mut ctx = TestContext::new();
    ctx.cart_action(&format!("add:{APFELSAFT}")).await;

    let response = ctx.cart_action(&format!("increment:{APFELSAFT}")).await;
    assert!(response.contains(&card_quantity_swap(APFELSAFT, 2)));
}

#[tokio::test]
async fn test_total_spans_products() {
    let mut ctx = TestContext::new();
    ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    ctx.cart_action(&format!("add:{APFEL_BIRNE}")).await;
    let response = ctx.cart_action(&format!("add:{PROBIERPAKET}")).await;

    // 3,00 + 3,40 + 17,90
    let total = r#"id="cart-total-price" class="cart-total-price" hx-swap-oob="true">€24,30</span>"#;
    assert!(response.contains(total));
    assert!(response.contains(&badge(3)));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut ctx = TestContext::new();
    let response = ctx.cart_action("add:kirschsaft").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Decrement
// =============================================================================

#[tokio::test]
async fn test_decrement_to_zero_removes_item() {
    let mut ctx = TestContext::new();
    ctx.cart_action(&format!("add:{APFELSAFT}")).await;

    let response = ctx.cart_action(&format!("decrement:{APFELSAFT}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains(&card_quantity_swap(APFELSAFT, 0)));
    assert!(response.contains(EMPTY_CART_MESSAGE));
    assert!(response.contains(">€0,00</span>"));
    assert!(response.contains(r#"class="cart-badge hidden">0</span>"#));
}

#[tokio::test]
async fn test_decrement_absent_opens_error_overlay() {
    let mut ctx = TestContext::new();
    ctx.cart_action(&format!("add:{APFEL_BIRNE}")).await;

    let response = ctx.cart_action(&format!("decrement:{APFELSAFT}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains(r#"<div id="error-slot" hx-swap-oob="true">"#));
    assert!(response.contains(r#"class="error-modal open""#));
    assert!(response.contains(&card_quantity_swap(APFELSAFT, 0)));

    // Cart is unchanged
    assert!(response.contains(&badge(1)));
    let page = ctx.get("/").await;
    assert!(page.contains(&format!(r#"id="qty-{APFEL_BIRNE}">1</span>"#)));
}

#[tokio::test]
async fn test_add_past_quantity_limit_opens_error_overlay() {
    let mut ctx = TestContext::new();
    for _ in 0..MAX_QUANTITY {
        ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    }

    let response = ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains(r#"class="error-modal open""#));
    assert!(response.contains(&card_quantity_swap(APFELSAFT, MAX_QUANTITY)));
    assert!(response.contains(&badge(MAX_QUANTITY)));
}

#[tokio::test]
async fn test_successful_action_leaves_error_overlay_alone() {
    let mut ctx = TestContext::new();
    let response = ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    assert!(!response.contains("error-slot"));
}

// =============================================================================
// Remove / Clear
// =============================================================================

#[tokio::test]
async fn test_remove_drops_item_regardless_of_quantity() {
    let mut ctx = TestContext::new();
    for _ in 0..3 {
        ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    }
    ctx.cart_action(&format!("add:{APFEL_BIRNE}")).await;

    let response = ctx.cart_action(&format!("remove:{APFELSAFT}")).await;
    assert!(response.contains(&card_quantity_swap(APFELSAFT, 0)));
    assert!(response.contains(&badge(1)));
    assert!(!response.contains(&format!(r#"data-id="{APFELSAFT}""#)));
}

#[tokio::test]
async fn test_remove_absent_is_a_no_op() {
    let mut ctx = TestContext::new();
    let response = ctx.cart_action(&format!("remove:{APFELSAFT}")).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.contains(EMPTY_CART_MESSAGE));
}

#[tokio::test]
async fn test_clear_resets_every_card() {
    let mut ctx = TestContext::new();
    ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    ctx.cart_action(&format!("add:{PROBIERPAKET}")).await;

    let response = ctx.cart_action("clear").await;
    assert!(response.contains(&card_quantity_swap(APFELSAFT, 0)));
    assert!(response.contains(&card_quantity_swap(PROBIERPAKET, 0)));
    assert!(response.contains(EMPTY_CART_MESSAGE));
}

// =============================================================================
// Malformed Actions
// =============================================================================

#[tokio::test]
async fn test_malformed_actions_are_bad_requests() {
    let mut ctx = TestContext::new();
    for op in ["explode:apfelsaft", "add", "add:", "add:Äpfel"] {
        let response = ctx.cart_action(op).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "op {op}");
    }
}

#[tokio::test]
async fn test_missing_op_field_is_rejected() {
    let mut ctx = TestContext::new();
    let response = ctx.post_form("/cart/action", "id=apfelsaft").await;
    assert!(response.status.is_client_error());
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_reload_restores_cart() {
    let mut ctx = TestContext::new();
    ctx.cart_action(&format!("add:{APFELSAFT}")).await;
    ctx.cart_action(&format!("add:{APFELSAFT}")).await;

    let page = ctx.get("/").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.contains(&format!(r#"id="qty-{APFELSAFT}">2</span>"#)));
    assert!(page.contains(&format!(r#"id="qty-{PROBIERPAKET}">0</span>"#)));
    assert!(page.contains(&badge(2)));
    assert!(page.contains("Bio Apfelsaft, 1L"));
}

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let mut alice = TestContext::new();
    alice.cart_action(&format!("add:{APFELSAFT}")).await;

    let mut bob = alice.other_visitor();
    let page = bob.get("/").await;
    assert!(page.contains(&format!(r#"id="qty-{APFELSAFT}">0</span>"#)));
    assert!(page.contains(EMPTY_CART_MESSAGE));
}

// =============================================================================
// Panel and Badge
// =============================================================================

#[tokio::test]
async fn test_cart_panel_open_and_close() {
    let mut ctx = TestContext::new();
    ctx.cart_action(&format!("add:{APFELSAFT}")).await;

    let open = ctx.get("/cart/panel?action=open").await;
    assert_eq!(open.status, StatusCode::OK);
    assert!(open.contains(r#"class="cart-modal open""#));
    assert!(open.contains("data-scroll-lock"));
    assert!(open.contains(&format!(r#"value="remove:{APFELSAFT}""#)));
    assert!(open.contains(r#"hx-get="/cart/panel?action=backdrop""#));
    assert!(open.contains(r#"hx-get="/cart/panel?action=close""#));

    let closed = ctx.get("/cart/panel?action=close").await;
    assert!(closed.contains(r#"class="cart-modal""#));
    assert!(!closed.contains("cart-modal open"));
    assert!(!closed.contains("data-scroll-lock"));
}

#[tokio::test]
async fn test_cart_panel_backdrop_click_closes() {
    let mut ctx = TestContext::new();
    let closed = ctx.get("/cart/panel?action=backdrop").await;
    assert_eq!(closed.status, StatusCode::OK);
    assert!(!closed.contains("cart-modal open"));

    let unknown = ctx.get("/cart/panel?action=toggle").await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cart_count_fragment() {
    let mut ctx = TestContext::new();
    let empty = ctx.get("/cart/count").await;
    assert!(empty.contains(r#"class="cart-badge hidden">0</span>"#));

    ctx.cart_action(&format!("add:{PROBIERPAKET}")).await;
    let one = ctx.get("/cart/count").await;
    assert!(one.contains(&badge(1)));
}
