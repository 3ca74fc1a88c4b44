//! Cart reconciliation against the session store.
//!
//! Every mutation writes the whole line list plus the distinct-line count and
//! then pulses `cartUpdated`.

use rust_decimal::Decimal;

use crate::{
    dto::cart::{CartLineView, CartView, CheckoutSnapshot, QuantityChange},
    error::{AppError, AppResult},
    models::{CartLine, CartTotals, Item},
    response::{ApiResponse, Meta},
    store::{StorefrontStore, keys},
};

/// 10%.
pub const TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
pub const PAYMENT_PATH: &str = "/payment";

pub fn add_or_increment(store: &StorefrontStore, item: &Item) -> Vec<CartLine> {
    let mut lines = store.cart_lines();
    match lines.iter_mut().find(|line| line.item.id == item.id) {
        Some(line) => line.quantity += 1,
        None => lines.push(CartLine::new(item.clone())),
    }
    persist(store, &lines);
    tracing::debug!(item_id = %item.id, lines = lines.len(), "cart add");
    lines
}

/// Returns `None` when no line matched; nothing is written in that case.
pub fn remove(store: &StorefrontStore, item_id: &str) -> Option<Vec<CartLine>> {
    let mut lines = store.cart_lines();
    let before = lines.len();
    lines.retain(|line| line.item.id != item_id);
    if lines.len() == before {
        return None;
    }
    persist(store, &lines);
    tracing::debug!(item_id, lines = lines.len(), "cart remove");
    Some(lines)
}

/// Increments, or decrements with a floor of 1. An unknown id leaves the lines as they were.
pub fn set_quantity(store: &StorefrontStore, item_id: &str, change: QuantityChange) -> Vec<CartLine> {
    let mut lines = store.cart_lines();
    if let Some(line) = lines.iter_mut().find(|line| line.item.id == item_id) {
        line.quantity = match change {
            QuantityChange::Increment => line.quantity.saturating_add(1),
            QuantityChange::Decrement => line.quantity.saturating_sub(1).max(1),
        };
    }
    persist(store, &lines);
    lines
}

pub fn total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

pub fn totals(lines: &[CartLine]) -> CartTotals {
    let subtotal = total(lines);
    let tax = subtotal * TAX_RATE;
    CartTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Snapshots the lines and the pre-tax total for the payment step.
pub fn checkout(store: &StorefrontStore) -> CheckoutSnapshot {
    let lines = store.cart_lines();
    let total = total(&lines);
    store.set_cart_lines(&lines);
    store.set_total_snapshot(total);
    tracing::info!(lines = lines.len(), %total, "checkout snapshot written");
    CheckoutSnapshot { lines, total }
}

/// Clears the cart, its snapshot total and the badge count.
pub fn finalize(store: &StorefrontStore) {
    store.remove(keys::CART_ITEMS);
    store.remove(keys::TOTAL_PRICE);
    store.remove(keys::CART_COUNT);
    store.notify_cart_changed();
    tracing::info!("cart finalized");
}

fn persist(store: &StorefrontStore, lines: &[CartLine]) {
    store.set_cart_lines(lines);
    store.set_cart_count(lines.len());
    store.notify_cart_changed();
}

pub fn cart_view(lines: Vec<CartLine>) -> CartView {
    let is_empty = lines.is_empty();
    let derived = (!is_empty).then(|| totals(&lines));
    CartView {
        is_empty,
        lines: lines.into_iter().map(CartLineView::from).collect(),
        display: derived.as_ref().map(CartTotals::display),
        totals: derived,
    }
}

pub fn get_cart(store: &StorefrontStore) -> ApiResponse<CartView> {
    let view = cart_view(store.cart_lines());
    let count = view.lines.len();
    ApiResponse::success("OK", view, Some(Meta::new(count, count)))
}

pub fn add_to_cart(store: &StorefrontStore, item: &Item) -> ApiResponse<CartView> {
    let lines = add_or_increment(store, item);
    ApiResponse::success("Added to cart", cart_view(lines), None)
}

pub fn remove_from_cart(store: &StorefrontStore, item_id: &str) -> AppResult<ApiResponse<CartView>> {
    let lines = remove(store, item_id).ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Removed from cart",
        cart_view(lines),
        Some(Meta::empty()),
    ))
}

pub fn update_quantity(
    store: &StorefrontStore,
    item_id: &str,
    delta: i32,
) -> AppResult<ApiResponse<CartView>> {
    let change = QuantityChange::from_delta(delta)
        .ok_or_else(|| AppError::BadRequest("delta must be 1 or -1".to_string()))?;
    let lines = set_quantity(store, item_id, change);
    Ok(ApiResponse::success("Quantity updated", cart_view(lines), None))
}

pub fn proceed_to_checkout(store: &StorefrontStore) -> AppResult<ApiResponse<CheckoutSnapshot>> {
    // The view hides the checkout button for an empty cart.
    if store.cart_lines().is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }
    let snapshot = checkout(store);
    Ok(ApiResponse::success(
        "Proceed to payment",
        snapshot,
        Some(Meta::redirect(PAYMENT_PATH)),
    ))
}
