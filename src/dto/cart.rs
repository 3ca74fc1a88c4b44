use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{CartLine, CartTotals, DisplayTotals, format_money};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub item_id: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// `1` to increment, `-1` to decrement.
    pub delta: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increment,
    Decrement,
}

impl QuantityChange {
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta {
            1 => Some(Self::Increment),
            -1 => Some(Self::Decrement),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    pub image: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub line_total: Decimal,
    pub line_total_display: String,
}

impl From<CartLine> for CartLineView {
    fn from(line: CartLine) -> Self {
        let line_total = line.line_total();
        Self {
            image: line.item.image_or_placeholder().to_string(),
            line_total_display: format_money(line_total),
            line_total,
            line,
        }
    }
}

/// The cart page. Totals are omitted for an empty cart.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub is_empty: bool,
    pub lines: Vec<CartLineView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<CartTotals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayTotals>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutSnapshot {
    pub lines: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
}
