use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder-image.png";

/// A rentable vehicle as projected from the catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price_per_day: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub fuel_capacity: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub seating_capacity: u32,
}

impl Item {
    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

fn default_quantity() -> u32 {
    1
}

/// An item in the cart. Stored with the item's fields flattened next to `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: Item,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartLine {
    pub fn new(item: Item) -> Self {
        Self { item, quantity: 1 }
    }

    pub fn line_total(&self) -> Decimal {
        self.item.price_per_day * Decimal::from(self.quantity)
    }
}

/// Subtotal, tax and grand total derived from the cart lines. Never rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CartTotals {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl CartTotals {
    pub fn display(&self) -> DisplayTotals {
        DisplayTotals {
            subtotal: format_money(self.subtotal),
            tax: format_money(self.tax),
            total: format_money(self.total),
        }
    }
}

/// Totals rounded to two decimals for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisplayTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// What the external identity widget tells us about the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Identity {
    pub signed_in: bool,
    pub image_url: Option<String>,
}
