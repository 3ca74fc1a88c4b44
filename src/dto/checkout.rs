use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::cart::CartLineView,
    models::{CartTotals, DisplayTotals},
    services::{
        checkout_service::{CheckoutField, FormErrors},
        confirmation_service::ConfirmationPhase,
    },
};

/// The billing, rental and payment form. Empty strings mean "not filled in".
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutDraft {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pickup_location: String,
    pub pickup_date: String,
    pub dropoff_location: String,
    pub dropoff_date: String,
    /// `credit-card`, `paypal`, `bitcoin`, or empty when nothing is selected.
    pub payment_method: String,
    pub card_number: String,
    pub expiration_date: String,
    pub cardholder_name: String,
    pub cvc: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationReport {
    pub valid: bool,
    #[schema(value_type = Object)]
    pub errors: FormErrors,
    /// The message shown under each invalid field.
    #[schema(value_type = Object)]
    pub first_errors: BTreeMap<CheckoutField, String>,
}

/// The rental summary beside the payment form.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentSummary {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
    pub display: DisplayTotals,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub snapshot_total: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfirmationView {
    pub phase: ConfirmationPhase,
    pub items: Vec<CartLineView>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
}
