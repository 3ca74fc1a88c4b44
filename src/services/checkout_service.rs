//! Payment form validation and the simulated payment submission.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::CheckoutTimings,
    deferred::DeferredTask,
    dto::{
        cart::CartLineView,
        checkout::{CheckoutDraft, PaymentSummary, ValidationReport},
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    services::cart_service,
    session::Session,
    store::StorefrontStore,
};

pub const CONFIRMATION_PATH: &str = "/confirmation";
pub const CREDIT_CARD: &str = "credit-card";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    Name,
    Phone,
    Address,
    City,
    PickupLocation,
    PickupDate,
    DropoffLocation,
    DropoffDate,
    CardNumber,
    ExpirationDate,
    CardholderName,
    Cvc,
}

impl CheckoutField {
    pub const ALL: [CheckoutField; 12] = [
        CheckoutField::Name,
        CheckoutField::Phone,
        CheckoutField::Address,
        CheckoutField::City,
        CheckoutField::PickupLocation,
        CheckoutField::PickupDate,
        CheckoutField::DropoffLocation,
        CheckoutField::DropoffDate,
        CheckoutField::CardNumber,
        CheckoutField::ExpirationDate,
        CheckoutField::CardholderName,
        CheckoutField::Cvc,
    ];

    pub fn required_message(self) -> &'static str {
        match self {
            CheckoutField::Name => "Name is required.",
            CheckoutField::Phone => "Phone number is required.",
            CheckoutField::Address => "Address is required.",
            CheckoutField::City => "City is required.",
            CheckoutField::PickupLocation => "Pick-up location is required.",
            CheckoutField::PickupDate => "Pick-up date is required.",
            CheckoutField::DropoffLocation => "Drop-off location is required.",
            CheckoutField::DropoffDate => "Drop-off date is required.",
            CheckoutField::CardNumber => "Card number is required.",
            CheckoutField::ExpirationDate => "Expiration date is required.",
            CheckoutField::CardholderName => "Cardholder name is required.",
            CheckoutField::Cvc => "CVC is required.",
        }
    }

    pub fn is_card_field(self) -> bool {
        matches!(
            self,
            CheckoutField::CardNumber
                | CheckoutField::ExpirationDate
                | CheckoutField::CardholderName
                | CheckoutField::Cvc
        )
    }

    fn value(self, draft: &CheckoutDraft) -> &str {
        match self {
            CheckoutField::Name => &draft.name,
            CheckoutField::Phone => &draft.phone,
            CheckoutField::Address => &draft.address,
            CheckoutField::City => &draft.city,
            CheckoutField::PickupLocation => &draft.pickup_location,
            CheckoutField::PickupDate => &draft.pickup_date,
            CheckoutField::DropoffLocation => &draft.dropoff_location,
            CheckoutField::DropoffDate => &draft.dropoff_date,
            CheckoutField::CardNumber => &draft.card_number,
            CheckoutField::ExpirationDate => &draft.expiration_date,
            CheckoutField::CardholderName => &draft.cardholder_name,
            CheckoutField::Cvc => &draft.cvc,
        }
    }
}

/// Every form field mapped to zero or one error messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<CheckoutField, Vec<String>>);

impl Default for FormErrors {
    fn default() -> Self {
        Self(CheckoutField::ALL.iter().map(|f| (*f, Vec::new())).collect())
    }
}

impl FormErrors {
    pub fn get(&self, field: CheckoutField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn first(&self, field: CheckoutField) -> Option<&str> {
        self.get(field).first().map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        self.0.values().any(|errors| !errors.is_empty())
    }

    pub fn invalid_fields(&self) -> Vec<CheckoutField> {
        self.0
            .iter()
            .filter(|(_, errors)| !errors.is_empty())
            .map(|(field, _)| *field)
            .collect()
    }

    fn push(&mut self, field: CheckoutField, message: &str) {
        self.0.entry(field).or_default().push(message.to_string());
    }
}

/// Card fields are only required when the credit card method is selected.
pub fn validate(draft: &CheckoutDraft) -> FormErrors {
    let card_selected = draft.payment_method == CREDIT_CARD;
    let mut errors = FormErrors::default();
    for field in CheckoutField::ALL {
        if field.is_card_field() && !card_selected {
            continue;
        }
        if field.value(draft).is_empty() {
            errors.push(field, field.required_message());
        }
    }
    errors
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PaymentPhase {
    #[default]
    Idle,
    Processing {
        started_at: DateTime<Utc>,
        completes_at: DateTime<Utc>,
    },
    Completed {
        completed_at: DateTime<Utc>,
    },
}

impl PaymentPhase {
    pub fn is_processing(&self) -> bool {
        matches!(self, PaymentPhase::Processing { .. })
    }
}

pub fn validate_draft(draft: &CheckoutDraft) -> ApiResponse<ValidationReport> {
    let errors = validate(draft);
    let first_errors = errors
        .invalid_fields()
        .into_iter()
        .filter_map(|field| errors.first(field).map(|message| (field, message.to_string())))
        .collect();
    let report = ValidationReport {
        valid: !errors.has_errors(),
        errors,
        first_errors,
    };
    ApiResponse::success("Validation", report, None)
}

/// Starts the simulated payment. Refused while one is already processing or
/// when any field fails validation.
pub fn submit(
    session: &Arc<Session>,
    timings: CheckoutTimings,
    draft: &CheckoutDraft,
) -> AppResult<ApiResponse<PaymentPhase>> {
    let mut flow = session.flow();
    if flow.payment.is_processing() {
        return Err(AppError::Conflict("payment is already processing".into()));
    }

    let errors = validate(draft);
    if errors.has_errors() {
        tracing::debug!(fields = ?errors.invalid_fields(), "checkout rejected");
        return Err(AppError::Validation(errors));
    }

    let generation = flow.next_payment_generation();
    let task_session = Arc::clone(session);
    let task = DeferredTask::schedule("payment", timings.payment, move || {
        let mut flow = task_session.flow();
        if flow.payment_generation != generation {
            tracing::debug!(task = "payment", "stale timer ignored");
            return;
        }
        flow.payment = PaymentPhase::Completed {
            completed_at: Utc::now(),
        };
        flow.payment_task = None;
    });

    flow.payment = PaymentPhase::Processing {
        started_at: Utc::now(),
        completes_at: task.fires_at(),
    };
    flow.payment_task = Some(task);
    tracing::info!(session_id = session.id(), method = %draft.payment_method, "payment processing");

    Ok(ApiResponse::success(
        "Processing payment",
        flow.payment.clone(),
        None,
    ))
}

pub fn payment_status(session: &Session) -> ApiResponse<PaymentPhase> {
    let phase = session.flow().payment.clone();
    let meta = match phase {
        PaymentPhase::Completed { .. } => Some(Meta::redirect(CONFIRMATION_PATH)),
        _ => None,
    };
    ApiResponse::success("Payment status", phase, meta)
}

/// Leaving the payment page drops a pending submission.
pub fn cancel_payment(session: &Session) -> ApiResponse<PaymentPhase> {
    session.flow().cancel_payment();
    ApiResponse::success("Payment cancelled", PaymentPhase::Idle, Some(Meta::empty()))
}

/// Lines and freshly derived totals, next to the snapshot written at checkout.
pub fn payment_summary(store: &StorefrontStore) -> ApiResponse<PaymentSummary> {
    let lines = store.cart_lines();
    let totals = cart_service::totals(&lines);
    let summary = PaymentSummary {
        display: totals.display(),
        totals,
        snapshot_total: store.total_snapshot(),
        lines: lines.into_iter().map(CartLineView::from).collect(),
    };
    ApiResponse::success("Rental summary", summary, None)
}
