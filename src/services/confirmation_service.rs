//! The confirmation page: shows the checkout snapshot, clears the cart after
//! a delay, then asks the client to go home after a second delay.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::CheckoutTimings,
    deferred::DeferredTask,
    dto::{cart::CartLineView, checkout::ConfirmationView},
    models::CartLine,
    response::{ApiResponse, Meta},
    services::{cart_service, checkout_service::PaymentPhase},
    session::Session,
    store::{StorefrontStore, keys},
};

pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum ConfirmationPhase {
    /// Not on the confirmation page.
    #[default]
    Closed,
    Processing {
        finalizes_at: DateTime<Utc>,
    },
    Completed {
        completed_at: DateTime<Utc>,
        redirects_at: DateTime<Utc>,
    },
    Redirect,
}

/// What the page read from the store when it mounted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Receipt {
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

impl Receipt {
    /// Both the lines and the snapshot total must be present, otherwise the page shows nothing.
    /// The total is the snapshot as written at checkout, never re-derived from the lines.
    pub fn read(store: &StorefrontStore) -> Self {
        if !(store.has_key(keys::CART_ITEMS) && store.has_key(keys::TOTAL_PRICE)) {
            return Self::default();
        }
        Self {
            items: store.cart_lines(),
            total: store.total_snapshot().unwrap_or_default(),
        }
    }
}

/// Mounts the page, or reports its progress when already mounted. The
/// redirect phase is reported once, after which the page counts as closed.
pub fn open(session: &Arc<Session>, timings: CheckoutTimings) -> ApiResponse<ConfirmationView> {
    let mut flow = session.flow();
    if flow.confirmation == ConfirmationPhase::Closed {
        flow.receipt = Receipt::read(session.store());

        let generation = flow.next_confirmation_generation();
        let task_session = Arc::clone(session);
        let redirect_delay = timings.redirect;
        let task = DeferredTask::schedule("confirmation-finalize", timings.finalize, move || {
            let mut flow = task_session.flow();
            if flow.confirmation_generation != generation {
                tracing::debug!(task = "confirmation-finalize", "stale timer ignored");
                return;
            }
            cart_service::finalize(task_session.store());

            let redirect_session = Arc::clone(&task_session);
            let redirect = DeferredTask::schedule("confirmation-redirect", redirect_delay, move || {
                let mut flow = redirect_session.flow();
                if flow.confirmation_generation != generation {
                    tracing::debug!(task = "confirmation-redirect", "stale timer ignored");
                    return;
                }
                flow.confirmation = ConfirmationPhase::Redirect;
                flow.confirmation_task = None;
            });

            flow.payment = PaymentPhase::Idle;
            flow.confirmation = ConfirmationPhase::Completed {
                completed_at: Utc::now(),
                redirects_at: redirect.fires_at(),
            };
            flow.confirmation_task = Some(redirect);
        });

        flow.confirmation = ConfirmationPhase::Processing {
            finalizes_at: task.fires_at(),
        };
        flow.confirmation_task = Some(task);
        tracing::info!(
            session_id = session.id(),
            items = flow.receipt.items.len(),
            total = %flow.receipt.total,
            "confirmation opened"
        );
    }

    let view = ConfirmationView {
        phase: flow.confirmation.clone(),
        items: flow
            .receipt
            .items
            .iter()
            .cloned()
            .map(CartLineView::from)
            .collect(),
        total: flow.receipt.total,
    };
    let (message, meta) = match view.phase {
        ConfirmationPhase::Processing { .. } => ("Processing your payment...", None),
        ConfirmationPhase::Redirect => {
            // The client navigates away; the next visit mounts the page afresh.
            flow.confirmation = ConfirmationPhase::Closed;
            ("Thank you for your payment!", Some(Meta::redirect(HOME_PATH)))
        }
        _ => ("Thank you for your payment!", None),
    };
    ApiResponse::success(message, view, meta)
}

/// Leaving the page cancels whatever timer is pending. If the cart was not yet
/// cleared it stays as it is.
pub fn leave(session: &Session) -> ApiResponse<ConfirmationPhase> {
    session.flow().leave_confirmation();
    ApiResponse::success("Left confirmation", ConfirmationPhase::Closed, Some(Meta::empty()))
}
