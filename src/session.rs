use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
};

use uuid::Uuid;

use crate::{
    deferred::DeferredTask,
    services::{
        checkout_service::PaymentPhase,
        confirmation_service::{ConfirmationPhase, Receipt},
    },
    store::StorefrontStore,
};

/// One browser: its own store plus the timers of the page it is on.
#[derive(Debug)]
pub struct Session {
    id: String,
    store: StorefrontStore,
    flow: Mutex<CheckoutFlow>,
}

/// Page state of the payment and confirmation views.
///
/// Each timer callback carries the generation it was armed under and does
/// nothing once that generation has moved on. Aborting the task alone cannot
/// stop a callback that already fired and is waiting for this lock.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    pub payment: PaymentPhase,
    pub(crate) payment_task: Option<DeferredTask>,
    pub(crate) payment_generation: u64,
    pub confirmation: ConfirmationPhase,
    pub(crate) confirmation_task: Option<DeferredTask>,
    pub(crate) confirmation_generation: u64,
    pub receipt: Receipt,
}

impl CheckoutFlow {
    /// Invalidates any armed payment timer and returns the new generation.
    pub(crate) fn next_payment_generation(&mut self) -> u64 {
        self.payment_generation += 1;
        self.payment_generation
    }

    pub(crate) fn next_confirmation_generation(&mut self) -> u64 {
        self.confirmation_generation += 1;
        self.confirmation_generation
    }

    /// Leaving the payment page: a pending submission is dropped.
    pub fn cancel_payment(&mut self) {
        if let Some(task) = self.payment_task.take() {
            task.cancel();
        }
        self.next_payment_generation();
        self.payment = PaymentPhase::Idle;
    }

    /// Leaving the confirmation page: whatever timer is pending is dropped.
    pub fn leave_confirmation(&mut self) {
        if let Some(task) = self.confirmation_task.take() {
            task.cancel();
        }
        self.next_confirmation_generation();
        self.confirmation = ConfirmationPhase::Closed;
    }

    /// Page teardown: pending timers are dropped and their effects lost.
    pub fn teardown(&mut self) {
        self.cancel_payment();
        self.leave_confirmation();
    }
}

impl Session {
    pub fn new(id: impl Into<String>, store: StorefrontStore) -> Self {
        Self {
            id: id.into(),
            store,
            flow: Mutex::new(CheckoutFlow::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn store(&self) -> &StorefrontStore {
        &self.store
    }

    pub fn flow(&self) -> MutexGuard<'_, CheckoutFlow> {
        self.flow.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Arc<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `id`, creating an empty one on first use.
    pub fn open(&self, id: &str) -> Arc<Session> {
        if let Some(session) = self.get(id) {
            return session;
        }
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id = id, "session created");
                Arc::new(Session::new(id, StorefrontStore::in_memory()))
            })
            .clone()
    }

    pub fn create(&self) -> Arc<Session> {
        let id = Uuid::new_v4().to_string();
        self.open(&id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Session>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets the session. Its pending timers are dropped with it.
    pub fn remove(&self, id: &str) -> Option<Arc<Session>> {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if let Some(session) = &removed {
            session.flow().teardown();
            tracing::debug!(session_id = id, "session removed");
        }
        removed
    }
}
