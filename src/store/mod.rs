//! Per-browser key-value store and its typed accessors.
//!
//! Every read tolerates absent or malformed values and falls back to an empty
//! list, zero, or `None`. There is no schema versioning.

use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use serde::{Serialize, de::DeserializeOwned};

use crate::models::{CartLine, Item};

pub mod events;
pub mod keys;
pub mod storage;

pub use events::{CART_UPDATED, CartEvents, CartSubscription};
pub use storage::{MemoryStorage, Storage};

#[derive(Clone)]
pub struct StorefrontStore {
    storage: Arc<dyn Storage>,
    events: CartEvents,
}

impl std::fmt::Debug for StorefrontStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontStore")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Default for StorefrontStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl StorefrontStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            events: CartEvents::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn events(&self) -> &CartEvents {
        &self.events
    }

    pub fn subscribe(&self) -> CartSubscription {
        self.events.subscribe()
    }

    pub fn notify_cart_changed(&self) {
        self.events.emit();
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.read_json(keys::CART_ITEMS).unwrap_or_default()
    }

    pub fn set_cart_lines(&self, lines: &[CartLine]) {
        self.write_json(keys::CART_ITEMS, lines);
    }

    /// Badge count as last written. Not derived from the lines.
    pub fn cart_count(&self) -> usize {
        self.read_parsed(keys::CART_COUNT).unwrap_or(0)
    }

    pub fn set_cart_count(&self, count: usize) {
        self.storage.set_item(keys::CART_COUNT, count.to_string());
    }

    pub fn favorites(&self) -> Vec<Item> {
        self.read_json(keys::FAVORITE_CARS).unwrap_or_default()
    }

    pub fn set_favorites(&self, items: &[Item]) {
        self.write_json(keys::FAVORITE_CARS, items);
    }

    pub fn selected_item(&self) -> Option<Item> {
        self.read_json(keys::SELECTED_CAR)
    }

    pub fn set_selected_item(&self, item: &Item) {
        self.write_json(keys::SELECTED_CAR, item);
    }

    pub fn total_snapshot(&self) -> Option<Decimal> {
        self.read_parsed(keys::TOTAL_PRICE)
    }

    pub fn set_total_snapshot(&self, total: Decimal) {
        self.storage.set_item(keys::TOTAL_PRICE, total.to_string());
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.storage.get_item(key).is_some()
    }

    pub fn remove(&self, key: &str) {
        self.storage.remove_item(key);
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(key, error = %err, "malformed stored value, using default");
                None
            }
        }
    }

    fn read_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get_item(key)?;
        let parsed = raw.trim().parse::<T>().ok();
        if parsed.is_none() {
            tracing::debug!(key, "malformed stored value, using default");
        }
        parsed
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => self.storage.set_item(key, json),
            Err(err) => tracing::warn!(key, error = %err, "failed to encode value for store"),
        }
    }
}
