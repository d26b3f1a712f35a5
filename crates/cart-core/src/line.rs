//! # Cart Lines and State
//!
//! The snapshot types published by the store.

use crate::error::CartFailure;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product identifier as assigned by the cart service
pub type ProductId = u64;

/// One product entry in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product ID (unique per line)
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Price exactly as the service formatted it (never parsed)
    pub price: String,

    /// Quantity
    pub quantity: u32,
}

impl CartLine {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.into(),
            quantity,
        }
    }
}

/// Immutable cart snapshot handed to subscribers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    /// Lines in service response order
    pub lines: Vec<CartLine>,

    /// A remote operation is in flight
    pub loading: bool,

    /// Last absorbed failure, if any
    pub error: Option<CartFailure>,

    /// When `lines` was last replaced by a fetched snapshot
    pub synced_at: Option<DateTime<Utc>>,
}

impl CartState {
    /// Fixed message for the recorded failure
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|e| e.message())
    }

    /// Find a line by product ID
    pub fn find(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Merge a line locally without contacting the service.
    ///
    /// An existing line with the same ID gains one unit in place; anything
    /// else is appended. The next fetch overwrites the result.
    pub fn add_local(&mut self, item: CartLine) {
        match self.lines.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.lines.push(item),
        }
    }
}
