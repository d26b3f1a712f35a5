//! # Cart Error Types
//!
//! Typed error handling for the shelf-cart store and gateways.
//! Gateway operations return `Result<T, CartError>`; the store converts
//! those into a [`CartFailure`] before anything reaches subscribers.

use thiserror::Error;

/// Payload from the cart service did not match the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Decode error: {message}")]
pub struct DecodeError {
    pub message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Cart accessed through a handle that has no live provider behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cart must be used within a CartProvider")]
pub struct MissingProviderError;

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum CartError {
    /// Configuration errors (missing base URL, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network/HTTP error talking to the cart service
    #[error("Network error: {0}")]
    Network(String),

    /// Cart service answered with a non-2xx status
    #[error("Remote error [{status}]: {body}")]
    Remote { status: u16, body: String },

    /// Response body did not decode
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    MissingProvider(#[from] MissingProviderError),
}

impl CartError {
    /// Returns true if this error is transient.
    ///
    /// Informational only: the store makes a single attempt per operation.
    pub fn is_retryable(&self) -> bool {
        match self {
            CartError::Network(_) => true,
            CartError::Remote { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type alias for gateway operations
pub type CartResult<T> = Result<T, CartError>;

/// The user-visible failure recorded in cart state.
///
/// Each variant is tied to one store operation and renders as a fixed
/// string; no detail from the underlying [`CartError`] survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartFailure {
    Fetch,
    Update,
    Checkout,
}

impl CartFailure {
    pub fn message(&self) -> &'static str {
        match self {
            CartFailure::Fetch => "Failed to fetch cart items",
            CartFailure::Update => "Failed to update cart item",
            CartFailure::Checkout => "Failed to checkout",
        }
    }
}

impl std::fmt::Display for CartFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
