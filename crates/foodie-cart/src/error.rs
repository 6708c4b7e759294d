//! Cart error types.
//!
//! Cart operations themselves never fail. These errors come from the edges:
//! decoding persisted snapshots, loading configuration, and the caller-side
//! coupon eligibility gate.

use crate::money::Money;
use thiserror::Error;

/// Errors raised around the cart engine.
#[derive(Error, Debug)]
pub enum CartError {
    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] foodie_storage::StorageError),

    /// Persisted state is not valid JSON for a cart.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted state decoded but violates a cart invariant.
    #[error("Invalid cart snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Coupon rejected by the eligibility gate.
    #[error(transparent)]
    Coupon(#[from] CouponError),
}

impl From<toml::de::Error> for CartError {
    fn from(e: toml::de::Error) -> Self {
        CartError::Config(e.to_string())
    }
}

/// Reasons a coupon code is refused before it reaches the cart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CouponError {
    /// No active coupon has this code.
    #[error("Invalid coupon code: {0}")]
    UnknownCode(String),

    /// Cart total is below the coupon's minimum order.
    #[error("Coupon {code} requires a minimum order of {minimum}")]
    BelowMinimumOrder {
        /// The coupon code.
        code: String,
        /// The coupon's minimum order amount.
        minimum: Money,
    },
}
