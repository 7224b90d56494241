//! Domain error kinds.
//!
//! Every business condition a caller can recover from gets its own variant;
//! the REST layer owns the mapping to HTTP status codes. Only storage and
//! feed failures surface as opaque errors.

use shared::EntryKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A debit would drive a balance below zero.
    #[error("insufficient {kind:?} balance: requested {requested}, available {available}")]
    InsufficientFunds {
        kind: EntryKind,
        requested: f64,
        available: f64,
    },

    /// The exchange rate feed produced no usable number.
    #[error("exchange rate is unavailable or not a positive number")]
    InvalidRate,

    /// A donation operation was attempted with no active goal.
    #[error("no donation goal is active")]
    NoActiveGoal,

    /// Completion attempted before the goal target was collected.
    #[error("donation goal not reached: {current} of {target}")]
    GoalNotReached { current: f64, target: f64 },

    /// A contribution would push the collected amount past the target.
    #[error("contribution of {amount} would exceed the goal target ({current} of {target} collected)")]
    ContributionExceedsGoal {
        amount: f64,
        current: f64,
        target: f64,
    },

    /// The category is not one of the six fixed donation categories.
    #[error("unknown donation category: {0}")]
    InvalidCategory(String),

    /// Request-level validation failure (bad amount, slot, quantity, ...).
    #[error("{0}")]
    Validation(String),

    /// No account exists under the given name.
    #[error("account not found: {0}")]
    NotFound(String),

    /// Persistence failure, propagated without retry.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
