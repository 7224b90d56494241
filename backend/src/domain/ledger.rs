//! Balance mutation and history recording.
//!
//! `apply_delta` is the only place a balance value is computed; `record` is
//! the only place the aggregate's balance fields and ledger are written.
//! A failed debit leaves the aggregate untouched: the balance write and the
//! ledger append are one logical step.

use shared::{EntryKind, LedgerEntry};

use crate::domain::clock::LedgerTimestamp;
use crate::domain::errors::DomainError;
use crate::domain::models::Account;
use crate::domain::rounding::bankers_round;

/// Fractional digits carried by each balance kind.
pub fn precision(kind: EntryKind) -> u32 {
    match kind {
        EntryKind::Point => 0,
        EntryKind::Dollar => 2,
    }
}

/// Apply a signed delta to a balance. Pure.
///
/// Fails with `InsufficientFunds` iff `balance + delta < 0`; otherwise the
/// new balance is `balance + delta` rounded at the kind's precision.
pub fn apply_delta(balance: f64, delta: f64, kind: EntryKind) -> Result<f64, DomainError> {
    if balance + delta < 0.0 {
        return Err(DomainError::InsufficientFunds {
            kind,
            requested: -delta,
            available: balance,
        });
    }
    Ok(bankers_round(balance + delta, precision(kind)))
}

/// Mutate one balance of the aggregate and append the matching ledger row.
///
/// Returns the post-mutation balance. On `InsufficientFunds` neither the
/// balance nor the ledger changes.
pub fn record(
    account: &mut Account,
    kind: EntryKind,
    label: &str,
    delta: f64,
    at: &LedgerTimestamp,
) -> Result<f64, DomainError> {
    let next = apply_delta(account.balance(kind), delta, kind)?;
    account.set_balance(kind, next);
    account.ledger.push(LedgerEntry {
        kind,
        label: label.to_string(),
        day: at.day.clone(),
        time: at.time.clone(),
        delta,
        balance_after: next,
    });
    Ok(next)
}
