//! Point/dollar conversion at an externally supplied rate.
//!
//! The rate is home-currency units per foreign unit (e.g. KRW per USD) and
//! is treated as an opaque input; fetching it is the caller's concern.

use shared::{EntryKind, ExchangeDirection};

use crate::domain::clock::LedgerTimestamp;
use crate::domain::errors::DomainError;
use crate::domain::ledger::record;
use crate::domain::models::Account;
use crate::domain::rounding::bankers_round;

/// Result of a completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReceipt {
    /// The rate actually applied.
    pub rate: f64,
    pub point_balance: f64,
    pub dollar_balance: f64,
}

/// Exchange `amount` from one balance into the other.
///
/// Debits the source side by `amount` and credits the other side by the
/// converted value: points -> dollars divides by the rate (2 dp), dollars ->
/// points multiplies (0 dp). Emits one Point and one Dollar ledger entry in
/// the same logical step, both stamped with `at`. A failed debit leaves the
/// aggregate unchanged; the credit side cannot fail.
pub fn convert(
    account: &mut Account,
    amount: f64,
    direction: ExchangeDirection,
    rate: f64,
    at: &LedgerTimestamp,
) -> Result<ConversionReceipt, DomainError> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DomainError::InvalidRate);
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::Validation(
            "exchange amount must be positive".to_string(),
        ));
    }

    match direction {
        ExchangeDirection::PointsToDollars => {
            let credited = bankers_round(amount / rate, 2);
            record(account, EntryKind::Point, "points exchanged", -amount, at)?;
            record(account, EntryKind::Dollar, "dollars exchanged", credited, at)?;
        }
        ExchangeDirection::DollarsToPoints => {
            let credited = bankers_round(amount * rate, 0);
            record(account, EntryKind::Dollar, "dollars exchanged", -amount, at)?;
            record(account, EntryKind::Point, "points exchanged", credited, at)?;
        }
    }

    Ok(ConversionReceipt {
        rate,
        point_balance: account.point_balance,
        dollar_balance: account.dollar_balance,
    })
}
