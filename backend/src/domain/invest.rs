//! ETF purchase/sale against the point balance.
//!
//! Prices and change rates come from the client, which reads them off the
//! external chart feed; the core only enforces the point ledger rules and
//! the holding quantities.

use shared::{EntryKind, EtfHolding, WatchedEtf};

use crate::domain::clock::LedgerTimestamp;
use crate::domain::errors::DomainError;
use crate::domain::ledger::record;
use crate::domain::models::Account;

/// Buy `quantity` units at `price` points each.
///
/// The cost is debited from the point balance through the ledger recorder;
/// an existing holding absorbs the quantity, otherwise a new one is added.
pub fn purchase(
    account: &mut Account,
    etf_name: &str,
    price: f64,
    change_rate: f64,
    quantity: u32,
    at: &LedgerTimestamp,
) -> Result<(), DomainError> {
    if etf_name.trim().is_empty() {
        return Err(DomainError::Validation("etf name is required".to_string()));
    }
    if quantity == 0 {
        return Err(DomainError::Validation(
            "purchase quantity must be positive".to_string(),
        ));
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::Validation(
            "purchase price must be positive".to_string(),
        ));
    }

    let cost = price * quantity as f64;
    record(
        account,
        EntryKind::Point,
        &format!("{etf_name} purchase"),
        -cost,
        at,
    )?;

    match account.portfolio.holding_mut(etf_name) {
        Some(holding) => holding.quantity += quantity,
        None => account.portfolio.owned.push(EtfHolding {
            name: etf_name.to_string(),
            price,
            change_rate,
            quantity,
        }),
    }
    Ok(())
}

/// Sell `quantity` units of a held ETF back into points.
///
/// Proceeds are credited at the stored holding price. A holding that reaches
/// zero quantity is removed from the portfolio.
pub fn sell(
    account: &mut Account,
    etf_name: &str,
    quantity: u32,
    at: &LedgerTimestamp,
) -> Result<(), DomainError> {
    if quantity == 0 {
        return Err(DomainError::Validation(
            "sale quantity must be positive".to_string(),
        ));
    }
    let holding = account
        .portfolio
        .holding(etf_name)
        .ok_or_else(|| DomainError::NotFound(format!("etf not held: {etf_name}")))?;
    if quantity > holding.quantity {
        return Err(DomainError::Validation(format!(
            "cannot sell {quantity} units of {etf_name}: only {} held",
            holding.quantity
        )));
    }

    let proceeds = holding.price * quantity as f64;
    record(
        account,
        EntryKind::Point,
        &format!("{etf_name} sale"),
        proceeds,
        at,
    )?;

    if let Some(holding) = account.portfolio.holding_mut(etf_name) {
        holding.quantity -= quantity;
    }
    account.portfolio.owned.retain(|h| h.quantity > 0);
    Ok(())
}

/// Toggle watchlist membership. Returns true when the ETF was added.
pub fn toggle_watch(
    account: &mut Account,
    etf_name: &str,
    price: f64,
    change_rate: f64,
) -> Result<bool, DomainError> {
    if etf_name.trim().is_empty() {
        return Err(DomainError::Validation("etf name is required".to_string()));
    }
    if account.portfolio.is_watching(etf_name) {
        account.portfolio.watched.retain(|w| w.name != etf_name);
        Ok(false)
    } else {
        account.portfolio.watched.push(WatchedEtf {
            name: etf_name.to_string(),
            price,
            change_rate,
        });
        Ok(true)
    }
}

/// Replace the interest category list wholesale.
pub fn set_categories(account: &mut Account, categories: Vec<String>) -> Result<(), DomainError> {
    if categories.is_empty() {
        return Err(DomainError::Validation(
            "at least one interest category is required".to_string(),
        ));
    }
    account.portfolio.categories = categories;
    Ok(())
}
