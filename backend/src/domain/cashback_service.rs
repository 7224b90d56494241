//! Cashback point ledger operations and the point/dollar exchange.

use std::sync::Arc;

use shared::{
    AdjustPointsRequest, CashbackInfoResponse, EntryKind, ExchangeRequest, ExchangeResponse,
};
use tracing::{info, warn};

use crate::db::AccountDb;
use crate::domain::clock::LedgerTimestamp;
use crate::domain::conversion::convert;
use crate::domain::errors::DomainError;
use crate::domain::ledger::record;
use crate::domain::locks::AccountLocks;
use crate::feeds::RateSource;

#[derive(Clone)]
pub struct CashbackService {
    db: AccountDb,
    locks: AccountLocks,
    rate_source: Arc<dyn RateSource>,
}

impl CashbackService {
    pub fn new(db: AccountDb, locks: AccountLocks, rate_source: Arc<dyn RateSource>) -> Self {
        Self {
            db,
            locks,
            rate_source,
        }
    }

    /// Current point balance plus its full history.
    pub async fn cashback_info(&self, name: &str) -> Result<CashbackInfoResponse, DomainError> {
        let (account, _) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        Ok(account.cashback_info())
    }

    /// Apply a signed point delta with a free-text label.
    pub async fn adjust_points(
        &self,
        request: AdjustPointsRequest,
    ) -> Result<CashbackInfoResponse, DomainError> {
        if request.label.trim().is_empty() {
            return Err(DomainError::Validation(
                "a label is required for point changes".to_string(),
            ));
        }
        if !request.delta.is_finite() {
            return Err(DomainError::Validation(
                "point delta must be a finite number".to_string(),
            ));
        }

        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        let balance = record(
            &mut account,
            EntryKind::Point,
            &request.label,
            request.delta,
            &LedgerTimestamp::now(),
        )?;
        self.db.save(&account, version).await?;

        info!(
            "adjusted points for {} by {} ({}), balance {}",
            request.name, request.delta, request.label, balance
        );
        Ok(account.cashback_info())
    }

    /// Convert between points and dollars at the current exchange rate.
    ///
    /// The rate is fetched before the account lock is taken so a slow feed
    /// never stalls other writers on the same account.
    pub async fn exchange(
        &self,
        request: ExchangeRequest,
    ) -> Result<ExchangeResponse, DomainError> {
        let rate = self.rate_source.fetch_rate().await.map_err(|e| {
            warn!("exchange rate unavailable: {}", e);
            DomainError::InvalidRate
        })?;

        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        let receipt = convert(
            &mut account,
            request.amount,
            request.direction,
            rate,
            &LedgerTimestamp::now(),
        )?;
        self.db.save(&account, version).await?;

        info!(
            "exchanged {} ({:?}) for {} at rate {}",
            request.amount, request.direction, request.name, rate
        );
        Ok(ExchangeResponse {
            rate: receipt.rate,
            point_balance: receipt.point_balance,
            dollar_balance: receipt.dollar_balance,
        })
    }
}
