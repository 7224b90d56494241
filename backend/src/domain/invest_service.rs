//! ETF portfolio operations over the point balance.

use shared::{
    EtfHolding, PurchaseEtfRequest, SellEtfRequest, SetInterestCategoriesRequest, WatchEtfRequest,
    WatchedEtf,
};
use tracing::info;

use crate::db::AccountDb;
use crate::domain::clock::LedgerTimestamp;
use crate::domain::errors::DomainError;
use crate::domain::invest::{purchase, sell, set_categories, toggle_watch};
use crate::domain::locks::AccountLocks;

#[derive(Clone)]
pub struct InvestService {
    db: AccountDb,
    locks: AccountLocks,
}

impl InvestService {
    pub fn new(db: AccountDb, locks: AccountLocks) -> Self {
        Self { db, locks }
    }

    pub async fn owned(&self, name: &str) -> Result<Vec<EtfHolding>, DomainError> {
        let (account, _) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        Ok(account.portfolio.owned)
    }

    pub async fn watched(&self, name: &str) -> Result<Vec<WatchedEtf>, DomainError> {
        let (account, _) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        Ok(account.portfolio.watched)
    }

    pub async fn categories(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let (account, _) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        Ok(account.portfolio.categories)
    }

    /// Buy units of an ETF with points.
    pub async fn purchase(
        &self,
        request: PurchaseEtfRequest,
    ) -> Result<Vec<EtfHolding>, DomainError> {
        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        purchase(
            &mut account,
            &request.etf_name,
            request.price,
            request.change_rate,
            request.quantity,
            &LedgerTimestamp::now(),
        )?;
        self.db.save(&account, version).await?;

        info!(
            "{} bought {} x {} at {}",
            request.name, request.quantity, request.etf_name, request.price
        );
        Ok(account.portfolio.owned)
    }

    /// Sell held units back into points.
    pub async fn sell(&self, request: SellEtfRequest) -> Result<Vec<EtfHolding>, DomainError> {
        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        sell(
            &mut account,
            &request.etf_name,
            request.quantity,
            &LedgerTimestamp::now(),
        )?;
        self.db.save(&account, version).await?;

        info!(
            "{} sold {} x {}",
            request.name, request.quantity, request.etf_name
        );
        Ok(account.portfolio.owned)
    }

    /// Add or remove a watchlist entry. Returns the updated watchlist.
    pub async fn toggle_watch(
        &self,
        request: WatchEtfRequest,
    ) -> Result<Vec<WatchedEtf>, DomainError> {
        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        let added = toggle_watch(
            &mut account,
            &request.etf_name,
            request.price,
            request.change_rate,
        )?;
        self.db.save(&account, version).await?;

        info!(
            "{} {} {} on the watchlist",
            request.name,
            if added { "added" } else { "removed" },
            request.etf_name
        );
        Ok(account.portfolio.watched)
    }

    /// Replace the account's interest categories.
    pub async fn set_categories(
        &self,
        request: SetInterestCategoriesRequest,
    ) -> Result<Vec<String>, DomainError> {
        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        set_categories(&mut account, request.categories)?;
        self.db.save(&account, version).await?;
        Ok(account.portfolio.categories)
    }
}
