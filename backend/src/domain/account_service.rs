//! Account lifecycle and the cashback stamp card.

use shared::{AccountResponse, AddStampRequest, CreateAccountRequest, StampResponse};
use tracing::info;

use crate::db::AccountDb;
use crate::domain::errors::DomainError;
use crate::domain::locks::AccountLocks;
use crate::domain::models::Account;

#[derive(Clone)]
pub struct AccountService {
    db: AccountDb,
    locks: AccountLocks,
}

impl AccountService {
    pub fn new(db: AccountDb, locks: AccountLocks) -> Self {
        Self { db, locks }
    }

    /// Create a fresh account aggregate.
    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<AccountResponse, DomainError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("account name is required".to_string()));
        }

        let lock = self.locks.for_account(name);
        let _guard = lock.lock().await;

        if self.db.load(name).await?.is_some() {
            return Err(DomainError::Validation(format!(
                "account already exists: {name}"
            )));
        }
        let account = Account::new(name);
        self.db.insert(&account).await?;

        info!("created account {}", name);
        Ok(account.to_response())
    }

    pub async fn get_account(&self, name: &str) -> Result<AccountResponse, DomainError> {
        let (account, _) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        Ok(account.to_response())
    }

    /// Push a stamp through one of the six daily slots.
    pub async fn add_stamp(&self, request: AddStampRequest) -> Result<StampResponse, DomainError> {
        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        account.add_stamp(&request.slot, request.value)?;
        self.db.save(&account, version).await?;

        info!(
            "stamped {} for {} via {}",
            request.value, request.name, request.slot
        );
        Ok(account.to_stamp_response())
    }

    /// Reopen all six stamp slots.
    pub async fn reset_slots(&self, name: &str) -> Result<StampResponse, DomainError> {
        let lock = self.locks.for_account(name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        account.reset_slots();
        self.db.save(&account, version).await?;
        Ok(account.to_stamp_response())
    }

    /// Clear the collected stamp list.
    pub async fn reset_stamps(&self, name: &str) -> Result<StampResponse, DomainError> {
        let lock = self.locks.for_account(name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        account.reset_stamps();
        self.db.save(&account, version).await?;
        Ok(account.to_stamp_response())
    }
}
