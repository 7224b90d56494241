//! Donation goal lifecycle: set, contribute, complete, clear.

use shared::{ContributeRequest, DonationInfoResponse, SetDonationGoalRequest};
use tracing::info;

use crate::db::AccountDb;
use crate::domain::clock::LedgerTimestamp;
use crate::domain::donation_goal::{clear_goal, complete, contribute, set_goal};
use crate::domain::errors::DomainError;
use crate::domain::locks::AccountLocks;
use crate::domain::models::DonationCategory;

#[derive(Clone)]
pub struct DonationService {
    db: AccountDb,
    locks: AccountLocks,
}

impl DonationService {
    pub fn new(db: AccountDb, locks: AccountLocks) -> Self {
        Self { db, locks }
    }

    pub async fn donation_info(&self, name: &str) -> Result<DonationInfoResponse, DomainError> {
        let (account, _) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;
        Ok(account.donation_info())
    }

    /// Activate (or re-target) a goal under one of the fixed categories.
    pub async fn set_goal(
        &self,
        request: SetDonationGoalRequest,
    ) -> Result<DonationInfoResponse, DomainError> {
        let category = DonationCategory::parse(&request.category)?;

        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        set_goal(&mut account, category, request.target_amount)?;
        self.db.save(&account, version).await?;

        info!(
            "goal set for {}: {} / {}",
            request.name,
            category.label(),
            request.target_amount
        );
        Ok(account.donation_info())
    }

    /// Pledge points toward the active goal.
    pub async fn contribute(
        &self,
        request: ContributeRequest,
    ) -> Result<DonationInfoResponse, DomainError> {
        let lock = self.locks.for_account(&request.name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(&request.name)
            .await?
            .ok_or_else(|| DomainError::NotFound(request.name.clone()))?;

        contribute(&mut account, request.amount, &LedgerTimestamp::now())?;
        self.db.save(&account, version).await?;

        info!("{} contributed {}", request.name, request.amount);
        Ok(account.donation_info())
    }

    /// Complete a fully-funded goal, archiving it with its certificate.
    pub async fn complete(&self, name: &str) -> Result<DonationInfoResponse, DomainError> {
        let lock = self.locks.for_account(name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;

        let record = complete(&mut account, &LedgerTimestamp::now())?;
        self.db.save(&account, version).await?;

        info!("{} completed a {} goal of {}", name, record.badge, record.amount);
        Ok(account.donation_info())
    }

    /// Abandon the active goal. Contributed points stay spent.
    pub async fn clear(&self, name: &str) -> Result<DonationInfoResponse, DomainError> {
        let lock = self.locks.for_account(name);
        let _guard = lock.lock().await;

        let (mut account, version) = self
            .db
            .load(name)
            .await?
            .ok_or_else(|| DomainError::NotFound(name.to_string()))?;

        clear_goal(&mut account);
        self.db.save(&account, version).await?;
        Ok(account.donation_info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Account;

    async fn create_test_service() -> DonationService {
        let db = AccountDb::init_test().await.expect("test db");
        DonationService::new(db, AccountLocks::new())
    }

    async fn seed_account(service: &DonationService, points: f64) {
        let mut account = Account::new("jisoo");
        account.point_balance = points;
        service.db.insert(&account).await.unwrap();
    }

    fn goal_request(target: f64) -> SetDonationGoalRequest {
        SetDonationGoalRequest {
            name: "jisoo".to_string(),
            category: "의료 건강".to_string(),
            target_amount: target,
        }
    }

    #[tokio::test]
    async fn goal_runs_to_completion() {
        let service = create_test_service().await;
        seed_account(&service, 1000.0).await;

        let info = service.set_goal(goal_request(500.0)).await.unwrap();
        assert_eq!(info.category, "의료 건강");
        assert_eq!(info.current_amount, 0.0);

        service
            .contribute(ContributeRequest {
                name: "jisoo".to_string(),
                amount: 300.0,
            })
            .await
            .unwrap();
        let info = service
            .contribute(ContributeRequest {
                name: "jisoo".to_string(),
                amount: 200.0,
            })
            .await
            .unwrap();
        assert_eq!(info.current_amount, 500.0);

        let done = service.complete("jisoo").await.unwrap();
        assert_eq!(done.category, "none");
        assert_eq!(done.total_amount, 500.0);
        assert_eq!(done.history.len(), 1);
        assert_eq!(done.history[0].badge, "의료 건강");
        assert_eq!(done.history[0].animation, "dog");
    }

    #[tokio::test]
    async fn unknown_category_is_rejected_before_loading() {
        let service = create_test_service().await;
        seed_account(&service, 0.0).await;

        let err = service
            .set_goal(SetDonationGoalRequest {
                name: "jisoo".to_string(),
                category: "우주 개발".to_string(),
                target_amount: 100.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidCategory(_)));
    }

    #[tokio::test]
    async fn contribute_without_goal_fails() {
        let service = create_test_service().await;
        seed_account(&service, 1000.0).await;

        let err = service
            .contribute(ContributeRequest {
                name: "jisoo".to_string(),
                amount: 100.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NoActiveGoal));
    }

    #[tokio::test]
    async fn incomplete_goal_cannot_be_completed() {
        let service = create_test_service().await;
        seed_account(&service, 1000.0).await;
        service.set_goal(goal_request(500.0)).await.unwrap();
        service
            .contribute(ContributeRequest {
                name: "jisoo".to_string(),
                amount: 200.0,
            })
            .await
            .unwrap();

        let err = service.complete("jisoo").await.unwrap_err();
        assert!(matches!(err, DomainError::GoalNotReached { .. }));
    }

    #[tokio::test]
    async fn clear_abandons_goal_but_keeps_spent_points() {
        let service = create_test_service().await;
        seed_account(&service, 1000.0).await;
        service.set_goal(goal_request(500.0)).await.unwrap();
        service
            .contribute(ContributeRequest {
                name: "jisoo".to_string(),
                amount: 200.0,
            })
            .await
            .unwrap();

        let info = service.clear("jisoo").await.unwrap();
        assert_eq!(info.category, "none");
        assert_eq!(info.current_amount, 0.0);

        let (account, _) = service.db.load("jisoo").await.unwrap().unwrap();
        assert_eq!(account.point_balance, 800.0);
    }

    #[tokio::test]
    async fn concurrent_contributions_do_not_lose_updates() {
        let service = create_test_service().await;
        seed_account(&service, 1000.0).await;
        service.set_goal(goal_request(1000.0)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..12 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .contribute(ContributeRequest {
                        name: "jisoo".to_string(),
                        amount: 100.0,
                    })
                    .await
            }));
        }

        let mut succeeded = 0u32;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                succeeded += 1;
            }
        }
        // ten fit under the target; the surplus two are refused, never lost
        assert_eq!(succeeded, 10);

        let info = service.donation_info("jisoo").await.unwrap();
        assert_eq!(info.current_amount, 1000.0);
        let (account, _) = service.db.load("jisoo").await.unwrap().unwrap();
        assert_eq!(account.point_balance, 0.0);
        assert_eq!(account.ledger.len(), 10);
    }
}
