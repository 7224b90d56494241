//! The per-user account aggregate.
//!
//! One account owns its balances, its ledger, its stamp card, its donation
//! goal and its ETF portfolio. The aggregate is loaded, mutated in memory by
//! the pure core, and persisted back as a whole; it never holds references
//! to other accounts.

use serde::{Deserialize, Serialize};
use shared::{
    AccountResponse, CashbackInfoResponse, DonationInfoResponse, EntryKind, LedgerEntry,
    StampResponse, StampSlots,
};

use crate::domain::errors::DomainError;
use crate::domain::models::donation::DonationGoal;
use crate::domain::models::portfolio::Portfolio;

/// Stamp denominations the cashback card accepts.
const STAMP_VALUES: [u32; 2] = [100, 500];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    /// Daily stamp slots; a closed slot stays closed until reset.
    pub slots: StampSlots,
    /// Collected stamp denominations, oldest first.
    pub stamps: Vec<u32>,
    /// Whole-valued, never negative.
    pub point_balance: f64,
    /// Two fractional digits, never negative.
    pub dollar_balance: f64,
    /// Immutable history of every balance change, oldest first.
    pub ledger: Vec<LedgerEntry>,
    pub donation: DonationGoal,
    pub portfolio: Portfolio,
}

impl Account {
    /// Fresh aggregate: zero balances, empty history, all stamp slots open.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slots: StampSlots::default(),
            stamps: Vec::new(),
            point_balance: 0.0,
            dollar_balance: 0.0,
            ledger: Vec::new(),
            donation: DonationGoal::default(),
            portfolio: Portfolio::default(),
        }
    }

    pub fn balance(&self, kind: EntryKind) -> f64 {
        match kind {
            EntryKind::Point => self.point_balance,
            EntryKind::Dollar => self.dollar_balance,
        }
    }

    pub(crate) fn set_balance(&mut self, kind: EntryKind, value: f64) {
        match kind {
            EntryKind::Point => self.point_balance = value,
            EntryKind::Dollar => self.dollar_balance = value,
        }
    }

    /// Push `value` onto the stamp card through `slot`, closing the slot.
    pub fn add_stamp(&mut self, slot: &str, value: u32) -> Result<(), DomainError> {
        if !STAMP_VALUES.contains(&value) {
            return Err(DomainError::Validation(format!(
                "unsupported stamp value: {value}"
            )));
        }
        let open = self.slot_mut(slot)?;
        if !*open {
            return Err(DomainError::Validation(format!(
                "stamp slot already used today: {slot}"
            )));
        }
        *open = false;
        self.stamps.push(value);
        Ok(())
    }

    /// Reopen all six stamp slots.
    pub fn reset_slots(&mut self) {
        self.slots = StampSlots::default();
    }

    /// Clear the collected stamp list. Slot state is untouched.
    pub fn reset_stamps(&mut self) {
        self.stamps.clear();
    }

    fn slot_mut(&mut self, slot: &str) -> Result<&mut bool, DomainError> {
        match slot {
            "bus" => Ok(&mut self.slots.bus),
            "taxi" => Ok(&mut self.slots.taxi),
            "convenience_store" => Ok(&mut self.slots.convenience_store),
            "movie" => Ok(&mut self.slots.movie),
            "fast_food" => Ok(&mut self.slots.fast_food),
            "cafe" => Ok(&mut self.slots.cafe),
            other => Err(DomainError::Validation(format!(
                "unknown stamp slot: {other}"
            ))),
        }
    }

    /// Ledger entries of one kind, oldest first.
    pub fn history(&self, kind: EntryKind) -> Vec<LedgerEntry> {
        self.ledger
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    pub fn to_response(&self) -> AccountResponse {
        AccountResponse {
            name: self.name.clone(),
            slots: self.slots.clone(),
            stamps: self.stamps.clone(),
            point_balance: self.point_balance,
            dollar_balance: self.dollar_balance,
            donation: self.donation_info(),
            owned_etfs: self.portfolio.owned.clone(),
            watched_etfs: self.portfolio.watched.clone(),
        }
    }

    pub fn to_stamp_response(&self) -> StampResponse {
        StampResponse {
            name: self.name.clone(),
            slots: self.slots.clone(),
            stamps: self.stamps.clone(),
        }
    }

    pub fn cashback_info(&self) -> CashbackInfoResponse {
        CashbackInfoResponse {
            points: self.point_balance,
            history: self.history(EntryKind::Point),
        }
    }

    pub fn donation_info(&self) -> DonationInfoResponse {
        DonationInfoResponse {
            category: self.donation.category_label(),
            target_amount: self.donation.target_amount,
            current_amount: self.donation.current_amount,
            total_amount: self.donation.total_amount,
            history: self.donation.history.clone(),
        }
    }
}
