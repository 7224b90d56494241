//! Public DTOs exchanged between the rewards backend and its clients.
//!
//! These types define the wire format only. Domain rules (rounding, balance
//! invariants, goal transitions) live in the backend crate; the REST layer
//! maps these DTOs to internal commands.

use serde::{Deserialize, Serialize};

/// Which balance a ledger entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Point,
    Dollar,
}

/// One immutable row of an account's balance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub kind: EntryKind,
    /// Free-text origin of the change ("points exchanged", "<etf> purchase", ...)
    pub label: String,
    /// Calendar date at append time, Korean long form (e.g. "2026년 8월 26일")
    pub day: String,
    /// 24-hour clock time at append time ("14:30")
    pub time: String,
    /// Signed amount applied to the balance
    pub delta: f64,
    /// Balance of the same kind immediately after the change
    pub balance_after: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

/// Open/closed state of the six daily stamp slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampSlots {
    pub bus: bool,
    pub taxi: bool,
    pub convenience_store: bool,
    pub movie: bool,
    pub fast_food: bool,
    pub cafe: bool,
}

impl Default for StampSlots {
    /// A fresh account starts with every slot open.
    fn default() -> Self {
        Self {
            bus: true,
            taxi: true,
            convenience_store: true,
            movie: true,
            fast_food: true,
            cafe: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddStampRequest {
    pub name: String,
    /// One of: bus, taxi, convenience_store, movie, fast_food, cafe
    pub slot: String,
    /// Stamp denomination; only 100 and 500 are accepted
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampResponse {
    pub name: String,
    pub slots: StampSlots,
    pub stamps: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub name: String,
    pub slots: StampSlots,
    pub stamps: Vec<u32>,
    pub point_balance: f64,
    pub dollar_balance: f64,
    pub donation: DonationInfoResponse,
    pub owned_etfs: Vec<EtfHolding>,
    pub watched_etfs: Vec<WatchedEtf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustPointsRequest {
    pub name: String,
    /// Signed point delta; a debit larger than the balance is rejected
    pub delta: f64,
    /// Where the points came from / went to
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashbackInfoResponse {
    pub points: f64,
    pub history: Vec<LedgerEntry>,
}

/// Conversion direction, named after the side being debited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeDirection {
    PointsToDollars,
    DollarsToPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRequest {
    pub name: String,
    /// Amount debited from the source-side balance
    pub amount: f64,
    pub direction: ExchangeDirection,
}

/// Receipt for a completed conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeResponse {
    /// Home-currency units per foreign unit, as used for this conversion
    pub rate: f64,
    pub point_balance: f64,
    pub dollar_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDonationGoalRequest {
    pub name: String,
    /// One of the six fixed donation categories
    pub category: String,
    pub target_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributeRequest {
    pub name: String,
    pub amount: f64,
}

/// One completed donation goal, kept forever on the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Category the goal was completed under
    pub badge: String,
    pub amount: f64,
    /// Certificate text for the category
    pub content: String,
    /// Animation token for the category ("paper", "dog", ...)
    pub animation: String,
    pub day: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationInfoResponse {
    /// Active category, or "none"
    pub category: String,
    pub target_amount: f64,
    pub current_amount: f64,
    /// Lifetime sum of completed donations
    pub total_amount: f64,
    pub history: Vec<CompletionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfHolding {
    pub name: String,
    /// Purchase price per unit, in points
    pub price: f64,
    pub change_rate: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchedEtf {
    pub name: String,
    pub price: f64,
    pub change_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseEtfRequest {
    pub name: String,
    pub etf_name: String,
    pub price: f64,
    pub change_rate: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellEtfRequest {
    pub name: String,
    pub etf_name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchEtfRequest {
    pub name: String,
    pub etf_name: String,
    pub price: f64,
    pub change_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetInterestCategoriesRequest {
    pub name: String,
    pub categories: Vec<String>,
}

/// Uniform error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
