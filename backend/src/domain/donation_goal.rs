//! Donation goal state machine.
//!
//! NoGoal -> GoalActive -> GoalComplete (transient, resets to NoGoal) with
//! GoalActive looping on partial contributions and an explicit clear back to
//! NoGoal. Contributions flow through the point ledger; the goal never holds
//! points of its own, it only tracks how many have been pledged.

use shared::{CompletionRecord, EntryKind};

use crate::domain::clock::LedgerTimestamp;
use crate::domain::content::{animation_for, content_for};
use crate::domain::errors::DomainError;
use crate::domain::ledger::record;
use crate::domain::models::{Account, DonationCategory};
use crate::domain::rounding::bankers_round;

/// Activate a goal, or re-target the active one.
///
/// Re-targeting resets the collected amount to zero so a stale partial sum
/// can never exceed a smaller new target.
pub fn set_goal(
    account: &mut Account,
    category: DonationCategory,
    target_amount: f64,
) -> Result<(), DomainError> {
    if !target_amount.is_finite() || target_amount < 0.0 {
        return Err(DomainError::Validation(
            "target amount must be zero or positive".to_string(),
        ));
    }
    let goal = &mut account.donation;
    goal.category = Some(category);
    goal.target_amount = bankers_round(target_amount, 0);
    goal.current_amount = 0.0;
    Ok(())
}

/// Pledge `amount` points toward the active goal.
///
/// Debits the point balance through the ledger recorder with a
/// "<category> - donation" label, then advances the collected amount. The
/// collected amount never exceeds the target.
pub fn contribute(
    account: &mut Account,
    amount: f64,
    at: &LedgerTimestamp,
) -> Result<(), DomainError> {
    let category = account.donation.category.ok_or(DomainError::NoActiveGoal)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(DomainError::Validation(
            "donation amount must be positive".to_string(),
        ));
    }
    let amount = bankers_round(amount, 0);
    let goal = &account.donation;
    if goal.current_amount + amount > goal.target_amount {
        return Err(DomainError::ContributionExceedsGoal {
            amount,
            current: goal.current_amount,
            target: goal.target_amount,
        });
    }

    let label = format!("{} - donation", category.label());
    record(account, EntryKind::Point, &label, -amount, at)?;
    account.donation.current_amount += amount;
    Ok(())
}

/// Complete the active goal once the target is fully collected.
///
/// Adds the collected amount to the lifetime total, appends one completion
/// record, and resets the goal to NoGoal. Fails without touching any field
/// when the target has not been reached.
pub fn complete(account: &mut Account, at: &LedgerTimestamp) -> Result<CompletionRecord, DomainError> {
    let goal = &mut account.donation;
    let category = goal.category.ok_or(DomainError::NoActiveGoal)?;
    if goal.current_amount != goal.target_amount {
        return Err(DomainError::GoalNotReached {
            current: goal.current_amount,
            target: goal.target_amount,
        });
    }

    goal.total_amount += goal.current_amount;
    let completion = CompletionRecord {
        badge: category.label().to_string(),
        amount: goal.target_amount,
        content: content_for(category).to_string(),
        animation: animation_for(category).to_string(),
        day: at.day.clone(),
    };
    goal.history.push(completion.clone());

    goal.category = None;
    goal.target_amount = 0.0;
    goal.current_amount = 0.0;
    Ok(completion)
}

/// Drop the active goal without completing it. Collected points stay spent;
/// lifetime total and completion history are untouched.
pub fn clear_goal(account: &mut Account) {
    let goal = &mut account.donation;
    goal.category = None;
    goal.target_amount = 0.0;
    goal.current_amount = 0.0;
}
