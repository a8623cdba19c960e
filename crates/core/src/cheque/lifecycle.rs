//! Cheque lifecycle transitions.
//!
//! A cheque transaction is posted optimistically and then walked
//! through deposit, clearance, bounce, or cancellation. Each function
//! validates its inputs and the transition, returning a [`ChequeAction`]
//! describing the audit fields to persist. Nothing here touches
//! storage; the repository applies the action inside a transaction.

use chrono::{NaiveDate, Utc};

use super::error::ChequeError;
use crate::voucher::ClearedStatus;

/// A validated lifecycle transition with its audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChequeAction {
    /// Hand the cheque to the bank.
    Deposit {
        /// Date the cheque was deposited.
        deposit_date: NaiveDate,
        /// Branch or bank that took the deposit.
        deposit_bank: String,
    },
    /// The bank honored the cheque.
    Clear {
        /// Date the funds settled.
        cleared_date: NaiveDate,
    },
    /// The bank dishonored the cheque.
    Bounce {
        /// Date the dishonor was recorded.
        bounce_date: NaiveDate,
        /// Why the cheque bounced.
        bounce_reason: String,
    },
    /// The cheque was withdrawn before clearance.
    Cancel {
        /// Why the cheque was cancelled.
        cancel_reason: String,
    },
}

impl ChequeAction {
    /// Returns the status this action moves the transaction into.
    #[must_use]
    pub fn new_status(&self) -> ClearedStatus {
        match self {
            Self::Deposit { .. } => ClearedStatus::Deposited,
            Self::Clear { .. } => ClearedStatus::Cleared,
            Self::Bounce { .. } => ClearedStatus::Bounced,
            Self::Cancel { .. } => ClearedStatus::Cancelled,
        }
    }

    /// Returns true if applying this action retracts the optimistic
    /// balance posting made when the voucher was recorded.
    #[must_use]
    pub fn reverses_posting(&self) -> bool {
        matches!(self, Self::Bounce { .. } | Self::Cancel { .. })
    }
}

/// State machine for cheque status transitions.
pub struct ChequeLifecycle;

impl ChequeLifecycle {
    /// Validates depositing a cheque with the bank.
    pub fn deposit(
        current: ClearedStatus,
        deposit_date: NaiveDate,
        deposit_bank: &str,
    ) -> Result<ChequeAction, ChequeError> {
        let deposit_bank = deposit_bank.trim();
        if deposit_bank.is_empty() {
            return Err(ChequeError::DepositBankRequired);
        }
        if deposit_date > Utc::now().date_naive() {
            return Err(ChequeError::DepositDateInFuture(deposit_date));
        }
        Self::ensure_transition(current, ClearedStatus::Deposited)?;
        Ok(ChequeAction::Deposit {
            deposit_date,
            deposit_bank: deposit_bank.to_string(),
        })
    }

    /// Validates marking a cheque as honored by the bank.
    pub fn clear(
        current: ClearedStatus,
        cleared_date: NaiveDate,
    ) -> Result<ChequeAction, ChequeError> {
        if cleared_date > Utc::now().date_naive() {
            return Err(ChequeError::ClearedDateInFuture(cleared_date));
        }
        Self::ensure_transition(current, ClearedStatus::Cleared)?;
        Ok(ChequeAction::Clear { cleared_date })
    }

    /// Validates recording a dishonored cheque.
    pub fn bounce(
        current: ClearedStatus,
        bounce_date: NaiveDate,
        bounce_reason: &str,
    ) -> Result<ChequeAction, ChequeError> {
        let bounce_reason = bounce_reason.trim();
        if bounce_reason.is_empty() {
            return Err(ChequeError::BounceReasonRequired);
        }
        if bounce_date > Utc::now().date_naive() {
            return Err(ChequeError::BounceDateInFuture(bounce_date));
        }
        Self::ensure_transition(current, ClearedStatus::Bounced)?;
        Ok(ChequeAction::Bounce {
            bounce_date,
            bounce_reason: bounce_reason.to_string(),
        })
    }

    /// Validates withdrawing a cheque before clearance.
    pub fn cancel(
        current: ClearedStatus,
        cancel_reason: &str,
    ) -> Result<ChequeAction, ChequeError> {
        let cancel_reason = cancel_reason.trim();
        if cancel_reason.is_empty() {
            return Err(ChequeError::CancelReasonRequired);
        }
        Self::ensure_transition(current, ClearedStatus::Cancelled)?;
        Ok(ChequeAction::Cancel {
            cancel_reason: cancel_reason.to_string(),
        })
    }

    /// Returns true if the lifecycle allows moving from `from` to `to`.
    ///
    /// Cleared, Bounced, and Cancelled are terminal; a pending cheque
    /// may skip the deposit step and clear, bounce, or cancel directly.
    #[must_use]
    pub fn is_valid_transition(from: ClearedStatus, to: ClearedStatus) -> bool {
        matches!(
            (from, to),
            (ClearedStatus::Pending, ClearedStatus::Deposited)
                | (ClearedStatus::Pending, ClearedStatus::Cleared)
                | (ClearedStatus::Pending, ClearedStatus::Bounced)
                | (ClearedStatus::Pending, ClearedStatus::Cancelled)
                | (ClearedStatus::Deposited, ClearedStatus::Cleared)
                | (ClearedStatus::Deposited, ClearedStatus::Bounced)
                | (ClearedStatus::Deposited, ClearedStatus::Cancelled)
        )
    }

    /// Rejects lifecycle operations on transactions without a cheque.
    pub fn require_cheque(cheque_number: Option<&str>) -> Result<(), ChequeError> {
        if cheque_number.is_none() {
            return Err(ChequeError::NotACheque);
        }
        Ok(())
    }

    fn ensure_transition(from: ClearedStatus, to: ClearedStatus) -> Result<(), ChequeError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(ChequeError::InvalidTransition { from, to })
        }
    }
}
