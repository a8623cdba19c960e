//! Cheque lifecycle errors.

use chrono::NaiveDate;
use thiserror::Error;

use crate::voucher::ClearedStatus;

/// Errors raised by cheque lifecycle transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChequeError {
    /// The requested transition is not allowed from the current status.
    #[error("Invalid cheque status transition from {from} to {to}")]
    InvalidTransition {
        /// Status the cheque is currently in.
        from: ClearedStatus,
        /// Status the caller asked for.
        to: ClearedStatus,
    },

    /// The transaction carries no cheque number.
    #[error("Transaction has no cheque to act on")]
    NotACheque,

    /// Deposit was requested without naming the receiving bank.
    #[error("Deposit bank is required")]
    DepositBankRequired,

    /// Bounce was requested without a reason.
    #[error("Bounce reason is required")]
    BounceReasonRequired,

    /// Cancellation was requested without a reason.
    #[error("Cancellation reason is required")]
    CancelReasonRequired,

    /// The deposit date lies in the future.
    #[error("Deposit date {0} is in the future")]
    DepositDateInFuture(NaiveDate),

    /// The cleared date lies in the future.
    #[error("Cleared date {0} is in the future")]
    ClearedDateInFuture(NaiveDate),

    /// The bounce date lies in the future.
    #[error("Bounce date {0} is in the future")]
    BounceDateInFuture(NaiveDate),
}

impl ChequeError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::NotACheque => "NOT_A_CHEQUE",
            Self::DepositBankRequired => "DEPOSIT_BANK_REQUIRED",
            Self::BounceReasonRequired => "BOUNCE_REASON_REQUIRED",
            Self::CancelReasonRequired => "CANCEL_REASON_REQUIRED",
            Self::DepositDateInFuture(_) => "DEPOSIT_DATE_IN_FUTURE",
            Self::ClearedDateInFuture(_) => "CLEARED_DATE_IN_FUTURE",
            Self::BounceDateInFuture(_) => "BOUNCE_DATE_IN_FUTURE",
        }
    }
}
