//! Ledger engine error taxonomy.
//!
//! Every public repository operation returns [`LedgerError`]. Core
//! domain errors are folded into the taxonomy here so callers see one
//! structured error kind plus a human-readable message.

use kosha_core::cheque::ChequeError;
use kosha_core::reports::ReportError;
use kosha_core::voucher::VoucherError;
use sea_orm::DbErr;
use thiserror::Error;

/// Result alias for engine operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors surfaced by the ledger engine's public operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A field is missing or invalid; nothing was written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown account, transaction, or category id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Edit or delete blocked by the reconciled / cleared-cheque guard.
    #[error("Immutable transaction: {0}")]
    ImmutableTransaction(String),

    /// Illegal cheque lifecycle move.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Status the transaction is in.
        from: String,
        /// Status the caller asked for.
        to: String,
    },

    /// Mutation of protected master data.
    #[error("Protected entity: {0}")]
    ProtectedEntity(String),

    /// Linked-leg or referential inconsistency.
    #[error("Integrity violation: {0}")]
    IntegrityViolation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl LedgerError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ImmutableTransaction(_) => "IMMUTABLE_TRANSACTION",
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::ProtectedEntity(_) => "PROTECTED_ENTITY",
            Self::IntegrityViolation(_) => "INTEGRITY_VIOLATION",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<VoucherError> for LedgerError {
    fn from(err: VoucherError) -> Self {
        match err {
            VoucherError::AccountNotFound(_) => Self::NotFound(err.to_string()),
            VoucherError::SameAccountContra(_) => Self::IntegrityViolation(err.to_string()),
            VoucherError::Reconciled | VoucherError::ClearedCheque => {
                Self::ImmutableTransaction(err.to_string())
            }
            VoucherError::ContraAccountRequired
            | VoucherError::ZeroAmount
            | VoucherError::NegativeAmount
            | VoucherError::PartyNameRequired
            | VoucherError::ChequeDateRequired => Self::Validation(err.to_string()),
        }
    }
}

impl From<ChequeError> for LedgerError {
    fn from(err: ChequeError) -> Self {
        match err {
            ChequeError::InvalidTransition { from, to } => Self::InvalidStateTransition {
                from: from.to_string(),
                to: to.to_string(),
            },
            ChequeError::NotACheque
            | ChequeError::DepositBankRequired
            | ChequeError::BounceReasonRequired
            | ChequeError::CancelReasonRequired
            | ChequeError::DepositDateInFuture(_)
            | ChequeError::ClearedDateInFuture(_)
            | ChequeError::BounceDateInFuture(_) => Self::Validation(err.to_string()),
        }
    }
}

impl From<ReportError> for LedgerError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidDateRange { .. } => Self::Validation(err.to_string()),
        }
    }
}
