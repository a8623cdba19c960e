//! Voucher validation errors.

use thiserror::Error;

use kosha_shared::types::BankAccountId;

/// Errors raised while validating a voucher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoucherError {
    /// The referenced bank account does not exist.
    #[error("Bank account not found: {0}")]
    AccountNotFound(BankAccountId),

    /// A contra voucher was submitted without a destination account.
    #[error("Contra voucher requires a destination account")]
    ContraAccountRequired,

    /// A contra voucher names the same account on both legs.
    #[error("Contra voucher cannot transfer into the same account: {0}")]
    SameAccountContra(BankAccountId),

    /// The amount is zero.
    #[error("Voucher amount must be greater than zero")]
    ZeroAmount,

    /// The amount is negative.
    #[error("Voucher amount cannot be negative")]
    NegativeAmount,

    /// Party name is missing on a payment or receipt voucher.
    #[error("Party name is required for payment and receipt vouchers")]
    PartyNameRequired,

    /// A cheque number was given without a cheque date.
    #[error("Cheque date is required when a cheque number is provided")]
    ChequeDateRequired,

    /// The transaction is reconciled and locked against changes.
    #[error("Reconciled transactions cannot be modified")]
    Reconciled,

    /// The transaction is a cleared cheque and locked against changes.
    #[error("Cleared cheque transactions cannot be modified")]
    ClearedCheque,
}

impl VoucherError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ContraAccountRequired => "CONTRA_ACCOUNT_REQUIRED",
            Self::SameAccountContra(_) => "SAME_ACCOUNT_CONTRA",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::PartyNameRequired => "PARTY_NAME_REQUIRED",
            Self::ChequeDateRequired => "CHEQUE_DATE_REQUIRED",
            Self::Reconciled => "TRANSACTION_RECONCILED",
            Self::ClearedCheque => "CHEQUE_ALREADY_CLEARED",
        }
    }
}
