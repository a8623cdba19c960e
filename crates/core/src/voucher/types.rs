//! Voucher domain types.
//!
//! This module defines the core types used for recording banking
//! vouchers: voucher and transaction type enums, the cheque clearing
//! status, and the input/resolved types that flow through validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use kosha_shared::types::BankAccountId;

/// The kind of voucher being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    /// Money paid out to a party.
    Payment,
    /// Money received from a party.
    Receipt,
    /// Transfer between two own bank accounts (two linked legs).
    Contra,
}

impl VoucherType {
    /// Returns the string representation of the voucher type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Receipt => "receipt",
            Self::Contra => "contra",
        }
    }

    /// Parses a voucher type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "payment" => Some(Self::Payment),
            "receipt" => Some(Self::Receipt),
            "contra" => Some(Self::Contra),
            _ => None,
        }
    }

    /// Returns the voucher number prefix for this type.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Payment => "PAY",
            Self::Receipt => "REC",
            Self::Contra => "CON",
        }
    }

    /// Returns the transaction type of the primary row for this voucher type.
    ///
    /// Payments debit the bank account, receipts credit it. A contra
    /// voucher's primary leg debits the source account; the paired leg
    /// credits the destination.
    #[must_use]
    pub fn primary_transaction_type(&self) -> TransactionType {
        match self {
            Self::Payment | Self::Contra => TransactionType::Debit,
            Self::Receipt => TransactionType::Credit,
        }
    }
}

impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The direction of a transaction against a bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money leaving the account (balance decreases).
    Debit,
    /// Money entering the account (balance increases).
    Credit,
}

impl TransactionType {
    /// Returns the string representation of the transaction type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    /// Parses a transaction type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }

    /// Returns the signed balance effect of an amount in this direction.
    ///
    /// Debits subtract from the account balance, credits add to it.
    #[must_use]
    pub fn signed_amount(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Debit => -amount,
            Self::Credit => amount,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cheque clearing status of a transaction.
///
/// Transactions without a cheque are `Cleared` immediately. A cheque
/// transaction starts `Pending` and moves through the lifecycle:
/// - Pending → Deposited (deposit)
/// - Pending/Deposited → Cleared (clear)
/// - Pending/Deposited → Bounced (bounce, retracts the posted balance)
/// - Pending/Deposited → Cancelled (cancel, retracts the posted balance)
///
/// Cleared, Bounced, and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    /// Funds counted and settled (no cheque, or cheque honored).
    Cleared,
    /// Cheque recorded but not yet deposited.
    Pending,
    /// Cheque handed to the bank, awaiting clearance.
    Deposited,
    /// Cheque dishonored; the optimistic posting was retracted.
    Bounced,
    /// Cheque withdrawn before clearance; the posting was retracted.
    Cancelled,
}

impl ClearedStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleared => "cleared",
            Self::Pending => "pending",
            Self::Deposited => "deposited",
            Self::Bounced => "bounced",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cleared" => Some(Self::Cleared),
            "pending" => Some(Self::Pending),
            "deposited" => Some(Self::Deposited),
            "bounced" => Some(Self::Bounced),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns true if no further lifecycle transitions are allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cleared | Self::Bounced | Self::Cancelled)
    }

    /// Returns true if the transaction's amount is currently counted in
    /// the account balance.
    ///
    /// Balances are posted optimistically at creation; a bounce or
    /// cancel retracts that posting, so those rows no longer affect the
    /// balance and must not be reversed a second time.
    #[must_use]
    pub fn affects_balance(&self) -> bool {
        !matches!(self, Self::Bounced | Self::Cancelled)
    }

    /// Returns the initial status for a newly recorded voucher.
    #[must_use]
    pub fn initial_for(cheque_number: Option<&str>) -> Self {
        if cheque_number.is_some() {
            Self::Pending
        } else {
            Self::Cleared
        }
    }
}

impl fmt::Display for ClearedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for recording or updating a voucher.
///
/// The transaction type of each persisted row is derived from the
/// voucher type; callers never supply it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherInput {
    /// The kind of voucher.
    pub voucher_type: VoucherType,
    /// Business date of the transaction.
    pub transaction_date: NaiveDate,
    /// The bank account the voucher is recorded against (source for Contra).
    pub bank_account_id: BankAccountId,
    /// Destination account for Contra vouchers.
    pub contra_account_id: Option<BankAccountId>,
    /// Counterparty name; required unless the voucher is a Contra.
    pub party_name: Option<String>,
    /// Voucher amount; must be positive.
    pub amount: Decimal,
    /// Free-text narration.
    pub narration: String,
    /// Cheque number, when the voucher was settled by cheque.
    pub cheque_number: Option<String>,
    /// Date written on the cheque; required when a cheque number is present.
    pub cheque_date: Option<NaiveDate>,
    /// Whether the cheque is post-dated.
    pub is_pdc: bool,
    /// The session user recording the voucher.
    pub created_by: String,
}

/// Account details needed during voucher validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: BankAccountId,
    /// The account display name.
    pub account_name: String,
}

/// One persisted row of a validated voucher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLeg {
    /// The account this row posts against.
    pub account_id: BankAccountId,
    /// The direction of this row.
    pub transaction_type: TransactionType,
    /// The signed delta to apply to the account's current balance.
    pub balance_delta: Decimal,
}

/// A validated voucher ready for persistence.
///
/// Payment and Receipt vouchers resolve to a single leg; Contra
/// vouchers resolve to a debit leg on the source account followed by a
/// credit leg on the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVoucher {
    /// The rows to persist, primary leg first.
    pub legs: Vec<ResolvedLeg>,
    /// Normalized party name (always `None` for Contra).
    pub party_name: Option<String>,
    /// Normalized cheque number (blank input becomes `None`).
    pub cheque_number: Option<String>,
    /// Cheque date; present only when a cheque number is present.
    pub cheque_date: Option<NaiveDate>,
    /// The status the voucher starts its life in.
    pub initial_status: ClearedStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_voucher_type_prefix() {
        assert_eq!(VoucherType::Payment.prefix(), "PAY");
        assert_eq!(VoucherType::Receipt.prefix(), "REC");
        assert_eq!(VoucherType::Contra.prefix(), "CON");
    }

    #[test]
    fn test_voucher_type_round_trip() {
        assert_eq!(VoucherType::parse("payment"), Some(VoucherType::Payment));
        assert_eq!(VoucherType::parse("RECEIPT"), Some(VoucherType::Receipt));
        assert_eq!(VoucherType::parse("Contra"), Some(VoucherType::Contra));
        assert_eq!(VoucherType::parse("journal"), None);
    }

    #[test]
    fn test_primary_transaction_type() {
        assert_eq!(
            VoucherType::Payment.primary_transaction_type(),
            TransactionType::Debit
        );
        assert_eq!(
            VoucherType::Receipt.primary_transaction_type(),
            TransactionType::Credit
        );
        assert_eq!(
            VoucherType::Contra.primary_transaction_type(),
            TransactionType::Debit
        );
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(
            TransactionType::Debit.signed_amount(dec!(250.50)),
            dec!(-250.50)
        );
        assert_eq!(
            TransactionType::Credit.signed_amount(dec!(250.50)),
            dec!(250.50)
        );
    }

    #[test]
    fn test_status_terminal() {
        assert!(ClearedStatus::Cleared.is_terminal());
        assert!(ClearedStatus::Bounced.is_terminal());
        assert!(ClearedStatus::Cancelled.is_terminal());
        assert!(!ClearedStatus::Pending.is_terminal());
        assert!(!ClearedStatus::Deposited.is_terminal());
    }

    #[test]
    fn test_status_affects_balance() {
        assert!(ClearedStatus::Cleared.affects_balance());
        assert!(ClearedStatus::Pending.affects_balance());
        assert!(ClearedStatus::Deposited.affects_balance());
        assert!(!ClearedStatus::Bounced.affects_balance());
        assert!(!ClearedStatus::Cancelled.affects_balance());
    }

    #[test]
    fn test_initial_status() {
        assert_eq!(
            ClearedStatus::initial_for(Some("CHQ001")),
            ClearedStatus::Pending
        );
        assert_eq!(ClearedStatus::initial_for(None), ClearedStatus::Cleared);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", ClearedStatus::Deposited), "deposited");
        assert_eq!(ClearedStatus::parse("BOUNCED"), Some(ClearedStatus::Bounced));
        assert_eq!(ClearedStatus::parse("void"), None);
    }
}
