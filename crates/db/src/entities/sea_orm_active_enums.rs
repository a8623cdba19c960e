//! `SeaORM` active enums mirroring the core domain enums.
//!
//! Stored as short strings so the schema stays portable across
//! Postgres and `SQLite`. Conversions to and from the `kosha-core`
//! enums live here so repositories can hand rows straight to the
//! domain logic.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Voucher type column.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    /// Money paid out.
    #[sea_orm(string_value = "payment")]
    Payment,
    /// Money received.
    #[sea_orm(string_value = "receipt")]
    Receipt,
    /// Transfer between own accounts.
    #[sea_orm(string_value = "contra")]
    Contra,
}

/// Transaction direction column.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Balance decreases.
    #[sea_orm(string_value = "debit")]
    Debit,
    /// Balance increases.
    #[sea_orm(string_value = "credit")]
    Credit,
}

/// Cheque clearing status column.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ClearedStatus {
    /// Settled.
    #[sea_orm(string_value = "cleared")]
    Cleared,
    /// Cheque recorded, not yet deposited.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Cheque with the bank.
    #[sea_orm(string_value = "deposited")]
    Deposited,
    /// Cheque dishonored.
    #[sea_orm(string_value = "bounced")]
    Bounced,
    /// Cheque withdrawn.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Bank account type column.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Savings account.
    #[sea_orm(string_value = "savings")]
    Savings,
    /// Current account.
    #[sea_orm(string_value = "current")]
    Current,
    /// Cash credit facility.
    #[sea_orm(string_value = "cash_credit")]
    CashCredit,
    /// Overdraft facility.
    #[sea_orm(string_value = "overdraft")]
    Overdraft,
}

/// Transaction category type column.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Outgoing money.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Incoming money.
    #[sea_orm(string_value = "income")]
    Income,
}

impl From<kosha_core::voucher::VoucherType> for VoucherType {
    fn from(value: kosha_core::voucher::VoucherType) -> Self {
        match value {
            kosha_core::voucher::VoucherType::Payment => Self::Payment,
            kosha_core::voucher::VoucherType::Receipt => Self::Receipt,
            kosha_core::voucher::VoucherType::Contra => Self::Contra,
        }
    }
}

impl From<VoucherType> for kosha_core::voucher::VoucherType {
    fn from(value: VoucherType) -> Self {
        match value {
            VoucherType::Payment => Self::Payment,
            VoucherType::Receipt => Self::Receipt,
            VoucherType::Contra => Self::Contra,
        }
    }
}

impl From<kosha_core::voucher::TransactionType> for TransactionType {
    fn from(value: kosha_core::voucher::TransactionType) -> Self {
        match value {
            kosha_core::voucher::TransactionType::Debit => Self::Debit,
            kosha_core::voucher::TransactionType::Credit => Self::Credit,
        }
    }
}

impl From<TransactionType> for kosha_core::voucher::TransactionType {
    fn from(value: TransactionType) -> Self {
        match value {
            TransactionType::Debit => Self::Debit,
            TransactionType::Credit => Self::Credit,
        }
    }
}

impl From<kosha_core::voucher::ClearedStatus> for ClearedStatus {
    fn from(value: kosha_core::voucher::ClearedStatus) -> Self {
        match value {
            kosha_core::voucher::ClearedStatus::Cleared => Self::Cleared,
            kosha_core::voucher::ClearedStatus::Pending => Self::Pending,
            kosha_core::voucher::ClearedStatus::Deposited => Self::Deposited,
            kosha_core::voucher::ClearedStatus::Bounced => Self::Bounced,
            kosha_core::voucher::ClearedStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<ClearedStatus> for kosha_core::voucher::ClearedStatus {
    fn from(value: ClearedStatus) -> Self {
        match value {
            ClearedStatus::Cleared => Self::Cleared,
            ClearedStatus::Pending => Self::Pending,
            ClearedStatus::Deposited => Self::Deposited,
            ClearedStatus::Bounced => Self::Bounced,
            ClearedStatus::Cancelled => Self::Cancelled,
        }
    }
}
