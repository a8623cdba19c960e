//! `SeaORM` Entity for the transactions table.
//!
//! Each row is one voucher leg. Payments and receipts are single rows;
//! a contra transfer is two rows pointing at each other through
//! `linked_transaction_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ClearedStatus, TransactionType, VoucherType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub voucher_number: String,
    pub voucher_type: VoucherType,
    pub transaction_type: TransactionType,
    pub transaction_date: Date,
    pub bank_account_id: Uuid,
    pub party_name: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((16, 2)))")]
    pub amount: Decimal,
    pub narration: String,
    pub cheque_number: Option<String>,
    pub cheque_date: Option<Date>,
    pub is_pdc: bool,
    pub cleared_status: ClearedStatus,
    pub reconciled: bool,
    /// The paired contra leg, when this row is half of a transfer.
    pub linked_transaction_id: Option<Uuid>,
    pub deposit_date: Option<Date>,
    pub deposit_bank: Option<String>,
    pub cleared_date: Option<Date>,
    pub bounce_date: Option<Date>,
    pub bounce_reason: Option<String>,
    pub cancel_reason: Option<String>,
    pub created_by: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bank_accounts::Entity",
        from = "Column::BankAccountId",
        to = "super::bank_accounts::Column::Id"
    )]
    BankAccounts,
}

impl Related<super::bank_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankAccounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Returns true if this row's amount is currently counted in the
    /// account balance.
    #[must_use]
    pub fn affects_balance(&self) -> bool {
        kosha_core::voucher::ClearedStatus::from(self.cleared_status).affects_balance()
    }

    /// Returns the signed effect this row had on its account when
    /// posted: negative for debits, positive for credits.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        kosha_core::voucher::TransactionType::from(self.transaction_type)
            .signed_amount(self.amount)
    }
}
