//! Report repository: bank statement, cashflow, daybook.
//!
//! Reads committed rows and hands them to `kosha_core::reports`, which
//! owns the arithmetic. Nothing here writes.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use kosha_core::reports::{
    BankStatement, CashflowReport, DaybookReport, ReportService, VoucherRecord,
};
use kosha_shared::{BankAccountId, TransactionId};

use crate::entities::{bank_accounts, transactions};
use crate::error::{LedgerError, LedgerResult};

/// Repository for read-only reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds a bank statement for one account over a period.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for an unknown account and a
    /// validation error when the period ends before it starts.
    pub async fn bank_statement(
        &self,
        account_id: BankAccountId,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> LedgerResult<BankStatement> {
        let account = bank_accounts::Entity::find_by_id(account_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("Bank account not found: {account_id}"))
            })?;

        // The opening balance is derived by walking current_balance back
        // past everything dated on or after the start, so the fetch must
        // not stop at period_end.
        let rows = transactions::Entity::find()
            .filter(transactions::Column::BankAccountId.eq(account_id.into_inner()))
            .filter(transactions::Column::TransactionDate.gte(period_start))
            .all(&self.db)
            .await?;
        let records = rows.into_iter().map(to_voucher_record).collect();

        let statement = ReportService::generate_bank_statement(
            BankAccountId::from_uuid(account.id),
            account.account_name,
            account.current_balance,
            records,
            period_start,
            period_end,
        )?;
        Ok(statement)
    }

    /// Builds a cashflow report across all accounts for a period.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the period ends before it
    /// starts.
    pub async fn cashflow(
        &self,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> LedgerResult<CashflowReport> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::TransactionDate.gte(period_start))
            .filter(transactions::Column::TransactionDate.lte(period_end))
            .all(&self.db)
            .await?;
        let records: Vec<VoucherRecord> = rows.into_iter().map(to_voucher_record).collect();

        let report = ReportService::generate_cashflow(&records, period_start, period_end)?;
        Ok(report)
    }

    /// Builds the daybook for a single date across all accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn daybook(&self, date: NaiveDate) -> LedgerResult<DaybookReport> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::TransactionDate.eq(date))
            .all(&self.db)
            .await?;
        let records: Vec<VoucherRecord> = rows.into_iter().map(to_voucher_record).collect();

        Ok(ReportService::generate_daybook(&records, date))
    }
}

/// Maps a persisted row into the core report record.
fn to_voucher_record(row: transactions::Model) -> VoucherRecord {
    VoucherRecord {
        id: TransactionId::from_uuid(row.id),
        voucher_number: row.voucher_number,
        voucher_type: row.voucher_type.into(),
        transaction_type: row.transaction_type.into(),
        transaction_date: row.transaction_date,
        bank_account_id: BankAccountId::from_uuid(row.bank_account_id),
        party_name: row.party_name,
        amount: row.amount,
        narration: row.narration,
        cleared_status: row.cleared_status.into(),
        cheque_number: row.cheque_number,
    }
}
