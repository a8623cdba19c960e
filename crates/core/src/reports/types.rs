//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kosha_shared::types::{BankAccountId, TransactionId};

use crate::voucher::{ClearedStatus, TransactionType, VoucherType};

/// A persisted transaction row as the report generator sees it.
///
/// The storage layer converts its models into this shape; report
/// computation itself never touches the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoucherRecord {
    /// Transaction row ID.
    pub id: TransactionId,
    /// Voucher number, e.g. `PAY/42`.
    pub voucher_number: String,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Row direction.
    pub transaction_type: TransactionType,
    /// Business date.
    pub transaction_date: NaiveDate,
    /// Account this row posts against.
    pub bank_account_id: BankAccountId,
    /// Counterparty, if any.
    pub party_name: Option<String>,
    /// Row amount (always positive; direction comes from the type).
    pub amount: Decimal,
    /// Narration text.
    pub narration: String,
    /// Cheque clearing status.
    pub cleared_status: ClearedStatus,
    /// Cheque number, if settled by cheque.
    pub cheque_number: Option<String>,
}

impl VoucherRecord {
    /// Returns the signed balance effect of this row, or zero when the
    /// posting has been retracted by a bounce or cancellation.
    #[must_use]
    pub fn balance_effect(&self) -> Decimal {
        if self.cleared_status.affects_balance() {
            self.transaction_type.signed_amount(self.amount)
        } else {
            Decimal::ZERO
        }
    }
}

/// One line of a bank statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementLine {
    /// Transaction row ID.
    pub transaction_id: TransactionId,
    /// Business date.
    pub transaction_date: NaiveDate,
    /// Voucher number.
    pub voucher_number: String,
    /// Narration text.
    pub narration: String,
    /// Counterparty, if any.
    pub party_name: Option<String>,
    /// Cheque number, if any.
    pub cheque_number: Option<String>,
    /// Amount leaving the account (zero for credit rows).
    pub debit: Decimal,
    /// Amount entering the account (zero for debit rows).
    pub credit: Decimal,
    /// Account balance after this row.
    pub running_balance: Decimal,
}

/// Bank statement report for a single account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankStatement {
    /// Report type identifier.
    pub report_type: String,
    /// Account ID.
    pub account_id: BankAccountId,
    /// Account name.
    pub account_name: String,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Balance as of the day before the period.
    pub opening_balance: Decimal,
    /// Statement lines in chronological order.
    pub lines: Vec<StatementLine>,
    /// Sum of debit amounts in the period.
    pub total_debits: Decimal,
    /// Sum of credit amounts in the period.
    pub total_credits: Decimal,
    /// Balance after the last line.
    pub closing_balance: Decimal,
}

/// Aggregated flow for one party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyFlow {
    /// Party name (used as a free-text category).
    pub party_name: String,
    /// Number of transactions.
    pub count: u64,
    /// Total amount.
    pub amount: Decimal,
}

/// Cashflow report across all accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashflowReport {
    /// Report type identifier.
    pub report_type: String,
    /// Period start date.
    pub period_start: NaiveDate,
    /// Period end date.
    pub period_end: NaiveDate,
    /// Sum of receipt amounts.
    pub total_receipts: Decimal,
    /// Sum of payment amounts.
    pub total_payments: Decimal,
    /// Receipts minus payments.
    pub net_cash_flow: Decimal,
    /// Receipts grouped by party.
    pub receipts_by_party: Vec<PartyFlow>,
    /// Payments grouped by party.
    pub payments_by_party: Vec<PartyFlow>,
}

/// One row of the daybook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaybookRow {
    /// Transaction row ID.
    pub transaction_id: TransactionId,
    /// Voucher number.
    pub voucher_number: String,
    /// Voucher type.
    pub voucher_type: VoucherType,
    /// Account this row posts against.
    pub bank_account_id: BankAccountId,
    /// Counterparty, if any.
    pub party_name: Option<String>,
    /// Narration text.
    pub narration: String,
    /// Amount leaving the account (zero for credit rows).
    pub debit: Decimal,
    /// Amount entering the account (zero for debit rows).
    pub credit: Decimal,
    /// Cheque clearing status.
    pub cleared_status: ClearedStatus,
    /// Cheque number, if any.
    pub cheque_number: Option<String>,
}

/// Daybook report: everything recorded for one business date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaybookReport {
    /// Report type identifier.
    pub report_type: String,
    /// The business date.
    pub date: NaiveDate,
    /// All rows dated this day, across accounts and statuses.
    pub rows: Vec<DaybookRow>,
    /// Sum of debit amounts.
    pub total_debits: Decimal,
    /// Sum of credit amounts.
    pub total_credits: Decimal,
    /// Credits minus debits.
    pub net_cashflow: Decimal,
}
