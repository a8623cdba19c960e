//! Report generation service.
//!
//! Every report is computed from rows the caller has already fetched;
//! the functions here are pure and deterministic. Rows whose posting
//! was retracted (bounced or cancelled cheques) carry no balance
//! effect, so statements and cashflow skip them, while the daybook
//! deliberately lists them: it is a journal of what was recorded, not
//! of what stuck.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use kosha_shared::types::BankAccountId;

use super::error::ReportError;
use super::types::{
    BankStatement, CashflowReport, DaybookReport, DaybookRow, PartyFlow, StatementLine,
    VoucherRecord,
};
use crate::voucher::{TransactionType, VoucherType};

/// Bucket label for rows without a party name.
const NO_PARTY: &str = "(no party)";

/// Service for generating ledger reports.
pub struct ReportService;

impl ReportService {
    /// Generates a bank statement for one account.
    ///
    /// `vouchers` must contain every transaction row for the account
    /// dated on or after `period_start` (rows past `period_end`
    /// included); `current_balance` is the account's balance right now.
    /// The opening balance is derived by walking the net effect of all
    /// supplied rows back out of the current balance, which keeps the
    /// closing balance equal to the live balance whenever the period
    /// extends to today.
    pub fn generate_bank_statement(
        account_id: BankAccountId,
        account_name: String,
        current_balance: Decimal,
        mut vouchers: Vec<VoucherRecord>,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<BankStatement, ReportError> {
        Self::check_range(period_start, period_end)?;

        // Chronological order, insertion order within a day.
        vouchers.sort_by(|a, b| {
            (a.transaction_date, a.id).cmp(&(b.transaction_date, b.id))
        });

        let net_since_start: Decimal =
            vouchers.iter().map(VoucherRecord::balance_effect).sum();
        let opening_balance = current_balance - net_since_start;

        let mut running_balance = opening_balance;
        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;
        let mut lines = Vec::new();

        for row in &vouchers {
            if row.transaction_date > period_end || !row.cleared_status.affects_balance() {
                continue;
            }
            let (debit, credit) = match row.transaction_type {
                TransactionType::Debit => (row.amount, Decimal::ZERO),
                TransactionType::Credit => (Decimal::ZERO, row.amount),
            };
            running_balance += row.balance_effect();
            total_debits += debit;
            total_credits += credit;
            lines.push(StatementLine {
                transaction_id: row.id,
                transaction_date: row.transaction_date,
                voucher_number: row.voucher_number.clone(),
                narration: row.narration.clone(),
                party_name: row.party_name.clone(),
                cheque_number: row.cheque_number.clone(),
                debit,
                credit,
                running_balance,
            });
        }

        Ok(BankStatement {
            report_type: "bank_statement".to_string(),
            account_id,
            account_name,
            period_start,
            period_end,
            opening_balance,
            lines,
            total_debits,
            total_credits,
            closing_balance: running_balance,
        })
    }

    /// Generates a cashflow report across all accounts.
    ///
    /// Contra vouchers are internal transfers and are excluded, as are
    /// rows whose posting was retracted. Parties act as free-text
    /// categories for the breakdowns.
    pub fn generate_cashflow(
        vouchers: &[VoucherRecord],
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<CashflowReport, ReportError> {
        Self::check_range(period_start, period_end)?;

        let mut receipts: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();
        let mut payments: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();

        for row in vouchers {
            if row.transaction_date < period_start
                || row.transaction_date > period_end
                || !row.cleared_status.affects_balance()
            {
                continue;
            }
            match row.voucher_type {
                VoucherType::Receipt => Self::accumulate(&mut receipts, row),
                VoucherType::Payment => Self::accumulate(&mut payments, row),
                VoucherType::Contra => {}
            }
        }

        let total_receipts: Decimal = receipts.values().map(|(_, amount)| *amount).sum();
        let total_payments: Decimal = payments.values().map(|(_, amount)| *amount).sum();

        Ok(CashflowReport {
            report_type: "cashflow".to_string(),
            period_start,
            period_end,
            total_receipts,
            total_payments,
            net_cash_flow: total_receipts - total_payments,
            receipts_by_party: Self::into_flows(receipts),
            payments_by_party: Self::into_flows(payments),
        })
    }

    /// Generates the daybook for one business date.
    ///
    /// Every row dated that day appears regardless of status, so the
    /// book reads as a journal of the day's activity. Totals cover the
    /// listed rows.
    #[must_use]
    pub fn generate_daybook(vouchers: &[VoucherRecord], date: NaiveDate) -> DaybookReport {
        let mut day_rows: Vec<&VoucherRecord> = vouchers
            .iter()
            .filter(|row| row.transaction_date == date)
            .collect();
        day_rows.sort_by_key(|row| row.id);

        let mut total_debits = Decimal::ZERO;
        let mut total_credits = Decimal::ZERO;
        let mut rows = Vec::with_capacity(day_rows.len());

        for row in day_rows {
            let (debit, credit) = match row.transaction_type {
                TransactionType::Debit => (row.amount, Decimal::ZERO),
                TransactionType::Credit => (Decimal::ZERO, row.amount),
            };
            total_debits += debit;
            total_credits += credit;
            rows.push(DaybookRow {
                transaction_id: row.id,
                voucher_number: row.voucher_number.clone(),
                voucher_type: row.voucher_type,
                bank_account_id: row.bank_account_id,
                party_name: row.party_name.clone(),
                narration: row.narration.clone(),
                debit,
                credit,
                cleared_status: row.cleared_status,
                cheque_number: row.cheque_number.clone(),
            });
        }

        DaybookReport {
            report_type: "daybook".to_string(),
            date,
            rows,
            total_debits,
            total_credits,
            net_cashflow: total_credits - total_debits,
        }
    }

    fn check_range(start: NaiveDate, end: NaiveDate) -> Result<(), ReportError> {
        if end < start {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(())
    }

    fn accumulate(groups: &mut BTreeMap<String, (u64, Decimal)>, row: &VoucherRecord) {
        let bucket = row
            .party_name
            .clone()
            .unwrap_or_else(|| NO_PARTY.to_string());
        let entry = groups.entry(bucket).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += row.amount;
    }

    fn into_flows(groups: BTreeMap<String, (u64, Decimal)>) -> Vec<PartyFlow> {
        groups
            .into_iter()
            .map(|(party_name, (count, amount))| PartyFlow {
                party_name,
                count,
                amount,
            })
            .collect()
    }
}
