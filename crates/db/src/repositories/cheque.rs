//! Cheque lifecycle repository.
//!
//! Walks cheque transactions through deposit, clearance, bounce, and
//! cancellation. The state machine itself lives in `kosha_core`; this
//! repository fetches the row, applies the validated action, and
//! retracts the optimistic posting when the cheque bounces or is
//! cancelled. A contra pair moves through the lifecycle in lockstep.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use kosha_core::cheque::{ChequeAction, ChequeLifecycle};
use kosha_shared::TransactionId;

use crate::entities::{sea_orm_active_enums, transactions};
use crate::error::{LedgerError, LedgerResult};
use crate::repositories::balance;

/// Repository for cheque status transitions.
#[derive(Debug, Clone)]
pub struct ChequeRepository {
    db: DatabaseConnection,
}

impl ChequeRepository {
    /// Creates a new cheque repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks a pending cheque as handed to the bank.
    ///
    /// Balance-neutral: the amount already posted when the voucher was
    /// recorded.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidStateTransition`] unless the
    /// cheque is pending, and validation errors for a blank bank or a
    /// future date.
    pub async fn deposit(
        &self,
        id: TransactionId,
        deposit_date: NaiveDate,
        deposit_bank: &str,
    ) -> LedgerResult<transactions::Model> {
        let txn = self.db.begin().await?;
        let row = find_cheque(&txn, id.into_inner()).await?;
        let action =
            ChequeLifecycle::deposit(row.cleared_status.into(), deposit_date, deposit_bank)?;
        let updated = apply_action(&txn, row, &action).await?;
        txn.commit().await?;
        info!(transaction_id = %id, bank = %deposit_bank, "Cheque deposited");
        Ok(updated)
    }

    /// Marks a cheque as honored by the bank.
    ///
    /// Balance-neutral, but a cleared cheque becomes immutable to
    /// edits from here on.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidStateTransition`] unless the
    /// cheque is pending or deposited.
    pub async fn clear(
        &self,
        id: TransactionId,
        cleared_date: NaiveDate,
    ) -> LedgerResult<transactions::Model> {
        let txn = self.db.begin().await?;
        let row = find_cheque(&txn, id.into_inner()).await?;
        let action = ChequeLifecycle::clear(row.cleared_status.into(), cleared_date)?;
        let updated = apply_action(&txn, row, &action).await?;
        txn.commit().await?;
        info!(transaction_id = %id, "Cheque cleared");
        Ok(updated)
    }

    /// Records a dishonored cheque and retracts its posting.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidStateTransition`] unless the
    /// cheque is pending or deposited, and a validation error for a
    /// blank reason or future date.
    pub async fn bounce(
        &self,
        id: TransactionId,
        bounce_date: NaiveDate,
        bounce_reason: &str,
    ) -> LedgerResult<transactions::Model> {
        let txn = self.db.begin().await?;
        let row = find_cheque(&txn, id.into_inner()).await?;
        let action =
            ChequeLifecycle::bounce(row.cleared_status.into(), bounce_date, bounce_reason)?;
        let updated = apply_action(&txn, row, &action).await?;
        txn.commit().await?;
        info!(transaction_id = %id, reason = %bounce_reason, "Cheque bounced");
        Ok(updated)
    }

    /// Withdraws a cheque before clearance and retracts its posting.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidStateTransition`] unless the
    /// cheque is pending or deposited, and a validation error for a
    /// blank reason.
    pub async fn cancel(
        &self,
        id: TransactionId,
        cancel_reason: &str,
    ) -> LedgerResult<transactions::Model> {
        let txn = self.db.begin().await?;
        let row = find_cheque(&txn, id.into_inner()).await?;
        let action = ChequeLifecycle::cancel(row.cleared_status.into(), cancel_reason)?;
        let updated = apply_action(&txn, row, &action).await?;
        txn.commit().await?;
        info!(transaction_id = %id, reason = %cancel_reason, "Cheque cancelled");
        Ok(updated)
    }

    /// Lists cheques still in flight (pending or deposited), earliest
    /// cheque date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_open_cheques(&self) -> LedgerResult<Vec<transactions::Model>> {
        let rows = transactions::Entity::find()
            .filter(transactions::Column::ChequeNumber.is_not_null())
            .filter(transactions::Column::ClearedStatus.is_in([
                sea_orm_active_enums::ClearedStatus::Pending,
                sea_orm_active_enums::ClearedStatus::Deposited,
            ]))
            .order_by_asc(transactions::Column::ChequeDate)
            .order_by_asc(transactions::Column::VoucherNumber)
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}

/// Fetches a transaction and insists it carries a cheque.
async fn find_cheque(txn: &DatabaseTransaction, id: Uuid) -> LedgerResult<transactions::Model> {
    let row = transactions::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("Transaction not found: {id}")))?;
    ChequeLifecycle::require_cheque(row.cheque_number.as_deref())?;
    Ok(row)
}

/// Applies a validated action to the row and its contra leg.
///
/// The linked leg mirrors the primary's status by construction, so the
/// transition validated against the primary holds for both.
async fn apply_action(
    txn: &DatabaseTransaction,
    row: transactions::Model,
    action: &ChequeAction,
) -> LedgerResult<transactions::Model> {
    if let Some(linked_id) = row.linked_transaction_id {
        let linked = transactions::Entity::find_by_id(linked_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                LedgerError::IntegrityViolation(format!(
                    "Contra leg {linked_id} missing for transaction {}",
                    row.id
                ))
            })?;
        write_action(txn, linked, action).await?;
    }
    write_action(txn, row, action).await
}

/// Writes one row's status move, retracting its posting when the
/// action calls for it.
async fn write_action(
    txn: &DatabaseTransaction,
    row: transactions::Model,
    action: &ChequeAction,
) -> LedgerResult<transactions::Model> {
    if action.reverses_posting() && row.affects_balance() {
        balance::apply_delta(txn, row.bank_account_id, -row.signed_amount()).await?;
    }

    let mut active: transactions::ActiveModel = row.into();
    active.cleared_status = Set(action.new_status().into());
    match action {
        ChequeAction::Deposit {
            deposit_date,
            deposit_bank,
        } => {
            active.deposit_date = Set(Some(*deposit_date));
            active.deposit_bank = Set(Some(deposit_bank.clone()));
        }
        ChequeAction::Clear { cleared_date } => {
            active.cleared_date = Set(Some(*cleared_date));
        }
        ChequeAction::Bounce {
            bounce_date,
            bounce_reason,
        } => {
            active.bounce_date = Set(Some(*bounce_date));
            active.bounce_reason = Set(Some(bounce_reason.clone()));
        }
        ChequeAction::Cancel { cancel_reason } => {
            active.cancel_reason = Set(Some(cancel_reason.clone()));
        }
    }
    active.updated_at = Set(chrono::Utc::now().into());

    let updated = active.update(txn).await?;
    Ok(updated)
}
