//! Transaction repository for voucher ledger operations.
//!
//! Recording, editing, and deleting vouchers all run inside a single
//! database transaction covering the row writes and the balance deltas
//! they imply. A contra transfer is persisted as two linked rows that
//! are always written, updated, and removed as a unit.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use kosha_core::voucher::{
    contra_leg_number, validate_can_modify, validate_voucher, AccountInfo, ClearedStatus,
    ResolvedVoucher, TransactionType, VoucherError, VoucherInput, VoucherType,
};
use kosha_shared::{BankAccountId, PageRequest, PageResponse, TransactionId};

use crate::entities::{bank_accounts, sea_orm_active_enums, transactions};
use crate::error::{LedgerError, LedgerResult};
use crate::repositories::{balance, numbering};

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Earliest transaction date (inclusive).
    pub date_from: Option<chrono::NaiveDate>,
    /// Latest transaction date (inclusive).
    pub date_to: Option<chrono::NaiveDate>,
    /// Restrict to one bank account.
    pub bank_account_id: Option<BankAccountId>,
    /// Restrict to one voucher type.
    pub voucher_type: Option<VoucherType>,
    /// Restrict to one cleared status.
    pub cleared_status: Option<ClearedStatus>,
}

/// A transaction row together with its contra leg, when one exists.
#[derive(Debug, Clone)]
pub struct TransactionWithLinked {
    /// The requested row.
    pub transaction: transactions::Model,
    /// The paired leg of a contra transfer.
    pub linked: Option<transactions::Model>,
}

/// Repository for voucher ledger operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a voucher: one row for Payment/Receipt, two linked rows
    /// for Contra.
    ///
    /// Validation runs before anything is written. The voucher number
    /// is issued, the row(s) inserted, and the balance deltas applied,
    /// all in one database transaction. The amount posts immediately
    /// even for post-dated cheques; a later bounce or cancel retracts
    /// it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, [`LedgerError::NotFound`]
    /// for an unknown account, and [`LedgerError::IntegrityViolation`]
    /// when a contra names its own source as destination.
    pub async fn record_transaction(
        &self,
        input: VoucherInput,
    ) -> LedgerResult<Vec<transactions::Model>> {
        let txn = self.db.begin().await?;

        let accounts = load_accounts(&txn, &input).await?;
        let resolved = validate_voucher(&input, |id| {
            accounts
                .get(&id)
                .cloned()
                .ok_or(VoucherError::AccountNotFound(id))
        })?;

        let base_number = numbering::next_number_in(&txn, input.voucher_type).await?;
        let rows = insert_legs(&txn, &input, &resolved, &base_number).await?;

        txn.commit().await?;
        info!(
            voucher = %base_number,
            voucher_type = %input.voucher_type,
            amount = %input.amount,
            "Voucher recorded"
        );
        Ok(rows)
    }

    /// Fetches a transaction and its contra leg.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for an unknown id and
    /// [`LedgerError::IntegrityViolation`] when a linked leg id points
    /// at a missing row.
    pub async fn get_transaction(&self, id: TransactionId) -> LedgerResult<TransactionWithLinked> {
        let transaction = transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Transaction not found: {id}")))?;

        let linked = match transaction.linked_transaction_id {
            Some(linked_id) => Some(
                transactions::Entity::find_by_id(linked_id)
                    .one(&self.db)
                    .await?
                    .ok_or_else(|| {
                        LedgerError::IntegrityViolation(format!(
                            "Contra leg {linked_id} missing for transaction {id}"
                        ))
                    })?,
            ),
            None => None,
        };

        Ok(TransactionWithLinked { transaction, linked })
    }

    /// Lists transactions matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transactions(
        &self,
        filter: TransactionFilter,
        page: PageRequest,
    ) -> LedgerResult<PageResponse<transactions::Model>> {
        let mut query = transactions::Entity::find();

        if let Some(date_from) = filter.date_from {
            query = query.filter(transactions::Column::TransactionDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(transactions::Column::TransactionDate.lte(date_to));
        }
        if let Some(account_id) = filter.bank_account_id {
            query = query.filter(transactions::Column::BankAccountId.eq(account_id.into_inner()));
        }
        if let Some(voucher_type) = filter.voucher_type {
            let stored = sea_orm_active_enums::VoucherType::from(voucher_type);
            query = query.filter(transactions::Column::VoucherType.eq(stored));
        }
        if let Some(status) = filter.cleared_status {
            let stored = sea_orm_active_enums::ClearedStatus::from(status);
            query = query.filter(transactions::Column::ClearedStatus.eq(stored));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::CreatedAt)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Replaces a voucher's content, reversing the old balance effect
    /// and applying the new one.
    ///
    /// Contra legs update together or not at all. The cleared status is
    /// re-derived from the new cheque fields and the lifecycle audit
    /// columns reset; voucher numbers never change on edit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ImmutableTransaction`] when the row is
    /// reconciled or is a cleared cheque, plus the same validation
    /// errors as [`Self::record_transaction`].
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        input: VoucherInput,
    ) -> LedgerResult<Vec<transactions::Model>> {
        let txn = self.db.begin().await?;

        let mut rows = load_leg_group(&txn, id.into_inner()).await?;
        for row in &rows {
            validate_can_modify(
                row.reconciled,
                row.cleared_status.into(),
                row.cheque_number.is_some(),
            )?;
        }

        let existing_type = VoucherType::from(rows[0].voucher_type);
        if existing_type != input.voucher_type {
            return Err(LedgerError::Validation(format!(
                "Voucher type cannot change from {existing_type} on edit; delete and re-record"
            )));
        }

        let accounts = load_accounts(&txn, &input).await?;
        let resolved = validate_voucher(&input, |account_id| {
            accounts
                .get(&account_id)
                .cloned()
                .ok_or(VoucherError::AccountNotFound(account_id))
        })?;

        // Back out whatever the old rows still hold against balances.
        for row in &rows {
            if row.affects_balance() {
                balance::apply_delta(&txn, row.bank_account_id, -row.signed_amount()).await?;
            }
        }

        // Debit leg first, matching the order validation resolves legs in.
        rows.sort_by_key(|row| {
            TransactionType::from(row.transaction_type) == TransactionType::Credit
        });

        let now = chrono::Utc::now().into();
        let mut updated = Vec::with_capacity(rows.len());
        for (row, leg) in rows.into_iter().zip(&resolved.legs) {
            let mut active: transactions::ActiveModel = row.into();
            active.transaction_date = Set(input.transaction_date);
            active.bank_account_id = Set(leg.account_id.into_inner());
            active.party_name = Set(resolved.party_name.clone());
            active.amount = Set(input.amount);
            active.narration = Set(input.narration.clone());
            active.cheque_number = Set(resolved.cheque_number.clone());
            active.cheque_date = Set(resolved.cheque_date);
            active.is_pdc = Set(input.is_pdc && resolved.cheque_number.is_some());
            active.cleared_status = Set(resolved.initial_status.into());
            active.deposit_date = Set(None);
            active.deposit_bank = Set(None);
            active.cleared_date = Set(None);
            active.bounce_date = Set(None);
            active.bounce_reason = Set(None);
            active.cancel_reason = Set(None);
            active.updated_at = Set(now);
            let row = active.update(&txn).await?;

            balance::apply_delta(&txn, leg.account_id.into_inner(), leg.balance_delta).await?;
            updated.push(row);
        }

        txn.commit().await?;
        info!(transaction_id = %id, "Voucher updated");
        Ok(updated)
    }

    /// Deletes a voucher, reversing its live balance effect first.
    ///
    /// Deletion is allowed regardless of status or reconciliation; a
    /// bounced or cancelled cheque contributes no reversal because its
    /// posting was already retracted. Contra legs are removed as a
    /// unit.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for an unknown id.
    pub async fn delete_transaction(&self, id: TransactionId) -> LedgerResult<()> {
        let txn = self.db.begin().await?;

        let rows = load_leg_group(&txn, id.into_inner()).await?;
        for row in &rows {
            if row.affects_balance() {
                balance::apply_delta(&txn, row.bank_account_id, -row.signed_amount()).await?;
            }
        }
        for row in &rows {
            transactions::Entity::delete_by_id(row.id).exec(&txn).await?;
        }

        txn.commit().await?;
        info!(transaction_id = %id, legs = rows.len(), "Voucher deleted");
        Ok(())
    }

    /// Flags or unflags a transaction as reconciled against a bank
    /// statement. Reconciled rows reject edits until unflagged.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for an unknown id.
    pub async fn set_reconciled(
        &self,
        id: TransactionId,
        reconciled: bool,
    ) -> LedgerResult<transactions::Model> {
        let row = transactions::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Transaction not found: {id}")))?;

        let mut active: transactions::ActiveModel = row.into();
        active.reconciled = Set(reconciled);
        active.updated_at = Set(chrono::Utc::now().into());
        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}

/// Loads the accounts a voucher input names, keyed by id.
///
/// Missing ids are simply absent from the map; validation turns the
/// gap into the right error for the leg that needed the account.
async fn load_accounts(
    txn: &DatabaseTransaction,
    input: &VoucherInput,
) -> LedgerResult<HashMap<BankAccountId, AccountInfo>> {
    let mut ids = vec![input.bank_account_id];
    if let Some(contra_id) = input.contra_account_id {
        ids.push(contra_id);
    }

    let mut accounts = HashMap::with_capacity(ids.len());
    for id in ids {
        let found = bank_accounts::Entity::find_by_id(id.into_inner())
            .one(txn)
            .await?;
        if let Some(account) = found {
            let id = BankAccountId::from_uuid(account.id);
            accounts.insert(
                id,
                AccountInfo {
                    id,
                    account_name: account.account_name,
                },
            );
        }
    }
    Ok(accounts)
}

/// Loads a row and its contra leg as one group.
async fn load_leg_group(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> LedgerResult<Vec<transactions::Model>> {
    let transaction = transactions::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("Transaction not found: {id}")))?;

    let mut rows = vec![transaction];
    if let Some(linked_id) = rows[0].linked_transaction_id {
        let linked = transactions::Entity::find_by_id(linked_id)
            .one(txn)
            .await?
            .ok_or_else(|| {
                LedgerError::IntegrityViolation(format!(
                    "Contra leg {linked_id} missing for transaction {id}"
                ))
            })?;
        rows.push(linked);
    }
    Ok(rows)
}

/// Inserts the resolved legs and posts their balance deltas.
///
/// The debit leg carries the base voucher number; a contra credit leg
/// carries the derived `-IN` number and both rows point at each other.
async fn insert_legs(
    txn: &DatabaseTransaction,
    input: &VoucherInput,
    resolved: &ResolvedVoucher,
    base_number: &str,
) -> LedgerResult<Vec<transactions::Model>> {
    let leg_ids: Vec<Uuid> = resolved.legs.iter().map(|_| Uuid::now_v7()).collect();
    let now = chrono::Utc::now().into();

    let mut rows = Vec::with_capacity(resolved.legs.len());
    for (index, leg) in resolved.legs.iter().enumerate() {
        let voucher_number = if index == 0 {
            base_number.to_string()
        } else {
            contra_leg_number(base_number)
        };
        let linked_id = if leg_ids.len() == 2 {
            Some(leg_ids[1 - index])
        } else {
            None
        };

        let row = transactions::ActiveModel {
            id: Set(leg_ids[index]),
            voucher_number: Set(voucher_number),
            voucher_type: Set(input.voucher_type.into()),
            transaction_type: Set(leg.transaction_type.into()),
            transaction_date: Set(input.transaction_date),
            bank_account_id: Set(leg.account_id.into_inner()),
            party_name: Set(resolved.party_name.clone()),
            amount: Set(input.amount),
            narration: Set(input.narration.clone()),
            cheque_number: Set(resolved.cheque_number.clone()),
            cheque_date: Set(resolved.cheque_date),
            is_pdc: Set(input.is_pdc && resolved.cheque_number.is_some()),
            cleared_status: Set(resolved.initial_status.into()),
            reconciled: Set(false),
            linked_transaction_id: Set(linked_id),
            deposit_date: Set(None),
            deposit_bank: Set(None),
            cleared_date: Set(None),
            bounce_date: Set(None),
            bounce_reason: Set(None),
            cancel_reason: Set(None),
            created_by: Set(input.created_by.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = row.insert(txn).await?;
        balance::apply_delta(txn, leg.account_id.into_inner(), leg.balance_delta).await?;
        rows.push(inserted);
    }
    Ok(rows)
}
