//! Voucher number issuance.
//!
//! Numbers are handed out per voucher type from the `voucher_sequences`
//! table: `PAY/1`, `PAY/2`, `REC/1`, and so on. The inbound leg of a
//! contra pair reuses the base number with the `-IN` suffix, so a pair
//! consumes a single sequence value.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, Set, TransactionTrait,
};

use kosha_core::voucher::{format_voucher_number, VoucherType};

use crate::entities::voucher_sequences;
use crate::error::LedgerResult;

/// Repository for per-type voucher number sequences.
#[derive(Debug, Clone)]
pub struct VoucherNumberRepository {
    db: DatabaseConnection,
}

impl VoucherNumberRepository {
    /// Creates a new voucher number repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issues the next voucher number for a type.
    ///
    /// The sequence value is consumed: two consecutive calls return two
    /// distinct numbers whether or not a voucher is recorded in between.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence row cannot be read or written.
    pub async fn next_number(&self, voucher_type: VoucherType) -> LedgerResult<String> {
        let txn = self.db.begin().await?;
        let number = next_number_in(&txn, voucher_type).await?;
        txn.commit().await?;
        Ok(number)
    }
}

/// Issues the next voucher number inside an existing transaction.
///
/// The sequence row is created lazily on the first voucher of a type.
pub(crate) async fn next_number_in(
    txn: &DatabaseTransaction,
    voucher_type: VoucherType,
) -> LedgerResult<String> {
    let key = voucher_type.as_str();
    let now = chrono::Utc::now().into();

    let next = match voucher_sequences::Entity::find_by_id(key).one(txn).await? {
        Some(row) => {
            let next = row.last_number + 1;
            let mut active: voucher_sequences::ActiveModel = row.into();
            active.last_number = Set(next);
            active.updated_at = Set(now);
            active.update(txn).await?;
            next
        }
        None => {
            voucher_sequences::ActiveModel {
                voucher_type: Set(key.to_string()),
                last_number: Set(1),
                updated_at: Set(now),
            }
            .insert(txn)
            .await?;
            1
        }
    };

    Ok(format_voucher_number(voucher_type, next))
}
