//! Account balance mutation.
//!
//! Every change to `current_balance` funnels through [`apply_delta`]:
//! optimistic posting, retraction on bounce or cancel, and reversal on
//! edit or delete all move balances the same way.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseTransaction, EntityTrait, Set};
use tracing::debug;
use uuid::Uuid;

use crate::entities::bank_accounts;
use crate::error::{LedgerError, LedgerResult};

/// Adds `delta` to an account's running balance inside `txn`.
///
/// Deltas are signed: a debit posts a negative delta, a credit a
/// positive one, and retraction applies the opposite sign of the
/// original posting.
pub(crate) async fn apply_delta(
    txn: &DatabaseTransaction,
    account_id: Uuid,
    delta: Decimal,
) -> LedgerResult<bank_accounts::Model> {
    let account = bank_accounts::Entity::find_by_id(account_id)
        .one(txn)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("Bank account not found: {account_id}")))?;

    if delta.is_zero() {
        return Ok(account);
    }

    let balance = account.current_balance + delta;
    let mut active: bank_accounts::ActiveModel = account.into();
    active.current_balance = Set(balance);
    active.updated_at = Set(chrono::Utc::now().into());
    let updated = active.update(txn).await?;

    debug!(
        account_id = %account_id,
        delta = %delta,
        balance = %updated.current_balance,
        "Balance updated"
    );

    Ok(updated)
}
