//! Bank account repository for master data operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use kosha_shared::BankAccountId;

use crate::entities::{bank_accounts, sea_orm_active_enums::AccountType, transactions};
use crate::error::{LedgerError, LedgerResult};

/// Input for creating a bank account.
#[derive(Debug, Clone)]
pub struct CreateBankAccountInput {
    /// Display name (must be unique).
    pub account_name: String,
    /// Bank the account is held with.
    pub bank_name: String,
    /// Account number at the bank.
    pub account_number: String,
    /// Branch name.
    pub branch_name: Option<String>,
    /// Branch IFSC code.
    pub ifsc_code: Option<String>,
    /// Savings, current, cash credit, or overdraft.
    pub account_type: AccountType,
    /// Balance the account starts from.
    pub opening_balance: Decimal,
}

/// Input for updating bank account master data.
///
/// Balances are absent on purpose: `current_balance` only moves when
/// vouchers post, retract, or reverse.
#[derive(Debug, Clone, Default)]
pub struct UpdateBankAccountInput {
    /// Display name.
    pub account_name: Option<String>,
    /// Bank the account is held with.
    pub bank_name: Option<String>,
    /// Account number at the bank.
    pub account_number: Option<String>,
    /// Branch name.
    pub branch_name: Option<Option<String>>,
    /// Branch IFSC code.
    pub ifsc_code: Option<Option<String>>,
    /// Account type.
    pub account_type: Option<AccountType>,
}

/// Repository for bank account CRUD.
#[derive(Debug, Clone)]
pub struct BankAccountRepository {
    db: DatabaseConnection,
}

impl BankAccountRepository {
    /// Creates a new bank account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a bank account with its opening balance.
    ///
    /// The running balance starts equal to the opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the account name is blank or already taken.
    pub async fn create_account(
        &self,
        input: CreateBankAccountInput,
    ) -> LedgerResult<bank_accounts::Model> {
        let account_name = input.account_name.trim().to_string();
        if account_name.is_empty() {
            return Err(LedgerError::Validation(
                "Account name must not be empty".to_string(),
            ));
        }
        let bank_name = input.bank_name.trim().to_string();
        if bank_name.is_empty() {
            return Err(LedgerError::Validation(
                "Bank name must not be empty".to_string(),
            ));
        }
        let account_number = input.account_number.trim().to_string();
        if account_number.is_empty() {
            return Err(LedgerError::Validation(
                "Account number must not be empty".to_string(),
            ));
        }

        let existing = bank_accounts::Entity::find()
            .filter(bank_accounts::Column::AccountName.eq(&account_name))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(LedgerError::Validation(format!(
                "Bank account '{account_name}' already exists"
            )));
        }

        let now = chrono::Utc::now().into();
        let account = bank_accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            account_name: Set(account_name),
            bank_name: Set(bank_name),
            account_number: Set(account_number),
            branch_name: Set(input.branch_name),
            ifsc_code: Set(input.ifsc_code),
            account_type: Set(input.account_type),
            opening_balance: Set(input.opening_balance),
            current_balance: Set(input.opening_balance),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let account = account.insert(&self.db).await?;
        info!(account_id = %account.id, name = %account.account_name, "Bank account created");
        Ok(account)
    }

    /// Fetches a bank account by id.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no account has this id.
    pub async fn get_account(&self, id: BankAccountId) -> LedgerResult<bank_accounts::Model> {
        bank_accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("Bank account not found: {id}")))
    }

    /// Lists all bank accounts ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(&self) -> LedgerResult<Vec<bank_accounts::Model>> {
        let accounts = bank_accounts::Entity::find()
            .order_by_asc(bank_accounts::Column::AccountName)
            .all(&self.db)
            .await?;
        Ok(accounts)
    }

    /// Updates bank account master data.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or the new name
    /// collides with another account.
    pub async fn update_account(
        &self,
        id: BankAccountId,
        input: UpdateBankAccountInput,
    ) -> LedgerResult<bank_accounts::Model> {
        let account = self.get_account(id).await?;

        if let Some(new_name) = &input.account_name {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(LedgerError::Validation(
                    "Account name must not be empty".to_string(),
                ));
            }
            if new_name != account.account_name {
                let existing = bank_accounts::Entity::find()
                    .filter(bank_accounts::Column::AccountName.eq(new_name))
                    .filter(bank_accounts::Column::Id.ne(id.into_inner()))
                    .one(&self.db)
                    .await?;
                if existing.is_some() {
                    return Err(LedgerError::Validation(format!(
                        "Bank account '{new_name}' already exists"
                    )));
                }
            }
        }

        let mut active: bank_accounts::ActiveModel = account.into();
        if let Some(account_name) = input.account_name {
            active.account_name = Set(account_name.trim().to_string());
        }
        if let Some(bank_name) = input.bank_name {
            active.bank_name = Set(bank_name);
        }
        if let Some(account_number) = input.account_number {
            active.account_number = Set(account_number);
        }
        if let Some(branch_name) = input.branch_name {
            active.branch_name = Set(branch_name);
        }
        if let Some(ifsc_code) = input.ifsc_code {
            active.ifsc_code = Set(ifsc_code);
        }
        if let Some(account_type) = input.account_type {
            active.account_type = Set(account_type);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a bank account.
    ///
    /// An account that any transaction references is never deleted,
    /// whatever the status of those transactions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::IntegrityViolation`] if transactions
    /// reference the account, or [`LedgerError::NotFound`] if it does
    /// not exist.
    pub async fn delete_account(&self, id: BankAccountId) -> LedgerResult<()> {
        let account = self.get_account(id).await?;

        let references = transactions::Entity::find()
            .filter(transactions::Column::BankAccountId.eq(id.into_inner()))
            .count(&self.db)
            .await?;
        if references > 0 {
            return Err(LedgerError::IntegrityViolation(format!(
                "Cannot delete account '{}': {references} transactions reference it",
                account.account_name
            )));
        }

        bank_accounts::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        info!(account_id = %id, "Bank account deleted");
        Ok(())
    }
}
