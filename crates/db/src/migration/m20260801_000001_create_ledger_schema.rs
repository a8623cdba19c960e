//! Migration creating the ledger schema: bank accounts, transactions,
//! transaction categories, and voucher sequences.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BankAccounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BankAccounts::AccountName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(BankAccounts::BankName).string().not_null())
                    .col(
                        ColumnDef::new(BankAccounts::AccountNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BankAccounts::BranchName).string().null())
                    .col(ColumnDef::new(BankAccounts::IfscCode).string().null())
                    .col(
                        ColumnDef::new(BankAccounts::AccountType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankAccounts::OpeningBalance)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankAccounts::CurrentBalance)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankAccounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BankAccounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::VoucherNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::VoucherType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::BankAccountId).uuid().not_null())
                    .col(ColumnDef::new(Transactions::PartyName).string().null())
                    .col(
                        ColumnDef::new(Transactions::Amount)
                            .decimal_len(16, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Narration).string().not_null())
                    .col(ColumnDef::new(Transactions::ChequeNumber).string().null())
                    .col(ColumnDef::new(Transactions::ChequeDate).date().null())
                    .col(
                        ColumnDef::new(Transactions::IsPdc)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Transactions::ClearedStatus)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Reconciled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Transactions::LinkedTransactionId)
                            .uuid()
                            .null(),
                    )
                    .col(ColumnDef::new(Transactions::DepositDate).date().null())
                    .col(ColumnDef::new(Transactions::DepositBank).string().null())
                    .col(ColumnDef::new(Transactions::ClearedDate).date().null())
                    .col(ColumnDef::new(Transactions::BounceDate).date().null())
                    .col(ColumnDef::new(Transactions::BounceReason).string().null())
                    .col(ColumnDef::new(Transactions::CancelReason).string().null())
                    .col(ColumnDef::new(Transactions::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_bank_account")
                            .from(Transactions::Table, Transactions::BankAccountId)
                            .to(BankAccounts::Table, BankAccounts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_account")
                    .table(Transactions::Table)
                    .col(Transactions::BankAccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_date")
                    .table(Transactions::Table)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_status")
                    .table(Transactions::Table)
                    .col(Transactions::ClearedStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionCategories::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::CategoryName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::CategoryType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::Description)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VoucherSequences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VoucherSequences::VoucherType)
                            .string_len(20)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VoucherSequences::LastNumber)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VoucherSequences::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VoucherSequences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
    AccountName,
    BankName,
    AccountNumber,
    BranchName,
    IfscCode,
    AccountType,
    OpeningBalance,
    CurrentBalance,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    VoucherNumber,
    VoucherType,
    TransactionType,
    TransactionDate,
    BankAccountId,
    PartyName,
    Amount,
    Narration,
    ChequeNumber,
    ChequeDate,
    IsPdc,
    ClearedStatus,
    Reconciled,
    LinkedTransactionId,
    DepositDate,
    DepositBank,
    ClearedDate,
    BounceDate,
    BounceReason,
    CancelReason,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TransactionCategories {
    Table,
    Id,
    CategoryName,
    CategoryType,
    Description,
    IsDefault,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VoucherSequences {
    Table,
    VoucherType,
    LastNumber,
    UpdatedAt,
}
