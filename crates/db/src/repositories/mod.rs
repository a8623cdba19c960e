//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! engine. Every mutation that touches ledger rows and balances runs
//! inside one database transaction.

pub mod account;
mod balance;
pub mod category;
pub mod cheque;
pub mod numbering;
pub mod report;
pub mod transaction;

pub use account::{BankAccountRepository, CreateBankAccountInput, UpdateBankAccountInput};
pub use category::{CategoryRepository, CreateCategoryInput, UpdateCategoryInput};
pub use cheque::ChequeRepository;
pub use numbering::VoucherNumberRepository;
pub use report::ReportRepository;
pub use transaction::{TransactionFilter, TransactionRepository, TransactionWithLinked};
