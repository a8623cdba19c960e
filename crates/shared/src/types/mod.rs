//! Common types used across the application.

pub mod id;
pub mod pagination;

pub use id::{BankAccountId, CategoryId, TransactionId};
pub use pagination::{PageMeta, PageRequest, PageResponse};
