//! Shared types and configuration for Kosha.
//!
//! This crate provides common plumbing used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list queries
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{BankAccountId, CategoryId, PageMeta, PageRequest, PageResponse, TransactionId};
