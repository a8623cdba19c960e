//! Ledger report generation.
//!
//! This module provides pure business logic for the read-only reports:
//! - Bank statement (per account, with running balance)
//! - Cashflow (receipts vs payments, grouped by party)
//! - Daybook (everything recorded on one date)

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
