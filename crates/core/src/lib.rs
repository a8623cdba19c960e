//! Core business logic for Kosha.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `voucher` - Voucher types, validation, and numbering
//! - `cheque` - Cheque lifecycle state machine
//! - `reports` - Bank statement, cashflow, and daybook computation

pub mod cheque;
pub mod reports;
pub mod voucher;
