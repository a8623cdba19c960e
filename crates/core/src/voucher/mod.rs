//! Voucher recording.
//!
//! Payments, receipts, and contra transfers enter the ledger as
//! vouchers. This module holds the domain types, the validation rules
//! that turn an input into persistable rows, and the per-type voucher
//! numbering scheme.

pub mod error;
pub mod numbering;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::VoucherError;
pub use numbering::{
    contra_leg_number, format_voucher_number, parse_voucher_number, CONTRA_LEG_SUFFIX,
};
pub use types::{
    AccountInfo, ClearedStatus, ResolvedLeg, ResolvedVoucher, TransactionType, VoucherInput,
    VoucherType,
};
pub use validation::{validate_can_modify, validate_voucher};
