//! Cheque lifecycle management.
//!
//! Cheque transactions move through Pending, Deposited, and one of the
//! terminal statuses (Cleared, Bounced, Cancelled). The lifecycle here
//! is pure validation; retracting the optimistic posting on bounce or
//! cancel is the storage layer's job.

pub mod error;
pub mod lifecycle;

#[cfg(test)]
mod lifecycle_props;

pub use error::ChequeError;
pub use lifecycle::{ChequeAction, ChequeLifecycle};
