//! Property-based tests for the cheque lifecycle.

use chrono::NaiveDate;
use proptest::prelude::*;

use super::error::ChequeError;
use super::lifecycle::{ChequeAction, ChequeLifecycle};
use crate::voucher::ClearedStatus;

fn arb_status() -> impl Strategy<Value = ClearedStatus> {
    prop_oneof![
        Just(ClearedStatus::Cleared),
        Just(ClearedStatus::Pending),
        Just(ClearedStatus::Deposited),
        Just(ClearedStatus::Bounced),
        Just(ClearedStatus::Cancelled),
    ]
}

/// Dates guaranteed to lie in the past for any plausible test run.
fn arb_past_date() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2025i32, 1u32..=12u32, 1u32..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn attempt(
    from: ClearedStatus,
    to: ClearedStatus,
    date: NaiveDate,
) -> Result<ChequeAction, ChequeError> {
    match to {
        ClearedStatus::Deposited => ChequeLifecycle::deposit(from, date, "Branch"),
        ClearedStatus::Cleared => ChequeLifecycle::clear(from, date),
        ClearedStatus::Bounced => ChequeLifecycle::bounce(from, date, "reason"),
        ClearedStatus::Cancelled => ChequeLifecycle::cancel(from, "reason"),
        ClearedStatus::Pending => Err(ChequeError::InvalidTransition { from, to }),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Terminal statuses admit no further transitions.
    #[test]
    fn prop_terminal_statuses_are_final(
        from in arb_status(),
        to in arb_status(),
        date in arb_past_date(),
    ) {
        prop_assume!(from.is_terminal());
        let result = attempt(from, to, date);
        prop_assert_eq!(result, Err(ChequeError::InvalidTransition { from, to }));
    }

    /// Any successful transition lands in the status the matrix allows,
    /// and the action reports that same status.
    #[test]
    fn prop_success_agrees_with_matrix(
        from in arb_status(),
        to in arb_status(),
        date in arb_past_date(),
    ) {
        match attempt(from, to, date) {
            Ok(action) => {
                prop_assert_eq!(action.new_status(), to);
                prop_assert!(ChequeLifecycle::is_valid_transition(from, to));
            }
            Err(_) => prop_assert!(!ChequeLifecycle::is_valid_transition(from, to)),
        }
    }

    /// Only bounce and cancel retract the optimistic posting.
    #[test]
    fn prop_only_bounce_and_cancel_reverse(
        from in arb_status(),
        to in arb_status(),
        date in arb_past_date(),
    ) {
        if let Ok(action) = attempt(from, to, date) {
            let reverses = matches!(
                to,
                ClearedStatus::Bounced | ClearedStatus::Cancelled
            );
            prop_assert_eq!(action.reverses_posting(), reverses);
        }
    }

    /// Blank reasons are rejected before the transition is even looked at.
    #[test]
    fn prop_blank_reasons_rejected(
        from in arb_status(),
        date in arb_past_date(),
        blanks in " {0,6}",
    ) {
        prop_assert_eq!(
            ChequeLifecycle::bounce(from, date, &blanks),
            Err(ChequeError::BounceReasonRequired)
        );
        prop_assert_eq!(
            ChequeLifecycle::cancel(from, &blanks),
            Err(ChequeError::CancelReasonRequired)
        );
    }
}
