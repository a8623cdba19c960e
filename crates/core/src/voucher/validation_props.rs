//! Property-based tests for voucher validation and numbering.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use kosha_shared::types::BankAccountId;

use super::error::VoucherError;
use super::numbering::{contra_leg_number, format_voucher_number, parse_voucher_number};
use super::types::{AccountInfo, ClearedStatus, TransactionType, VoucherInput, VoucherType};
use super::validation::validate_voucher;

fn arb_account_id() -> impl Strategy<Value = BankAccountId> {
    any::<u128>().prop_map(|n| BankAccountId::from_uuid(Uuid::from_u128(n)))
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030i32, 1u32..=12u32, 1u32..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_voucher_type() -> impl Strategy<Value = VoucherType> {
    prop_oneof![
        Just(VoucherType::Payment),
        Just(VoucherType::Receipt),
        Just(VoucherType::Contra),
    ]
}

fn arb_cheque() -> impl Strategy<Value = Option<(String, NaiveDate)>> {
    proptest::option::of(("CHQ[0-9]{4}", arb_date()))
}

fn make_input(
    voucher_type: VoucherType,
    bank_account_id: BankAccountId,
    contra_account_id: BankAccountId,
    amount: Decimal,
    date: NaiveDate,
    cheque: Option<(String, NaiveDate)>,
) -> VoucherInput {
    let (cheque_number, cheque_date) = match cheque {
        Some((number, date)) => (Some(number), Some(date)),
        None => (None, None),
    };
    VoucherInput {
        voucher_type,
        transaction_date: date,
        bank_account_id,
        contra_account_id: (voucher_type == VoucherType::Contra).then_some(contra_account_id),
        party_name: Some("Counterparty".to_string()),
        amount,
        narration: "generated".to_string(),
        cheque_number,
        cheque_date,
        is_pdc: false,
        created_by: "tester".to_string(),
    }
}

fn lookup(id: BankAccountId) -> Result<AccountInfo, VoucherError> {
    Ok(AccountInfo {
        id,
        account_name: "Account".to_string(),
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The signed deltas of a resolved voucher always net to the
    /// voucher's effect: -amount for payments, +amount for receipts,
    /// zero for transfers between own accounts.
    #[test]
    fn prop_leg_deltas_net_to_voucher_effect(
        voucher_type in arb_voucher_type(),
        bank in arb_account_id(),
        contra in arb_account_id(),
        amount in arb_amount(),
        date in arb_date(),
        cheque in arb_cheque(),
    ) {
        prop_assume!(bank != contra);
        let input = make_input(voucher_type, bank, contra, amount, date, cheque);
        let resolved = validate_voucher(&input, lookup).unwrap();

        let net: Decimal = resolved.legs.iter().map(|leg| leg.balance_delta).sum();
        let expected = match voucher_type {
            VoucherType::Payment => -amount,
            VoucherType::Receipt => amount,
            VoucherType::Contra => Decimal::ZERO,
        };
        prop_assert_eq!(net, expected);
    }

    /// Contra vouchers persist exactly two rows, everything else one.
    #[test]
    fn prop_leg_count_matches_voucher_type(
        voucher_type in arb_voucher_type(),
        bank in arb_account_id(),
        contra in arb_account_id(),
        amount in arb_amount(),
        date in arb_date(),
    ) {
        prop_assume!(bank != contra);
        let input = make_input(voucher_type, bank, contra, amount, date, None);
        let resolved = validate_voucher(&input, lookup).unwrap();

        let expected = if voucher_type == VoucherType::Contra { 2 } else { 1 };
        prop_assert_eq!(resolved.legs.len(), expected);
    }

    /// A voucher starts `Pending` exactly when a cheque number is present.
    #[test]
    fn prop_initial_status_tracks_cheque(
        voucher_type in arb_voucher_type(),
        bank in arb_account_id(),
        contra in arb_account_id(),
        amount in arb_amount(),
        date in arb_date(),
        cheque in arb_cheque(),
    ) {
        prop_assume!(bank != contra);
        let has_cheque = cheque.is_some();
        let input = make_input(voucher_type, bank, contra, amount, date, cheque);
        let resolved = validate_voucher(&input, lookup).unwrap();

        let expected = if has_cheque {
            ClearedStatus::Pending
        } else {
            ClearedStatus::Cleared
        };
        prop_assert_eq!(resolved.initial_status, expected);
        prop_assert_eq!(resolved.cheque_number.is_some(), has_cheque);
    }

    /// A blank party name is rejected for payments and receipts no
    /// matter how much whitespace it hides behind.
    #[test]
    fn prop_blank_party_rejected(
        is_payment in any::<bool>(),
        bank in arb_account_id(),
        amount in arb_amount(),
        date in arb_date(),
        blanks in " {0,8}",
    ) {
        let voucher_type = if is_payment {
            VoucherType::Payment
        } else {
            VoucherType::Receipt
        };
        let mut input = make_input(
            voucher_type,
            bank,
            BankAccountId::from_uuid(Uuid::nil()),
            amount,
            date,
            None,
        );
        input.party_name = Some(blanks);

        prop_assert_eq!(
            validate_voucher(&input, lookup),
            Err(VoucherError::PartyNameRequired)
        );
    }

    /// Debit and credit mirror each other for the same amount.
    #[test]
    fn prop_signed_amounts_mirror(amount in arb_amount()) {
        prop_assert_eq!(
            TransactionType::Debit.signed_amount(amount),
            -TransactionType::Credit.signed_amount(amount)
        );
    }

    /// Voucher numbers survive a format/parse round trip, with and
    /// without the contra leg suffix.
    #[test]
    fn prop_voucher_number_round_trip(
        voucher_type in arb_voucher_type(),
        sequence in 1i64..1_000_000_000i64,
    ) {
        let number = format_voucher_number(voucher_type, sequence);
        prop_assert_eq!(parse_voucher_number(&number), Some((voucher_type, sequence)));

        let leg = contra_leg_number(&number);
        prop_assert_eq!(parse_voucher_number(&leg), Some((voucher_type, sequence)));
    }
}
