//! Voucher validation and resolution.
//!
//! Validation is pure: account existence is answered by a caller
//! supplied lookup closure, so the rules stay testable without a
//! database. A valid input resolves into the set of rows to persist
//! together with their signed balance deltas.

use rust_decimal::Decimal;

use kosha_shared::types::BankAccountId;

use super::error::VoucherError;
use super::types::{
    AccountInfo, ClearedStatus, ResolvedLeg, ResolvedVoucher, TransactionType, VoucherInput,
    VoucherType,
};

/// Trims a free-text field, mapping blank input to `None`.
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// Validates a voucher input and resolves the rows to persist.
///
/// Checks are applied in order: the bank account (and, for Contra, the
/// destination account) must exist, the amount must be positive, the
/// party name is required unless the voucher is a Contra, and a cheque
/// number demands a cheque date. Contra vouchers additionally require
/// a destination distinct from the source.
///
/// Balances are posted optimistically: the returned legs carry the
/// deltas to apply immediately, even when a cheque starts `Pending`.
pub fn validate_voucher<F>(
    input: &VoucherInput,
    account_lookup: F,
) -> Result<ResolvedVoucher, VoucherError>
where
    F: Fn(BankAccountId) -> Result<AccountInfo, VoucherError>,
{
    account_lookup(input.bank_account_id)?;

    if input.amount == Decimal::ZERO {
        return Err(VoucherError::ZeroAmount);
    }
    if input.amount < Decimal::ZERO {
        return Err(VoucherError::NegativeAmount);
    }

    let party_name = normalize(input.party_name.as_deref());
    if input.voucher_type != VoucherType::Contra && party_name.is_none() {
        return Err(VoucherError::PartyNameRequired);
    }

    let cheque_number = normalize(input.cheque_number.as_deref());
    let cheque_date = match (&cheque_number, input.cheque_date) {
        (Some(_), None) => return Err(VoucherError::ChequeDateRequired),
        (Some(_), Some(date)) => Some(date),
        // A cheque date without a cheque number carries no meaning.
        (None, _) => None,
    };

    let legs = match input.voucher_type {
        VoucherType::Payment => vec![ResolvedLeg {
            account_id: input.bank_account_id,
            transaction_type: TransactionType::Debit,
            balance_delta: -input.amount,
        }],
        VoucherType::Receipt => vec![ResolvedLeg {
            account_id: input.bank_account_id,
            transaction_type: TransactionType::Credit,
            balance_delta: input.amount,
        }],
        VoucherType::Contra => {
            let destination = input
                .contra_account_id
                .ok_or(VoucherError::ContraAccountRequired)?;
            if destination == input.bank_account_id {
                return Err(VoucherError::SameAccountContra(destination));
            }
            account_lookup(destination)?;
            vec![
                ResolvedLeg {
                    account_id: input.bank_account_id,
                    transaction_type: TransactionType::Debit,
                    balance_delta: -input.amount,
                },
                ResolvedLeg {
                    account_id: destination,
                    transaction_type: TransactionType::Credit,
                    balance_delta: input.amount,
                },
            ]
        }
    };

    let initial_status = ClearedStatus::initial_for(cheque_number.as_deref());

    Ok(ResolvedVoucher {
        legs,
        // Contra vouchers move money between own accounts; there is no party.
        party_name: if input.voucher_type == VoucherType::Contra {
            None
        } else {
            party_name
        },
        cheque_number,
        cheque_date,
        initial_status,
    })
}

/// Checks whether an existing transaction may be edited.
///
/// Reconciled transactions are locked, as are cheque transactions that
/// have already cleared. Everything else remains editable, including
/// bounced and cancelled cheques. Deletion is not gated here: a delete
/// is a hard undo that reverses whatever the rows still hold.
pub fn validate_can_modify(
    reconciled: bool,
    cleared_status: ClearedStatus,
    has_cheque: bool,
) -> Result<(), VoucherError> {
    if reconciled {
        return Err(VoucherError::Reconciled);
    }
    if cleared_status == ClearedStatus::Cleared && has_cheque {
        return Err(VoucherError::ClearedCheque);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn known_account(id: BankAccountId) -> Result<AccountInfo, VoucherError> {
        Ok(AccountInfo {
            id,
            account_name: "HDFC Current".to_string(),
        })
    }

    fn make_input(voucher_type: VoucherType) -> VoucherInput {
        VoucherInput {
            voucher_type,
            transaction_date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            bank_account_id: BankAccountId::new(),
            contra_account_id: None,
            party_name: Some("Acme Traders".to_string()),
            amount: dec!(500.00),
            narration: "April invoice".to_string(),
            cheque_number: None,
            cheque_date: None,
            is_pdc: false,
            created_by: "asha".to_string(),
        }
    }

    #[test]
    fn test_payment_resolves_single_debit_leg() {
        let input = make_input(VoucherType::Payment);
        let resolved = validate_voucher(&input, known_account).unwrap();

        assert_eq!(resolved.legs.len(), 1);
        assert_eq!(resolved.legs[0].account_id, input.bank_account_id);
        assert_eq!(resolved.legs[0].transaction_type, TransactionType::Debit);
        assert_eq!(resolved.legs[0].balance_delta, dec!(-500.00));
        assert_eq!(resolved.initial_status, ClearedStatus::Cleared);
    }

    #[test]
    fn test_receipt_resolves_single_credit_leg() {
        let input = make_input(VoucherType::Receipt);
        let resolved = validate_voucher(&input, known_account).unwrap();

        assert_eq!(resolved.legs.len(), 1);
        assert_eq!(resolved.legs[0].transaction_type, TransactionType::Credit);
        assert_eq!(resolved.legs[0].balance_delta, dec!(500.00));
    }

    #[test]
    fn test_contra_resolves_paired_legs() {
        let mut input = make_input(VoucherType::Contra);
        let destination = BankAccountId::new();
        input.contra_account_id = Some(destination);
        input.party_name = None;

        let resolved = validate_voucher(&input, known_account).unwrap();

        assert_eq!(resolved.legs.len(), 2);
        assert_eq!(resolved.legs[0].account_id, input.bank_account_id);
        assert_eq!(resolved.legs[0].transaction_type, TransactionType::Debit);
        assert_eq!(resolved.legs[1].account_id, destination);
        assert_eq!(resolved.legs[1].transaction_type, TransactionType::Credit);
        assert_eq!(
            resolved.legs[0].balance_delta + resolved.legs[1].balance_delta,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_contra_discards_party_name() {
        let mut input = make_input(VoucherType::Contra);
        input.contra_account_id = Some(BankAccountId::new());
        input.party_name = Some("should vanish".to_string());

        let resolved = validate_voucher(&input, known_account).unwrap();
        assert_eq!(resolved.party_name, None);
    }

    #[test]
    fn test_unknown_account_rejected() {
        let input = make_input(VoucherType::Payment);
        let result = validate_voucher(&input, |id| Err(VoucherError::AccountNotFound(id)));
        assert_eq!(
            result,
            Err(VoucherError::AccountNotFound(input.bank_account_id))
        );
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut input = make_input(VoucherType::Payment);
        input.amount = Decimal::ZERO;
        assert_eq!(
            validate_voucher(&input, known_account),
            Err(VoucherError::ZeroAmount)
        );
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut input = make_input(VoucherType::Receipt);
        input.amount = dec!(-10.00);
        assert_eq!(
            validate_voucher(&input, known_account),
            Err(VoucherError::NegativeAmount)
        );
    }

    #[test]
    fn test_blank_party_rejected_for_payment() {
        let mut input = make_input(VoucherType::Payment);
        input.party_name = Some("   ".to_string());
        assert_eq!(
            validate_voucher(&input, known_account),
            Err(VoucherError::PartyNameRequired)
        );
    }

    #[test]
    fn test_missing_party_allowed_for_contra() {
        let mut input = make_input(VoucherType::Contra);
        input.contra_account_id = Some(BankAccountId::new());
        input.party_name = None;
        assert!(validate_voucher(&input, known_account).is_ok());
    }

    #[test]
    fn test_cheque_number_requires_date() {
        let mut input = make_input(VoucherType::Payment);
        input.cheque_number = Some("CHQ001".to_string());
        input.cheque_date = None;
        assert_eq!(
            validate_voucher(&input, known_account),
            Err(VoucherError::ChequeDateRequired)
        );
    }

    #[test]
    fn test_cheque_starts_pending() {
        let mut input = make_input(VoucherType::Payment);
        input.cheque_number = Some("CHQ001".to_string());
        input.cheque_date = NaiveDate::from_ymd_opt(2026, 4, 15);

        let resolved = validate_voucher(&input, known_account).unwrap();
        assert_eq!(resolved.initial_status, ClearedStatus::Pending);
        assert_eq!(resolved.cheque_number.as_deref(), Some("CHQ001"));
    }

    #[test]
    fn test_blank_cheque_number_treated_as_absent() {
        let mut input = make_input(VoucherType::Payment);
        input.cheque_number = Some("  ".to_string());
        input.cheque_date = None;

        let resolved = validate_voucher(&input, known_account).unwrap();
        assert_eq!(resolved.cheque_number, None);
        assert_eq!(resolved.initial_status, ClearedStatus::Cleared);
    }

    #[test]
    fn test_orphan_cheque_date_dropped() {
        let mut input = make_input(VoucherType::Receipt);
        input.cheque_number = None;
        input.cheque_date = NaiveDate::from_ymd_opt(2026, 4, 15);

        let resolved = validate_voucher(&input, known_account).unwrap();
        assert_eq!(resolved.cheque_date, None);
    }

    #[test]
    fn test_contra_requires_destination() {
        let mut input = make_input(VoucherType::Contra);
        input.contra_account_id = None;
        input.party_name = None;
        assert_eq!(
            validate_voucher(&input, known_account),
            Err(VoucherError::ContraAccountRequired)
        );
    }

    #[test]
    fn test_contra_rejects_same_account() {
        let mut input = make_input(VoucherType::Contra);
        input.contra_account_id = Some(input.bank_account_id);
        input.party_name = None;
        assert_eq!(
            validate_voucher(&input, known_account),
            Err(VoucherError::SameAccountContra(input.bank_account_id))
        );
    }

    #[test]
    fn test_contra_destination_must_exist() {
        let mut input = make_input(VoucherType::Contra);
        let destination = BankAccountId::new();
        input.contra_account_id = Some(destination);
        input.party_name = None;

        let source = input.bank_account_id;
        let result = validate_voucher(&input, |id| {
            if id == source {
                known_account(id)
            } else {
                Err(VoucherError::AccountNotFound(id))
            }
        });
        assert_eq!(result, Err(VoucherError::AccountNotFound(destination)));
    }

    #[test]
    fn test_modify_blocked_when_reconciled() {
        assert_eq!(
            validate_can_modify(true, ClearedStatus::Pending, true),
            Err(VoucherError::Reconciled)
        );
    }

    #[test]
    fn test_modify_blocked_for_cleared_cheque() {
        assert_eq!(
            validate_can_modify(false, ClearedStatus::Cleared, true),
            Err(VoucherError::ClearedCheque)
        );
    }

    #[test]
    fn test_modify_allowed_for_cleared_cash() {
        assert!(validate_can_modify(false, ClearedStatus::Cleared, false).is_ok());
    }

    #[test]
    fn test_modify_allowed_for_pending_cheque() {
        assert!(validate_can_modify(false, ClearedStatus::Pending, true).is_ok());
    }

    #[test]
    fn test_modify_allowed_for_bounced_cheque() {
        assert!(validate_can_modify(false, ClearedStatus::Bounced, true).is_ok());
    }
}
