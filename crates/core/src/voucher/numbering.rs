//! Voucher number formatting.
//!
//! Voucher numbers are `<PREFIX>/<sequence>` where the prefix is fixed
//! per voucher type (`PAY`, `REC`, `CON`) and the sequence counts up
//! independently per type. The credit leg of a contra voucher shares
//! the base number with an `-IN` suffix so both rows read as one
//! transfer.

use super::types::VoucherType;

/// Suffix appended to the credit leg of a contra voucher.
pub const CONTRA_LEG_SUFFIX: &str = "-IN";

/// Formats a voucher number from a type and sequence value.
#[must_use]
pub fn format_voucher_number(voucher_type: VoucherType, sequence: i64) -> String {
    format!("{}/{}", voucher_type.prefix(), sequence)
}

/// Returns the paired credit-leg number for a contra voucher.
#[must_use]
pub fn contra_leg_number(base: &str) -> String {
    format!("{base}{CONTRA_LEG_SUFFIX}")
}

/// Parses a voucher number back into its type and sequence.
///
/// The contra credit-leg suffix is stripped before parsing, so both
/// legs of a transfer report the same sequence.
pub fn parse_voucher_number(number: &str) -> Option<(VoucherType, i64)> {
    let base = number.strip_suffix(CONTRA_LEG_SUFFIX).unwrap_or(number);
    let (prefix, sequence) = base.split_once('/')?;
    let voucher_type = match prefix {
        "PAY" => VoucherType::Payment,
        "REC" => VoucherType::Receipt,
        "CON" => VoucherType::Contra,
        _ => return None,
    };
    sequence.parse().ok().map(|seq| (voucher_type, seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_per_type() {
        assert_eq!(format_voucher_number(VoucherType::Payment, 1), "PAY/1");
        assert_eq!(format_voucher_number(VoucherType::Receipt, 42), "REC/42");
        assert_eq!(format_voucher_number(VoucherType::Contra, 7), "CON/7");
    }

    #[test]
    fn test_contra_leg_number() {
        assert_eq!(contra_leg_number("CON/7"), "CON/7-IN");
    }

    #[test]
    fn test_parse_round_trip() {
        assert_eq!(
            parse_voucher_number("PAY/15"),
            Some((VoucherType::Payment, 15))
        );
        assert_eq!(
            parse_voucher_number("CON/3-IN"),
            Some((VoucherType::Contra, 3))
        );
        assert_eq!(parse_voucher_number("JRN/1"), None);
        assert_eq!(parse_voucher_number("PAY-15"), None);
        assert_eq!(parse_voucher_number("PAY/abc"), None);
    }
}
