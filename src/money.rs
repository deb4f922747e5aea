use rust_decimal::{Decimal, RoundingStrategy};

pub const TENGE: &str = "₸";

/// Round to whole tenge and group thousands with spaces: `29 722`
pub fn format_number(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Whole tenge with the currency sign: `29 722 ₸`
pub fn format_tenge(amount: Decimal) -> String {
    format!("{} {}", format_number(amount), TENGE)
}

/// Decimal without trailing zeros: `0.25`, `2`
pub fn display_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(dec!(0)), "0");
        assert_eq!(format_number(dec!(999)), "999");
        assert_eq!(format_number(dec!(1000)), "1 000");
        assert_eq!(format_number(dec!(29722)), "29 722");
        assert_eq!(format_number(dec!(52000000)), "52 000 000");
    }

    #[test]
    fn rounds_to_whole_tenge() {
        assert_eq!(format_number(dec!(14860.5)), "14 861");
        assert_eq!(format_number(dec!(14860.49)), "14 860");
        assert_eq!(format_number(dec!(116.00)), "116");
    }

    #[test]
    fn negative_amounts() {
        assert_eq!(format_number(dec!(-1234)), "-1 234");
        assert_eq!(format_number(dec!(-0.2)), "0");
    }

    #[test]
    fn tenge_suffix() {
        assert_eq!(format_tenge(dec!(4000)), "4 000 ₸");
    }

    #[test]
    fn display_amount_drops_trailing_zeros() {
        assert_eq!(display_amount(dec!(0.250)), "0.25");
        assert_eq!(display_amount(dec!(2.0)), "2");
    }
}
