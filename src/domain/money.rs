use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For INR/EUR/USD, 1 unit = 100 cents, so ₹50.00 = 5000 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Format cents with a leading currency symbol.
/// Example: (1250, "₹") -> "₹12.50"
pub fn format_money(cents: Cents, symbol: &str) -> String {
    if cents < 0 {
        format!("-{}{}", symbol, format_cents(cents).trim_start_matches('-'))
    } else {
        format!("{}{}", symbol, format_cents(cents))
    }
}

/// Why a piece of text could not be turned into an expense amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("not a number")]
    NotANumber,

    #[error("amount is too large")]
    Overflow,

    #[error("amount must be greater than zero")]
    NotPositive,
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "+12.5" -> 1250, "1e2" -> 10000, ".50" -> 50
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent (`e`/`E`). Digits past the cents are truncated, as in
/// "100.999" -> 10099. A non-zero amount smaller than one cent is kept as
/// one cent so it never collapses to zero. Sign checks are left to the caller.
pub fn parse_amount(input: &str) -> Result<Cents, AmountError> {
    let input = input.trim();
    let (negative, input) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (mantissa, exponent) = match input.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (input, None),
    };

    let (units_str, decimal_str) = match mantissa.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (mantissa, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(AmountError::NotANumber);
    }
    if !all_digits(units_str) || !all_digits(decimal_str) {
        return Err(AmountError::NotANumber);
    }

    let exponent = match exponent {
        Some(text) => parse_exponent(text)?,
        None => 0,
    };

    // value = digits * 10^(exponent - decimals); cents shift that by two more places
    let digits = format!("{}{}", units_str, decimal_str);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(0);
    }
    let shift = exponent
        .saturating_add(2)
        .saturating_sub(decimal_str.len() as i64);

    let cents = if shift >= 0 {
        let factor = u32::try_from(shift)
            .ok()
            .and_then(|s| 10i64.checked_pow(s))
            .ok_or(AmountError::Overflow)?;
        digits
            .parse::<i64>()
            .map_err(|_| AmountError::Overflow)?
            .checked_mul(factor)
            .ok_or(AmountError::Overflow)?
    } else {
        let dropped = usize::try_from(shift.unsigned_abs()).unwrap_or(usize::MAX);
        let kept = &digits[..digits.len().saturating_sub(dropped)];
        let truncated = if kept.is_empty() {
            0
        } else {
            kept.parse::<i64>().map_err(|_| AmountError::Overflow)?
        };
        truncated.max(1)
    };

    Ok(if negative { -cents } else { cents })
}

fn parse_exponent(text: &str) -> Result<i64, AmountError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !all_digits(digits) {
        return Err(AmountError::NotANumber);
    }
    // Out-of-range exponents saturate: tiny values end up as one cent, huge ones overflow
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Ok(if negative { -magnitude } else { magnitude })
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(1234), "12.34");
        assert_eq!(format_cents(100), "1.00");
        assert_eq!(format_cents(1), "0.01");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-5000), "-50.00");
        assert_eq!(format_cents(-1), "-0.01");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1250, "₹"), "₹12.50");
        assert_eq!(format_money(0, "$"), "$0.00");
        assert_eq!(format_money(-725, "€"), "-€7.25");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50.00"), Ok(5000));
        assert_eq!(parse_amount("50"), Ok(5000));
        assert_eq!(parse_amount("12.34"), Ok(1234));
        assert_eq!(parse_amount("12.5"), Ok(1250));
        assert_eq!(parse_amount("0.01"), Ok(1));
        assert_eq!(parse_amount(".50"), Ok(50));
        assert_eq!(parse_amount("7."), Ok(700));
        assert_eq!(parse_amount("  7.25 "), Ok(725));
        assert_eq!(parse_amount("-50.00"), Ok(-5000));
        assert_eq!(parse_amount("0"), Ok(0));
        assert_eq!(parse_amount("000.00"), Ok(0));
    }

    #[test]
    fn test_parse_amount_signs_and_exponents() {
        assert_eq!(parse_amount("+5"), Ok(500));
        assert_eq!(parse_amount("1e2"), Ok(10000));
        assert_eq!(parse_amount("1E2"), Ok(10000));
        assert_eq!(parse_amount("1.5e+1"), Ok(1500));
        assert_eq!(parse_amount("1250e-2"), Ok(1250));
        assert_eq!(parse_amount("-2e1"), Ok(-2000));
        assert_eq!(parse_amount("0e5"), Ok(0));
    }

    #[test]
    fn test_parse_amount_truncates_past_cents() {
        assert_eq!(parse_amount("100.999"), Ok(10099));
        assert_eq!(parse_amount("12.345"), Ok(1234));
        assert_eq!(parse_amount("1.23456e1"), Ok(1234));
    }

    #[test]
    fn test_parse_amount_keeps_sub_cent_amounts_non_zero() {
        assert_eq!(parse_amount("0.001"), Ok(1));
        assert_eq!(parse_amount("1e-9"), Ok(1));
        assert_eq!(parse_amount("5e-99999999999999999999"), Ok(1));
        assert_eq!(parse_amount("-0.004"), Ok(-1));
    }

    #[test]
    fn test_parse_amount_invalid() {
        for input in [
            "", ".", "abc", "12.34.56", "e3", "1e", "1e+", "1e2.5", "NaN", "inf", "1,000", "12a",
            "--1", "+-1", "+",
        ] {
            assert_eq!(
                parse_amount(input),
                Err(AmountError::NotANumber),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_parse_amount_overflow() {
        assert_eq!(
            parse_amount("99999999999999999999"),
            Err(AmountError::Overflow)
        );
        assert_eq!(parse_amount("92233720368547759"), Err(AmountError::Overflow));
        assert_eq!(parse_amount("1e30"), Err(AmountError::Overflow));
        assert_eq!(parse_amount("1e99999999999999999999"), Err(AmountError::Overflow));
    }
}
