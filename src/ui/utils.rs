use std::sync::LazyLock;
use regex::Regex;
use crate::error::InputError;
use crate::form::MAX_VARIABLE_COSTS;

/// Plain decimal amount with optional `,` thousands grouping: `1,250.50`, `80`, `.5`
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)?(?:\.\d*)?$").expect("amount pattern is valid")
});

/// Largest accepted amount, so that summing every field of the form stays finite
pub const MAX_AMOUNT: f64 = 1.0e15;

/// Parse a typed amount. Blank input means the field was not provided.
pub fn parse_amount(input: &str) -> Result<Option<f64>, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Some(rest) = input.strip_prefix('-') {
        let rest = rest.trim();
        if !rest.is_empty() && rest != "." && AMOUNT_RE.is_match(rest) {
            return Err(InputError::NegativeAmount {
                field: String::new(),
                value: input.to_string(),
            });
        }
    }

    let invalid = || InputError::InvalidAmount {
        field: String::new(),
        value: input.to_string(),
    };

    if input == "." || !AMOUNT_RE.is_match(input) {
        return Err(invalid());
    }

    let amount = input.replace(',', "").parse::<f64>().map_err(|_| invalid())?;
    if !amount.is_finite() {
        return Err(invalid());
    }
    if amount > MAX_AMOUNT {
        return Err(InputError::AmountTooLarge {
            field: String::new(),
            value: input.to_string(),
        });
    }
    Ok(Some(amount))
}

/// Parse the number of variable cost fields, clamped to the allowed range
pub fn parse_count(input: &str) -> usize {
    input
        .trim()
        .parse::<usize>()
        .unwrap_or(0)
        .min(MAX_VARIABLE_COSTS)
}

/// Format an amount with two decimal places
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Format a 0..=1 share as a percentage with one decimal place
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_absent() {
        assert_eq!(parse_amount(""), Ok(None));
        assert_eq!(parse_amount("   "), Ok(None));
    }

    #[test]
    fn test_plain_and_grouped_amounts() {
        assert_eq!(parse_amount("80"), Ok(Some(80.0)));
        assert_eq!(parse_amount("12.75"), Ok(Some(12.75)));
        assert_eq!(parse_amount(".5"), Ok(Some(0.5)));
        assert_eq!(parse_amount("3."), Ok(Some(3.0)));
        assert_eq!(parse_amount("1,250,000.50"), Ok(Some(1_250_000.5)));
        assert_eq!(parse_amount("0"), Ok(Some(0.0)));
    }

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            parse_amount("-5"),
            Err(InputError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_amounts() {
        assert_eq!(parse_amount("1,000,000,000,000,000"), Ok(Some(MAX_AMOUNT)));
        let huge = "9".repeat(309);
        assert_eq!(
            parse_amount(&huge),
            Err(InputError::AmountTooLarge { field: String::new(), value: huge.clone() })
        );
        assert!(matches!(
            parse_amount("1000000000000000.01"),
            Err(InputError::AmountTooLarge { .. })
        ));
        let labelled = parse_amount(&huge).unwrap_err().for_field("Fuel Cost (INR)");
        assert!(labelled.to_string().starts_with("Fuel Cost (INR): '999"));
    }

    #[test]
    fn test_rejects_garbage() {
        for bad in ["abc", ".", "1,00", "inf", "NaN", "1e5", "12.3.4", "-"] {
            assert!(
                matches!(parse_amount(bad), Err(InputError::InvalidAmount { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_count_clamps() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count("20"), 20);
        assert_eq!(parse_count("99"), 20);
        assert_eq!(parse_count("x"), 0);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_amount(1234.5), "1234.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_share(0.25), "25.0%");
        assert_eq!(format_share(1.0 / 3.0), "33.3%");
    }
}
