// Number formatting helpers shared by the engine and any presentation layer.

// pt-BR style numbers: "1.234,56". Parsing also accepts US style "1,234.56".
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use std::str::FromStr;

    /// Parses a locale-formatted decimal.
    ///
    /// The last `.` or `,` is the decimal separator. Everything before it that is
    /// not a digit or a minus sign is dropped as grouping; after it only digits are kept.
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Failed to parse decimal '{}': empty input", s));
        }

        let normalized = match trimmed.rfind(['.', ',']) {
            Some(pos) => {
                let int_part: String = trimmed[..pos]
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '-')
                    .collect();
                let frac_part: String = trimmed[pos + 1..]
                    .chars()
                    .filter(|c| c.is_ascii_digit())
                    .collect();
                format!("{}.{}", int_part, frac_part)
            }
            None => trimmed
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '-')
                .collect(),
        };

        let value = f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Failed to parse decimal '{}': value out of range", s));
        }
        Ok(value)
    }

    /// Same as `parse_decimal`, but blank or malformed text is 0.
    pub fn parse_decimal_or_zero(s: &str) -> f64 {
        parse_decimal(s).unwrap_or(0.0)
    }

    /// Formats with a fixed number of fraction digits, "." grouping and "," decimals.
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (idx, digit) in int_part.chars().enumerate() {
            if idx > 0 && (int_part.len() - idx) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
        let mut out = String::new();
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push(',');
            out.push_str(frac);
        }
        out
    }

    /// "R$ 1.234,56"
    pub fn format_currency(value: f64) -> String {
        format!("R$ {}", format_decimal(value, 2))
    }

    /// "12,5%"
    pub fn format_percent(value: f64) -> String {
        format!("{}%", format_decimal(value, 1))
    }

    /// Kilograms shown in both units: "1.234,56 kg / 1,235 t".
    pub fn format_mass_pair(value_kg: f64) -> String {
        format!(
            "{} kg / {} t",
            format_decimal(value_kg, 2),
            format_decimal(value_kg / 1000.0, 3)
        )
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_decimal_simple() {
            assert_eq!(parse_decimal("123,45").unwrap(), 123.45);
        }

        #[test]
        fn test_parse_decimal_with_thousands() {
            assert_eq!(parse_decimal("1.234,56").unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_decimal_us_format() {
            assert_eq!(parse_decimal("1234.56").unwrap(), 1234.56);
            assert_eq!(parse_decimal("1,234.56").unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_decimal_large_number() {
            assert_eq!(parse_decimal("600.822.115,84").unwrap(), 600822115.84);
        }

        #[test]
        fn test_parse_decimal_last_separator_is_decimal() {
            // A single separator is always read as the decimal point.
            assert_eq!(parse_decimal("1.234").unwrap(), 1.234);
            assert_eq!(parse_decimal("1,234").unwrap(), 1.234);
            assert_eq!(parse_decimal("1.234.567").unwrap(), 1234.567);
        }

        #[test]
        fn test_parse_decimal_integer_and_negative() {
            assert_eq!(parse_decimal(" 2500 ").unwrap(), 2500.0);
            assert_eq!(parse_decimal("-12,5").unwrap(), -12.5);
            assert_eq!(parse_decimal("10.").unwrap(), 10.0);
        }

        #[test]
        fn test_parse_decimal_invalid() {
            assert!(parse_decimal("").is_err());
            assert!(parse_decimal("   ").is_err());
            assert!(parse_decimal("abc").is_err());
            assert!(parse_decimal(",").is_err());
            assert!(parse_decimal("-").is_err());
            assert!(parse_decimal("1-2").is_err());
        }

        #[test]
        fn test_parse_decimal_or_zero_never_fails() {
            assert_eq!(parse_decimal_or_zero(""), 0.0);
            assert_eq!(parse_decimal_or_zero("not a number"), 0.0);
            assert_eq!(parse_decimal_or_zero("1.234,56"), 1234.56);
        }

        #[test]
        fn test_format_decimal() {
            assert_eq!(format_decimal(1234.56, 2), "1.234,56");
            assert_eq!(format_decimal(600822115.84, 2), "600.822.115,84");
            assert_eq!(format_decimal(12.0, 2), "12,00");
            assert_eq!(format_decimal(999.9999, 3), "1.000,000");
            assert_eq!(format_decimal(-1500.5, 1), "-1.500,5");
            assert_eq!(format_decimal(-0.0001, 2), "0,00");
            assert_eq!(format_decimal(42.0, 0), "42");
        }

        #[test]
        fn test_format_helpers() {
            assert_eq!(format_currency(10000.0), "R$ 10.000,00");
            assert_eq!(format_percent(37.54), "37,5%");
            assert_eq!(format_mass_pair(1234.56), "1.234,56 kg / 1,235 t");
        }
    }
}
