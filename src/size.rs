use thiserror::Error;

const UNITS: [(&str, u64); 4] = [
    ("KiB", 1 << 10),
    ("MiB", 1 << 20),
    ("GiB", 1 << 30),
    ("TiB", 1 << 40),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeFormatError {
    #[error("cannot determine filesize: `{0}` is too short")]
    TooShort(String),
    #[error("cannot determine filesize: unknown unit in `{0}`")]
    UnknownUnit(String),
    #[error("cannot determine filesize: invalid number in `{0}`")]
    InvalidNumber(String),
    #[error("cannot determine filesize: `{0}` does not fit in 64 bits")]
    TooLarge(String),
}

/// Converts a size given in `*iB` form (`"1.5 GiB"`, `"700MiB"`) to bytes.
///
/// The number may be fractional; the product is truncated, not rounded.
pub fn parse_size(text: &str) -> Result<u64, SizeFormatError> {
    let split = text
        .char_indices()
        .rev()
        .nth(2)
        .map(|(idx, _)| idx)
        .filter(|&idx| idx > 0)
        .ok_or_else(|| SizeFormatError::TooShort(text.to_owned()))?;
    let (number, unit) = text.split_at(split);

    let value = number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite() && *x >= 0.0)
        .ok_or_else(|| SizeFormatError::InvalidNumber(text.to_owned()))?;

    let multiplier = UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, multiplier)| *multiplier)
        .ok_or_else(|| SizeFormatError::UnknownUnit(text.to_owned()))?;

    let bytes = value * multiplier as f64;
    // u64::MAX as f64 rounds up to 2^64
    if bytes >= u64::MAX as f64 {
        return Err(SizeFormatError::TooLarge(text.to_owned()));
    }
    Ok(bytes as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_binary_units() {
        assert_eq!(parse_size("1KiB"), Ok(1024));
        assert_eq!(parse_size("1.5GiB"), Ok(1_610_612_736));
        assert_eq!(parse_size("1 GiB"), Ok(1 << 30));
        assert_eq!(parse_size("1.37 GiB"), Ok((1.37 * (1u64 << 30) as f64) as u64));
    }

    #[test]
    fn truncates_fractional_bytes() {
        // 0.3 KiB = 307.2 bytes
        assert_eq!(parse_size("0.3KiB"), Ok(307));
    }

    #[test]
    fn integers_recover_exact_multiples() {
        for (unit, multiplier) in UNITS {
            for n in [0u64, 1, 7, 512, 4095] {
                assert_eq!(parse_size(&format!("{n}{unit}")), Ok(n * multiplier));
                assert_eq!(parse_size(&format!("{n} {unit}")), Ok(n * multiplier));
            }
        }
    }

    #[test]
    fn rejects_decimal_units() {
        assert!(matches!(
            parse_size("1 KB"),
            Err(SizeFormatError::UnknownUnit(_))
        ));
        assert!(matches!(parse_size("100 B"), Err(SizeFormatError::UnknownUnit(_))));
        assert!(parse_size("1KB").is_err());
    }

    #[test]
    fn rejects_non_numeric_prefix() {
        assert_eq!(
            parse_size("xGiB"),
            Err(SizeFormatError::InvalidNumber("xGiB".into()))
        );
        assert!(matches!(parse_size(" GiB"), Err(SizeFormatError::InvalidNumber(_))));
        assert!(matches!(parse_size("-1 GiB"), Err(SizeFormatError::InvalidNumber(_))));
        assert!(matches!(parse_size("inf GiB"), Err(SizeFormatError::InvalidNumber(_))));
    }

    #[test]
    fn rejects_sizes_past_u64() {
        assert_eq!(
            parse_size("99999999999 TiB"),
            Err(SizeFormatError::TooLarge("99999999999 TiB".into()))
        );
        assert!(matches!(parse_size("16777216TiB"), Err(SizeFormatError::TooLarge(_))));
        assert_eq!(parse_size("16777215TiB"), Ok(16_777_215 << 40));
    }

    #[test]
    fn rejects_short_input() {
        assert_eq!(parse_size("GiB"), Err(SizeFormatError::TooShort("GiB".into())));
        assert!(matches!(parse_size(""), Err(SizeFormatError::TooShort(_))));
    }
}
