//! Conversions between decimal strings, hex strings and field elements.
//!
//! Values travel to the gateway as base-10 strings, while addresses and
//! hashes are shown to humans as `0x`-prefixed hex. Everything in between is
//! a [`Felt`], which reduces its own arithmetic modulo the Stark prime.

use num_bigint::BigUint;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use starknet_crypto::Felt;

use crate::error::{AccountError, Result};

/// A value that can be turned into a field element: an already parsed felt,
/// an integer, or a decimal/hex string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericValue {
    Felt(Felt),
    Text(String),
}

impl NumericValue {
    pub fn to_field(&self) -> Result<Felt> {
        match self {
            NumericValue::Felt(felt) => Ok(*felt),
            NumericValue::Text(text) => to_field(text),
        }
    }
}

impl From<Felt> for NumericValue {
    fn from(value: Felt) -> Self {
        NumericValue::Felt(value)
    }
}

impl From<&Felt> for NumericValue {
    fn from(value: &Felt) -> Self {
        NumericValue::Felt(*value)
    }
}

impl From<u64> for NumericValue {
    fn from(value: u64) -> Self {
        NumericValue::Felt(Felt::from(value))
    }
}

impl From<u128> for NumericValue {
    fn from(value: u128) -> Self {
        NumericValue::Felt(Felt::from(value))
    }
}

impl From<&str> for NumericValue {
    fn from(value: &str) -> Self {
        NumericValue::Text(value.to_string())
    }
}

impl From<String> for NumericValue {
    fn from(value: String) -> Self {
        NumericValue::Text(value)
    }
}

/// The Stark prime `p`, as a big integer.
pub fn field_modulus() -> BigUint {
    felt_to_biguint(&Felt::MAX) + 1u32
}

pub fn felt_to_biguint(felt: &Felt) -> BigUint {
    BigUint::from_bytes_be(&felt.to_bytes_be())
}

/// Convert a big integer into a field element, refusing values `>= p`.
pub fn biguint_to_field(value: &BigUint) -> Result<Felt> {
    if *value >= field_modulus() {
        return Err(AccountError::InvalidNumericFormat(format!(
            "{} exceeds the field modulus",
            value
        )));
    }

    let bytes = value.to_bytes_be();
    let mut padded = [0u8; 32];
    padded[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(Felt::from_bytes_be(&padded))
}

/// Parse a decimal or `0x`-prefixed hex string into a field element.
pub fn to_field(value: &str) -> Result<Felt> {
    let parsed = if let Some(digits) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AccountError::InvalidNumericFormat(format!(
                "malformed hex value '{}'",
                value
            )));
        }
        BigUint::parse_bytes(digits.as_bytes(), 16)
    } else {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(AccountError::InvalidNumericFormat(format!(
                "'{}' is not a number",
                value
            )));
        }
        BigUint::parse_bytes(value.as_bytes(), 10)
    };

    let parsed = parsed.ok_or_else(|| {
        AccountError::InvalidNumericFormat(format!("failed to parse '{}'", value))
    })?;

    biguint_to_field(&parsed)
}

/// Lowercase, `0x`-prefixed, no leading zeros (`0x0` for zero).
pub fn to_hex(felt: &Felt) -> String {
    felt.to_hex_string()
}

pub fn to_decimal_string(felt: &Felt) -> String {
    felt_to_biguint(felt).to_str_radix(10)
}

/// Canonicalize a sequence of values into the decimal-string form the
/// gateway expects.
pub fn to_decimal_array<'a, I>(values: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a NumericValue>,
{
    values
        .into_iter()
        .map(|value| value.to_field().map(|felt| to_decimal_string(&felt)))
        .collect()
}

/// Digits of an unsigned integer: decimal, or hex behind a `0x` prefix.
fn parse_unsigned(value: &str) -> Option<BigUint> {
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit()) => {
            BigUint::parse_bytes(digits.as_bytes(), 16)
        }
        None if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) => {
            BigUint::parse_bytes(value.as_bytes(), 10)
        }
        _ => None,
    }
}

/// Deserialize a non-negative big integer from a JSON number or a
/// decimal/hex string.
///
/// Numbers are read through [`serde_json::Number`], which keeps every digit,
/// so integers wider than 64 bits survive.
pub fn deserialize_biguint<'de, D>(deserializer: D) -> std::result::Result<BigUint, D::Error>
where
    D: Deserializer<'de>,
{
    let (text, parsed) = match Value::deserialize(deserializer)? {
        Value::Number(number) => {
            let text = number.to_string();
            let parsed = if text.chars().all(|c| c.is_ascii_digit()) {
                parse_unsigned(&text)
            } else {
                None
            };
            (text, parsed)
        }
        Value::String(text) => {
            let parsed = parse_unsigned(&text);
            (text, parsed)
        }
        other => {
            return Err(de::Error::custom(format!(
                "expected a non-negative integer or a decimal/hex string, got {}",
                other
            )))
        }
    };

    parsed.ok_or_else(|| de::Error::custom(format!("invalid non-negative integer '{}'", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_and_hex_parse_to_same_felt() {
        let from_dec = to_field("255").unwrap();
        let from_hex = to_field("0xff").unwrap();
        let from_upper = to_field("0XFF").unwrap();

        assert_eq!(from_dec, Felt::from(255u64));
        assert_eq!(from_dec, from_hex);
        assert_eq!(from_dec, from_upper);
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        for bad in ["", "0x", "12a", "-5", "0xzz", " 1", "1_000", "hello"] {
            match to_field(bad) {
                Err(AccountError::InvalidNumericFormat(_)) => {}
                other => panic!("expected InvalidNumericFormat for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_values_at_or_above_modulus_are_rejected() {
        let p = field_modulus();
        let p_hex = format!("0x{}", p.to_str_radix(16));
        assert!(matches!(
            to_field(&p_hex),
            Err(AccountError::InvalidNumericFormat(_))
        ));

        let max = (p - 1u32).to_str_radix(10);
        assert_eq!(to_field(&max).unwrap(), Felt::MAX);
    }

    #[test]
    fn test_hex_is_lowercase_and_minimal() {
        assert_eq!(to_hex(&Felt::ZERO), "0x0");
        assert_eq!(to_hex(&to_field("0x00ABC").unwrap()), "0xabc");
    }

    #[test]
    fn test_round_trips() {
        let samples = [
            Felt::ZERO,
            Felt::ONE,
            Felt::from(u128::MAX),
            Felt::MAX,
            to_field("0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7").unwrap(),
        ];

        for felt in samples {
            assert_eq!(to_field(&to_hex(&felt)).unwrap(), felt);
            assert_eq!(to_field(&to_decimal_string(&felt)).unwrap(), felt);
        }
    }

    #[test]
    fn test_arithmetic_wraps_modulo_prime() {
        assert_eq!(Felt::MAX + Felt::ONE, Felt::ZERO);
        assert_eq!(Felt::ZERO - Felt::ONE, Felt::MAX);
    }

    #[test]
    fn test_decimal_array_mixes_input_forms() {
        let values = vec![
            NumericValue::from("0x10"),
            NumericValue::from("42"),
            NumericValue::from(7u64),
            NumericValue::from(Felt::from(1000u64)),
        ];

        let decimals = to_decimal_array(&values).unwrap();
        assert_eq!(decimals, vec!["16", "42", "7", "1000"]);
    }

    #[test]
    fn test_decimal_array_propagates_errors() {
        let values = vec![NumericValue::from("1"), NumericValue::from("nope")];
        assert!(matches!(
            to_decimal_array(&values),
            Err(AccountError::InvalidNumericFormat(_))
        ));
    }

    #[test]
    fn test_decimal_string_of_max_felt_is_not_truncated() {
        let decimal = to_decimal_string(&Felt::MAX);
        assert_eq!(decimal, (field_modulus() - 1u32).to_str_radix(10));
    }

    #[derive(serde::Deserialize)]
    struct Fee {
        #[serde(deserialize_with = "deserialize_biguint")]
        amount: BigUint,
    }

    #[test]
    fn test_deserialize_biguint_forms() {
        let from_number: Fee = serde_json::from_str(r#"{"amount": 12}"#).unwrap();
        let from_decimal: Fee = serde_json::from_str(r#"{"amount": "12"}"#).unwrap();
        let from_hex: Fee = serde_json::from_str(r#"{"amount": "0xc"}"#).unwrap();

        assert_eq!(from_number.amount, BigUint::from(12u32));
        assert_eq!(from_decimal.amount, from_number.amount);
        assert_eq!(from_hex.amount, from_number.amount);

        assert!(serde_json::from_str::<Fee>(r#"{"amount": -1}"#).is_err());
        assert!(serde_json::from_str::<Fee>(r#"{"amount": 1.5}"#).is_err());
        assert!(serde_json::from_str::<Fee>(r#"{"amount": "abc"}"#).is_err());
        assert!(serde_json::from_str::<Fee>(r#"{"amount": "0x"}"#).is_err());
        assert!(serde_json::from_str::<Fee>(r#"{"amount": true}"#).is_err());
    }

    #[test]
    fn test_deserialize_biguint_keeps_digits_beyond_u64() {
        let fee: Fee =
            serde_json::from_str(r#"{"amount": 340282366920938463463374607431768211457}"#).unwrap();

        let expected = BigUint::from(u128::MAX) + 2u32;
        assert_eq!(fee.amount, expected);
    }
}
