//! Numeric literal coercion.
//!
//! Every site that turns a raw numeric token into a document value goes
//! through [`coerce`], so hex, decimal and float literals normalize the same
//! way everywhere.

use crate::Value;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// A literal that looked numeric but could not be represented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("invalid integer literal `{literal}`: {source}")]
    Integer {
        literal: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid float literal `{literal}`: {source}")]
    Float {
        literal: String,
        #[source]
        source: ParseFloatError,
    },
}

/// Coerce a raw literal into a value.
///
/// Whitespace (including newlines) is stripped first. Then:
/// - `0x`/`0X` prefix (after an optional sign): hexadecimal integer
/// - empty text: [`Value::Absent`]
/// - contains `.`: `f64`
/// - otherwise: base-10 `i64`, falling back to `f64` for exponent forms like `1e3`
pub fn coerce(literal: &str) -> Result<Value, NumberError> {
    let text: String = literal.chars().filter(|c| !c.is_whitespace()).collect();

    if text.is_empty() {
        return Ok(Value::Absent);
    }

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(&text)),
    };

    if let Some(digits) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        let value = i64::from_str_radix(digits, 16).map_err(|source| NumberError::Integer {
            literal: text.clone(),
            source,
        })?;
        return Ok(Value::Int(if negative { -value } else { value }));
    }

    if text.contains('.') {
        return parse_float(&text);
    }

    match text.parse::<i64>() {
        Ok(value) => Ok(Value::Int(value)),
        Err(_) if text.contains(['e', 'E']) => parse_float(&text),
        Err(source) => Err(NumberError::Integer {
            literal: text.clone(),
            source,
        }),
    }
}

fn parse_float(text: &str) -> Result<Value, NumberError> {
    text.parse::<f64>()
        .map(Value::Float)
        .map_err(|source| NumberError::Float {
            literal: text.to_string(),
            source,
        })
}

/// Convert a `kbps` figure to bits per second.
///
/// Integral results are stored as `Int` (`19.2` kbps becomes `19200`);
/// anything else stays `Float`. Non-numeric values pass through unchanged.
pub fn scale_kbps(value: Value) -> Value {
    match value {
        Value::Int(kbps) => kbps
            .checked_mul(1000)
            .map(Value::Int)
            .unwrap_or(Value::Float(kbps as f64 * 1000.0)),
        Value::Float(kbps) => {
            let bps = kbps * 1000.0;
            let rounded = bps.round();
            if (bps - rounded).abs() < 1e-6 && rounded.abs() < i64::MAX as f64 {
                Value::Int(rounded as i64)
            } else {
                Value::Float(bps)
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_table() {
        assert_eq!(coerce("0x1F"), Ok(Value::Int(31)));
        assert_eq!(coerce("0X1f"), Ok(Value::Int(31)));
        assert_eq!(coerce("10"), Ok(Value::Int(10)));
        assert_eq!(coerce("3.5"), Ok(Value::Float(3.5)));
        assert_eq!(coerce(""), Ok(Value::Absent));
        assert_eq!(coerce("-5"), Ok(Value::Int(-5)));
    }

    #[test]
    fn test_coerce_strips_whitespace() {
        assert_eq!(coerce(" 1 2\n"), Ok(Value::Int(12)));
        assert_eq!(coerce(" \n\t"), Ok(Value::Absent));
    }

    #[test]
    fn test_coerce_exponent() {
        assert_eq!(coerce("1e3"), Ok(Value::Float(1000.0)));
        assert_eq!(coerce("2.5e-1"), Ok(Value::Float(0.25)));
    }

    #[test]
    fn test_coerce_rejects_garbage() {
        assert!(matches!(coerce("abc"), Err(NumberError::Integer { .. })));
        assert!(matches!(coerce("1.2.3"), Err(NumberError::Float { .. })));
        assert!(matches!(coerce("0xZZ"), Err(NumberError::Integer { .. })));
    }

    #[test]
    fn test_scale_kbps() {
        assert_eq!(scale_kbps(Value::Float(19.2)), Value::Int(19200));
        assert_eq!(scale_kbps(Value::Float(10.4)), Value::Int(10400));
        assert_eq!(scale_kbps(Value::Int(20)), Value::Int(20000));
        assert_eq!(scale_kbps(Value::Float(0.0625)), Value::Float(62.5));
    }
}
