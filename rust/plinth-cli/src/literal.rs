//! Command-line literal syntax for builtin arguments.
//!
//! | literal        | value                  |
//! |----------------|------------------------|
//! | `-42`          | integer                |
//! | `true`/`false` | bool                   |
//! | `()`           | unit                   |
//! | `#cafe`        | bytestring (hex)       |
//! | `'c'`          | char                   |
//! | `"text"`       | string (no escapes)    |
//!
//! This is the inverse of `Value`'s `Display`.

use crate::error::CliError;
use num_bigint::BigInt;
use plinth_core::Value;

fn invalid(input: &str, reason: impl Into<String>) -> CliError {
    CliError::Literal {
        input: input.to_string(),
        reason: reason.into(),
    }
}

pub fn parse_value(input: &str) -> Result<Value, CliError> {
    let s = input.trim();
    match s {
        "()" => return Ok(Value::Unit),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "" => return Err(invalid(input, "empty literal")),
        _ => {}
    }

    if let Some(digits) = s.strip_prefix('#') {
        return hex::decode(digits)
            .map(Value::ByteString)
            .map_err(|e| invalid(input, e.to_string()));
    }

    if let Some(inner) = s.strip_prefix('\'') {
        let inner = inner
            .strip_suffix('\'')
            .ok_or_else(|| invalid(input, "unterminated char"))?;
        let mut chars = inner.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::Char(c)),
            _ => Err(invalid(input, "a char literal holds exactly one character")),
        };
    }

    if let Some(inner) = s.strip_prefix('"') {
        return inner
            .strip_suffix('"')
            .map(Value::string)
            .ok_or_else(|| invalid(input, "unterminated string"));
    }

    s.parse::<BigInt>()
        .map(Value::Integer)
        .map_err(|_| invalid(input, "not an integer, bool, unit, #hex, 'c' or \"text\""))
}

pub fn parse_values<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Value>, CliError> {
    inputs.iter().map(|s| parse_value(s.as_ref())).collect()
}
