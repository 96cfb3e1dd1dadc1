//! Parses raw wizard input into typed constructor parameter values.

use crate::error::ParameterError;
use regex_lite::Regex;
use tforge_domain::parameter::{FeatureParameter, ParameterKind, ParameterValue};

const ADDRESS_HEX_LEN: usize = 40;
const BYTES32_HEX_LEN: usize = 64;

/// Parses `raw` according to the parameter's kind.
///
/// Blank input falls back to the declared default. Without a default it is reported as
/// [`ParameterError::Missing`], whether or not the parameter is required; callers decide whether
/// an unset optional parameter matters.
///
/// # Errors
/// * [`ParameterError::Missing`] for blank input without a default.
/// * [`ParameterError::Invalid`] when the input cannot be read as the parameter type.
/// * [`ParameterError::OutOfRange`] when an integer falls outside its bounds.
/// * [`ParameterError::PatternMismatch`] when text does not match its pattern.
pub fn parse_parameter(param: &FeatureParameter, raw: &str) -> Result<ParameterValue, ParameterError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return param
            .kind
            .default_value()
            .ok_or_else(|| ParameterError::Missing { name: param.name.clone(), context: None });
    }

    let name = param.name.as_str();
    match &param.kind {
        ParameterKind::Address { .. } => parse_address(name, raw).map(ParameterValue::Address),
        ParameterKind::Uint { min, max, .. } => parse_uint(name, raw, *min, *max),
        ParameterKind::Text { pattern, .. } => parse_text(name, raw, pattern.as_deref()),
        ParameterKind::Bool { .. } => parse_bool(name, raw).map(ParameterValue::Bool),
        ParameterKind::Bytes32 { .. } => {
            if is_hex_word(raw, BYTES32_HEX_LEN) {
                Ok(ParameterValue::Bytes32(raw.to_owned()))
            } else {
                Err(invalid(name, "a 0x-prefixed 32-byte hex word", raw))
            }
        },
        ParameterKind::AddressList { .. } => {
            let addresses = raw
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| parse_address(name, part))
                .collect::<Result<Vec<_>, _>>()?;
            if addresses.is_empty() {
                return Err(ParameterError::Missing { name: name.to_owned(), context: None });
            }
            Ok(ParameterValue::AddressList(addresses))
        },
    }
}

fn parse_address(name: &str, raw: &str) -> Result<String, ParameterError> {
    if is_hex_word(raw, ADDRESS_HEX_LEN) {
        Ok(raw.to_owned())
    } else {
        Err(invalid(name, "a 0x-prefixed 20-byte address", raw))
    }
}

fn parse_uint(
    name: &str,
    raw: &str,
    min: Option<u64>,
    max: Option<u64>,
) -> Result<ParameterValue, ParameterError> {
    let value: u128 = raw.parse().map_err(|_| invalid(name, "an unsigned integer", raw))?;
    let min = min.map_or(0, u128::from);
    let max = max.map_or(u128::MAX, u128::from);
    if value < min || value > max {
        return Err(ParameterError::OutOfRange { name: name.to_owned(), value, min, max, context: None });
    }
    Ok(ParameterValue::Uint(value))
}

fn parse_text(name: &str, raw: &str, pattern: Option<&str>) -> Result<ParameterValue, ParameterError> {
    if let Some(pattern) = pattern {
        let regex = Regex::new(pattern).map_err(|_| invalid(name, "a valid pattern", pattern))?;
        if !regex.is_match(raw) {
            return Err(ParameterError::PatternMismatch {
                name: name.to_owned(),
                pattern: pattern.to_owned(),
                context: None,
            });
        }
    }
    Ok(ParameterValue::Text(raw.to_owned()))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, ParameterError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(name, "true or false", raw)),
    }
}

fn is_hex_word(raw: &str, digits: usize) -> bool {
    raw.strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .is_some_and(|hex| hex.len() == digits && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

fn invalid(name: &str, expected: &'static str, value: &str) -> ParameterError {
    ParameterError::Invalid { name: name.to_owned(), expected, value: value.to_owned(), context: None }
}
