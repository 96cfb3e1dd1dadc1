use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

/// A constructor argument a feature needs before code can be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct FeatureParameter {
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub description: String,
    #[builder(default)]
    #[serde(default)]
    pub required: bool,
    #[builder(default, setter(strip_option, into))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub kind: ParameterKind,
}

/// Parameter type together with the rule its values must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParameterKind {
    /// `0x`-prefixed 20-byte account address.
    Address {
        #[serde(default)]
        default: Option<String>,
    },
    /// Unsigned integer with optional inclusive bounds.
    Uint {
        #[serde(default)]
        min: Option<u64>,
        #[serde(default)]
        max: Option<u64>,
        #[serde(default)]
        default: Option<u64>,
    },
    /// Free text, optionally constrained by a regular expression.
    Text {
        #[serde(default)]
        pattern: Option<String>,
        #[serde(default)]
        default: Option<String>,
    },
    Bool {
        #[serde(default)]
        default: Option<bool>,
    },
    /// `0x`-prefixed 32-byte word.
    Bytes32 {
        #[serde(default)]
        default: Option<String>,
    },
    /// Comma-separated list of addresses.
    AddressList {
        #[serde(default)]
        default: Option<Vec<String>>,
    },
}

impl ParameterKind {
    /// Solidity type the parameter maps to.
    #[must_use]
    pub const fn solidity_type(&self) -> &'static str {
        match self {
            Self::Address { .. } => "address",
            Self::Uint { .. } => "uint256",
            Self::Text { .. } => "string",
            Self::Bool { .. } => "bool",
            Self::Bytes32 { .. } => "bytes32",
            Self::AddressList { .. } => "address[]",
        }
    }

    /// Default value, if the parameter declares one.
    #[must_use]
    pub fn default_value(&self) -> Option<ParameterValue> {
        match self {
            Self::Address { default } => default.clone().map(ParameterValue::Address),
            Self::Uint { default, .. } => default.map(|v| ParameterValue::Uint(u128::from(v))),
            Self::Text { default, .. } => default.clone().map(ParameterValue::Text),
            Self::Bool { default } => default.map(ParameterValue::Bool),
            Self::Bytes32 { default } => default.clone().map(ParameterValue::Bytes32),
            Self::AddressList { default } => default.clone().map(ParameterValue::AddressList),
        }
    }

    #[must_use]
    pub const fn uint(min: Option<u64>, max: Option<u64>, default: Option<u64>) -> Self {
        Self::Uint { min, max, default }
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::Text { pattern: None, default: None }
    }

    #[must_use]
    pub const fn address() -> Self {
        Self::Address { default: None }
    }
}

/// A parsed, validated parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Address(String),
    Uint(u128),
    Text(String),
    Bool(bool),
    Bytes32(String),
    AddressList(Vec<String>),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(v) | Self::Text(v) | Self::Bytes32(v) => f.write_str(v),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::AddressList(v) => f.write_str(&v.join(",")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_follows_variant() {
        assert_eq!(
            ParameterKind::uint(Some(0), Some(18), Some(18)).default_value(),
            Some(ParameterValue::Uint(18))
        );
        assert_eq!(ParameterKind::address().default_value(), None);
        assert_eq!(ParameterKind::text().solidity_type(), "string");
    }

    #[test]
    fn display_joins_address_lists() {
        let value = ParameterValue::AddressList(vec!["0x1".into(), "0x2".into()]);
        assert_eq!(value.to_string(), "0x1,0x2");
    }
}
