//! Four-byte function selectors and the table of selectors the scanner knows.

use crate::error::ManagementError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// First four bytes of the keccak hash of a function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selector([u8; 4]);

impl Selector {
    #[must_use]
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }
}

impl FromStr for Selector {
    type Err = ManagementError;

    /// Parses `0x` followed by exactly eight hex digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ManagementError::InvalidSelector { value: s.to_owned(), context: None };
        let digits = s.strip_prefix("0x").ok_or_else(invalid)?;
        let mut bytes = [0u8; 4];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Function names and selectors looked up in deployed bytecode, in scan order.
pub const FUNCTION_SELECTORS: &[(&str, Selector)] = &[
    // ERC20
    ("transfer", Selector([0xa9, 0x05, 0x9c, 0xbb])),
    ("approve", Selector([0x09, 0x5e, 0xa7, 0xb3])),
    ("transferFrom", Selector([0x23, 0xb8, 0x72, 0xdd])),
    // Ownable
    ("owner", Selector([0x8d, 0xa5, 0xcb, 0x5b])),
    ("transferOwnership", Selector([0xf2, 0xfd, 0xe3, 0x8b])),
    ("renounceOwnership", Selector([0x71, 0x50, 0x18, 0xa6])),
    // Mint / burn
    ("mint", Selector([0x40, 0xc1, 0x0f, 0x19])),
    ("burn", Selector([0x42, 0x96, 0x6c, 0x68])),
    ("burnFrom", Selector([0x79, 0xcc, 0x67, 0x90])),
    // Pausable
    ("pause", Selector([0x84, 0x56, 0xcb, 0x59])),
    ("unpause", Selector([0x3f, 0x4b, 0xa8, 0x3a])),
    ("paused", Selector([0x5c, 0x97, 0x5a, 0xbb])),
    // AccessControl
    ("hasRole", Selector([0x91, 0xd1, 0x48, 0x54])),
    ("grantRole", Selector([0x2f, 0x2f, 0xf1, 0x5d])),
    ("revokeRole", Selector([0xd5, 0x47, 0x74, 0x1f])),
    ("renounceRole", Selector([0x36, 0xc7, 0x85, 0x16])),
    // Common custom functions
    ("blacklist", Selector([0xf9, 0xf9, 0x2b, 0xe4])),
    ("unblacklist", Selector([0x1a, 0x89, 0x52, 0x66])),
    ("isBlacklisted", Selector([0xfe, 0x57, 0x5a, 0x87])),
    ("setTaxRate", Selector([0x3f, 0x3c, 0xf5, 0x6c])),
    ("setMaxTx", Selector([0x6b, 0x67, 0xc4, 0xdf])),
    ("setMaxWallet", Selector([0xf8, 0xb4, 0x5b, 0x05])),
];

/// Selector of a function in [`FUNCTION_SELECTORS`].
#[must_use]
pub fn selector_of(name: &str) -> Option<Selector> {
    FUNCTION_SELECTORS.iter().find(|(n, _)| *n == name).map(|&(_, selector)| selector)
}

/// Name of the table function with this selector.
#[must_use]
pub fn function_of(selector: Selector) -> Option<&'static str> {
    FUNCTION_SELECTORS.iter().find(|(_, s)| *s == selector).map(|&(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_prints_selectors() {
        let selector: Selector = "0xa9059cbb".parse().expect("valid");
        assert_eq!(selector.to_string(), "0xa9059cbb");
        assert_eq!(function_of(selector), Some("transfer"));
        assert_eq!(selector_of("owner").map(|s| s.to_string()).as_deref(), Some("0x8da5cb5b"));
    }

    #[test]
    fn rejects_malformed_selectors() {
        for raw in ["a9059cbb", "0xa9059c", "0xa9059cbbaa", "0xzz059cbb"] {
            assert!(matches!(raw.parse::<Selector>(), Err(ManagementError::InvalidSelector { .. })), "{raw}");
        }
    }

    #[test]
    fn table_has_no_duplicate_selectors() {
        for (i, (_, a)) in FUNCTION_SELECTORS.iter().enumerate() {
            assert!(FUNCTION_SELECTORS[i + 1..].iter().all(|(_, b)| a != b));
        }
    }
}
