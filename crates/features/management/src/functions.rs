//! Management functions of deployed token contracts and their discovery in bytecode.

use crate::classify::{FunctionCategory, categorize_function, classify_function_risk, describe_function, format_function_name};
use crate::error::{ManagementError, ManagementErrorExt};
use crate::selector::{FUNCTION_SELECTORS, Selector, selector_of};
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter};
use tforge_domain::feature::RiskLevel;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionInput {
    pub name: String,
    /// Solidity type, e.g. `address` or `uint256`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// A callable function of a deployed contract, with its risk metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementFunction {
    /// Display name.
    pub name: String,
    pub signature: String,
    pub selector: Selector,
    pub inputs: Vec<FunctionInput>,
    pub risk_level: RiskLevel,
    pub description: String,
    pub requires_confirmation: bool,
    pub category: FunctionCategory,
}

impl ManagementFunction {
    /// Function name as declared in the contract, taken from the signature.
    #[must_use]
    pub fn solidity_name(&self) -> &str {
        self.signature.split_once('(').map_or(self.signature.as_str(), |(name, _)| name)
    }
}

/// Definition of a well-known management function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardFunction {
    /// Solidity function name.
    pub id: &'static str,
    pub name: &'static str,
    /// `(name, type, description)` per argument.
    pub inputs: &'static [(&'static str, &'static str, &'static str)],
    pub risk_level: RiskLevel,
    pub description: &'static str,
    pub requires_confirmation: bool,
    pub category: FunctionCategory,
}

impl StandardFunction {
    /// Canonical signature, e.g. `transfer(address,uint256)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|&(_, kind, _)| kind).collect();
        format!("{}({})", self.id, types.join(","))
    }

    #[must_use]
    pub fn to_function(&self, selector: Selector) -> ManagementFunction {
        ManagementFunction {
            name: self.name.to_owned(),
            signature: self.signature(),
            selector,
            inputs: self
                .inputs
                .iter()
                .map(|&(name, kind, description)| FunctionInput {
                    name: name.to_owned(),
                    kind: kind.to_owned(),
                    description: description.to_owned(),
                })
                .collect(),
            risk_level: self.risk_level,
            description: self.description.to_owned(),
            requires_confirmation: self.requires_confirmation,
            category: self.category,
        }
    }
}

const ADDRESS: &str = "address";
const UINT: &str = "uint256";

pub const STANDARD_FUNCTIONS: &[StandardFunction] = &[
    StandardFunction {
        id: "transfer",
        name: "Transfer Tokens",
        inputs: &[("to", ADDRESS, "Recipient address"), ("amount", UINT, "Amount to transfer")],
        risk_level: RiskLevel::Safe,
        description: "Transfer tokens to another address",
        requires_confirmation: false,
        category: FunctionCategory::Transfer,
    },
    StandardFunction {
        id: "approve",
        name: "Approve Spending",
        inputs: &[("spender", ADDRESS, "Address to approve"), ("amount", UINT, "Amount to approve")],
        risk_level: RiskLevel::Safe,
        description: "Approve another address to spend tokens",
        requires_confirmation: false,
        category: FunctionCategory::Transfer,
    },
    StandardFunction {
        id: "mint",
        name: "Mint Tokens",
        inputs: &[("to", ADDRESS, "Address to mint to"), ("amount", UINT, "Amount to mint")],
        risk_level: RiskLevel::Moderate,
        description: "Create new tokens and assign to address",
        requires_confirmation: true,
        category: FunctionCategory::MintBurn,
    },
    StandardFunction {
        id: "burn",
        name: "Burn Tokens",
        inputs: &[("amount", UINT, "Amount to burn")],
        risk_level: RiskLevel::Moderate,
        description: "Permanently destroy tokens",
        requires_confirmation: true,
        category: FunctionCategory::MintBurn,
    },
    StandardFunction {
        id: "setTaxRate",
        name: "Set Tax Rate",
        inputs: &[("rate", UINT, "Tax rate (basis points)")],
        risk_level: RiskLevel::Moderate,
        description: "Change transaction tax rate",
        requires_confirmation: true,
        category: FunctionCategory::FeesTaxes,
    },
    StandardFunction {
        id: "blacklist",
        name: "Blacklist Address",
        inputs: &[("account", ADDRESS, "Address to blacklist")],
        risk_level: RiskLevel::Dangerous,
        description: "Prevent address from transacting",
        requires_confirmation: true,
        category: FunctionCategory::AccessControl,
    },
    StandardFunction {
        id: "whitelist",
        name: "Whitelist Address",
        inputs: &[("account", ADDRESS, "Address to whitelist")],
        risk_level: RiskLevel::Dangerous,
        description: "Allow address to bypass restrictions",
        requires_confirmation: true,
        category: FunctionCategory::AccessControl,
    },
    StandardFunction {
        id: "pause",
        name: "Pause Contract",
        inputs: &[],
        risk_level: RiskLevel::Dangerous,
        description: "Halt all token transfers",
        requires_confirmation: true,
        category: FunctionCategory::PauseUnpause,
    },
    StandardFunction {
        id: "unpause",
        name: "Unpause Contract",
        inputs: &[],
        risk_level: RiskLevel::Dangerous,
        description: "Resume token transfers",
        requires_confirmation: true,
        category: FunctionCategory::PauseUnpause,
    },
    StandardFunction {
        id: "transferOwnership",
        name: "Transfer Ownership",
        inputs: &[("newOwner", ADDRESS, "New owner address")],
        risk_level: RiskLevel::Critical,
        description: "Transfer contract ownership (IRREVERSIBLE)",
        requires_confirmation: true,
        category: FunctionCategory::Ownership,
    },
    StandardFunction {
        id: "renounceOwnership",
        name: "Renounce Ownership",
        inputs: &[],
        risk_level: RiskLevel::Critical,
        description: "Give up contract ownership forever",
        requires_confirmation: true,
        category: FunctionCategory::Ownership,
    },
];

#[must_use]
pub fn standard_function(id: &str) -> Option<&'static StandardFunction> {
    STANDARD_FUNCTIONS.iter().find(|f| f.id == id)
}

/// Describes a function that has no standard definition, classified by name only.
#[must_use]
pub fn custom_function(id: &str, selector: Selector) -> ManagementFunction {
    let risk_level = classify_function_risk(id);
    ManagementFunction {
        name: format_function_name(id),
        signature: format!("{id}()"),
        selector,
        inputs: Vec::new(),
        risk_level,
        description: describe_function(id),
        requires_confirmation: risk_level != RiskLevel::Safe,
        category: categorize_function(id),
    }
}

/// Describes a function by name, using the standard definition when one exists.
///
/// # Errors
/// Returns [`ManagementError::UnknownFunction`] when the name has no known selector.
pub fn describe(id: &str) -> Result<ManagementFunction, ManagementError> {
    let selector = selector_of(id)
        .ok_or_else(|| ManagementError::UnknownFunction { name: id.to_owned(), context: None })?;
    Ok(standard_function(id).map_or_else(|| custom_function(id, selector), |f| f.to_function(selector)))
}

/// Access patterns a contract implements, detected from marker functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, AsRefStr)]
pub enum Capability {
    Ownable,
    Pausable,
    AccessControl,
}

impl Capability {
    /// Function whose presence marks the capability.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Ownable => "owner",
            Self::Pausable => "paused",
            Self::AccessControl => "hasRole",
        }
    }
}

/// Known management functions whose selectors appear in the bytecode, in table order.
///
/// # Errors
/// Returns [`ManagementError::InvalidBytecode`] when `code` is not hex.
pub fn scan_bytecode(code: &str) -> Result<Vec<ManagementFunction>, ManagementError> {
    let bytes = decode(code)?;
    let functions: Vec<ManagementFunction> = FUNCTION_SELECTORS
        .iter()
        .filter(|(_, selector)| contains_selector(&bytes, *selector))
        .map(|&(id, selector)| {
            standard_function(id).map_or_else(|| custom_function(id, selector), |f| f.to_function(selector))
        })
        .collect();
    debug!(size = bytes.len(), found = functions.len(), "Bytecode scanned");
    Ok(functions)
}

/// Capabilities whose marker selector appears in the bytecode.
///
/// # Errors
/// Returns [`ManagementError::InvalidBytecode`] when `code` is not hex.
pub fn detect_capabilities(code: &str) -> Result<Vec<Capability>, ManagementError> {
    use strum::IntoEnumIterator;

    let bytes = decode(code)?;
    Ok(Capability::iter()
        .filter(|cap| selector_of(cap.marker()).is_some_and(|s| contains_selector(&bytes, s)))
        .collect())
}

fn decode(code: &str) -> Result<Vec<u8>, ManagementError> {
    let code = code.trim();
    let digits = code.strip_prefix("0x").unwrap_or(code);
    hex::decode(digits).context("Decoding contract bytecode")
}

fn contains_selector(code: &[u8], selector: Selector) -> bool {
    let needle = selector.bytes();
    code.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_signatures() {
        let transfer = standard_function("transfer").expect("standard");
        assert_eq!(transfer.signature(), "transfer(address,uint256)");
        assert_eq!(standard_function("pause").map(StandardFunction::signature).as_deref(), Some("pause()"));
        assert!(standard_function("paused").is_none());
    }

    #[test]
    fn custom_functions_are_classified_by_name() {
        let f = describe("setMaxWallet").expect("in selector table");
        assert_eq!(f.name, "Set Max Wallet");
        assert_eq!(f.signature, "setMaxWallet()");
        assert_eq!(f.risk_level, RiskLevel::Moderate);
        assert!(f.requires_confirmation);

        let f = describe("transferFrom").expect("in selector table");
        assert_eq!(f.risk_level, RiskLevel::Safe);
        assert!(!f.requires_confirmation);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert!(matches!(describe("rugPull"), Err(ManagementError::UnknownFunction { .. })));
    }

    #[test]
    fn invalid_bytecode_is_reported_with_context() {
        let err = scan_bytecode("0xnothex").expect_err("not hex");
        assert!(err.to_string().starts_with("Invalid bytecode (Decoding contract bytecode)"));
    }
}
