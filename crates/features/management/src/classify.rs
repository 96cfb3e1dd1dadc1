//! Name-based classification of contract functions.
//!
//! Functions without an ABI entry are judged by their name alone. Patterns are matched
//! case-insensitively anywhere in the name and the first matching group wins.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tforge_domain::feature::RiskLevel;

/// What a management function touches.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FunctionCategory {
    Transfer,
    MintBurn,
    AccessControl,
    PauseUnpause,
    Ownership,
    FeesTaxes,
    Upgrades,
}

const RISK_PATTERNS: &[(RiskLevel, &[&str])] = &[
    (
        RiskLevel::Critical,
        &["transfer.*ownership", "renounce.*ownership", "destroy", "selfdestruct", "upgrade"],
    ),
    (
        RiskLevel::Dangerous,
        &["pause", "unpause", "blacklist", "whitelist", "lock", "freeze", "emergency"],
    ),
    (RiskLevel::Moderate, &["mint", "burn", "set.*rate", "set.*fee", "set.*tax", "set.*limit"]),
    (RiskLevel::Safe, &["transfer", "approve", "allowance", "balance", "total.*supply"]),
];

const CATEGORY_PATTERNS: &[(FunctionCategory, &[&str])] = &[
    (FunctionCategory::Ownership, &["owner", "transfer.*ownership", "renounce.*ownership"]),
    (FunctionCategory::MintBurn, &["mint", "burn"]),
    (FunctionCategory::AccessControl, &["blacklist", "whitelist", "role", "access"]),
    (FunctionCategory::PauseUnpause, &["pause", "unpause"]),
    (FunctionCategory::FeesTaxes, &["fee", "tax", "rate"]),
    (FunctionCategory::Transfer, &["transfer", "approve", "allowance"]),
];

static RISK_RULES: LazyLock<Vec<(RiskLevel, Regex)>> = LazyLock::new(|| compile(RISK_PATTERNS));
static CATEGORY_RULES: LazyLock<Vec<(FunctionCategory, Regex)>> =
    LazyLock::new(|| compile(CATEGORY_PATTERNS));

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("blacklist", "Prevent an address from making transactions"),
    ("whitelist", "Allow an address to bypass restrictions"),
    ("setTaxRate", "Modify the transaction tax percentage"),
    ("setMaxTx", "Change the maximum transaction amount"),
    ("setMaxWallet", "Change the maximum wallet balance"),
    ("lock", "Lock tokens to prevent transfers"),
    ("freeze", "Freeze account to prevent transactions"),
];

/// Risk of calling a function, judged by its name. Unrecognized names are `moderate`.
#[must_use]
pub fn classify_function_risk(name: &str) -> RiskLevel {
    first_match(&RISK_RULES, name).unwrap_or(RiskLevel::Moderate)
}

/// Category of a function, judged by its name. Unrecognized names are `transfer`.
#[must_use]
pub fn categorize_function(name: &str) -> FunctionCategory {
    first_match(&CATEGORY_RULES, name).unwrap_or(FunctionCategory::Transfer)
}

/// Turns a camelCase identifier into Title Case words: `setTaxRate` becomes `Set Tax Rate`.
#[must_use]
pub fn format_function_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            if ch.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(ch);
        }
    }
    out.trim().to_owned()
}

/// Short description of a custom function.
#[must_use]
pub fn describe_function(name: &str) -> String {
    DESCRIPTIONS.iter().find(|(n, _)| *n == name).map_or_else(
        || format!("Execute {} function", format_function_name(name)),
        |(_, text)| (*text).to_owned(),
    )
}

fn compile<T: Copy>(groups: &[(T, &[&str])]) -> Vec<(T, Regex)> {
    groups
        .iter()
        .flat_map(|&(tag, patterns)| {
            patterns.iter().filter_map(move |p| Regex::new(&format!("(?i){p}")).ok().map(|re| (tag, re)))
        })
        .collect()
}

fn first_match<T: Copy>(rules: &[(T, Regex)], name: &str) -> Option<T> {
    rules.iter().find(|(_, re)| re.is_match(name)).map(|&(tag, _)| tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        let risk: usize = RISK_PATTERNS.iter().map(|(_, p)| p.len()).sum();
        let category: usize = CATEGORY_PATTERNS.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(RISK_RULES.len(), risk);
        assert_eq!(CATEGORY_RULES.len(), category);
    }

    #[test]
    fn risk_groups_are_checked_in_severity_order() {
        assert_eq!(classify_function_risk("transferOwnership"), RiskLevel::Critical);
        assert_eq!(classify_function_risk("upgradeTo"), RiskLevel::Critical);
        assert_eq!(classify_function_risk("unpause"), RiskLevel::Dangerous);
        assert_eq!(classify_function_risk("isBlacklisted"), RiskLevel::Dangerous);
        assert_eq!(classify_function_risk("SETTAXRATE"), RiskLevel::Moderate);
        assert_eq!(classify_function_risk("transferFrom"), RiskLevel::Safe);
        assert_eq!(classify_function_risk("totalSupply"), RiskLevel::Safe);
        assert_eq!(classify_function_risk("owner"), RiskLevel::Moderate);
    }

    #[test]
    fn categories_fall_back_to_transfer() {
        assert_eq!(categorize_function("renounceOwnership"), FunctionCategory::Ownership);
        assert_eq!(categorize_function("burnFrom"), FunctionCategory::MintBurn);
        assert_eq!(categorize_function("grantRole"), FunctionCategory::AccessControl);
        assert_eq!(categorize_function("paused"), FunctionCategory::PauseUnpause);
        assert_eq!(categorize_function("setTaxRate"), FunctionCategory::FeesTaxes);
        assert_eq!(categorize_function("setMaxTx"), FunctionCategory::Transfer);
        assert_eq!(FunctionCategory::MintBurn.to_string(), "mint_burn");
    }

    #[test]
    fn names_and_descriptions() {
        assert_eq!(format_function_name("setTaxRate"), "Set Tax Rate");
        assert_eq!(format_function_name("owner"), "Owner");
        assert_eq!(format_function_name(""), "");
        assert_eq!(describe_function("setMaxTx"), "Change the maximum transaction amount");
        assert_eq!(describe_function("grantRole"), "Execute Grant Role function");
    }
}
