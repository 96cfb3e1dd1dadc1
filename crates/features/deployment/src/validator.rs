//! Checks a complete selection and reports every problem as a message.
//!
//! Errors make a selection invalid; warnings are advisory. Messages use feature display names and
//! follow a fixed order: conflicts in pair-scan order, then missing dependencies, then the risk
//! warning, then the complexity warning.

use crate::registry::Registry;
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use tforge_domain::feature::{Feature, RiskLevel};

/// Features at or above this complexity trigger the gas cost warning.
pub const HIGH_COMPLEXITY_THRESHOLD: u8 = 8;

/// Outcome of validating a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_messages(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self { valid: errors.is_empty(), errors, warnings }
    }
}

/// Validates `selected` against the registry. Unknown ids are ignored.
pub fn validate<S: AsRef<str>>(registry: &Registry, selected: &[S]) -> ValidationResult {
    let features = registry.features_for(selected);
    let raw: FxHashSet<&str> = selected.iter().map(AsRef::as_ref).collect();

    let mut errors = conflict_errors(&features);
    errors.extend(dependency_errors(registry, &features, &raw));

    let mut warnings = Vec::new();
    if let Some(names) = names_where(&features, |f| f.risk_level == RiskLevel::Critical) {
        warnings.push(format!("Critical features require thorough auditing: {names}"));
    }
    if let Some(names) = names_where(&features, |f| f.complexity >= HIGH_COMPLEXITY_THRESHOLD) {
        warnings.push(format!("High complexity features may increase gas costs: {names}"));
    }

    ValidationResult::from_messages(errors, warnings)
}

fn conflict_errors(features: &[&Feature]) -> Vec<String> {
    let mut errors = Vec::new();
    for (i, first) in features.iter().enumerate() {
        for second in &features[i + 1..] {
            if first.conflicts_with(second) {
                errors.push(format!("{} conflicts with {}", first.name, second.name));
            }
        }
    }
    errors
}

fn dependency_errors(registry: &Registry, features: &[&Feature], raw: &FxHashSet<&str>) -> Vec<String> {
    features
        .iter()
        .flat_map(|feature| {
            feature
                .dependencies
                .iter()
                .filter(|dep| !raw.contains(dep.as_str()))
                .map(|dep| format!("{} requires {}", feature.name, registry.display_name(dep)))
        })
        .collect()
}

fn names_where(features: &[&Feature], predicate: impl Fn(&Feature) -> bool) -> Option<String> {
    let names: Vec<&str> =
        features.iter().filter(|&&f| predicate(f)).map(|f| f.name.as_str()).collect();
    (!names.is_empty()).then(|| names.join(", "))
}

impl Registry {
    /// See [`validate`].
    pub fn validate<S: AsRef<str>>(&self, selected: &[S]) -> ValidationResult {
        validate(self, selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_valid_without_messages() {
        let none: [&str; 0] = [];
        assert_eq!(
            validate(&Registry::builtin(), &none),
            ValidationResult { valid: true, errors: vec![], warnings: vec![] }
        );
    }

    #[test]
    fn reverse_declared_conflict_is_reported_once_in_scan_order() {
        let result = validate(&Registry::builtin(), &["erc20-base", "votes", "reflection", "permit"]);
        assert_eq!(result.errors, ["Governance Votes conflicts with Reflection Rewards"]);
        assert_eq!(
            result.warnings,
            [
                "Critical features require thorough auditing: Reflection Rewards",
                "High complexity features may increase gas costs: Reflection Rewards",
            ]
        );
        assert!(!result.valid);
    }

    #[test]
    fn missing_dependency_uses_the_dependency_name() {
        let result = validate(&Registry::builtin(), &["erc20-base", "votes"]);
        assert_eq!(result.errors, ["Governance Votes requires EIP-2612 Permit"]);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let result = validate(&Registry::builtin(), &["erc20-base", "does-not-exist"]);
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn serializes_for_json_output() {
        let result = ValidationResult::from_messages(vec!["x".into()], vec![]);
        let json = serde_json::to_string(&result).expect("serializable");
        assert_eq!(json, r#"{"valid":false,"errors":["x"],"warnings":[]}"#);
    }
}
