use crate::parameter::FeatureParameter;
use crate::standard::StandardSet;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use typed_builder::TypedBuilder;

/// Functional grouping used by the configuration wizard.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FeatureCategory {
    Core,
    Security,
    Governance,
    Economics,
    Utilities,
}

impl FeatureCategory {
    /// Title shown above the category's feature list.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Core => "Core Features",
            Self::Security => "Security",
            Self::Governance => "Governance",
            Self::Economics => "Economics",
            Self::Utilities => "Utilities",
        }
    }

    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Core => "Essential token functionality",
            Self::Security => "Access control and safety features",
            Self::Governance => "Voting and decision-making features",
            Self::Economics => "Tokenomics and financial features",
            Self::Utilities => "Additional utility features",
        }
    }
}

/// Severity of a feature or contract function, ordered from least to most severe.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RiskLevel {
    Safe,
    Moderate,
    Dangerous,
    Critical,
}

/// An optional unit of contract functionality and its compatibility metadata.
///
/// Features are defined once when a registry is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(into))]
    #[serde(default)]
    pub description: String,
    pub category: FeatureCategory,
    pub risk_level: RiskLevel,
    /// Feature ids that must be selected alongside this one.
    #[builder(default, setter(transform = |ids: &[&str]| owned(ids)))]
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Feature ids that must never be selected together with this one.
    #[builder(default, setter(transform = |ids: &[&str]| owned(ids)))]
    #[serde(default)]
    pub conflicts: Vec<String>,
    /// Feature ids this one supersedes. Informational only.
    #[builder(default, setter(transform = |ids: &[&str]| owned(ids)))]
    #[serde(default)]
    pub replaces: Vec<String>,
    /// Rough 1-10 weight; only feeds advisory warnings.
    #[builder(default = 1)]
    #[serde(default = "default_complexity")]
    pub complexity: u8,
    /// Additional deployment gas.
    #[builder(default)]
    #[serde(default)]
    pub gas_impact: u64,
    #[builder(default)]
    #[serde(default)]
    pub audit_required: bool,
    #[builder(default)]
    #[serde(default)]
    pub parameters: Vec<FeatureParameter>,
    #[builder(default, setter(transform = |notes: &[&str]| owned(notes)))]
    #[serde(default)]
    pub warnings: Vec<String>,
    #[builder(default)]
    #[serde(default)]
    pub standards: StandardSet,
}

impl Feature {
    /// Whether either side declares a conflict with the other.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> bool {
        self.declares_conflict(&other.id) || other.declares_conflict(&self.id)
    }

    /// Whether this feature's own conflict list names `id`.
    #[must_use]
    pub fn declares_conflict(&self, id: &str) -> bool {
        self.conflicts.iter().any(|c| c == id)
    }

    #[must_use]
    pub fn depends_on(&self, id: &str) -> bool {
        self.dependencies.iter().any(|d| d == id)
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&FeatureParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_owned()).collect()
}

const fn default_complexity() -> u8 {
    1
}
