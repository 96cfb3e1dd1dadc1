use crate::registry::Registry;
use fxhash::FxHashSet;
use serde::Serialize;
use tforge_domain::feature::{Feature, RiskLevel};

/// Deployment-facing totals of a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSummary {
    pub feature_count: usize,
    /// Extra deployment gas on top of the base contract.
    pub total_gas_impact: u64,
    pub total_complexity: u32,
    /// `None` for an empty selection.
    pub highest_risk: Option<RiskLevel>,
    pub audit_required: bool,
    /// Ids superseded by selected features, first mention first.
    pub replaced: Vec<String>,
}

impl SelectionSummary {
    /// A feature listed more than once is counted once.
    #[must_use]
    pub fn from_features(features: &[&Feature]) -> Self {
        let mut seen = FxHashSet::default();
        let features: Vec<&Feature> = features.iter().copied().filter(|f| seen.insert(f.id.as_str())).collect();

        let mut replaced: Vec<String> = Vec::new();
        for id in features.iter().flat_map(|f| &f.replaces) {
            if !replaced.contains(id) {
                replaced.push(id.clone());
            }
        }

        Self {
            feature_count: features.len(),
            total_gas_impact: features.iter().map(|f| f.gas_impact).sum(),
            total_complexity: features.iter().map(|f| u32::from(f.complexity)).sum(),
            highest_risk: features.iter().map(|f| f.risk_level).max(),
            audit_required: features.iter().any(|f| f.audit_required),
            replaced,
        }
    }
}

impl Registry {
    /// Summarizes the known features of `selected`.
    pub fn summarize<S: AsRef<str>>(&self, selected: &[S]) -> SelectionSummary {
        SelectionSummary::from_features(&self.features_for(selected))
    }
}
