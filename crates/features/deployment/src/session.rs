//! # Wizard Session
//!
//! State of one contract configuration run: the chosen token standard, the selected features and
//! the parameter values entered so far. Every change recomputes validation and the addable set
//! from scratch; nothing is cached between toggles.

use crate::error::{DeploymentError, ParameterError};
use crate::parameters::parse_parameter;
use crate::registry::Registry;
use crate::resolver::resolve;
use crate::selection::FeatureSelection;
use crate::summary::SelectionSummary;
use crate::templates::ContractTemplate;
use crate::validator::{ValidationResult, validate};
use fxhash::FxHashMap;
use serde::Serialize;
use tforge_domain::feature::{Feature, FeatureCategory};
use tforge_domain::parameter::ParameterValue;
use tforge_domain::standard::TokenStandard;
use tracing::{info, instrument};

/// View of the session after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub selected: Vec<String>,
    pub validation: ValidationResult,
    /// Ids the user may add next, in registry order.
    pub addable: Vec<String>,
}

/// A parameter value attached to the feature that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParameter {
    pub feature: String,
    pub name: String,
    pub value: ParameterValue,
    /// `true` when the value came from the parameter's default.
    pub defaulted: bool,
}

/// A validated selection with every required parameter filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizedSelection {
    pub standard: TokenStandard,
    pub features: Vec<String>,
    pub parameters: Vec<ResolvedParameter>,
    pub summary: SelectionSummary,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct WizardSession {
    registry: Registry,
    standard: TokenStandard,
    selection: FeatureSelection,
    parameters: FxHashMap<(String, String), ParameterValue>,
}

impl WizardSession {
    #[must_use]
    pub fn new(registry: Registry, standard: TokenStandard) -> Self {
        Self { registry, standard, selection: FeatureSelection::new(), parameters: FxHashMap::default() }
    }

    /// Starts from a template's standard and feature list.
    #[must_use]
    pub fn from_template(registry: Registry, template: &ContractTemplate) -> Self {
        let mut session = Self::new(registry, template.standard);
        session.selection = FeatureSelection::from_ids(template.features.iter().cloned());
        session
    }

    #[must_use]
    pub const fn standard(&self) -> TokenStandard {
        self.standard
    }

    #[must_use]
    pub const fn selection(&self) -> &FeatureSelection {
        &self.selection
    }

    /// Selects or deselects `id`. Deselecting drops the feature's parameter values.
    #[instrument(skip(self))]
    pub fn toggle(&mut self, id: &str) -> SessionSnapshot {
        if !self.selection.toggle(id) {
            self.parameters.retain(|(feature, _), _| feature != id);
        }
        self.snapshot()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let ids = self.selection.ids();
        SessionSnapshot {
            selected: ids.to_vec(),
            validation: validate(&self.registry, ids),
            addable: resolve(&self.registry, ids).into_iter().map(|f| f.id.clone()).collect(),
        }
    }

    /// Features of `category` shown for the session's token standard.
    #[must_use]
    pub fn visible(&self, category: FeatureCategory) -> Vec<&Feature> {
        self.registry.for_standard(category, self.standard)
    }

    /// Parses and stores a parameter value.
    ///
    /// # Errors
    /// * [`DeploymentError::UnknownFeature`] / [`DeploymentError::UnknownParameter`] for names the
    ///   registry does not declare.
    /// * [`DeploymentError::Parameter`] when the raw value is rejected.
    #[instrument(skip(self, raw))]
    pub fn set_parameter(
        &mut self,
        feature_id: &str,
        name: &str,
        raw: &str,
    ) -> Result<ParameterValue, DeploymentError> {
        let feature = self
            .registry
            .get(feature_id)
            .ok_or_else(|| DeploymentError::UnknownFeature { id: feature_id.to_owned(), context: None })?;
        let param = feature.parameter(name).ok_or_else(|| DeploymentError::UnknownParameter {
            feature: feature_id.to_owned(),
            name: name.to_owned(),
            context: None,
        })?;

        let value = parse_parameter(param, raw)?;
        self.parameters.insert((feature_id.to_owned(), name.to_owned()), value.clone());
        Ok(value)
    }

    #[must_use]
    pub fn parameter(&self, feature_id: &str, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(&(feature_id.to_owned(), name.to_owned()))
    }

    /// Checks the selection and collects parameter values.
    ///
    /// # Errors
    /// * [`DeploymentError::InvalidSelection`] with every validation error.
    /// * [`DeploymentError::Parameter`] wrapping [`ParameterError::Missing`] for the first required
    ///   parameter that has neither a value nor a default.
    pub fn finish(&self) -> Result<FinalizedSelection, DeploymentError> {
        let ids = self.selection.ids();
        let validation = validate(&self.registry, ids);
        if !validation.valid {
            return Err(DeploymentError::InvalidSelection { errors: validation.errors, context: None });
        }

        let features = self.registry.features_for(ids);
        let mut parameters = Vec::new();
        for feature in &features {
            for param in &feature.parameters {
                let explicit = self.parameter(&feature.id, &param.name).cloned();
                let (value, defaulted) = match explicit {
                    Some(value) => (value, false),
                    None => match param.kind.default_value() {
                        Some(value) => (value, true),
                        None if param.required => {
                            return Err(ParameterError::Missing {
                                name: format!("{}.{}", feature.id, param.name),
                                context: None,
                            }
                            .into());
                        },
                        None => continue,
                    },
                };
                parameters.push(ResolvedParameter {
                    feature: feature.id.clone(),
                    name: param.name.clone(),
                    value,
                    defaulted,
                });
            }
        }

        let summary = SelectionSummary::from_features(&features);
        info!(
            standard = %self.standard,
            features = summary.feature_count,
            gas = summary.total_gas_impact,
            "Selection finalized"
        );

        Ok(FinalizedSelection {
            standard: self.standard,
            features: features.iter().map(|f| f.id.clone()).collect(),
            parameters,
            summary,
            warnings: validation.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateCatalog;

    const OWNER: &str = "0x5B38Da6a701c568545dCfcB03FcB875f56beddC4";

    #[test]
    fn toggling_recomputes_addable_features() {
        let mut session = WizardSession::new(Registry::builtin(), TokenStandard::Erc20);
        let snapshot = session.toggle("erc20-base");
        assert!(snapshot.validation.valid);
        assert!(snapshot.addable.contains(&"permit".to_owned()));
        assert!(!snapshot.addable.contains(&"votes".to_owned()));

        let snapshot = session.toggle("permit");
        assert!(snapshot.addable.contains(&"votes".to_owned()));

        let snapshot = session.toggle("erc20-base");
        assert_eq!(snapshot.validation.errors, ["EIP-2612 Permit requires ERC20 Standard"]);
    }

    #[test]
    fn deselecting_drops_parameters() {
        let mut session = WizardSession::new(Registry::builtin(), TokenStandard::Erc20);
        session.toggle("ownable");
        session.set_parameter("ownable", "owner", OWNER).expect("valid address");
        assert!(session.parameter("ownable", "owner").is_some());
        session.toggle("ownable");
        assert!(session.parameter("ownable", "owner").is_none());
    }

    #[test]
    fn unknown_names_are_reported() {
        let mut session = WizardSession::new(Registry::builtin(), TokenStandard::Erc20);
        assert!(matches!(
            session.set_parameter("ghost", "x", "1"),
            Err(DeploymentError::UnknownFeature { .. })
        ));
        assert!(matches!(
            session.set_parameter("ownable", "admin", OWNER),
            Err(DeploymentError::UnknownParameter { .. })
        ));
        assert!(matches!(
            session.set_parameter("erc20-base", "decimals", "30"),
            Err(DeploymentError::Parameter { source: ParameterError::OutOfRange { .. }, .. })
        ));
    }

    #[test]
    fn finish_requires_parameters_without_defaults() {
        let template = TemplateCatalog::builtin().get("basic-erc20").cloned().expect("builtin");
        let mut session = WizardSession::from_template(Registry::builtin(), &template);

        let err = session.finish().expect_err("name is missing");
        assert!(matches!(
            err,
            DeploymentError::Parameter { source: ParameterError::Missing { ref name, .. }, .. }
                if name == "erc20-base.name"
        ));

        session.set_parameter("erc20-base", "name", "My Token").expect("text");
        session.set_parameter("erc20-base", "symbol", "MTK").expect("text");
        session.set_parameter("erc20-base", "initialSupply", "1000000").expect("uint");

        let done = session.finish().expect("complete");
        assert_eq!(done.features, ["erc20-base"]);
        let decimals = done.parameters.iter().find(|p| p.name == "decimals").expect("defaulted");
        assert_eq!(decimals.value, ParameterValue::Uint(18));
        assert!(decimals.defaulted);
    }

    #[test]
    fn finish_drops_unknown_ids() {
        let mut session = WizardSession::new(Registry::builtin(), TokenStandard::Erc721);
        session.toggle("erc721-base");
        session.set_parameter("erc721-base", "name", "Apes").expect("text");
        session.set_parameter("erc721-base", "symbol", "APE").expect("text");
        session.toggle("nonexistent");

        let done = session.finish().expect("unknown ids are ignored");
        assert_eq!(done.features, ["erc721-base"]);
        assert_eq!(done.summary.feature_count, done.features.len());
    }

    #[test]
    fn finish_rejects_invalid_selections() {
        let mut session = WizardSession::new(Registry::builtin(), TokenStandard::Erc20);
        session.toggle("ownable");
        session.toggle("access-control");
        let err = session.finish().expect_err("conflict");
        assert!(matches!(
            err,
            DeploymentError::InvalidSelection { ref errors, .. }
                if errors == &["Ownable conflicts with Role-Based Access"]
        ));
    }

    #[test]
    fn visible_features_follow_the_standard() {
        let session = WizardSession::new(Registry::builtin(), TokenStandard::Erc1155);
        let core: Vec<_> = session.visible(FeatureCategory::Core).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(core, ["mintable", "burnable", "erc1155-base"]);
    }
}
