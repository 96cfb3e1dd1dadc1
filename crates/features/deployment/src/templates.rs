//! Predefined starting points for the configuration wizard.
//!
//! A template is only a pre-filled selection: it goes through the same validator as any hand-made
//! selection and its data is not repaired when it disagrees with the registry.

use crate::error::DeploymentError;
use crate::registry::Registry;
use crate::validator::{ValidationResult, validate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use tforge_domain::constants::{
    ACCESS_CONTROL, BURNABLE, DEFLATION, ENUMERABLE, ERC20_BASE, ERC721_BASE, ERC1155_BASE,
    MINTABLE, OWNABLE, PAUSABLE, PERMIT, REFLECTION, ROYALTY, TAX,
};
use tforge_domain::standard::TokenStandard;

static BUILTIN: LazyLock<TemplateCatalog> =
    LazyLock::new(|| TemplateCatalog { templates: builtin_templates().into() });

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EvmVersion {
    London,
    Paris,
    Shanghai,
    Cancun,
}

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
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TemplateComplexity {
    Basic,
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub standard: TokenStandard,
    /// Feature ids selected when the template is applied.
    pub features: Vec<String>,
    pub compatibility: Vec<EvmVersion>,
    pub gas_estimate: u64,
    /// 1-100, higher is safer.
    pub audit_score: u8,
    pub complexity: TemplateComplexity,
    pub tags: Vec<String>,
}

impl ContractTemplate {
    /// Validates the template's feature list against `registry`.
    #[must_use]
    pub fn validate(&self, registry: &Registry) -> ValidationResult {
        validate(registry, &self.features)
    }
}

/// Immutable list of templates.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Arc<[ContractTemplate]>,
}

impl TemplateCatalog {
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    #[must_use]
    pub fn new(templates: Vec<ContractTemplate>) -> Self {
        Self { templates: templates.into() }
    }

    /// # Errors
    /// Returns [`DeploymentError::UnknownTemplate`] if no template has this id.
    pub fn get(&self, id: &str) -> Result<&ContractTemplate, DeploymentError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DeploymentError::UnknownTemplate { id: id.to_owned(), context: None })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContractTemplate> {
        self.templates.iter()
    }

    #[must_use]
    pub fn for_standard(&self, standard: TokenStandard) -> Vec<&ContractTemplate> {
        self.iter().filter(|t| t.standard == standard).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

struct Seed<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    standard: TokenStandard,
    features: &'a [&'a str],
    gas_estimate: u64,
    audit_score: u8,
    complexity: TemplateComplexity,
    tags: &'a [&'a str],
}

impl From<Seed<'_>> for ContractTemplate {
    fn from(seed: Seed<'_>) -> Self {
        Self {
            id: seed.id.to_owned(),
            name: seed.name.to_owned(),
            description: seed.description.to_owned(),
            standard: seed.standard,
            features: seed.features.iter().map(|&f| f.to_owned()).collect(),
            compatibility: vec![EvmVersion::Shanghai, EvmVersion::Cancun],
            gas_estimate: seed.gas_estimate,
            audit_score: seed.audit_score,
            complexity: seed.complexity,
            tags: seed.tags.iter().map(|&t| t.to_owned()).collect(),
        }
    }
}

fn builtin_templates() -> Vec<ContractTemplate> {
    use TemplateComplexity::{Advanced, Basic, Expert, Intermediate};
    use TokenStandard::{Erc20, Erc721, Erc1155};

    [
        Seed {
            id: "basic-erc20",
            name: "Basic ERC20 Token",
            description: "Simple ERC20 token with basic functionality",
            standard: Erc20,
            features: &[ERC20_BASE],
            gas_estimate: 800_000,
            audit_score: 95,
            complexity: Basic,
            tags: &["simple", "standard", "beginner"],
        },
        Seed {
            id: "mintable-erc20",
            name: "Mintable ERC20",
            description: "ERC20 token with minting capabilities",
            standard: Erc20,
            features: &[ERC20_BASE, MINTABLE, OWNABLE],
            gas_estimate: 1_200_000,
            audit_score: 88,
            complexity: Intermediate,
            tags: &["mintable", "ownable", "flexible"],
        },
        Seed {
            id: "advanced-erc20",
            name: "Advanced ERC20",
            description: "Feature-rich ERC20 with all modern capabilities",
            standard: Erc20,
            features: &[ERC20_BASE, MINTABLE, BURNABLE, PAUSABLE, ACCESS_CONTROL, PERMIT],
            gas_estimate: 2_000_000,
            audit_score: 82,
            complexity: Advanced,
            tags: &["advanced", "secure", "modern"],
        },
        Seed {
            id: "deflationary-erc20",
            name: "Deflationary Token",
            description: "ERC20 with burn-on-transfer mechanism",
            standard: Erc20,
            features: &[ERC20_BASE, BURNABLE, DEFLATION, OWNABLE],
            gas_estimate: 1_500_000,
            audit_score: 75,
            complexity: Advanced,
            tags: &["deflationary", "burn", "tokenomics"],
        },
        Seed {
            id: "reflection-erc20",
            name: "Reflection Token",
            description: "ERC20 with automatic reward distribution",
            standard: Erc20,
            features: &[ERC20_BASE, REFLECTION, TAX, OWNABLE],
            gas_estimate: 2_500_000,
            audit_score: 68,
            complexity: Expert,
            tags: &["reflection", "rewards", "complex"],
        },
        Seed {
            id: "basic-nft",
            name: "Basic NFT Collection",
            description: "Standard ERC721 NFT collection",
            standard: Erc721,
            features: &[ERC721_BASE, ENUMERABLE, OWNABLE],
            gas_estimate: 1_800_000,
            audit_score: 90,
            complexity: Intermediate,
            tags: &["nft", "collection", "art"],
        },
        Seed {
            id: "advanced-nft",
            name: "Advanced NFT",
            description: "Feature-rich NFT with royalties and utilities",
            standard: Erc721,
            features: &[ERC721_BASE, ENUMERABLE, ROYALTY, PAUSABLE, ACCESS_CONTROL],
            gas_estimate: 2_800_000,
            audit_score: 85,
            complexity: Advanced,
            tags: &["nft", "royalty", "advanced"],
        },
        Seed {
            id: "multi-token",
            name: "Multi-Token Collection",
            description: "ERC1155 for multiple token types",
            standard: Erc1155,
            features: &[ERC1155_BASE, MINTABLE, BURNABLE, PAUSABLE, ACCESS_CONTROL],
            gas_estimate: 2_200_000,
            audit_score: 88,
            complexity: Advanced,
            tags: &["multi-token", "gaming", "versatile"],
        },
    ]
    .into_iter()
    .map(ContractTemplate::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erc20_templates_are_consistent() {
        let registry = Registry::builtin();
        let catalog = TemplateCatalog::builtin();
        for template in catalog.for_standard(TokenStandard::Erc20) {
            let result = template.validate(&registry);
            assert!(result.valid, "{}: {:?}", template.id, result.errors);
        }
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn inconsistent_templates_are_reported_not_repaired() {
        let registry = Registry::builtin();
        let template = TemplateCatalog::builtin().get("advanced-nft").cloned().expect("builtin");
        let result = template.validate(&registry);
        assert_eq!(result.errors, ["Pausable requires ERC20 Standard"]);
        assert!(template.features.iter().any(|f| f == PAUSABLE));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let err = TemplateCatalog::builtin().get("meme-coin").expect_err("unknown");
        assert!(matches!(err, DeploymentError::UnknownTemplate { ref id, .. } if id == "meme-coin"));
    }

    #[test]
    fn evm_versions_parse_case_insensitively() {
        assert_eq!("Cancun".parse::<EvmVersion>(), Ok(EvmVersion::Cancun));
        assert_eq!(TemplateComplexity::Expert.to_string(), "expert");
    }
}
