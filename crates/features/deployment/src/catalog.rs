//! Built-in feature table.

use tforge_domain::constants::{
    ACCESS_CONTROL, BURNABLE, DEFLATION, ENUMERABLE, ERC20_BASE, ERC721_BASE, ERC1155_BASE,
    FIXED_SUPPLY, MINTABLE, OWNABLE, PAUSABLE, PERMIT, REFLECTION, ROYALTY, SNAPSHOT, TAX, VOTES,
};
use tforge_domain::feature::{Feature, FeatureCategory, RiskLevel};
use tforge_domain::parameter::{FeatureParameter, ParameterKind};
use tforge_domain::standard::StandardSet;

/// Features in wizard display order.
pub(crate) fn builtin_features() -> Vec<Feature> {
    vec![
        erc20_base(),
        Feature::builder()
            .id(MINTABLE)
            .name("Mintable")
            .description("Allows authorized addresses to create new tokens")
            .category(FeatureCategory::Core)
            .risk_level(RiskLevel::Moderate)
            .dependencies(&[ERC20_BASE])
            .conflicts(&[FIXED_SUPPLY])
            .gas_impact(50_000)
            .complexity(2)
            .parameters(vec![uint(
                "maxSupply",
                "Maximum mintable supply (0 = unlimited)",
                false,
                ParameterKind::uint(None, None, Some(0)),
                Some("10000000"),
            )])
            .warnings(&["Unlimited minting can devalue existing tokens"])
            .build(),
        Feature::builder()
            .id(BURNABLE)
            .name("Burnable")
            .description("Allows token holders to destroy their tokens")
            .category(FeatureCategory::Core)
            .risk_level(RiskLevel::Safe)
            .dependencies(&[ERC20_BASE])
            .gas_impact(30_000)
            .complexity(1)
            .build(),
        Feature::builder()
            .id(PAUSABLE)
            .name("Pausable")
            .description("Allows pausing all token transfers in emergency situations")
            .category(FeatureCategory::Security)
            .risk_level(RiskLevel::Dangerous)
            .dependencies(&[ERC20_BASE])
            .gas_impact(80_000)
            .complexity(3)
            .audit_required(true)
            .warnings(&["Can freeze all token transfers", "Centralized control risk"])
            .build(),
        Feature::builder()
            .id(OWNABLE)
            .name("Ownable")
            .description("Single owner access control mechanism")
            .category(FeatureCategory::Security)
            .risk_level(RiskLevel::Moderate)
            .conflicts(&[ACCESS_CONTROL])
            .gas_impact(40_000)
            .complexity(2)
            .parameters(vec![address("owner", "Initial owner address", false)])
            .warnings(&["Single point of failure", "Centralized control"])
            .build(),
        Feature::builder()
            .id(ACCESS_CONTROL)
            .name("Role-Based Access")
            .description("Flexible role-based access control system")
            .category(FeatureCategory::Security)
            .risk_level(RiskLevel::Moderate)
            .conflicts(&[OWNABLE])
            .replaces(&[OWNABLE])
            .gas_impact(120_000)
            .complexity(4)
            .audit_required(true)
            .warnings(&["Complex permission management", "Role enumeration risk"])
            .build(),
        Feature::builder()
            .id(PERMIT)
            .name("EIP-2612 Permit")
            .description("Gasless approvals using off-chain signatures")
            .category(FeatureCategory::Utilities)
            .risk_level(RiskLevel::Safe)
            .dependencies(&[ERC20_BASE])
            .gas_impact(150_000)
            .complexity(3)
            .warnings(&["Signature replay risks if not handled properly"])
            .build(),
        Feature::builder()
            .id(SNAPSHOT)
            .name("Balance Snapshots")
            .description("Take snapshots of token balances at specific blocks")
            .category(FeatureCategory::Governance)
            .risk_level(RiskLevel::Safe)
            .dependencies(&[ERC20_BASE])
            .gas_impact(200_000)
            .complexity(4)
            .warnings(&["Increased gas costs for transfers"])
            .build(),
        Feature::builder()
            .id(VOTES)
            .name("Governance Votes")
            .description("Voting power delegation for governance")
            .category(FeatureCategory::Governance)
            .risk_level(RiskLevel::Safe)
            .dependencies(&[ERC20_BASE, PERMIT])
            .gas_impact(300_000)
            .complexity(5)
            .audit_required(true)
            .warnings(&["Complex delegation logic", "Checkpoint gas costs"])
            .build(),
        Feature::builder()
            .id(TAX)
            .name("Transaction Tax")
            .description("Applies tax on transfers with configurable rates")
            .category(FeatureCategory::Economics)
            .risk_level(RiskLevel::Dangerous)
            .dependencies(&[ERC20_BASE])
            .gas_impact(180_000)
            .complexity(6)
            .audit_required(true)
            .parameters(vec![
                uint(
                    "initialTaxRate",
                    "Initial tax rate in basis points (100 = 1%)",
                    false,
                    ParameterKind::uint(Some(0), Some(1000), Some(0)),
                    None,
                ),
                address("taxReceiver", "Address to receive tax proceeds", false),
            ])
            .warnings(&["High gas costs", "MEV opportunities", "Regulatory concerns"])
            .build(),
        Feature::builder()
            .id(REFLECTION)
            .name("Reflection Rewards")
            .description("Automatic reward distribution to all holders")
            .category(FeatureCategory::Economics)
            .risk_level(RiskLevel::Critical)
            .dependencies(&[ERC20_BASE])
            .conflicts(&[VOTES, SNAPSHOT])
            .gas_impact(500_000)
            .complexity(10)
            .audit_required(true)
            .parameters(vec![uint(
                "reflectionFee",
                "Reflection fee percentage (in basis points)",
                true,
                ParameterKind::uint(Some(0), Some(1000), Some(200)),
                None,
            )])
            .warnings(&["Extremely complex", "High gas costs", "Difficult to audit"])
            .build(),
        Feature::builder()
            .id(DEFLATION)
            .name("Deflationary Burn")
            .description("Burns tokens on each transfer to reduce supply")
            .category(FeatureCategory::Economics)
            .risk_level(RiskLevel::Dangerous)
            .dependencies(&[ERC20_BASE, BURNABLE])
            .gas_impact(120_000)
            .complexity(4)
            .audit_required(true)
            .parameters(vec![uint(
                "initialBurnRate",
                "Initial burn rate in basis points (100 = 1%)",
                false,
                ParameterKind::uint(Some(0), Some(500), Some(100)),
                None,
            )])
            .warnings(&["Reduces circulating supply", "Affects token economics"])
            .build(),
        Feature::builder()
            .id(ERC721_BASE)
            .name("ERC721 Standard")
            .description("Non-fungible token standard implementation")
            .category(FeatureCategory::Core)
            .risk_level(RiskLevel::Safe)
            .conflicts(&[ERC20_BASE, ERC1155_BASE])
            .complexity(2)
            .parameters(vec![
                text("name", "NFT collection name", "My NFT Collection"),
                text("symbol", "NFT collection symbol", "MNC"),
            ])
            .standards(StandardSet::ERC721)
            .build(),
        Feature::builder()
            .id(ENUMERABLE)
            .name("Enumerable Extension")
            .description("Adds enumeration capabilities to NFTs")
            .category(FeatureCategory::Utilities)
            .risk_level(RiskLevel::Safe)
            .dependencies(&[ERC721_BASE])
            .gas_impact(200_000)
            .complexity(3)
            .warnings(&["Increases gas costs for minting/transferring"])
            .build(),
        Feature::builder()
            .id(ROYALTY)
            .name("EIP-2981 Royalties")
            .description("Standard royalty information for NFT sales")
            .category(FeatureCategory::Economics)
            .risk_level(RiskLevel::Safe)
            .dependencies(&[ERC721_BASE])
            .gas_impact(80_000)
            .complexity(3)
            .parameters(vec![
                address("royaltyReceiver", "Address to receive royalties", true),
                uint(
                    "royaltyPercentage",
                    "Royalty percentage (in basis points, 500 = 5%)",
                    true,
                    ParameterKind::uint(Some(0), Some(1000), Some(500)),
                    None,
                ),
            ])
            .warnings(&["Not enforced by all marketplaces"])
            .build(),
        Feature::builder()
            .id(ERC1155_BASE)
            .name("ERC1155 Multi-Token")
            .description("Multi-token standard supporting both fungible and non-fungible tokens")
            .category(FeatureCategory::Core)
            .risk_level(RiskLevel::Safe)
            .conflicts(&[ERC20_BASE, ERC721_BASE])
            .complexity(4)
            .parameters(vec![text(
                "uri",
                "URI template for token metadata",
                "https://api.example.com/token/{id}.json",
            )])
            .warnings(&["Complex token ID management"])
            .standards(StandardSet::ERC1155)
            .build(),
    ]
}

fn erc20_base() -> Feature {
    Feature::builder()
        .id(ERC20_BASE)
        .name("ERC20 Standard")
        .description("Core ERC20 functionality with transfer, approve, and allowance")
        .category(FeatureCategory::Core)
        .risk_level(RiskLevel::Safe)
        .conflicts(&[ERC721_BASE, ERC1155_BASE])
        .complexity(1)
        .parameters(vec![
            text("name", "Token name (e.g., \"My Token\")", "My Token"),
            text("symbol", "Token symbol (e.g., \"MTK\")", "MTK"),
            uint(
                "decimals",
                "Number of decimal places",
                true,
                ParameterKind::uint(Some(0), Some(18), Some(18)),
                None,
            ),
            uint(
                "initialSupply",
                "Initial token supply",
                true,
                ParameterKind::uint(None, None, None),
                Some("1000000"),
            ),
        ])
        .standards(StandardSet::ERC20)
        .build()
}

/// Required free-text parameter.
fn text(name: &str, description: &str, placeholder: &str) -> FeatureParameter {
    FeatureParameter::builder()
        .name(name)
        .description(description)
        .required(true)
        .placeholder(placeholder)
        .kind(ParameterKind::text())
        .build()
}

fn address(name: &str, description: &str, required: bool) -> FeatureParameter {
    FeatureParameter::builder()
        .name(name)
        .description(description)
        .required(required)
        .placeholder("0x...")
        .kind(ParameterKind::address())
        .build()
}

fn uint(
    name: &str,
    description: &str,
    required: bool,
    kind: ParameterKind,
    placeholder: Option<&str>,
) -> FeatureParameter {
    let mut param =
        FeatureParameter::builder().name(name).description(description).required(required).kind(kind).build();
    param.placeholder = placeholder.map(str::to_owned);
    param
}
