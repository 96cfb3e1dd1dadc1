use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Token standard a contract is generated for.
#[derive(
    Debug,
    Default,
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
)]
#[strum(ascii_case_insensitive)]
pub enum TokenStandard {
    #[default]
    #[serde(rename = "ERC20", alias = "erc20")]
    #[strum(serialize = "ERC20")]
    Erc20,
    #[serde(rename = "ERC721", alias = "erc721")]
    #[strum(serialize = "ERC721")]
    Erc721,
    #[serde(rename = "ERC1155", alias = "erc1155")]
    #[strum(serialize = "ERC1155")]
    Erc1155,
}

bitflags! {
    /// Set of token standards a feature is offered for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    pub struct StandardSet: u8 {
        const ERC20 = 1 << 0;
        const ERC721 = 1 << 1;
        const ERC1155 = 1 << 2;

        const ALL = Self::ERC20.bits() | Self::ERC721.bits() | Self::ERC1155.bits();
    }
}

impl StandardSet {
    /// Whether the set includes `standard`.
    #[must_use]
    pub const fn supports(self, standard: TokenStandard) -> bool {
        self.contains(Self::of(standard))
    }

    /// Single-standard set.
    #[must_use]
    pub const fn of(standard: TokenStandard) -> Self {
        match standard {
            TokenStandard::Erc20 => Self::ERC20,
            TokenStandard::Erc721 => Self::ERC721,
            TokenStandard::Erc1155 => Self::ERC1155,
        }
    }
}

impl Default for StandardSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<TokenStandard> for StandardSet {
    fn from(standard: TokenStandard) -> Self {
        Self::of(standard)
    }
}

impl From<&str> for StandardSet {
    fn from(s: &str) -> Self {
        match s {
            "all" | "*" => Self::ALL,
            other => other.parse::<TokenStandard>().map_or_else(|_| Self::empty(), Self::of),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standards_case_insensitively() {
        assert_eq!("erc721".parse::<TokenStandard>(), Ok(TokenStandard::Erc721));
        assert_eq!("ERC1155".parse::<TokenStandard>(), Ok(TokenStandard::Erc1155));
        assert!("erc777".parse::<TokenStandard>().is_err());
        assert_eq!(TokenStandard::Erc20.to_string(), "ERC20");
    }

    #[test]
    fn standard_set_from_str() {
        assert_eq!(StandardSet::from("*"), StandardSet::ALL);
        assert_eq!(StandardSet::from("erc20"), StandardSet::ERC20);
        assert_eq!(StandardSet::from("nope"), StandardSet::empty());
    }

    #[test]
    fn supports_checks_membership() {
        let set = StandardSet::ERC20 | StandardSet::ERC1155;
        assert!(set.supports(TokenStandard::Erc20));
        assert!(!set.supports(TokenStandard::Erc721));
        assert!(StandardSet::default().supports(TokenStandard::Erc721));
    }
}
