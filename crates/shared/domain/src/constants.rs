//! Identifiers of the built-in contract features.

pub const ERC20_BASE: &str = "erc20-base";
pub const MINTABLE: &str = "mintable";
pub const BURNABLE: &str = "burnable";
pub const PAUSABLE: &str = "pausable";
pub const OWNABLE: &str = "ownable";
pub const ACCESS_CONTROL: &str = "access-control";
pub const PERMIT: &str = "permit";
pub const SNAPSHOT: &str = "snapshot";
pub const VOTES: &str = "votes";
pub const TAX: &str = "tax";
pub const REFLECTION: &str = "reflection";
pub const DEFLATION: &str = "deflation";
pub const ERC721_BASE: &str = "erc721-base";
pub const ENUMERABLE: &str = "enumerable";
pub const ROYALTY: &str = "royalty";
pub const ERC1155_BASE: &str = "erc1155-base";

/// Referenced by `mintable` as a conflict but never registered.
pub const FIXED_SUPPLY: &str = "fixed-supply";
