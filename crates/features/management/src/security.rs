//! # Contract Screening
//!
//! Offline risk scoring of a contract before the user approves it as a token spender. Each
//! finding adds to a 0-100 score that maps onto a [`SecurityLevel`]. Only local data is used:
//! configured address lists, the requested allowance and the token's name and symbol.

use crate::assessment::RiskColor;
use crate::error::ManagementError;
use fxhash::FxHashSet;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use strum::{AsRefStr, Display};
use tforge_domain::config::SecurityConfig;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

/// Allowances at or above `2^224 - 1` are treated as unlimited.
static UNLIMITED_THRESHOLD: LazyLock<BigUint> = LazyLock::new(|| (BigUint::from(1u8) << 224u32) - 1u32);

const SUSPICIOUS_NAMES: &[&str] =
    &["airdrop", "claim", "reward", "bonus", "gift", "free", "test", "fake", "scam", "💰", "🎁"];
const SUSPICIOUS_SYMBOLS: &[&str] = &["FREE", "GIFT", "AIRDROP", "CLAIM", "BONUS", "REWARD"];

const BLACKLIST_SCORE: u32 = 100;
const WHITELIST_CREDIT: u32 = 30;
const UNLIMITED_ALLOWANCE_SCORE: u32 = 40;
const SUSPICIOUS_NAME_SCORE: u32 = 25;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SecurityLevel {
    /// Level for a raw score when no flag is critical.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            70.. => Self::High,
            40.. => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Critical => "DO NOT INTERACT with this contract. It has been identified as malicious.",
            Self::High => "EXTREME CAUTION recommended. This contract shows multiple red flags.",
            Self::Medium => "Exercise caution. Review the security flags before proceeding.",
            Self::Low => "Low risk detected. Standard caution advised.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagKind {
    Blacklisted,
    UnlimitedAllowance,
    SuspiciousName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityFlag {
    #[serde(rename = "type")]
    pub kind: FlagKind,
    pub severity: SecurityLevel,
    pub message: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityAnalysis {
    pub risk_level: SecurityLevel,
    /// Capped at 100.
    pub risk_score: u8,
    pub flags: Vec<SecurityFlag>,
    pub recommendation: String,
}

/// Short label for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecurityBadge {
    pub color: RiskColor,
    pub icon: &'static str,
    pub text: &'static str,
}

impl SecurityAnalysis {
    #[must_use]
    pub const fn badge(&self) -> SecurityBadge {
        let (color, icon, text) = match self.risk_level {
            SecurityLevel::Critical => (RiskColor::Red, "🛑", "SCAM"),
            SecurityLevel::High => (RiskColor::Orange, "⚠️", "HIGH RISK"),
            SecurityLevel::Medium => (RiskColor::Yellow, "⚠️", "CAUTION"),
            SecurityLevel::Low => (RiskColor::Green, "✅", "LOW RISK"),
        };
        SecurityBadge { color, icon, text }
    }
}

/// A requested token allowance (uint256).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allowance(BigUint);

impl Allowance {
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        self.0 >= *UNLIMITED_THRESHOLD
    }
}

impl FromStr for Allowance {
    type Err = ManagementError;

    /// Decimal digits, or hex digits after `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let parsed = match raw.strip_prefix("0x") {
            Some(hex) => BigUint::parse_bytes(hex.as_bytes(), 16),
            None => BigUint::parse_bytes(raw.as_bytes(), 10),
        };
        parsed.map(Self).ok_or_else(|| ManagementError::InvalidAllowance { value: s.to_owned(), context: None })
    }
}

/// What is known about a contract before approving it.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ContractProfile {
    #[builder(setter(into))]
    pub address: String,
    #[builder(default, setter(strip_option))]
    pub allowance: Option<Allowance>,
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub symbol: Option<String>,
}

/// Blacklist and whitelist of contract addresses, stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct ContractScreen {
    blacklist: FxHashSet<String>,
    whitelist: FxHashSet<String>,
}

impl ContractScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self {
            blacklist: config.blacklist.iter().map(|a| normalize(a)).collect(),
            whitelist: config.whitelist.iter().map(|a| normalize(a)).collect(),
        }
    }

    pub fn block(&mut self, address: &str, reason: &str) {
        info!(address, reason, "Address blacklisted");
        self.blacklist.insert(normalize(address));
    }

    pub fn trust(&mut self, address: &str, reason: &str) {
        info!(address, reason, "Address whitelisted");
        self.whitelist.insert(normalize(address));
    }

    #[must_use]
    pub fn is_blocked(&self, address: &str) -> bool {
        self.blacklist.contains(&normalize(address))
    }

    #[must_use]
    pub fn is_trusted(&self, address: &str) -> bool {
        self.whitelist.contains(&normalize(address))
    }

    /// Scores a contract. Findings are checked in a fixed order and the whitelist credit only
    /// offsets the blacklist penalty.
    #[must_use]
    pub fn analyze(&self, profile: &ContractProfile) -> SecurityAnalysis {
        let mut flags = Vec::new();
        let mut score = 0u32;

        if self.is_blocked(&profile.address) {
            flags.push(flag(
                FlagKind::Blacklisted,
                SecurityLevel::Critical,
                "Known scam contract",
                "This address has been identified as a scam or malicious contract".to_owned(),
            ));
            score += BLACKLIST_SCORE;
        }
        if self.is_trusted(&profile.address) {
            score = score.saturating_sub(WHITELIST_CREDIT);
        }

        if profile.allowance.as_ref().is_some_and(Allowance::is_unlimited) {
            flags.push(flag(
                FlagKind::UnlimitedAllowance,
                SecurityLevel::High,
                "Unlimited allowance detected",
                "This approval grants unlimited access to your tokens. Consider setting a specific amount \
                 instead."
                    .to_owned(),
            ));
            score += UNLIMITED_ALLOWANCE_SCORE;
        }

        if let Some(name) = profile.name.as_deref().filter(|n| has_suspicious_name(n)) {
            flags.push(flag(
                FlagKind::SuspiciousName,
                SecurityLevel::Medium,
                "Suspicious token name",
                format!("Token name \"{name}\" contains suspicious keywords commonly used in scams"),
            ));
            score += SUSPICIOUS_NAME_SCORE;
        }
        if let Some(symbol) = profile.symbol.as_deref().filter(|s| has_suspicious_symbol(s)) {
            flags.push(flag(
                FlagKind::SuspiciousName,
                SecurityLevel::Medium,
                "Suspicious token symbol",
                format!("Token symbol \"{symbol}\" contains suspicious keywords commonly used in scams"),
            ));
            score += SUSPICIOUS_NAME_SCORE;
        }

        let risk_level = if flags.iter().any(|f| f.severity == SecurityLevel::Critical) {
            SecurityLevel::Critical
        } else {
            SecurityLevel::from_score(score)
        };
        debug!(address = %profile.address, score, level = %risk_level, "Contract screened");

        SecurityAnalysis {
            risk_level,
            risk_score: u8::try_from(score.min(100)).unwrap_or(100),
            flags,
            recommendation: risk_level.recommendation().to_owned(),
        }
    }
}

#[must_use]
pub fn has_suspicious_name(name: &str) -> bool {
    let name = name.to_lowercase();
    SUSPICIOUS_NAMES.iter().any(|keyword| name.contains(keyword))
}

#[must_use]
pub fn has_suspicious_symbol(symbol: &str) -> bool {
    let symbol = symbol.to_uppercase();
    SUSPICIOUS_SYMBOLS.iter().any(|keyword| symbol.contains(keyword))
}

fn flag(kind: FlagKind, severity: SecurityLevel, message: &str, details: String) -> SecurityFlag {
    SecurityFlag { kind, severity, message: message.to_owned(), details }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAM: &str = "0xDeaDbeefdEAdbeefdEadbEEFdeadbeEFdEaDbeeF";
    const MAX_UINT256: &str = "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";

    #[test]
    fn clean_contracts_are_low_risk() {
        let analysis = ContractScreen::new().analyze(&ContractProfile::builder().address(SCAM).build());
        assert_eq!(analysis.risk_level, SecurityLevel::Low);
        assert_eq!(analysis.risk_score, 0);
        assert!(analysis.flags.is_empty());
        assert_eq!(analysis.badge().text, "LOW RISK");
    }

    #[test]
    fn blacklisted_contracts_are_critical_even_when_trusted() {
        let mut screen = ContractScreen::new();
        screen.block(SCAM, "drainer");
        screen.trust(SCAM, "mistake");

        let analysis = screen.analyze(&ContractProfile::builder().address(SCAM.to_lowercase()).build());
        assert_eq!(analysis.risk_level, SecurityLevel::Critical);
        assert_eq!(analysis.risk_score, 70);
        assert_eq!(analysis.flags[0].kind, FlagKind::Blacklisted);
        assert_eq!(analysis.recommendation, SecurityLevel::Critical.recommendation());
        assert_eq!(analysis.badge().color, RiskColor::Red);
    }

    #[test]
    fn whitelist_credit_does_not_offset_later_findings() {
        let config = SecurityConfig { blacklist: Vec::new(), whitelist: vec![SCAM.to_owned()] };
        let profile = ContractProfile::builder()
            .address(SCAM)
            .allowance(MAX_UINT256.parse().expect("hex"))
            .build();
        let analysis = ContractScreen::from_config(&config).analyze(&profile);
        assert_eq!(analysis.risk_score, 40);
        assert_eq!(analysis.risk_level, SecurityLevel::Medium);
    }

    #[test]
    fn scores_add_up_and_are_capped() {
        let profile = ContractProfile::builder()
            .address(SCAM)
            .allowance(MAX_UINT256.parse().expect("hex"))
            .name("Free Airdrop")
            .symbol("gift")
            .build();
        let analysis = ContractScreen::new().analyze(&profile);
        assert_eq!(analysis.risk_score, 90);
        assert_eq!(analysis.risk_level, SecurityLevel::High);
        assert_eq!(analysis.flags.len(), 3);
        assert_eq!(analysis.flags[2].message, "Suspicious token symbol");

        let mut screen = ContractScreen::new();
        screen.block(SCAM, "drainer");
        assert_eq!(screen.analyze(&profile).risk_score, 100);
    }

    #[test]
    fn allowance_threshold() {
        let below: Allowance = format!("0x{}", "f".repeat(55)).parse().expect("hex");
        let at: Allowance = format!("0x{}", "f".repeat(56)).parse().expect("hex");
        assert!(!below.is_unlimited());
        assert!(at.is_unlimited());
        assert!(!"1000000".parse::<Allowance>().expect("decimal").is_unlimited());
        assert!(matches!("lots".parse::<Allowance>(), Err(ManagementError::InvalidAllowance { .. })));
    }

    #[test]
    fn keyword_matching() {
        assert!(has_suspicious_name("🎁 Bonanza"));
        assert!(has_suspicious_name("ClaimToken"));
        assert!(!has_suspicious_name("Tether USD"));
        assert!(has_suspicious_symbol("xreward"));
        assert!(!has_suspicious_symbol("USDT"));
        assert_eq!(SecurityLevel::Critical.to_string(), "CRITICAL");
        assert_eq!(FlagKind::UnlimitedAllowance.to_string(), "UNLIMITED_ALLOWANCE");
    }
}
