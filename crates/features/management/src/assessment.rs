//! # Risk Assessment
//!
//! Confirmation requirements for each risk level and the offline part of the preflight run that
//! precedes a management call. Checks that need a chain connection (ownership, network, contract
//! state) belong to the wallet layer and are not evaluated here.

use crate::functions::ManagementFunction;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use tforge_domain::feature::RiskLevel;
use tracing::debug;

pub const DEFAULT_GAS_ESTIMATE: u64 = 100_000;
/// Estimates at or above this are reported as a warning.
pub const HIGH_GAS_THRESHOLD: u64 = 1_000_000;
pub const LARGE_MINT_AMOUNT: u128 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RiskColor {
    Green,
    Yellow,
    Orange,
    Red,
}

/// How the user must confirm a call before it is sent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConfirmationType {
    None,
    Simple,
    /// The user types the function name.
    Typed,
    MultiStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskClassification {
    pub level: RiskLevel,
    pub color: RiskColor,
    pub confirmation_type: ConfirmationType,
    pub warning_message: &'static str,
}

impl RiskClassification {
    #[must_use]
    pub const fn for_level(level: RiskLevel) -> Self {
        let (color, confirmation_type, warning_message) = match level {
            RiskLevel::Safe => (RiskColor::Green, ConfirmationType::None, "This operation is generally safe to perform."),
            RiskLevel::Moderate => (
                RiskColor::Yellow,
                ConfirmationType::Simple,
                "This operation will modify token state. Please review carefully.",
            ),
            RiskLevel::Dangerous => (
                RiskColor::Orange,
                ConfirmationType::Typed,
                "This operation can significantly affect token holders and functionality.",
            ),
            RiskLevel::Critical => (
                RiskColor::Red,
                ConfirmationType::MultiStep,
                "CRITICAL: This operation is irreversible and can permanently affect your token.",
            ),
        };
        Self { level, color, confirmation_type, warning_message }
    }
}

/// What the user has to go through before calling a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub confirmation_type: ConfirmationType,
    pub warning_message: String,
    /// Checklist shown to the user, in display order.
    pub preflight_checks: Vec<&'static str>,
}

const COMMON_CHECKS: &[&str] = &["Verify contract ownership", "Estimate gas costs", "Check network connection"];

const NAME_CHECKS: &[(&str, &[&str])] = &[
    ("mint", &["Check total supply limits", "Verify recipient address"]),
    ("burn", &["Verify sufficient balance", "Check burn impact on supply"]),
    ("pause", &["Confirm emergency situation", "Notify token holders"]),
    ("ownership", &["Verify new owner capabilities", "Test new owner access", "Prepare handover documentation"]),
];

const fn level_checks(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::Safe => &[],
        RiskLevel::Moderate => &["Validate input parameters", "Check current contract state"],
        RiskLevel::Dangerous => {
            &["Verify function permissions", "Check contract pause state", "Validate impact on token holders"]
        },
        RiskLevel::Critical => &[
            "Verify irreversible action understanding",
            "Check for existing safeguards",
            "Validate new owner address (if applicable)",
            "Confirm backup plans",
        ],
    }
}

#[must_use]
pub fn assess_function_risk(function: &ManagementFunction) -> RiskAssessment {
    let classification = RiskClassification::for_level(function.risk_level);
    let name = function.name.to_lowercase();

    let mut preflight_checks = COMMON_CHECKS.to_vec();
    preflight_checks.extend_from_slice(level_checks(function.risk_level));
    for (needle, checks) in NAME_CHECKS {
        if name.contains(needle) {
            preflight_checks.extend_from_slice(checks);
        }
    }

    RiskAssessment {
        risk_level: function.risk_level,
        confirmation_type: classification.confirmation_type,
        warning_message: classification.warning_message.to_owned(),
        preflight_checks,
    }
}

/// A management call prepared for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    /// Solidity name of the called function.
    pub function_name: String,
    pub contract_address: String,
    /// Arguments as entered, in call order.
    pub args: Vec<String>,
    pub gas_estimate: u64,
    pub risk_level: RiskLevel,
}

impl ExecutionPlan {
    #[must_use]
    pub fn new(contract_address: impl Into<String>, function: &ManagementFunction, args: Vec<String>) -> Self {
        Self {
            function_name: function.solidity_name().to_owned(),
            contract_address: contract_address.into(),
            args,
            gas_estimate: DEFAULT_GAS_ESTIMATE,
            risk_level: function.risk_level,
        }
    }

    #[must_use]
    pub const fn with_gas_estimate(mut self, gas_estimate: u64) -> Self {
        self.gas_estimate = gas_estimate;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Passed,
    Failed,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightCheck {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    /// A failed critical check blocks execution.
    pub critical: bool,
}

impl PreflightCheck {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, critical: bool) -> Self {
        Self { name: name.to_owned(), status, message: message.into(), critical }
    }
}

/// Runs the preflight checks that need no chain access.
#[must_use]
pub fn local_preflight(plan: &ExecutionPlan) -> Vec<PreflightCheck> {
    let mut checks = vec![gas_check(plan), parameter_check(plan)];
    if plan.risk_level >= RiskLevel::Dangerous {
        checks.push(high_risk_check(plan));
    }
    debug!(
        function = %plan.function_name,
        blocked = should_block_execution(&checks),
        "Preflight evaluated"
    );
    checks
}

/// `true` when any critical check failed.
#[must_use]
pub fn should_block_execution(checks: &[PreflightCheck]) -> bool {
    checks.iter().any(|c| c.status == CheckStatus::Failed && c.critical)
}

/// Messages of warnings and non-critical failures, in check order.
#[must_use]
pub fn execution_warnings(checks: &[PreflightCheck]) -> Vec<String> {
    checks
        .iter()
        .filter(|c| match c.status {
            CheckStatus::Warning => true,
            CheckStatus::Failed => !c.critical,
            CheckStatus::Pending | CheckStatus::Passed => false,
        })
        .map(|c| c.message.clone())
        .collect()
}

fn gas_check(plan: &ExecutionPlan) -> PreflightCheck {
    const NAME: &str = "Gas Estimation";
    if plan.gas_estimate < HIGH_GAS_THRESHOLD {
        PreflightCheck::new(NAME, CheckStatus::Passed, format!("Estimated gas: {}", plan.gas_estimate), false)
    } else {
        PreflightCheck::new(NAME, CheckStatus::Warning, format!("High gas estimate: {}", plan.gas_estimate), false)
    }
}

fn parameter_check(plan: &ExecutionPlan) -> PreflightCheck {
    const NAME: &str = "Parameter Validation";
    for arg in &plan.args {
        if arg.trim().is_empty() {
            return PreflightCheck::new(NAME, CheckStatus::Failed, "Missing required parameters", true);
        }
        if arg.len() == 42
            && let Some(digits) = arg.strip_prefix("0x")
            && !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return PreflightCheck::new(NAME, CheckStatus::Failed, "Invalid address parameter", true);
        }
    }
    PreflightCheck::new(NAME, CheckStatus::Passed, "All parameters are valid", false)
}

fn high_risk_check(plan: &ExecutionPlan) -> PreflightCheck {
    const NAME: &str = "High Risk Assessment";
    let name = plan.function_name.to_lowercase();
    let mut warnings = Vec::new();

    if name.contains("ownership") {
        warnings.push("This will transfer contract ownership");
    }
    if name.contains("pause") {
        warnings.push("This will halt all token transfers");
    }
    if name.contains("mint")
        && let Some(amount) = plan.args.get(1).and_then(|a| a.trim().parse::<u128>().ok())
        && amount > LARGE_MINT_AMOUNT
    {
        warnings.push("Large mint amount detected");
    }

    if warnings.is_empty() {
        PreflightCheck::new(NAME, CheckStatus::Passed, "No high-risk conditions detected", false)
    } else {
        PreflightCheck::new(NAME, CheckStatus::Warning, format!("Warnings: {}", warnings.join(", ")), false)
    }
}
