//! # Contract Management
//!
//! Risk metadata for functions of an already deployed token contract.
//!
//! * [`selector`] and [`functions`] recognize known management functions in runtime bytecode.
//! * [`classify`] judges functions without a known definition by their name.
//! * [`assessment`] turns a risk level into confirmation requirements and runs the offline
//!   preflight checks of an [`ExecutionPlan`].
//! * [`security`] screens a contract before the user approves it as a token spender.

pub mod assessment;
pub mod classify;
mod error;
pub mod functions;
pub mod security;
pub mod selector;

pub use crate::assessment::{
    CheckStatus, ConfirmationType, ExecutionPlan, PreflightCheck, RiskAssessment, RiskClassification, RiskColor,
    assess_function_risk, execution_warnings, local_preflight, should_block_execution,
};
pub use crate::classify::{
    FunctionCategory, categorize_function, classify_function_risk, describe_function, format_function_name,
};
pub use crate::error::{ManagementError, ManagementErrorExt};
pub use crate::functions::{
    Capability, FunctionInput, ManagementFunction, STANDARD_FUNCTIONS, StandardFunction, describe,
    detect_capabilities, scan_bytecode, standard_function,
};
pub use crate::security::{
    Allowance, ContractProfile, ContractScreen, FlagKind, SecurityAnalysis, SecurityBadge, SecurityFlag, SecurityLevel,
    has_suspicious_name, has_suspicious_symbol,
};
pub use crate::selector::{FUNCTION_SELECTORS, Selector, function_of, selector_of};
