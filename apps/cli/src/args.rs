use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tforge::domain::feature::FeatureCategory;
use tforge::domain::standard::TokenStandard;
use tforge::features::management::Allowance;
use tforge::features::management::assessment::DEFAULT_GAS_ESTIMATE;

pub(crate) const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

#[derive(Debug, Parser)]
#[command(name = "tforge")]
#[command(about = "Feature compatibility and function risk checks for token contracts")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file (`tforge.toml` in the working directory by default)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List registered features
    Features {
        #[arg(long)]
        category: Option<FeatureCategory>,
        /// Only features offered for this token standard
        #[arg(long)]
        standard: Option<TokenStandard>,
    },
    /// Features that can still be added to a selection
    Resolve { ids: Vec<String> },
    /// Check a selection for conflicts and missing dependencies (exit code 2 when invalid)
    Validate { ids: Vec<String> },
    /// List contract templates
    Templates {
        #[arg(long)]
        standard: Option<TokenStandard>,
    },
    /// Show one template and validate its feature list
    Template { id: String },
    /// Classify contract functions by name
    Classify {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Find known management functions in runtime bytecode
    Scan {
        /// Hex bytecode, or `@path` to read it from a file
        code: String,
    },
    /// Risk assessment and offline preflight checks for a call (exit code 2 when blocked)
    Assess {
        function: String,
        args: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_GAS_ESTIMATE)]
        gas: u64,
        #[arg(long, default_value = ZERO_ADDRESS)]
        contract: String,
    },
    /// Screen a contract before approving it as a spender (exit code 2 for high or critical risk)
    Analyze {
        address: String,
        /// Requested allowance, decimal or `0x` hex
        #[arg(long)]
        allowance: Option<Allowance>,
        /// Token name
        #[arg(long)]
        name: Option<String>,
        /// Token symbol
        #[arg(long)]
        symbol: Option<String>,
    },
}
