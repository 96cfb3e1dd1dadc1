use crate::standard::TokenStandard;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level application configuration shared by the apps.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub security: SecurityConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    pub console: bool,
    /// Extra env-filter directives, e.g. `tforge_deployment=debug`.
    pub filter: Option<String>,
    /// Directory for rolling log files; file logging is off when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// How the feature catalog is loaded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Reject dependency/conflict references to unregistered features.
    pub strict_references: bool,
    /// Add the reverse edge of every one-sided conflict when the registry is built.
    pub normalize_conflicts: bool,
    /// Alternate feature table (JSON) used instead of the built-in one.
    pub features_file: Option<PathBuf>,
    pub default_standard: TokenStandard,
}

/// Address lists consulted when a contract is screened before an approval.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Known scam contracts. Matching is case-insensitive.
    pub blacklist: Vec<String>,
    /// Trusted contracts; their risk score is lowered.
    pub whitelist: Vec<String>,
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            console: true,
            filter: None,
            path: None,
            json: false,
            max_files: 10,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            strict_references: false,
            normalize_conflicts: false,
            features_file: None,
            default_standard: TokenStandard::Erc20,
        }
    }
}
