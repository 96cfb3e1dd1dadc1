use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{DEFAULT_CONFIG, ENV_PREFIX};

/// Custom error type for config loading.
#[tforge_derive::forge_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from a file layered with environment overrides.
///
/// 1. **Base File**: settings from `path` (e.g., `tforge.toml`). Defaults to `"tforge"` in the
///    working directory; the extension is resolved by the `config` crate.
/// 2. **Environment Overrides**: variables prefixed with `TFORGE__`, nested with double
///    underscores (`TFORGE__CATALOG__STRICT_REFERENCES=true` maps to `catalog.strict_references`).
///
/// # Errors
/// Returns an error if the file cannot be found, or its content (after overrides) does not
/// deserialize into `T`.
///
/// # Example
/// ```rust,no_run
/// use tforge_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     level: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = effective_path(path);
    info!("Loading config from {}", path.display());

    build(layered(&path, true))
}

/// Same as [`load_config`] but a missing file is not an error: defaults plus environment
/// overrides are used instead.
///
/// # Errors
/// Returns an error if an existing file or the environment overrides do not deserialize
/// into `T`.
pub fn load_config_or_default<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = effective_path(path);
    debug!("Loading optional config from {}", path.display());

    build(layered(&path, false))
}

fn effective_path(path: Option<impl AsRef<Path>>) -> PathBuf {
    path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG), |p| p.as_ref().to_path_buf())
}

fn layered(path: &Path, required: bool) -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from(path).required(required)).add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .convert_case(config::Case::Snake),
    )
}

fn build<T>(builder: ConfigBuilder<DefaultState>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
