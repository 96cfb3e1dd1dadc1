//! Facade crate for `TokenForge` slices and shared modules.
//! Re-exports domain/kernel primitives and the feature slices enabled at build time.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `tforge` with the desired feature flags (`management` is on by default).
//! - Load configuration with [`init`] and build the registry it describes.

pub use tforge_domain as domain;
use tforge_domain::config::AppConfig;
pub use tforge_kernel as kernel;

/// Feature slices for runtime introspection.
pub mod features {
    pub use tforge_deployment as deployment;
    #[cfg(feature = "management")]
    pub use tforge_management as management;

    /// Build-time enabled slices (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "deployment",
        #[cfg(feature = "management")]
        "management",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Loads configuration (file optional, `TFORGE__*` overrides applied) and the feature registry
/// it selects.
///
/// # Errors
/// Returns an error if the configuration cannot be read or the registry fails its load-time
/// checks.
pub fn init(
    config_path: Option<&str>,
) -> Result<(AppConfig, features::deployment::Registry), Box<dyn std::error::Error>> {
    let config: AppConfig = kernel::config::load_config_or_default(config_path)?;
    let registry = features::deployment::Registry::load(&config.catalog)?;
    Ok((config, registry))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_is_always_enabled() {
        assert!(features::is_enabled("deployment"));
        assert!(!features::is_enabled("identity"));
    }

    #[test]
    fn init_without_a_file_uses_the_builtin_registry() {
        let (_, registry) = init(None).expect("defaults");
        assert_eq!(registry.len(), features::deployment::Registry::builtin().len());
    }
}
