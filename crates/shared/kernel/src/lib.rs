//! Kernel utilities shared across slices.
//! Keep this crate lightweight; it re-exports the domain and owns configuration loading.
//!
//! ## Config loading
//! ```rust,ignore
//! use tforge_kernel::config::load_config_or_default;
//! use tforge_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config_or_default(Some("tforge")).unwrap();
//! ```
pub mod config;

pub use tforge_domain as domain;

/// Environment prefix for configuration overrides (`TFORGE__LOGGING__LEVEL=debug`).
pub const ENV_PREFIX: &str = "TFORGE";

/// Configuration file looked up when no path is given (any supported extension).
pub const DEFAULT_CONFIG: &str = "tforge";
