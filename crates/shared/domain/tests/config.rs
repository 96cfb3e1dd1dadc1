use serde_json::json;
use tforge_domain::config::{AppConfig, CatalogConfig, LoggingConfig};
use tforge_domain::standard::TokenStandard;

#[test]
fn config_defaults_are_sane() {
    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.console);
    assert!(logging.path.is_none());
    assert_eq!(logging.max_files, 10);

    let catalog = CatalogConfig::default();
    assert!(!catalog.strict_references);
    assert!(!catalog.normalize_conflicts);
    assert_eq!(catalog.default_standard, TokenStandard::Erc20);
}

#[test]
fn app_config_deserializes() {
    let raw = json!({
        "logging": { "level": "debug", "json": true, "path": "/tmp/logs" },
        "catalog": { "strict_references": true, "default_standard": "ERC721" },
        "security": { "blacklist": ["0xBAD"] }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.console);
    assert_eq!(cfg.logging.path, Some(std::path::PathBuf::from("/tmp/logs")));
    assert!(cfg.catalog.strict_references);
    assert_eq!(cfg.catalog.default_standard, TokenStandard::Erc721);
    assert_eq!(cfg.security.blacklist, ["0xBAD"]);
    assert!(cfg.security.whitelist.is_empty());
}

#[test]
fn app_config_clones_are_copy_on_write() {
    let base = AppConfig::default();
    let mut tweaked = base.clone();
    tweaked.catalog.normalize_conflicts = true;

    assert!(!base.catalog.normalize_conflicts);
    assert!(tweaked.catalog.normalize_conflicts);
}
