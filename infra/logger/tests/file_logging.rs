use std::fs;
use std::time::Duration;
use tempfile::tempdir;
use tforge_domain::config::LoggingConfig;
use tforge_logger::Logger;

#[test]
fn config_driven_json_file_logging() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let config = LoggingConfig {
        level: "debug".to_owned(),
        console: false,
        path: Some(log_dir.clone()),
        json: true,
        ..LoggingConfig::default()
    };
    let logger = Logger::from_config("tforge-file", &config)?;
    assert!(logger.guard().is_some());

    tracing::info!(selected = 3, "selection resolved");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let first = contents.lines().next().expect("at least one line");
    assert!(first.starts_with('{'), "json lines expected, got {first}");
    assert!(contents.contains("selection resolved"));

    Ok(())
}
