use tforge_logger::{LevelFilter, Logger};

#[test]
fn console_only_logger_has_no_file_guard() {
    let logger = Logger::builder()
        .name("tforge-console-only")
        .console(true)
        .level(LevelFilter::WARN)
        .init()
        .expect("logger should initialize");

    tracing::warn!(feature = "tax", "console only");
    assert!(logger.guard().is_none());
}
