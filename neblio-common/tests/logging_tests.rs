use neblio_common::logging::{self, LogConfig, LogLevel};
use serde_json::json;
use std::sync::Once;

// Ensure logging is only initialized once across all tests
static INIT: Once = Once::new();

fn setup_logging() {
    INIT.call_once(|| {
        let config = LogConfig {
            level: LogLevel::Error,
            log_file: None,
            include_timestamps: false,
            include_source_location: false,
            console_logging: false,
            json_format: false,
        };
        let _ = logging::init(&config);
    });
}

#[test]
fn test_logging_initialization_is_idempotent() {
    setup_logging();

    assert!(logging::init(&LogConfig::default()).is_ok());
    assert!(neblio_common::init().is_ok());

    logging::set_log_level(LogLevel::Debug);
    assert_eq!(log::max_level(), log::LevelFilter::Debug);
    logging::set_log_level(LogLevel::Error);
}

#[test]
fn test_context_helpers_accept_params() {
    setup_logging();

    logging::log_core(LogLevel::Info, "core started", None);
    logging::log_selection(LogLevel::Debug, "subset selected", Some(json!({ "total": 5 })));
    logging::log_staking(
        LogLevel::Warn,
        "stake input rejected",
        Some(json!({ "txid": "7967a5185e907a25225574544c31f7b059c1a191d65b53dcc1554d339c4f9efc" })),
    );
    logging::log_config(LogLevel::Error, "config invalid", Some(json!(["not", "an", "object"])));
}

#[test]
fn test_sanitize_for_logging() {
    let txid = "7967a5185e907a25225574544c31f7b059c1a191d65b53dcc1554d339c4f9efc";
    assert_eq!(logging::sanitize_for_logging(txid), "7967...9efc");
    assert_eq!(logging::sanitize_for_logging("regtest"), "regtest");
}

#[test]
fn test_default_config() {
    let config = LogConfig::default();

    assert_eq!(config.level, LogLevel::Info);
    assert!(config.log_file.is_none());
    assert!(config.include_timestamps);
    assert!(config.console_logging);
    assert!(!config.json_format);
}
