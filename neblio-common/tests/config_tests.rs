use anyhow::Result;
use neblio_common::config::{self, Config};
use neblio_common::logging::LogLevel;
use neblio_common::params::Chain;
use neblio_common::types::{CENT, COIN, MAX_MONEY, MIN_TX_FEE};
use std::fs;
use tempfile::TempDir;

// Create a temporary directory holding a config file with the given content
fn setup_test_config(content: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("neblio.toml");
    fs::write(&config_path, content).expect("Failed to write test config");
    let path = config_path.to_string_lossy().to_string();
    (temp_dir, path)
}

#[test]
fn test_ensure_config_exists_creates_default() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("nested").join("neblio.toml");

    config::ensure_config_exists(&config_path)?;
    assert!(config_path.exists());

    let loaded = Config::load(&config_path.to_string_lossy())?;
    assert_eq!(loaded.network.chain, "mainnet");
    assert_eq!(loaded.selection.iterations, 1000);
    loaded.validate()?;
    Ok(())
}

#[test]
fn test_ensure_config_exists_keeps_existing_file() -> Result<()> {
    let (_dir, path) = setup_test_config("[network]\nchain = \"testnet\"\n");

    config::ensure_config_exists(std::path::Path::new(&path))?;

    assert_eq!(Config::load(&path)?.chain()?, Chain::Testnet);
    Ok(())
}

#[test]
fn test_empty_file_yields_defaults() -> Result<()> {
    let (_dir, path) = setup_test_config("");
    let config = Config::load(&path)?;

    assert!(config.staking.enabled);
    assert!(config.staking.split_stake);
    assert_eq!(config.staking.reserve_balance, 0);
    assert_eq!(config.selection.dust_threshold, MIN_TX_FEE);
    assert_eq!(config.selection.cent, CENT);
    assert_eq!(config.logging.level, LogLevel::Info);
    Ok(())
}

#[test]
fn test_load_full_config() -> Result<()> {
    let (_dir, path) = setup_test_config(
        r#"
        [network]
        chain = "regtest"

        [staking]
        enabled = false
        reserve_balance = 500000000
        split_stake = false

        [selection]
        iterations = 250
        dust_threshold = 5000
        cent = 1000000

        [logging]
        level = "Debug"
        json_format = true
    "#,
    );

    let config = Config::load(&path)?;
    config.validate()?;

    assert_eq!(config.chain_params()?.chain, Chain::Regtest);
    assert_eq!(config.staking.reserve_balance, 5 * COIN);
    assert!(!config.staking.enabled);
    assert_eq!(config.selection.iterations, 250);

    let log_config = config.logging.to_log_config();
    assert_eq!(log_config.level, LogLevel::Debug);
    assert!(log_config.json_format);
    Ok(())
}

#[test]
fn test_save_and_reload() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("saved.toml").to_string_lossy().to_string();

    let mut config = Config::default();
    config.network.chain = "testnet".to_string();
    config.staking.reserve_balance = 42 * COIN;
    config.save(&path)?;

    let reloaded = Config::load(&path)?;
    assert_eq!(reloaded.network.chain, "testnet");
    assert_eq!(reloaded.staking.reserve_balance, 42 * COIN);
    Ok(())
}

#[test]
fn test_validation_failures() {
    let mut config = Config::default();
    config.network.chain = "signet".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.staking.reserve_balance = MAX_MONEY + 1;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.selection.iterations = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.selection.cent = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_missing_or_invalid_file() {
    assert!(Config::load("/nonexistent/neblio.toml").is_err());

    let (_dir, path) = setup_test_config("[network\nchain = ");
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
