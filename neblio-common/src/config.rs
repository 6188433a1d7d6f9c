//! Configuration management for the neblio wallet core.
//!
//! Settings are stored in TOML. Every field has a default that reproduces
//! the historical wallet behaviour, so an empty file is a valid config.

use anyhow::{anyhow, Result};
use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::logging::{self, LogConfig, LogLevel};
use crate::params::{Chain, ChainParams};
use crate::types::{money_range, CENT, MIN_TX_FEE};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub staking: StakingConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// mainnet, testnet or regtest
    #[serde(default = "default_chain")]
    pub chain: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain: default_chain(),
        }
    }
}

/// Staking behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Value, in base units, that is never staked or spent
    #[serde(default)]
    pub reserve_balance: u64,

    /// Split young stakes into two reward outputs
    #[serde(default = "default_true")]
    pub split_stake: bool,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            reserve_balance: 0,
            split_stake: default_true(),
        }
    }
}

/// Coin selection tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Trials of the approximate subset-sum search
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Outputs at or below this value are never selected
    #[serde(default = "default_dust_threshold")]
    pub dust_threshold: u64,

    /// Tolerance added to the target when looking for a tighter subset
    #[serde(default = "default_cent")]
    pub cent: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            dust_threshold: default_dust_threshold(),
            cent: default_cent(),
        }
    }
}

/// Logging output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    #[serde(default)]
    pub log_file: Option<String>,

    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_file: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Convert into the logging module's configuration
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            log_file: self.log_file.clone(),
            json_format: self.json_format,
            ..LogConfig::default()
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| anyhow!("Failed to read config file: {}", e))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse config file: {}", e))?;

        logging::log_config(
            LogLevel::Debug,
            "config loaded",
            Some(json!({ "path": path, "chain": config.network.chain })),
        );

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| anyhow!("Failed to serialize config: {}", e))?;

        fs::write(path, content).map_err(|e| anyhow!("Failed to write config file: {}", e))?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.chain()?;

        if !money_range(Amount::from_sat(self.staking.reserve_balance)) {
            return Err(anyhow!("Invalid reserve balance: exceeds maximum money supply"));
        }

        if self.selection.iterations == 0 {
            return Err(anyhow!("Invalid selection iterations: must be greater than 0"));
        }

        if self.selection.cent == 0 {
            return Err(anyhow!("Invalid selection margin: must be greater than 0"));
        }

        Ok(())
    }

    /// Network named by the config
    pub fn chain(&self) -> Result<Chain> {
        self.network
            .chain
            .parse::<Chain>()
            .map_err(|e| anyhow!("Invalid network type: {}", e))
    }

    /// Protocol parameters for the configured network
    pub fn chain_params(&self) -> Result<ChainParams> {
        Ok(ChainParams::for_chain(self.chain()?))
    }
}

/// Ensure a configuration file exists at the specified path
/// If it doesn't exist, create it with default values
pub fn ensure_config_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        let default_config = Config::default();
        let content = toml::to_string_pretty(&default_config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| anyhow!("Failed to create config directory: {}", e))?;
            }
        }

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write default config file: {}", e))?;
    }

    Ok(())
}

// Default value functions

fn default_true() -> bool {
    true
}

fn default_chain() -> String {
    "mainnet".to_string()
}

fn default_iterations() -> usize {
    1000
}

fn default_dust_threshold() -> u64 {
    MIN_TX_FEE
}

fn default_cent() -> u64 {
    CENT
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}
