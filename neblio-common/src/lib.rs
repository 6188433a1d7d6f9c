//! neblio Common Library
//!
//! This crate provides the shared building blocks of the neblio wallet core:
//! amount constants, candidate output snapshots, script templates, the
//! key-presence interface, network parameters, errors, logging and config.
//!
//! # Modules
//!
//! - `types`: Amount constants and the candidate output snapshot
//! - `error`: Top-level error type
//! - `logging`: Logging infrastructure
//! - `config`: Configuration management
//! - `params`: Per-network staking parameters
//! - `script`: Script templates and classification
//! - `keystore`: Key presence interface

/// Core domain types
pub mod types;

/// Error handling
pub mod error;

/// Logging functionality
pub mod logging;

/// Configuration management
pub mod config;

/// Per-network protocol parameters
pub mod params;

/// Script templates and classification
pub mod script;

/// Key presence interface
pub mod keystore;

/// Re-export common types for convenience
pub use types::{
    check_money_range, money_range, CandidateOutput, WalletError, CENT, COIN, MAX_MONEY,
    MIN_TX_FEE,
};

pub use error::{NeblioError, NeblioResult};
pub use keystore::{KeyStore, MemoryKeyStore};
pub use params::{Chain, ChainParams};
pub use script::{classify, ScriptKind};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization
///
/// Sets up logging with the default configuration. Safe to call multiple times.
pub fn init() -> Result<(), String> {
    logging::init(&logging::LogConfig::default())?;
    logging::log_core(
        logging::LogLevel::Debug,
        "neblio-common initialized",
        Some(serde_json::json!({ "version": VERSION })),
    );
    Ok(())
}
