//! Per-network protocol parameters
//!
//! Staking rules differ between mainnet, testnet and regtest. The values
//! here are consumed read-only by the coinstake collector and by the
//! candidate supply helpers.

use bitcoin::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{WalletError, COIN};

/// Networks the wallet can run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Mainnet,
    Testnet,
    Regtest,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chain::Mainnet => "mainnet",
            Chain::Testnet => "testnet",
            Chain::Regtest => "regtest",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Chain {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Chain::Mainnet),
            "testnet" | "test" => Ok(Chain::Testnet),
            "regtest" => Ok(Chain::Regtest),
            other => Err(WalletError::InvalidNetworkType(other.to_string())),
        }
    }
}

/// Staking constants for one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    /// Network these parameters belong to
    pub chain: Chain,
    /// Minimum coin age, in seconds, before an output may stake
    pub stake_min_age: u32,
    /// Coins younger than this are split into two reward outputs
    pub stake_split_age: u32,
    /// Maximum number of inputs in one coinstake, kernel included
    pub max_stake_inputs: usize,
    /// Maximum aggregate value of the inputs of one coinstake
    pub max_stake_value: Amount,
    /// Confirmations before a coinbase or coinstake output is spendable
    pub coinbase_maturity: u32,
}

impl ChainParams {
    /// Parameters for the given network
    pub fn for_chain(chain: Chain) -> Self {
        match chain {
            Chain::Mainnet => Self::mainnet(),
            Chain::Testnet => Self::testnet(),
            Chain::Regtest => Self::regtest(),
        }
    }

    pub fn mainnet() -> Self {
        Self {
            chain: Chain::Mainnet,
            stake_min_age: 24 * 60 * 60,
            stake_split_age: 90 * 24 * 60 * 60,
            max_stake_inputs: 10,
            max_stake_value: Amount::from_sat(1_000 * COIN),
            coinbase_maturity: 120,
        }
    }

    pub fn testnet() -> Self {
        Self {
            chain: Chain::Testnet,
            stake_min_age: 24 * 60 * 60,
            stake_split_age: 90 * 24 * 60 * 60,
            max_stake_inputs: 10,
            max_stake_value: Amount::from_sat(1_000 * COIN),
            coinbase_maturity: 10,
        }
    }

    pub fn regtest() -> Self {
        Self {
            chain: Chain::Regtest,
            stake_min_age: 60,
            stake_split_age: 24 * 60 * 60,
            max_stake_inputs: 10,
            max_stake_value: Amount::from_sat(1_000 * COIN),
            coinbase_maturity: 10,
        }
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        Self::mainnet()
    }
}
