//! Common data types for the neblio wallet core
//!
//! These types represent the shared data structures used by coin selection
//! and coinstake construction. They are plain snapshots of wallet state and
//! are never mutated by the algorithms that consume them.
//!
//! IMPORTANT: These types MUST NOT contain private keys, seeds, or other sensitive material.

use bitcoin::{Amount, OutPoint, ScriptBuf, Txid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Constants for neblio-specific values

/// Number of base units in one NEBL
pub const COIN: u64 = 100_000_000;

/// One hundredth of a coin, used as the coin selection tolerance margin
pub const CENT: u64 = 1_000_000;

/// Minimum transaction fee, also the dust threshold for coin selection
pub const MIN_TX_FEE: u64 = 10_000;

/// Maximum amount of money that can ever exist, in base units
pub const MAX_MONEY: u64 = 1_000_000_000 * COIN;

/// Check that an amount lies within the valid money range
///
/// # Examples
///
/// ```
/// use bitcoin::Amount;
/// use neblio_common::types::{money_range, MAX_MONEY};
///
/// assert!(money_range(Amount::from_sat(0)));
/// assert!(money_range(Amount::from_sat(MAX_MONEY)));
/// assert!(!money_range(Amount::from_sat(MAX_MONEY + 1)));
/// ```
pub fn money_range(amount: Amount) -> bool {
    amount.to_sat() <= MAX_MONEY
}

/// One unspent output the wallet could spend or stake
///
/// Built from the wallet's output index at call time. The `time` field is
/// the origination timestamp of the owning transaction, which drives both
/// the spend-time rule of coin selection and the coin-age rule of staking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateOutput {
    /// Reference to the transaction output (txid and vout)
    pub outpoint: OutPoint,

    /// Value of this output in base units
    pub value: Amount,

    /// Number of confirmations (0 for unconfirmed)
    pub depth: u32,

    /// Was the owning transaction created by this wallet?
    pub from_me: bool,

    /// Is the owning transaction currently sitting in the mempool?
    pub in_mempool: bool,

    /// Does the output come from a coinbase or coinstake (subject to maturity)?
    pub generated: bool,

    /// Timestamp of the owning transaction
    pub time: u32,

    /// Script that locks this output
    pub script_pubkey: ScriptBuf,
}

// Custom serialization keeps the snapshot format readable in fixtures
impl Serialize for CandidateOutput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut s = serializer.serialize_struct("CandidateOutput", 9)?;

        s.serialize_field("txid", &self.outpoint.txid.to_string())?;
        s.serialize_field("vout", &self.outpoint.vout)?;
        s.serialize_field("value", &self.value.to_sat())?;
        s.serialize_field("depth", &self.depth)?;
        s.serialize_field("from_me", &self.from_me)?;
        s.serialize_field("in_mempool", &self.in_mempool)?;
        s.serialize_field("generated", &self.generated)?;
        s.serialize_field("time", &self.time)?;
        s.serialize_field("script_pubkey", &hex::encode(self.script_pubkey.as_bytes()))?;

        s.end()
    }
}

impl<'de> Deserialize<'de> for CandidateOutput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct CandidateHelper {
            txid: String,
            vout: u32,
            value: u64,
            depth: u32,
            #[serde(default)]
            from_me: bool,
            #[serde(default)]
            in_mempool: bool,
            #[serde(default)]
            generated: bool,
            time: u32,
            #[serde(default)]
            script_pubkey: String,
        }

        let helper = CandidateHelper::deserialize(deserializer)?;

        let value = Amount::from_sat(helper.value);
        if !money_range(value) {
            return Err(serde::de::Error::custom(WalletError::InvalidAmount(format!(
                "{} exceeds maximum money supply",
                helper.value
            ))));
        }

        let txid = Txid::from_str(&helper.txid)
            .map_err(|e| serde::de::Error::custom(format!("Invalid txid: {}", e)))?;

        let script = hex::decode(&helper.script_pubkey)
            .map_err(|e| serde::de::Error::custom(format!("Invalid script hex: {}", e)))?;

        Ok(CandidateOutput {
            outpoint: OutPoint::new(txid, helper.vout),
            value,
            depth: helper.depth,
            from_me: helper.from_me,
            in_mempool: helper.in_mempool,
            generated: helper.generated,
            time: helper.time,
            script_pubkey: ScriptBuf::from_bytes(script),
        })
    }
}

impl CandidateOutput {
    /// Create a new candidate output
    ///
    /// # Arguments
    /// * `outpoint` - Reference to the transaction output
    /// * `value` - Value of the output
    /// * `depth` - Number of confirmations
    /// * `time` - Timestamp of the owning transaction
    ///
    /// # Returns
    /// * A new CandidateOutput with an empty script, not from this wallet
    pub fn new(outpoint: OutPoint, value: Amount, depth: u32, time: u32) -> Self {
        Self {
            outpoint,
            value,
            depth,
            from_me: false,
            in_mempool: false,
            generated: false,
            time,
            script_pubkey: ScriptBuf::new(),
        }
    }

    /// Set the locking script of this output
    pub fn with_script(mut self, script_pubkey: ScriptBuf) -> Self {
        self.script_pubkey = script_pubkey;
        self
    }

    /// Mark the owning transaction as created by this wallet
    pub fn from_me(mut self, from_me: bool) -> Self {
        self.from_me = from_me;
        self
    }

    /// Mark the owning transaction as sitting in the mempool
    pub fn in_mempool(mut self, in_mempool: bool) -> Self {
        self.in_mempool = in_mempool;
        self
    }

    /// Mark the output as created by a coinbase or coinstake
    pub fn generated(mut self, generated: bool) -> Self {
        self.generated = generated;
        self
    }

    /// Check if the output is confirmed
    pub fn is_confirmed(&self) -> bool {
        self.depth > 0
    }

    /// Coin age at `now`, zero when the output is dated in the future
    pub fn age_at(&self, now: u32) -> u32 {
        now.saturating_sub(self.time)
    }

    /// Check if the output value is at or below the given dust threshold
    pub fn is_dust(&self, dust_threshold: Amount) -> bool {
        self.value <= dust_threshold
    }

    /// Get a unique identifier for this output
    pub fn id(&self) -> String {
        format!("{}:{}", self.outpoint.txid, self.outpoint.vout)
    }
}

impl fmt::Display for CandidateOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} sats, depth {})", self.id(), self.value.to_sat(), self.depth)
    }
}

/// Error type for wallet-level preconditions
///
/// Expected outcomes such as insufficient funds or a missing signing key are
/// not errors; they come back as result values. These variants describe
/// inputs the algorithms refuse to work with at all.
///
/// ```
/// use neblio_common::types::WalletError;
///
/// let error = WalletError::InvalidAmount("negative".to_string());
/// assert!(error.to_string().contains("Invalid amount"));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount exceeds maximum money supply")]
    ExcessiveAmount,

    #[error("Unknown network: {0}")]
    InvalidNetworkType(String),
}

/// Reject amounts outside the money range
pub fn check_money_range(amount: Amount) -> Result<(), WalletError> {
    if money_range(amount) {
        Ok(())
    } else {
        Err(WalletError::ExcessiveAmount)
    }
}
