//! Candidate supply
//!
//! The selector and the collector work on plain snapshots of the wallet's
//! outputs. `CoinSource` is the seam between them and the wallet; the
//! `WalletSnapshot` implementation holds the outputs in memory.

use bitcoin::Amount;
use neblio_common::error::NeblioResult;
use neblio_common::params::ChainParams;
use neblio_common::types::{check_money_range, money_range, CandidateOutput, WalletError};

/// Supplier of candidate outputs
pub trait CoinSource {
    /// Spendable outputs, optionally only trusted ones
    fn available_coins(&self, only_confirmed: bool) -> Vec<CandidateOutput>;

    /// Outputs old and deep enough to stake at `current_time`
    fn available_coins_for_staking(&self, current_time: u32) -> Vec<CandidateOutput>;
}

/// In-memory set of unspent wallet outputs
#[derive(Debug, Clone, Default)]
pub struct WalletSnapshot {
    coins: Vec<CandidateOutput>,
    params: ChainParams,
}

impl WalletSnapshot {
    pub fn new(coins: Vec<CandidateOutput>, params: ChainParams) -> Self {
        Self { coins, params }
    }

    /// Load a snapshot from a JSON array of outputs
    pub fn from_json(json: &str, params: ChainParams) -> NeblioResult<Self> {
        let coins: Vec<CandidateOutput> = serde_json::from_str(json)?;
        log::debug!("Loaded wallet snapshot with {} outputs", coins.len());
        Ok(Self::new(coins, params))
    }

    pub fn coins(&self) -> &[CandidateOutput] {
        &self.coins
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Total value of the mature outputs
    ///
    /// Outputs outside the money range are left out. Fails when the total
    /// itself leaves the range.
    pub fn balance(&self) -> Result<Amount, WalletError> {
        let total = self
            .coins
            .iter()
            .filter(|c| self.is_mature(c) && money_range(c.value))
            .try_fold(Amount::ZERO, |sum, coin| sum.checked_add(coin.value))
            .ok_or(WalletError::ExcessiveAmount)?;
        check_money_range(total)?;
        Ok(total)
    }

    fn is_mature(&self, coin: &CandidateOutput) -> bool {
        !coin.generated || coin.depth >= self.params.coinbase_maturity
    }

    fn is_trusted(coin: &CandidateOutput) -> bool {
        coin.is_confirmed() || (coin.from_me && coin.in_mempool)
    }
}

impl CoinSource for WalletSnapshot {
    fn available_coins(&self, only_confirmed: bool) -> Vec<CandidateOutput> {
        self.coins
            .iter()
            .filter(|c| self.is_mature(c))
            .filter(|c| !only_confirmed || Self::is_trusted(c))
            .filter(|c| c.value > Amount::ZERO && money_range(c.value))
            .cloned()
            .collect()
    }

    fn available_coins_for_staking(&self, current_time: u32) -> Vec<CandidateOutput> {
        self.available_coins(true)
            .into_iter()
            .filter(|c| c.is_confirmed())
            .filter(|c| c.time <= current_time && c.age_at(current_time) >= self.params.stake_min_age)
            .collect()
    }
}
