//! Coinstake input collection
//!
//! Starting from the kernel, the collector greedily adds more outputs owned
//! by the same key so that one coinstake consolidates several small outputs.
//! Growth is bounded by the input count, the maximum stake value and the
//! spendable part of the balance above the reserve.

use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Witness};
use neblio_common::logging::{self, LogLevel};
use neblio_common::params::ChainParams;
use neblio_common::types::{check_money_range, CandidateOutput, WalletError};
use serde_json::json;
use std::collections::HashSet;

use crate::staking::kernel::StakeKernel;

/// Previous output consumed by a coinstake input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpentOutput {
    pub outpoint: OutPoint,
    pub txout: TxOut,
    /// Timestamp of the transaction that created the output
    pub time: u32,
}

/// Inputs of a coinstake, kernel first
///
/// `inputs()` and `spent_outputs()` are parallel lists of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeInputs {
    inputs: Vec<TxIn>,
    spent: Vec<SpentOutput>,
    credit: Amount,
}

fn unsigned_input(outpoint: OutPoint) -> TxIn {
    TxIn {
        previous_output: outpoint,
        script_sig: ScriptBuf::new(),
        sequence: Sequence::MAX,
        witness: Witness::default(),
    }
}

impl StakeInputs {
    fn with_kernel(kernel: &StakeKernel) -> Self {
        let mut inputs = Self {
            inputs: Vec::new(),
            spent: Vec::new(),
            credit: Amount::ZERO,
        };
        inputs.push(kernel.prevout, kernel.credit, kernel.script_pubkey.clone(), kernel.tx_time);
        inputs
    }

    fn push(&mut self, outpoint: OutPoint, value: Amount, script_pubkey: ScriptBuf, time: u32) {
        self.inputs.push(unsigned_input(outpoint));
        self.spent.push(SpentOutput {
            outpoint,
            txout: TxOut {
                value: value.to_sat(),
                script_pubkey,
            },
            time,
        });
        self.credit += value;
        debug_assert_eq!(self.inputs.len(), self.spent.len());
    }

    /// Unsigned inputs in coinstake order
    pub fn inputs(&self) -> &[TxIn] {
        &self.inputs
    }

    /// Previous outputs, parallel to `inputs()`
    pub fn spent_outputs(&self) -> &[SpentOutput] {
        &self.spent
    }

    /// Sum of the values of all collected inputs
    pub fn credit(&self) -> Amount {
        self.credit
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always false, the kernel is present
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// The kernel's previous output
    pub fn kernel(&self) -> &SpentOutput {
        &self.spent[0]
    }
}

/// Why a candidate was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    KernelTransaction,
    OtherOwner,
    Duplicate,
    TooYoung,
    OverStakeLimit,
    OverCeiling,
}

/// Builds coinstake input lists for one network
#[derive(Debug, Clone, Default)]
pub struct StakeInputCollector {
    params: ChainParams,
}

impl StakeInputCollector {
    pub fn new(params: ChainParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Collect the inputs of a coinstake
    ///
    /// # Arguments
    /// * `kernel` - The winning stake output, always input 0
    /// * `candidates` - Other stakeable outputs of the wallet
    /// * `current_time` - Time the coinstake is built at
    /// * `allow_split_stake` - When set, the stake will be split and no
    ///   further inputs are consolidated into it
    /// * `wallet_balance` - Total balance of the wallet
    /// * `reserve_balance` - Part of the balance that must not be staked
    ///
    /// # Returns
    /// * `Ok(StakeInputs)` - the kernel plus any accepted inputs
    /// * `Err(WalletError::ExcessiveAmount)` - an amount outside the money range
    pub fn collect_inputs_for_stake(
        &self,
        kernel: &StakeKernel,
        candidates: &[CandidateOutput],
        current_time: u32,
        allow_split_stake: bool,
        wallet_balance: Amount,
        reserve_balance: Amount,
    ) -> Result<StakeInputs, WalletError> {
        check_money_range(kernel.credit)?;
        check_money_range(wallet_balance)?;
        check_money_range(reserve_balance)?;

        let mut collected = StakeInputs::with_kernel(kernel);
        let ceiling = wallet_balance.checked_sub(reserve_balance).unwrap_or(Amount::ZERO);

        if kernel.credit >= ceiling {
            log::debug!(
                "Kernel credit {} reaches spendable balance {}, staking kernel alone",
                kernel.credit.to_sat(),
                ceiling.to_sat()
            );
            return Ok(collected);
        }
        if allow_split_stake {
            log::debug!("Stake will be split, not consolidating further inputs");
            return Ok(collected);
        }

        let mut seen: HashSet<OutPoint> = HashSet::from([kernel.prevout]);

        for coin in candidates {
            if collected.len() >= self.params.max_stake_inputs
                || collected.credit >= self.params.max_stake_value
                || collected.credit >= ceiling
            {
                break;
            }

            match self.check_candidate(kernel, coin, &collected, current_time, ceiling, &mut seen) {
                Ok(()) => {
                    log::trace!("Stake input {} accepted", coin);
                    collected.push(coin.outpoint, coin.value, coin.script_pubkey.clone(), coin.time);
                }
                Err(reason) => log::trace!("Stake input {} rejected: {:?}", coin, reason),
            }
        }

        logging::log_staking(
            LogLevel::Debug,
            "stake inputs collected",
            Some(json!({
                "inputs": collected.len(),
                "credit": collected.credit.to_sat(),
                "ceiling": ceiling.to_sat(),
            })),
        );

        Ok(collected)
    }

    fn check_candidate(
        &self,
        kernel: &StakeKernel,
        coin: &CandidateOutput,
        collected: &StakeInputs,
        current_time: u32,
        ceiling: Amount,
        seen: &mut HashSet<OutPoint>,
    ) -> Result<(), Rejection> {
        if coin.outpoint.txid == kernel.prevout.txid {
            return Err(Rejection::KernelTransaction);
        }
        if !kernel.is_same_owner(&coin.script_pubkey) {
            return Err(Rejection::OtherOwner);
        }
        if seen.contains(&coin.outpoint) {
            return Err(Rejection::Duplicate);
        }
        if coin.time > current_time || coin.age_at(current_time) < self.params.stake_min_age {
            return Err(Rejection::TooYoung);
        }

        let total = collected.credit.checked_add(coin.value).ok_or(Rejection::OverStakeLimit)?;
        if total > self.params.max_stake_value {
            return Err(Rejection::OverStakeLimit);
        }
        if total > ceiling {
            return Err(Rejection::OverCeiling);
        }

        seen.insert(coin.outpoint);
        Ok(())
    }

    /// Should the reward of this kernel be split into two outputs?
    ///
    /// Young coins are split so the wallet keeps several stakeable outputs.
    pub fn should_split_stake(&self, kernel: &StakeKernel, current_time: u32, split_enabled: bool) -> bool {
        split_enabled && current_time.saturating_sub(kernel.block_time) < self.params.stake_split_age
    }
}
