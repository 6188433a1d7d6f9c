//! Kernel input of a coinstake

use bitcoin::{Amount, OutPoint, ScriptBuf};
use neblio_common::types::CandidateOutput;

/// The output that won the stake lottery and seeds a coinstake
///
/// Read-only for the collector. `output_script` is where the reward goes;
/// usually derived from `script_pubkey` by
/// [`calculate_script_pub_key_for_stake_output`](crate::staking::calculate_script_pub_key_for_stake_output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeKernel {
    /// Output being staked
    pub prevout: OutPoint,
    /// Value of the kernel output
    pub credit: Amount,
    /// Timestamp of the transaction that created the kernel output
    pub tx_time: u32,
    /// Timestamp of the block holding that transaction
    pub block_time: u32,
    /// Script locking the kernel output
    pub script_pubkey: ScriptBuf,
    /// Destination script for the reward outputs
    pub output_script: ScriptBuf,
}

impl StakeKernel {
    /// Build a kernel from a candidate output
    pub fn new(coin: &CandidateOutput, block_time: u32, output_script: ScriptBuf) -> Self {
        Self {
            prevout: coin.outpoint,
            credit: coin.value,
            tx_time: coin.time,
            block_time,
            script_pubkey: coin.script_pubkey.clone(),
            output_script,
        }
    }

    /// Does `script` belong to the owner of the kernel?
    pub fn is_same_owner(&self, script: &ScriptBuf) -> bool {
        *script == self.script_pubkey || *script == self.output_script
    }
}
