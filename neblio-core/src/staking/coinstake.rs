//! Unsigned coinstake assembly

use bitcoin::absolute::LockTime;
use bitcoin::{Amount, ScriptBuf, Transaction};
use neblio_common::types::{check_money_range, WalletError};

use crate::staking::collector::StakeInputs;
use crate::staking::outputs::make_stake_outputs;

const COINSTAKE_VERSION: i32 = 1;

/// Assemble an unsigned coinstake from collected inputs
///
/// The reward outputs pay `credit + reward` to `output_script`.
pub fn assemble_coin_stake(
    inputs: &StakeInputs,
    output_script: &ScriptBuf,
    reward: Amount,
    allow_split: bool,
    lock_time: u32,
) -> Result<Transaction, WalletError> {
    let amount = inputs.credit().checked_add(reward).ok_or(WalletError::ExcessiveAmount)?;
    check_money_range(amount)?;

    let tx = Transaction {
        version: COINSTAKE_VERSION,
        lock_time: LockTime::from_consensus(lock_time),
        input: inputs.inputs().to_vec(),
        output: make_stake_outputs(output_script, amount, allow_split),
    };
    log::debug!(
        "Assembled coinstake with {} inputs and {} outputs",
        tx.input.len(),
        tx.output.len()
    );
    Ok(tx)
}

/// Does the transaction have the coinstake shape?
pub fn is_coinstake(tx: &Transaction) -> bool {
    !tx.input.is_empty()
        && !tx.input[0].previous_output.is_null()
        && tx.output.len() >= 2
        && tx.output[0].value == 0
        && tx.output[0].script_pubkey.is_empty()
}
