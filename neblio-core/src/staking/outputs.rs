//! Reward output layout of a coinstake

use bitcoin::{Amount, ScriptBuf, TxOut};
use neblio_common::types::CENT;

/// Split `amount` into two CENT-rounded halves
///
/// Returns None when either half would be zero.
///
/// ```
/// use bitcoin::Amount;
/// use neblio_core::staking::split_stake_amount;
///
/// let (first, second) = split_stake_amount(Amount::from_sat(301_000_000)).unwrap();
/// assert_eq!(first, Amount::from_sat(150_000_000));
/// assert_eq!(second, Amount::from_sat(151_000_000));
/// assert!(split_stake_amount(Amount::from_sat(1_500_000)).is_none());
/// ```
pub fn split_stake_amount(amount: Amount) -> Option<(Amount, Amount)> {
    let sats = amount.to_sat();
    let first = sats / 2 / CENT * CENT;
    let second = sats - first;
    if first == 0 || second == 0 {
        return None;
    }
    Some((Amount::from_sat(first), Amount::from_sat(second)))
}

/// Build the outputs of a coinstake
///
/// Output 0 is the empty marker that identifies a coinstake. The reward
/// `amount` follows, either whole or split in two when `allow_split` is set
/// and the amount splits into two positive halves.
pub fn make_stake_outputs(output_script: &ScriptBuf, amount: Amount, allow_split: bool) -> Vec<TxOut> {
    let mut outputs = Vec::with_capacity(3);
    outputs.push(TxOut {
        value: 0,
        script_pubkey: ScriptBuf::new(),
    });

    match split_stake_amount(amount).filter(|_| allow_split) {
        Some((first, second)) => {
            log::debug!("Splitting stake output into {} and {}", first.to_sat(), second.to_sat());
            for value in [first, second] {
                outputs.push(TxOut {
                    value: value.to_sat(),
                    script_pubkey: output_script.clone(),
                });
            }
        }
        None => outputs.push(TxOut {
            value: amount.to_sat(),
            script_pubkey: output_script.clone(),
        }),
    }

    outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use neblio_common::types::COIN;

    #[test]
    fn odd_amount_keeps_remainder_in_second_half() {
        let (first, second) = split_stake_amount(Amount::from_sat(3 * COIN + 12_345)).unwrap();
        assert_eq!(first.to_sat() % CENT, 0);
        assert_eq!(first + second, Amount::from_sat(3 * COIN + 12_345));
        assert!(second >= first);
    }

    #[test]
    fn tiny_amount_is_not_split() {
        let script = ScriptBuf::from_bytes(vec![0x51]);
        let outputs = make_stake_outputs(&script, Amount::from_sat(CENT), true);
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[1].value, CENT);
    }
}
