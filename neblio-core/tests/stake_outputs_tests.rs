//! Tests for the coinstake output layout and assembly

mod common;

use bitcoin::{Amount, ScriptBuf};
use common::{coin, p2pkh_of, public_key, setup, GENERATOR_KEY};
use neblio_common::params::ChainParams;
use neblio_common::types::{WalletError, CENT, COIN, MAX_MONEY};
use neblio_core::staking::{
    assemble_coin_stake, is_coinstake, make_stake_outputs, StakeInputCollector, StakeKernel,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn reward_script() -> ScriptBuf {
    ScriptBuf::new_p2pk(&public_key(GENERATOR_KEY))
}

#[test]
fn test_split_produces_three_outputs() {
    setup();
    let outputs = make_stake_outputs(&reward_script(), Amount::from_sat(100 * COIN), true);

    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0].value, 0);
    assert!(outputs[0].script_pubkey.is_empty());
    assert_eq!(outputs[1].value, 50 * COIN);
    assert_eq!(outputs[2].value, 50 * COIN);
    assert!(outputs[1..].iter().all(|o| o.script_pubkey == reward_script()));
}

#[test]
fn test_no_split_produces_two_outputs() {
    setup();
    let outputs = make_stake_outputs(&reward_script(), Amount::from_sat(100 * COIN), false);

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].value, 0);
    assert_eq!(outputs[1].value, 100 * COIN);
}

#[quickcheck]
fn prop_outputs_preserve_amount(sats: u64, allow_split: bool) -> TestResult {
    let sats = sats % (MAX_MONEY + 1);
    let outputs = make_stake_outputs(&reward_script(), Amount::from_sat(sats), allow_split);

    let total: u64 = outputs.iter().map(|o| o.value).sum();
    let expected_len = if allow_split && sats / 2 >= CENT { 3 } else { 2 };
    TestResult::from_bool(total == sats && outputs.len() == expected_len && outputs[0].value == 0)
}

#[test]
fn test_assemble_coin_stake() {
    setup();
    let mut kernel_coin = coin(1, 0, 100 * COIN).with_script(p2pkh_of(GENERATOR_KEY));
    kernel_coin.time = 0;
    let mut extra = coin(2, 0, 20 * COIN).with_script(p2pkh_of(GENERATOR_KEY));
    extra.time = 0;
    let kernel = StakeKernel::new(&kernel_coin, 0, reward_script());

    let inputs = StakeInputCollector::new(ChainParams::mainnet())
        .collect_inputs_for_stake(
            &kernel,
            &[extra],
            10 * 24 * 60 * 60,
            false,
            Amount::from_sat(1_000 * COIN),
            Amount::ZERO,
        )
        .unwrap();

    let tx = assemble_coin_stake(&inputs, &kernel.output_script, Amount::from_sat(COIN), false, 0).unwrap();

    assert!(is_coinstake(&tx));
    assert_eq!(tx.version, 1);
    assert_eq!(tx.input.len(), 2);
    assert_eq!(tx.input[0].previous_output, kernel.prevout);
    assert_eq!(tx.output.len(), 2);
    assert_eq!(tx.output[1].value, 121 * COIN);
    assert!(tx.input.iter().all(|i| i.script_sig.is_empty()));
}

#[test]
fn test_assemble_rejects_reward_overflowing_money_range() {
    setup();
    let mut kernel_coin = coin(1, 0, 100 * COIN).with_script(p2pkh_of(GENERATOR_KEY));
    kernel_coin.time = 0;
    let kernel = StakeKernel::new(&kernel_coin, 0, reward_script());
    let inputs = StakeInputCollector::default()
        .collect_inputs_for_stake(&kernel, &[], 0, true, Amount::from_sat(100 * COIN), Amount::ZERO)
        .unwrap();

    let result = assemble_coin_stake(&inputs, &kernel.output_script, Amount::from_sat(MAX_MONEY), true, 0);
    assert_eq!(result, Err(WalletError::ExcessiveAmount));
}
