//! Shared helpers for the neblio-core integration tests

#![allow(dead_code)]

use bitcoin::hashes::Hash;
use bitcoin::{Amount, OutPoint, PublicKey, ScriptBuf, Txid};
use neblio_common::logging::{self, LogConfig, LogLevel};
use neblio_common::types::CandidateOutput;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

pub fn setup() {
    INIT_LOGGER.call_once(|| {
        let config = LogConfig {
            level: LogLevel::Error,
            log_file: None,
            include_timestamps: false,
            include_source_location: false,
            console_logging: false,
            json_format: false,
        };
        let _ = logging::init(&config);
    });
}

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Txid whose bytes are all `n`
pub fn txid(n: u8) -> Txid {
    Txid::from_byte_array([n; 32])
}

/// Confirmed output of someone else's transaction
pub fn coin(n: u8, vout: u32, sats: u64) -> CandidateOutput {
    CandidateOutput::new(OutPoint::new(txid(n), vout), Amount::from_sat(sats), 10, 1_000)
}

pub const GENERATOR_KEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
pub const OTHER_KEY: &str = "02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5";

pub fn public_key(hex_key: &str) -> PublicKey {
    PublicKey::from_slice(&hex::decode(hex_key).unwrap()).unwrap()
}

pub fn p2pkh_of(hex_key: &str) -> ScriptBuf {
    ScriptBuf::new_p2pkh(&public_key(hex_key).pubkey_hash())
}
