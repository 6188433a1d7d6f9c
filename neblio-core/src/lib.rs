//! neblio Core Library
//!
//! Coin selection and coinstake construction for the neblio wallet. Every
//! operation here is synchronous and works on borrowed snapshots of wallet
//! state, so callers may run them from any thread.
//!
//! # Modules
//!
//! - `coin_selection`: choosing outputs to fund an ordinary spend
//! - `staking`: collecting coinstake inputs and laying out its outputs
//! - `wallet`: the candidate supply interface and an in-memory snapshot

pub mod coin_selection;
pub mod staking;
pub mod wallet;

pub use coin_selection::{CoinControl, CoinSelector, SelectionParams, SelectionResult};
pub use staking::{
    assemble_coin_stake, calculate_script_pub_key_for_stake_output, make_stake_outputs,
    StakeInputCollector, StakeInputs, StakeKernel,
};
pub use wallet::{CoinSource, WalletSnapshot};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
