//! Coin selection for ordinary spends
//!
//! - `types`: selection parameters, confirmation policies, coin control, result
//! - `selector`: the `CoinSelector`
//! - `subset`: stochastic subset-sum search used by the selector

pub mod selector;
pub mod subset;
pub mod types;

pub use selector::CoinSelector;
pub use subset::{approximate_best_subset, SubsetSolution};
pub use types::{CoinControl, ConfirmationPolicy, SelectionParams, SelectionResult, SPEND_POLICIES};

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Fast, non-cryptographic generator for shuffling and subset search
pub fn insecure_rng() -> SmallRng {
    SmallRng::seed_from_u64(rand::random())
}
