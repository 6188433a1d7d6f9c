//! Coinstake construction
//!
//! - `kernel`: the winning stake output
//! - `collector`: kernel-first input collection under the staking limits
//! - `outputs`: marker and reward output layout
//! - `reward_script`: reward destination derived from the kernel script
//! - `coinstake`: unsigned transaction assembly

pub mod coinstake;
pub mod collector;
pub mod kernel;
pub mod outputs;
pub mod reward_script;

pub use coinstake::{assemble_coin_stake, is_coinstake};
pub use collector::{SpentOutput, StakeInputCollector, StakeInputs};
pub use kernel::StakeKernel;
pub use outputs::{make_stake_outputs, split_stake_amount};
pub use reward_script::calculate_script_pub_key_for_stake_output;
