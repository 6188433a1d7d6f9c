//! Types shared by the coin selector
//!
//! This module defines the selection parameters, the confirmation policies
//! tried for ordinary spends, manual coin control, and the selection result.

use bitcoin::{Amount, OutPoint};
use neblio_common::config::SelectionConfig;
use neblio_common::types::{CandidateOutput, CENT, MIN_TX_FEE};
use std::collections::BTreeSet;

/// Tuning knobs of the approximate subset-sum selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionParams {
    /// Trials per subset-sum search
    pub iterations: usize,
    /// Tolerance added to the target when a tighter subset is preferred
    pub cent: Amount,
    /// Outputs at or below this value are never selected
    pub dust_threshold: Amount,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            iterations: 1000,
            cent: Amount::from_sat(CENT),
            dust_threshold: Amount::from_sat(MIN_TX_FEE),
        }
    }
}

impl From<&SelectionConfig> for SelectionParams {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            iterations: config.iterations,
            cent: Amount::from_sat(config.cent),
            dust_threshold: Amount::from_sat(config.dust_threshold),
        }
    }
}

/// Minimum depth an output needs before it may be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    /// Required depth for outputs of transactions this wallet created
    pub mine: u32,
    /// Required depth for outputs of everyone else's transactions
    pub theirs: u32,
}

impl ConfirmationPolicy {
    pub const fn new(mine: u32, theirs: u32) -> Self {
        Self { mine, theirs }
    }

    /// Required depth for the given output
    pub fn required_depth(&self, coin: &CandidateOutput) -> u32 {
        if coin.from_me {
            self.mine
        } else {
            self.theirs
        }
    }
}

/// Policies tried in order by `CoinSelector::select_coins`, strictest first
pub const SPEND_POLICIES: [ConfirmationPolicy; 3] = [
    ConfirmationPolicy::new(1, 6),
    ConfirmationPolicy::new(1, 1),
    ConfirmationPolicy::new(0, 1),
];

/// Manually chosen outputs that override automatic selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoinControl {
    selected: BTreeSet<OutPoint>,
}

impl CoinControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose an output for spending
    pub fn select(&mut self, outpoint: OutPoint) {
        self.selected.insert(outpoint);
    }

    /// Drop an output from the manual choice
    pub fn unselect(&mut self, outpoint: &OutPoint) {
        self.selected.remove(outpoint);
    }

    pub fn unselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn has_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_selected(&self, outpoint: &OutPoint) -> bool {
        self.selected.contains(outpoint)
    }

    /// Iterate over the chosen outpoints in a stable order
    pub fn selected(&self) -> impl Iterator<Item = &OutPoint> {
        self.selected.iter()
    }
}

/// Result of a coin selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    /// Selection successful
    Success {
        /// Selected outputs, no outpoint appears twice
        selected: Vec<CandidateOutput>,
        /// Sum of the selected values, never below the target
        total: Amount,
    },
    /// Eligible outputs do not cover the target
    InsufficientFunds {
        /// Total value of the eligible outputs
        available: Amount,
        /// Target value
        required: Amount,
    },
}

impl SelectionResult {
    /// Build a success result from the chosen outputs
    pub(crate) fn from_selected<'a, I>(coins: I) -> Self
    where
        I: IntoIterator<Item = &'a CandidateOutput>,
    {
        let selected: Vec<CandidateOutput> = coins.into_iter().cloned().collect();
        let total = selected.iter().map(|c| c.value).sum();
        SelectionResult::Success { selected, total }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SelectionResult::Success { .. })
    }

    /// Selected outputs, empty on failure
    pub fn selected(&self) -> &[CandidateOutput] {
        match self {
            SelectionResult::Success { selected, .. } => selected,
            SelectionResult::InsufficientFunds { .. } => &[],
        }
    }

    /// Sum of the selected values, None on failure
    pub fn total(&self) -> Option<Amount> {
        match self {
            SelectionResult::Success { total, .. } => Some(*total),
            SelectionResult::InsufficientFunds { .. } => None,
        }
    }
}
