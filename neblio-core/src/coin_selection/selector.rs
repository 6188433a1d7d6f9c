//! Coin selector for ordinary spends
//!
//! The `CoinSelector` picks a subset of candidate outputs whose value covers
//! a target with as little excess as possible.
//!
//! # Algorithm
//!
//! 1. Shuffle the candidates and drop the ineligible ones (too shallow,
//!    dated after the spend time, dust, duplicate outpoints).
//! 2. Return immediately on an output worth exactly the target.
//! 3. Split the rest into outputs below `target + CENT` and remember the
//!    smallest output at or above it.
//! 4. If the smaller outputs sum to the target exactly, take them all; if
//!    they cannot reach it, fall back to the smallest larger output.
//! 5. Otherwise approximate the best subset of the smaller outputs, first
//!    against the target and then against `target + CENT`, and prefer the
//!    smallest larger output when it is the tighter or safer choice.
//!
//! # Usage
//!
//! ```
//! use bitcoin::{Amount, OutPoint, Txid};
//! use bitcoin::hashes::Hash;
//! use neblio_common::types::{CandidateOutput, COIN};
//! use neblio_core::coin_selection::{insecure_rng, CoinSelector, SelectionResult};
//!
//! let coins = vec![
//!     CandidateOutput::new(OutPoint::new(Txid::all_zeros(), 0), Amount::from_sat(5 * COIN), 10, 1_000),
//! ];
//!
//! let selector = CoinSelector::new();
//! let result = selector
//!     .select_coins_min_conf(Amount::from_sat(5 * COIN), 2_000, 1, 6, &coins, &mut insecure_rng())
//!     .expect("target is within the money range");
//!
//! match result {
//!     SelectionResult::Success { selected, total } => {
//!         assert_eq!(selected.len(), 1);
//!         assert_eq!(total, Amount::from_sat(5 * COIN));
//!     }
//!     SelectionResult::InsufficientFunds { .. } => unreachable!(),
//! }
//! ```

use bitcoin::{Amount, OutPoint};
use neblio_common::config::SelectionConfig;
use neblio_common::logging::{self, LogLevel};
use neblio_common::types::{check_money_range, money_range, CandidateOutput, WalletError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;
use std::collections::HashSet;

use crate::coin_selection::subset::approximate_best_subset;
use crate::coin_selection::types::{
    CoinControl, ConfirmationPolicy, SelectionParams, SelectionResult, SPEND_POLICIES,
};

/// Selector for choosing outputs to fund a spend
#[derive(Debug, Clone, Default)]
pub struct CoinSelector {
    params: SelectionParams,
}

impl CoinSelector {
    /// Create a selector with the historical defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector with custom parameters
    pub fn with_params(params: SelectionParams) -> Self {
        Self { params }
    }

    /// Create a selector from the `[selection]` config section
    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::with_params(SelectionParams::from(config))
    }

    pub fn params(&self) -> &SelectionParams {
        &self.params
    }

    fn is_eligible(&self, coin: &CandidateOutput, spend_time: u32, policy: ConfirmationPolicy) -> bool {
        coin.depth >= policy.required_depth(coin)
            && coin.time <= spend_time
            && !coin.is_dust(self.params.dust_threshold)
            && money_range(coin.value)
    }

    /// Select outputs covering `target` under one confirmation policy
    ///
    /// # Arguments
    /// * `target` - Value to cover
    /// * `spend_time` - Outputs dated after this time are ignored
    /// * `conf_mine` - Depth required for outputs of our own transactions
    /// * `conf_theirs` - Depth required for outputs of other transactions
    /// * `candidates` - Snapshot of spendable outputs
    /// * `rng` - Random source for shuffling and the subset search
    ///
    /// # Returns
    /// * `Ok(SelectionResult)` - success, or insufficient funds
    /// * `Err(WalletError::ExcessiveAmount)` - target outside the money range
    pub fn select_coins_min_conf<R: Rng + ?Sized>(
        &self,
        target: Amount,
        spend_time: u32,
        conf_mine: u32,
        conf_theirs: u32,
        candidates: &[CandidateOutput],
        rng: &mut R,
    ) -> Result<SelectionResult, WalletError> {
        check_money_range(target)?;

        if target == Amount::ZERO {
            return Ok(SelectionResult::Success {
                selected: Vec::new(),
                total: Amount::ZERO,
            });
        }

        let policy = ConfirmationPolicy::new(conf_mine, conf_theirs);
        let cent = self.params.cent;
        let target_plus_cent = target.checked_add(cent).ok_or(WalletError::ExcessiveAmount)?;

        let mut coins: Vec<&CandidateOutput> = candidates.iter().collect();
        coins.shuffle(rng);

        let mut seen: HashSet<OutPoint> = HashSet::new();
        let mut lower: Vec<&CandidateOutput> = Vec::new();
        let mut total_lower = Amount::ZERO;
        let mut lowest_larger: Option<&CandidateOutput> = None;

        for coin in coins {
            if !self.is_eligible(coin, spend_time, policy) {
                continue;
            }
            if !seen.insert(coin.outpoint) {
                log::warn!("Duplicate candidate {} ignored", coin.id());
                continue;
            }

            if coin.value == target {
                log::debug!("Exact match for {} found in a single output", target.to_sat());
                return Ok(SelectionResult::from_selected([coin]));
            } else if coin.value < target_plus_cent {
                lower.push(coin);
                total_lower = total_lower
                    .checked_add(coin.value)
                    .ok_or(WalletError::ExcessiveAmount)?;
            } else if lowest_larger.map_or(true, |larger| coin.value < larger.value) {
                lowest_larger = Some(coin);
            }
        }

        if total_lower == target {
            log::debug!("Smaller outputs sum exactly to {}", target.to_sat());
            return Ok(SelectionResult::from_selected(lower));
        }

        if total_lower < target {
            return Ok(match lowest_larger {
                Some(larger) => {
                    log::debug!("Smaller outputs fall short, using single larger output");
                    SelectionResult::from_selected([larger])
                }
                None => {
                    logging::log_selection(
                        LogLevel::Debug,
                        "insufficient funds",
                        Some(json!({
                            "available": total_lower.to_sat(),
                            "required": target.to_sat(),
                        })),
                    );
                    SelectionResult::InsufficientFunds {
                        available: total_lower,
                        required: target,
                    }
                }
            });
        }

        // Solve subset sum by stochastic approximation
        lower.sort_by(|a, b| b.value.cmp(&a.value));
        let values: Vec<u64> = lower.iter().map(|c| c.value.to_sat()).collect();

        let mut best = approximate_best_subset(
            &values,
            total_lower.to_sat(),
            target.to_sat(),
            self.params.iterations,
            rng,
        );
        if best.total != target.to_sat() && total_lower >= target_plus_cent {
            best = approximate_best_subset(
                &values,
                total_lower.to_sat(),
                target_plus_cent.to_sat(),
                self.params.iterations,
                rng,
            );
        }

        // Prefer the larger output when the subset is not exact and leaves less
        // than a cent of change, or when the larger output is no worse
        if let Some(larger) = lowest_larger {
            let best_total = Amount::from_sat(best.total);
            if (best_total != target && best_total < target_plus_cent) || larger.value <= best_total {
                log::debug!(
                    "Single larger output {} preferred over subset totalling {}",
                    larger.value.to_sat(),
                    best.total
                );
                return Ok(SelectionResult::from_selected([larger]));
            }
        }

        let chosen = lower
            .iter()
            .zip(&best.included)
            .filter(|&(_, &included)| included)
            .map(|(coin, _)| *coin);
        let result = SelectionResult::from_selected(chosen);

        logging::log_selection(
            LogLevel::Debug,
            "subset selected",
            Some(json!({
                "target": target.to_sat(),
                "total": best.total,
                "inputs": result.selected().len(),
            })),
        );

        Ok(result)
    }

    /// Select outputs for an ordinary spend
    ///
    /// Manually chosen outputs in `coin_control` are used as-is. Otherwise the
    /// confirmation policies in `SPEND_POLICIES` are tried strictest first and
    /// the first successful selection is returned.
    pub fn select_coins<R: Rng + ?Sized>(
        &self,
        target: Amount,
        spend_time: u32,
        candidates: &[CandidateOutput],
        coin_control: Option<&CoinControl>,
        rng: &mut R,
    ) -> Result<SelectionResult, WalletError> {
        check_money_range(target)?;

        if let Some(control) = coin_control.filter(|c| c.has_selected()) {
            return self.select_preselected(target, candidates, control);
        }

        let mut last = SelectionResult::InsufficientFunds {
            available: Amount::ZERO,
            required: target,
        };
        for policy in SPEND_POLICIES {
            last = self.select_coins_min_conf(
                target,
                spend_time,
                policy.mine,
                policy.theirs,
                candidates,
                rng,
            )?;
            if last.is_success() {
                break;
            }
        }
        Ok(last)
    }

    fn select_preselected(
        &self,
        target: Amount,
        candidates: &[CandidateOutput],
        control: &CoinControl,
    ) -> Result<SelectionResult, WalletError> {
        let mut seen: HashSet<OutPoint> = HashSet::new();
        let chosen: Vec<&CandidateOutput> = candidates
            .iter()
            .filter(|coin| control.is_selected(&coin.outpoint) && money_range(coin.value))
            .filter(|coin| seen.insert(coin.outpoint))
            .collect();
        let total = chosen
            .iter()
            .try_fold(Amount::ZERO, |sum, coin| sum.checked_add(coin.value))
            .ok_or(WalletError::ExcessiveAmount)?;

        Ok(if total >= target {
            SelectionResult::from_selected(chosen)
        } else {
            SelectionResult::InsufficientFunds {
                available: total,
                required: target,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;
    use bitcoin::Txid;
    use neblio_common::types::{CENT, COIN};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn coin(n: u8, value: u64) -> CandidateOutput {
        CandidateOutput::new(
            OutPoint::new(Txid::from_byte_array([n; 32]), 0),
            Amount::from_sat(value),
            10,
            100,
        )
    }

    #[test]
    fn lowest_larger_beats_loose_subset() {
        let mut rng = SmallRng::seed_from_u64(1);
        // The only subset reaching 5 COIN is 3 + 3, and 5.5 COIN leaves less change
        let coins = vec![
            coin(1, 3 * COIN),
            coin(2, 3 * COIN),
            coin(3, 55 * COIN / 10),
        ];
        let result = CoinSelector::new()
            .select_coins_min_conf(Amount::from_sat(5 * COIN), 1_000, 1, 1, &coins, &mut rng)
            .unwrap();

        assert_eq!(result.total(), Some(Amount::from_sat(55 * COIN / 10)));
        assert_eq!(result.selected().len(), 1);
    }

    #[test]
    fn subset_within_a_cent_is_rejected_for_larger() {
        let mut rng = SmallRng::seed_from_u64(3);
        // Best subset overshoots by less than a cent, so the single larger output wins
        let coins = vec![
            coin(1, 2 * COIN),
            coin(2, 2 * COIN),
            coin(3, COIN + CENT / 2),
            coin(4, 10 * COIN),
        ];
        let result = CoinSelector::new()
            .select_coins_min_conf(Amount::from_sat(5 * COIN), 1_000, 1, 1, &coins, &mut rng)
            .unwrap();

        assert_eq!(result.total(), Some(Amount::from_sat(10 * COIN)));
    }

    #[test]
    fn zero_target_selects_nothing() {
        let mut rng = SmallRng::seed_from_u64(5);
        let result = CoinSelector::new()
            .select_coins_min_conf(Amount::ZERO, 1_000, 1, 1, &[coin(1, COIN)], &mut rng)
            .unwrap();

        assert_eq!(result.total(), Some(Amount::ZERO));
        assert!(result.selected().is_empty());
    }
}
