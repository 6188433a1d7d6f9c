//! Stochastic approximation of the subset-sum problem
//!
//! Given values sorted largest first, find a subset whose sum reaches the
//! target with as little excess as possible. Each trial makes up to two
//! passes: the first includes every value with probability one half, the
//! second includes everything the first pass left out. Whenever the running
//! total reaches the target the trial records it if it beats the best so
//! far, then backs the last value out and keeps looking for a tighter fit.
//!
//! The randomness serves no security purpose; it only prevents degenerate
//! behaviour, so a fast non-cryptographic generator is used.

use rand::Rng;

/// Best subset found by a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetSolution {
    /// Inclusion flag per input value
    pub included: Vec<bool>,
    /// Sum of the included values
    pub total: u64,
}

/// Search for the subset of `values` whose sum is the smallest one at or above `target`
///
/// `total_lower` must be the sum of `values`. The search starts from the
/// trivial solution "everything included" and stops early on an exact match.
///
/// # Arguments
/// * `values` - Candidate values, sorted descending
/// * `total_lower` - Sum of all values
/// * `target` - Value to reach
/// * `iterations` - Maximum number of trials
/// * `rng` - Random source for the first pass
pub fn approximate_best_subset<R: Rng + ?Sized>(
    values: &[u64],
    total_lower: u64,
    target: u64,
    iterations: usize,
    rng: &mut R,
) -> SubsetSolution {
    debug_assert_eq!(values.iter().sum::<u64>(), total_lower);

    let mut best = SubsetSolution {
        included: vec![true; values.len()],
        total: total_lower,
    };
    let mut included = vec![false; values.len()];

    let mut rep = 0;
    while rep < iterations && best.total != target {
        included.iter_mut().for_each(|flag| *flag = false);
        let mut total = 0u64;
        let mut reached_target = false;

        for pass in 0..2 {
            if reached_target {
                break;
            }
            for (i, &value) in values.iter().enumerate() {
                let take = if pass == 0 {
                    rng.random::<bool>()
                } else {
                    !included[i]
                };
                if !take {
                    continue;
                }

                total += value;
                included[i] = true;
                if total >= target {
                    reached_target = true;
                    if total < best.total {
                        best.total = total;
                        best.included.copy_from_slice(&included);
                    }
                    total -= value;
                    included[i] = false;
                }
            }
        }
        rep += 1;
    }

    log::trace!(
        "subset search for {} over {} values finished after {} trials with {}",
        target,
        values.len(),
        rep,
        best.total
    );

    best
}
