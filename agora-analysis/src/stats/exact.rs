//! Exact two-proportion test via hypergeometric enumeration.
//!
//! Fisher-style two-sided test: with all margins fixed, sum the
//! probabilities of every contingency table at least as extreme as
//! (no more probable than) the observed one.

use statrs::distribution::{Discrete, Hypergeometric};

/// Tolerance when comparing table probabilities for "as extreme as".
const PROBABILITY_SLACK: f64 = 1e-7;

/// Two-sided exact p-value for the difference between two proportions.
///
/// Tractable for the combined sample sizes the selector routes here
/// (≤ 100); degenerate inputs resolve to p = 1.0.
pub fn two_proportion(successes_a: usize, n_a: usize, successes_b: usize, n_b: usize) -> f64 {
    if n_a == 0 || n_b == 0 {
        return 1.0;
    }

    let population = (n_a + n_b) as u64;
    let total_successes = (successes_a + successes_b) as u64;
    let draws = n_a as u64;

    let hypergeometric = match Hypergeometric::new(population, total_successes, draws) {
        Ok(distribution) => distribution,
        Err(_) => return 1.0,
    };

    let observed = hypergeometric.pmf(successes_a as u64);
    if !observed.is_finite() {
        return 1.0;
    }

    // Feasible success counts for group A given the fixed margins.
    let low = total_successes.saturating_sub(n_b as u64);
    let high = total_successes.min(draws);

    let mut p_value = 0.0;
    for k in low..=high {
        let probability = hypergeometric.pmf(k);
        if probability.is_finite() && probability <= observed * (1.0 + PROBABILITY_SLACK) {
            p_value += probability;
        }
    }

    p_value.clamp(0.0, 1.0)
}
