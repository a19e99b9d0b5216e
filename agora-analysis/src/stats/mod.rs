//! Two-proportion significance testing with automatic method selection.
//!
//! Auto-selects based on sample size:
//! - combined n < 30, or any expected 2×2 cell < 5, with combined n ≤ 100
//!   → exact hypergeometric test
//! - otherwise → normal-approximation pooled z-test
//!
//! Both methods return a two-sided p-value; degenerate inputs resolve to
//! p = 1.0 rather than erroring.

pub mod exact;
pub mod ztest;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Combined sample size below which the exact test is preferred.
pub const SMALL_SAMPLE_CUTOFF: usize = 30;
/// Expected 2×2 cell count below which the normal approximation is suspect.
pub const MIN_EXPECTED_CELL: f64 = 5.0;
/// Combined sample size above which exact enumeration is not attempted.
pub const EXACT_TRACTABLE_LIMIT: usize = 100;

/// Method that produced a comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestMethod {
    NormalApproximation,
    Exact,
}

impl TestMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::NormalApproximation => "normal_approximation",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one two-proportion comparison.
#[derive(Debug, Clone, Copy)]
pub struct ProportionTest {
    /// Two-sided p-value in [0, 1].
    pub p_value: f64,
    pub method: TestMethod,
}

/// Compare `successes_a / n_a` against `successes_b / n_b`.
pub fn compare_proportions(
    successes_a: usize,
    n_a: usize,
    successes_b: usize,
    n_b: usize,
) -> ProportionTest {
    if n_a == 0 || n_b == 0 || successes_a > n_a || successes_b > n_b {
        return ProportionTest {
            p_value: 1.0,
            method: TestMethod::NormalApproximation,
        };
    }

    let combined = n_a + n_b;
    if wants_exact(successes_a, n_a, successes_b, n_b) && combined <= EXACT_TRACTABLE_LIMIT {
        ProportionTest {
            p_value: exact::two_proportion(successes_a, n_a, successes_b, n_b),
            method: TestMethod::Exact,
        }
    } else {
        ProportionTest {
            p_value: ztest::two_proportion(successes_a, n_a, successes_b, n_b),
            method: TestMethod::NormalApproximation,
        }
    }
}

/// Small combined sample, or any expected contingency cell below 5.
fn wants_exact(successes_a: usize, n_a: usize, successes_b: usize, n_b: usize) -> bool {
    let combined = n_a + n_b;
    if combined < SMALL_SAMPLE_CUTOFF {
        return true;
    }

    let total_successes = (successes_a + successes_b) as f64;
    let total_failures = (combined - successes_a - successes_b) as f64;
    let grand = combined as f64;
    for row_total in [n_a as f64, n_b as f64] {
        for column_total in [total_successes, total_failures] {
            if row_total * column_total / grand < MIN_EXPECTED_CELL {
                return true;
            }
        }
    }
    false
}
