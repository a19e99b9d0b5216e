//! Normal-approximation two-proportion z-test (pooled standard error).

use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided p-value for the difference between two proportions.
///
/// Pooled proportion, pooled standard error, p from the standard normal
/// CDF. Degenerate inputs (zero variance) resolve to p = 1.0.
pub fn two_proportion(successes_a: usize, n_a: usize, successes_b: usize, n_b: usize) -> f64 {
    if n_a == 0 || n_b == 0 {
        return 1.0;
    }

    let p_a = successes_a as f64 / n_a as f64;
    let p_b = successes_b as f64 / n_b as f64;
    let pooled = (successes_a + successes_b) as f64 / (n_a + n_b) as f64;
    let standard_error =
        (pooled * (1.0 - pooled) * (1.0 / n_a as f64 + 1.0 / n_b as f64)).sqrt();

    if standard_error <= 0.0 || !standard_error.is_finite() {
        // Pooled proportion of 0 or 1: the groups cannot differ.
        return 1.0;
    }

    let z = (p_a - p_b) / standard_error;
    if !z.is_finite() {
        return 1.0;
    }

    match Normal::new(0.0, 1.0) {
        Ok(normal) => (2.0 * (1.0 - normal.cdf(z.abs()))).clamp(0.0, 1.0),
        Err(_) => 1.0,
    }
}
