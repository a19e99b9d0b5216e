//! Model-order scoring: between/within variance ratio.

use super::kmeans::{squared_distance, KmeansFit};

/// Within-cluster variance below this is treated as zero.
const WITHIN_FLOOR: f64 = 1e-12;

/// Score a fitted clustering; higher is better.
///
/// Between-cluster variance: cluster sizes times squared centroid distance
/// from the global centroid. Within-cluster variance: squared distance of
/// each point from its own centroid. Perfectly tight clusters score
/// `f64::MAX`; a degenerate fit (everything at one point) scores 0.
pub fn variance_ratio(points: &[Vec<f64>], fit: &KmeansFit) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let dims = points[0].len();

    let mut global = vec![0.0; dims];
    for point in points {
        for (d, v) in point.iter().enumerate() {
            global[d] += v;
        }
    }
    for g in &mut global {
        *g /= points.len() as f64;
    }

    let mut counts = vec![0usize; fit.centroids.len()];
    let mut within = 0.0;
    for (point, &label) in points.iter().zip(&fit.labels) {
        counts[label] += 1;
        within += squared_distance(point, &fit.centroids[label]);
    }

    let between: f64 = fit
        .centroids
        .iter()
        .zip(&counts)
        .filter(|(_, &count)| count > 0)
        .map(|(centroid, &count)| count as f64 * squared_distance(centroid, &global))
        .sum();

    if !between.is_finite() || !within.is_finite() {
        return 0.0;
    }
    if within <= WITHIN_FLOOR {
        return if between > 0.0 { f64::MAX } else { 0.0 };
    }
    between / within
}

#[cfg(test)]
mod tests {
    use super::super::kmeans;
    use super::*;

    #[test]
    fn test_clean_separation_scores_high() {
        let points = vec![
            vec![0.0, 0.0],
            vec![0.2, 0.0],
            vec![10.0, 10.0],
            vec![10.2, 10.0],
        ];
        let two = kmeans::fit(&points, 2).unwrap();
        let one = kmeans::fit(&points, 1).unwrap();
        assert!(variance_ratio(&points, &two) > variance_ratio(&points, &one));
    }

    #[test]
    fn test_single_cluster_scores_zero_between() {
        let points = vec![vec![0.0], vec![1.0], vec![2.0]];
        let fit = kmeans::fit(&points, 1).unwrap();
        // One centroid at the global mean: between-variance is zero.
        assert!(variance_ratio(&points, &fit) < 1e-9);
    }

    #[test]
    fn test_perfect_fit_scores_max() {
        let points = vec![vec![0.0], vec![0.0], vec![5.0], vec![5.0]];
        let fit = kmeans::fit(&points, 2).unwrap();
        assert_eq!(variance_ratio(&points, &fit), f64::MAX);
    }

    #[test]
    fn test_coincident_points_score_zero() {
        let points = vec![vec![3.0]; 4];
        let fit = kmeans::fit(&points, 2).unwrap();
        assert_eq!(variance_ratio(&points, &fit), 0.0);
    }
}
