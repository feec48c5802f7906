//! Weighted k-means over Oklab colors.
//!
//! Images usually repeat colors heavily, so clustering runs over the set of
//! distinct colors, each weighted by how many pixels carry it. The result is
//! the same as clustering every pixel individually.

use rand::seq::index;
use rand::Rng;

use super::QuantizeOptions;
use crate::color::Oklab;

/// A distinct color and the number of pixels that use it.
#[derive(Debug, Clone, Copy)]
pub struct WeightedPoint {
    pub color: Oklab,
    pub weight: u64,
}

/// Outcome of the best k-means attempt.
#[derive(Debug, Clone)]
pub struct Clustering {
    /// One center per requested cluster (some may be unused).
    pub centers: Vec<Oklab>,
    /// Cluster index for each input point, parallel to the input slice.
    pub labels: Vec<usize>,
    /// Weighted sum of squared distances from points to their centers.
    pub compactness: f64,
    /// Assign/update rounds performed by the winning attempt.
    pub iterations: u32,
}

/// Cluster `points` into `k` groups, keeping the most compact of
/// `options.attempts` random restarts.
///
/// Callers guarantee `1 <= k <= points.len()`.
pub fn kmeans<R: Rng + ?Sized>(
    points: &[WeightedPoint],
    k: usize,
    options: &QuantizeOptions,
    rng: &mut R,
) -> Clustering {
    debug_assert!(k >= 1 && k <= points.len());

    let mut best = run_attempt(points, k, options, rng);
    for _ in 1..options.attempts {
        let candidate = run_attempt(points, k, options, rng);
        if candidate.compactness < best.compactness {
            best = candidate;
        }
    }
    best
}

fn run_attempt<R: Rng + ?Sized>(
    points: &[WeightedPoint],
    k: usize,
    options: &QuantizeOptions,
    rng: &mut R,
) -> Clustering {
    let mut centers: Vec<Oklab> = index::sample(rng, points.len(), k)
        .into_iter()
        .map(|i| points[i].color)
        .collect();
    let mut labels = vec![0usize; points.len()];
    let epsilon_sq = options.epsilon * options.epsilon;

    let mut iterations = 0;
    while iterations < options.max_iterations {
        iterations += 1;
        assign(points, &centers, &mut labels);
        let updated = update_centers(points, &centers, &mut labels);

        let max_shift = centers
            .iter()
            .zip(&updated)
            .map(|(old, new)| old.distance_squared(*new))
            .fold(0.0f32, f32::max);
        centers = updated;

        if max_shift <= epsilon_sq {
            break;
        }
    }

    // Labels must agree with the centers that are actually returned.
    let compactness = assign(points, &centers, &mut labels);
    Clustering {
        centers,
        labels,
        compactness,
        iterations,
    }
}

/// Label every point with its nearest center; returns the weighted
/// compactness of that assignment.
fn assign(points: &[WeightedPoint], centers: &[Oklab], labels: &mut [usize]) -> f64 {
    let mut compactness = 0.0f64;
    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let (nearest, dist) = nearest_center(point.color, centers);
        *label = nearest;
        compactness += dist as f64 * point.weight as f64;
    }
    compactness
}

#[inline]
fn nearest_center(color: Oklab, centers: &[Oklab]) -> (usize, f32) {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let d = color.distance_squared(*c);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    (best, best_dist)
}

/// Recompute each center as the weighted mean of its points.
///
/// A cluster left empty takes over the point that sits farthest from its
/// own center, as long as that point is not already exact; otherwise the
/// old center is kept.
fn update_centers(points: &[WeightedPoint], centers: &[Oklab], labels: &mut [usize]) -> Vec<Oklab> {
    let k = centers.len();
    let mut sums = vec![[0.0f64; 3]; k];
    let mut weights = vec![0u64; k];
    let mut members = vec![0usize; k];

    for (point, &label) in points.iter().zip(labels.iter()) {
        let w = point.weight as f64;
        sums[label][0] += point.color.l as f64 * w;
        sums[label][1] += point.color.a as f64 * w;
        sums[label][2] += point.color.b as f64 * w;
        weights[label] += point.weight;
        members[label] += 1;
    }

    for empty in 0..k {
        if members[empty] > 0 {
            continue;
        }
        let mut farthest: Option<(usize, f32)> = None;
        for (i, (point, &label)) in points.iter().zip(labels.iter()).enumerate() {
            if members[label] <= 1 {
                continue;
            }
            let d = point.color.distance_squared(centers[label]);
            if d > 0.0 && farthest.map_or(true, |(_, best)| d > best) {
                farthest = Some((i, d));
            }
        }

        let Some((i, _)) = farthest else { continue };
        let point = points[i];
        let from = labels[i];
        let w = point.weight as f64;

        sums[from][0] -= point.color.l as f64 * w;
        sums[from][1] -= point.color.a as f64 * w;
        sums[from][2] -= point.color.b as f64 * w;
        weights[from] -= point.weight;
        members[from] -= 1;

        sums[empty] = [
            point.color.l as f64 * w,
            point.color.a as f64 * w,
            point.color.b as f64 * w,
        ];
        weights[empty] = point.weight;
        members[empty] = 1;
        labels[i] = empty;
    }

    (0..k)
        .map(|i| {
            if weights[i] == 0 {
                return centers[i];
            }
            let w = weights[i] as f64;
            Oklab::new(
                (sums[i][0] / w) as f32,
                (sums[i][1] / w) as f32,
                (sums[i][2] / w) as f32,
            )
        })
        .collect()
}
