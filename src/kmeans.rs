//! Weighted k-means with k-means++ initialization.
//!
//! Works on f32 3-component colors in whatever space the caller picked
//! (sRGB or CIELAB); distances are squared Euclidean in that space. Cluster
//! updates use the weighted centroid, so a boosted sample pulls its center
//! harder than its raw frequency would.

use crate::error::{Error, Result};
use crate::preprocessor::PixelSample;
use rand::Rng;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Iteration cap guaranteeing termination; assignment convergence usually
/// lands well under this on downscaled inputs.
pub const MAX_ITERATIONS: usize = 50;

/// One cluster out of a run: its center in the clustering space, the raw
/// member count, the mean member coordinate, and the member sample indices
/// (indices into the sample slice the run was given).
#[derive(Debug, Clone)]
pub struct Cluster {
    pub center: [f32; 3],
    pub count: usize,
    pub centroid_x: f32,
    pub centroid_y: f32,
    pub members: Vec<usize>,
}

#[inline]
fn dist_sq(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    d0 * d0 + d1 * d1 + d2 * d2
}

fn nearest_center(color: &[f32; 3], centers: &[[f32; 3]]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = f32::MAX;
    for (j, c) in centers.iter().enumerate() {
        let d = dist_sq(color, c);
        if d < best_dist {
            best_dist = d;
            best_idx = j;
        }
    }
    best_idx
}

fn distinct_colors(samples: &[PixelSample]) -> usize {
    let mut seen = HashSet::new();
    for s in samples {
        seen.insert(s.color.map(f32::to_bits));
    }
    seen.len()
}

/// K-means++ seeding: the first center is drawn with probability
/// proportional to weight, each further center with probability
/// proportional to weight times squared distance from the nearest
/// already-chosen center.
fn plus_plus_init(
    samples: &[PixelSample],
    weights: &[f32],
    k: usize,
    rng: &mut StdRng,
) -> Result<Vec<[f32; 3]>> {
    let n = samples.len();
    let total_weight: f64 = weights.iter().map(|&w| w as f64).sum();
    if !(total_weight.is_finite() && total_weight > 0.0) {
        return Err(Error::ClusteringFailure(
            "total sample weight is zero or non-finite".into(),
        ));
    }

    let mut centers = Vec::with_capacity(k);
    let mut pick = rng.r#gen::<f64>() * total_weight;
    let mut first = 0;
    for (i, &w) in weights.iter().enumerate() {
        pick -= w as f64;
        if pick <= 0.0 {
            first = i;
            break;
        }
    }
    centers.push(samples[first].color);

    let mut distances = vec![0.0f64; n];
    for iteration in 1..k {
        let newest = centers.last().unwrap_or(&centers[0]);
        let mut total = 0.0f64;
        for (i, s) in samples.iter().enumerate() {
            let d = dist_sq(&s.color, newest) as f64 * weights[i] as f64;
            if iteration == 1 || d < distances[i] {
                distances[i] = d;
            }
            total += distances[i];
        }
        if total == 0.0 {
            // All remaining mass sits on existing centers.
            break;
        }
        let mut pick = rng.r#gen::<f64>() * total;
        let mut chosen = None;
        for (i, &d) in distances.iter().enumerate() {
            pick -= d;
            if pick <= 0.0 {
                chosen = Some(i);
                break;
            }
        }
        let idx = chosen.unwrap_or(n - 1);
        centers.push(samples[idx].color);
    }

    Ok(centers)
}

/// Run weighted Lloyd's clustering and return up to `k` non-empty clusters.
///
/// When the sample set holds fewer distinct colors than `k`, fewer clusters
/// come back; fabricating duplicates is the assembler's decision, not this
/// module's.
pub fn cluster(
    samples: &[PixelSample],
    weights: &[f32],
    k: usize,
    rng: &mut StdRng,
) -> Result<Vec<Cluster>> {
    if k == 0 {
        return Err(Error::InvalidParameter(
            "cluster count must be positive".into(),
        ));
    }
    if samples.is_empty() {
        return Err(Error::EmptyImage);
    }
    debug_assert_eq!(samples.len(), weights.len());

    let k = k.min(distinct_colors(samples));
    let mut centers = plus_plus_init(samples, weights, k, rng)?;
    let k = centers.len();

    let mut assignments = vec![0usize; samples.len()];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (i, s) in samples.iter().enumerate() {
            let j = nearest_center(&s.color, &centers);
            if assignments[i] != j {
                assignments[i] = j;
                changed = true;
            }
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut wsums = vec![0.0f64; k];
        for (i, s) in samples.iter().enumerate() {
            let j = assignments[i];
            let w = weights[i] as f64;
            sums[j][0] += s.color[0] as f64 * w;
            sums[j][1] += s.color[1] as f64 * w;
            sums[j][2] += s.color[2] as f64 * w;
            wsums[j] += w;
        }
        for j in 0..k {
            if wsums[j] > 0.0 {
                centers[j] = [
                    (sums[j][0] / wsums[j]) as f32,
                    (sums[j][1] / wsums[j]) as f32,
                    (sums[j][2] / wsums[j]) as f32,
                ];
            }
        }

        if !changed {
            break;
        }
    }

    if centers.iter().flatten().any(|v| !v.is_finite()) {
        return Err(Error::ClusteringFailure("centroid went non-finite".into()));
    }

    // Final pass so members match the final centers exactly.
    for (i, s) in samples.iter().enumerate() {
        assignments[i] = nearest_center(&s.color, &centers);
    }

    let mut clusters: Vec<Cluster> = centers
        .iter()
        .map(|&center| Cluster {
            center,
            count: 0,
            centroid_x: 0.0,
            centroid_y: 0.0,
            members: Vec::new(),
        })
        .collect();
    for (i, s) in samples.iter().enumerate() {
        let c = &mut clusters[assignments[i]];
        c.count += 1;
        c.centroid_x += s.x as f32;
        c.centroid_y += s.y as f32;
        c.members.push(i);
    }
    clusters.retain(|c| c.count > 0);
    for c in &mut clusters {
        c.centroid_x /= c.count as f32;
        c.centroid_y /= c.count as f32;
    }

    Ok(clusters)
}
