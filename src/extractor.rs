//! The five extraction strategies.
//!
//! Every strategy is a function from (samples, weights, k) to at most k
//! cluster candidates; they differ in color space, weighting, and whether
//! clustering runs once or in two passes. Selection is by the [`Method`]
//! enum, never by loose strings inside the core.

use crate::colorspace::{lab_to_rgb, rgb_to_lab, saturation, to_rgb8};
use crate::error::{Error, Result};
use crate::kmeans::{self, Cluster};
use crate::preprocessor::PixelSample;
use crate::weighting::{saturation_weights, uniform_weights};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rgb::RGB8;
use std::str::FromStr;

/// Default exponent for the aggressive strategy's saturation boost.
pub const DEFAULT_AGGRESSIVE_BOOST: f32 = 3.0;

/// Samples at or above this HSV saturation feed multistage pass 1.
const MULTISTAGE_SATURATION_CUTOFF: f32 = 0.5;

/// Extraction strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Plain k-means in RGB, uniform weights.
    Kmeans,
    /// K-means in CIELAB so distances track perceived difference. Default.
    Lab,
    /// RGB k-means with a strong saturation boost.
    Aggressive,
    /// High-saturation pixels clustered apart from the remainder.
    Vibrant,
    /// Two sequential passes: saturated pixels first, the unclaimed rest second.
    Multistage,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Kmeans,
        Method::Lab,
        Method::Aggressive,
        Method::Vibrant,
        Method::Multistage,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Method::Kmeans => "kmeans",
            Method::Lab => "lab",
            Method::Aggressive => "aggressive",
            Method::Vibrant => "vibrant",
            Method::Multistage => "multistage",
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kmeans" => Ok(Method::Kmeans),
            "lab" => Ok(Method::Lab),
            "aggressive" => Ok(Method::Aggressive),
            "vibrant" => Ok(Method::Vibrant),
            "multistage" => Ok(Method::Multistage),
            other => Err(Error::InvalidParameter(format!(
                "unknown method {:?} (expected kmeans, lab, aggressive, vibrant, or multistage)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A cluster center mapped back to display space, with the metadata the
/// assembler and sorter consume.
#[derive(Debug, Clone)]
pub struct ColorCandidate {
    pub rgb: RGB8,
    /// Member pixel count in the downscaled frame, the frequency proxy.
    pub count: usize,
    pub centroid_x: f32,
    pub centroid_y: f32,
}

/// Resolved strategy inputs, built by the public API from [`crate::ExtractOptions`].
#[derive(Debug, Clone)]
pub(crate) struct StrategyParams {
    pub n_colors: usize,
    pub saturation_boost: Option<f32>,
    pub n_vibrant: Option<usize>,
    pub seed: u64,
}

/// Pass-1 output of a two-pass strategy, threaded explicitly into pass 2:
/// the candidates chosen so far plus the sample indices they claimed.
struct StagePartition {
    candidates: Vec<ColorCandidate>,
    claimed: Vec<bool>,
}

fn candidate_from(cluster: &Cluster, convert: impl Fn([f32; 3]) -> RGB8) -> ColorCandidate {
    ColorCandidate {
        rgb: convert(cluster.center),
        count: cluster.count,
        centroid_x: cluster.centroid_x,
        centroid_y: cluster.centroid_y,
    }
}

/// Run the selected strategy. Samples are sRGB [0,1]; strategies that
/// cluster elsewhere transform internally and convert centers back.
pub(crate) fn run_strategy(
    method: Method,
    samples: &[PixelSample],
    params: &StrategyParams,
) -> Result<Vec<ColorCandidate>> {
    if params.n_colors == 0 {
        return Err(Error::InvalidParameter(
            "n_colors must be positive".into(),
        ));
    }
    if let Some(boost) = params.saturation_boost {
        if !(boost.is_finite() && boost > 0.0) {
            return Err(Error::InvalidParameter(
                "saturation_boost must be a positive finite number".into(),
            ));
        }
    }
    if samples.is_empty() {
        return Err(Error::EmptyImage);
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    match method {
        Method::Kmeans => extract_kmeans(samples, params.n_colors, &mut rng),
        Method::Lab => extract_lab(samples, params.n_colors, &mut rng),
        Method::Aggressive => {
            let boost = params.saturation_boost.unwrap_or(DEFAULT_AGGRESSIVE_BOOST);
            extract_aggressive(samples, params.n_colors, boost, &mut rng)
        }
        Method::Vibrant => extract_vibrant(samples, params, &mut rng),
        Method::Multistage => extract_multistage(samples, params.n_colors, &mut rng),
    }
}

fn extract_kmeans(
    samples: &[PixelSample],
    k: usize,
    rng: &mut StdRng,
) -> Result<Vec<ColorCandidate>> {
    let weights = uniform_weights(samples.len());
    let clusters = kmeans::cluster(samples, &weights, k, rng)?;
    Ok(clusters.iter().map(|c| candidate_from(c, to_rgb8)).collect())
}

fn extract_lab(
    samples: &[PixelSample],
    k: usize,
    rng: &mut StdRng,
) -> Result<Vec<ColorCandidate>> {
    let lab_samples: Vec<PixelSample> = samples
        .iter()
        .map(|s| PixelSample {
            color: rgb_to_lab(s.color),
            x: s.x,
            y: s.y,
        })
        .collect();
    let weights = uniform_weights(lab_samples.len());
    let clusters = kmeans::cluster(&lab_samples, &weights, k, rng)?;
    Ok(clusters
        .iter()
        .map(|c| candidate_from(c, |center| to_rgb8(lab_to_rgb(center))))
        .collect())
}

fn extract_aggressive(
    samples: &[PixelSample],
    k: usize,
    boost: f32,
    rng: &mut StdRng,
) -> Result<Vec<ColorCandidate>> {
    let weights = saturation_weights(samples, boost);
    let clusters = kmeans::cluster(samples, &weights, k, rng)?;
    Ok(clusters.iter().map(|c| candidate_from(c, to_rgb8)).collect())
}

/// Split the most saturated quarter of the samples off, cluster it into
/// `n_vibrant` colors, cluster the remainder into the rest, and concatenate
/// vibrant-first. The two runs are independent single passes.
fn extract_vibrant(
    samples: &[PixelSample],
    params: &StrategyParams,
    rng: &mut StdRng,
) -> Result<Vec<ColorCandidate>> {
    let k = params.n_colors;
    let n_vibrant = params.n_vibrant.unwrap_or((k / 2).max(1));
    if n_vibrant == 0 || n_vibrant > k {
        return Err(Error::InvalidParameter(format!(
            "n_vibrant must be in 1..={}, got {}",
            k, n_vibrant
        )));
    }

    let sats: Vec<f32> = samples.iter().map(|s| saturation(s.color)).collect();
    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.sort_by(|&a, &b| sats[b].total_cmp(&sats[a]));
    let split = (samples.len() / 4).max(n_vibrant).min(samples.len());

    let vibrant_set: Vec<PixelSample> = order[..split].iter().map(|&i| samples[i]).collect();
    let rest: Vec<PixelSample> = order[split..].iter().map(|&i| samples[i]).collect();

    let mut candidates = {
        let weights = uniform_weights(vibrant_set.len());
        let clusters = kmeans::cluster(&vibrant_set, &weights, n_vibrant, rng)?;
        clusters
            .iter()
            .map(|c| candidate_from(c, to_rgb8))
            .collect::<Vec<_>>()
    };

    if k > n_vibrant && !rest.is_empty() {
        let weights = uniform_weights(rest.len());
        let clusters = kmeans::cluster(&rest, &weights, k - n_vibrant, rng)?;
        candidates.extend(clusters.iter().map(|c| candidate_from(c, to_rgb8)));
    }

    Ok(candidates)
}

/// Pass 1 clusters only high-saturation pixels to a fixed count; pass 2
/// clusters everything pass 1 did not claim, filling the remaining count.
fn extract_multistage(
    samples: &[PixelSample],
    k: usize,
    rng: &mut StdRng,
) -> Result<Vec<ColorCandidate>> {
    let stage1_k = (k / 2).max(1);
    let high_idx: Vec<usize> = (0..samples.len())
        .filter(|&i| saturation(samples[i].color) >= MULTISTAGE_SATURATION_CUTOFF)
        .collect();

    let mut partition = StagePartition {
        candidates: Vec::new(),
        claimed: vec![false; samples.len()],
    };

    if !high_idx.is_empty() {
        let high: Vec<PixelSample> = high_idx.iter().map(|&i| samples[i]).collect();
        let weights = uniform_weights(high.len());
        let clusters = kmeans::cluster(&high, &weights, stage1_k, rng)?;
        for c in &clusters {
            partition.candidates.push(candidate_from(c, to_rgb8));
            for &m in &c.members {
                partition.claimed[high_idx[m]] = true;
            }
        }
    }

    let remaining_k = k.saturating_sub(partition.candidates.len());
    let rest: Vec<PixelSample> = (0..samples.len())
        .filter(|&i| !partition.claimed[i])
        .map(|i| samples[i])
        .collect();

    if remaining_k > 0 && !rest.is_empty() {
        let weights = uniform_weights(rest.len());
        let clusters = kmeans::cluster(&rest, &weights, remaining_k, rng)?;
        partition
            .candidates
            .extend(clusters.iter().map(|c| candidate_from(c, to_rgb8)));
    }

    Ok(partition.candidates)
}
