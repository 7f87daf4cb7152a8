//! Per-sample importance weights biasing clustering toward saturated colors.

use crate::colorspace::saturation;
use crate::preprocessor::PixelSample;

/// Floor applied before the boost exponent so achromatic pixels keep a
/// small positive influence instead of starving the clusters of neutrals.
pub const MIN_SATURATION: f32 = 0.02;

/// Weight each sample by `saturation^boost`. Samples must carry sRGB [0,1]
/// colors. Every returned weight is finite and strictly positive.
pub fn saturation_weights(samples: &[PixelSample], boost: f32) -> Vec<f32> {
    samples
        .iter()
        .map(|s| saturation(s.color).max(MIN_SATURATION).powf(boost))
        .collect()
}

/// Unit weights for the unweighted strategies.
pub fn uniform_weights(n: usize) -> Vec<f32> {
    vec![1.0; n]
}
