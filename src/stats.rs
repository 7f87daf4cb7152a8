//! Per-color coverage statistics for reporting collaborators.

use crate::colorspace::rgb_to_hex;
use crate::image_data::ImageData;
use rgb::RGB8;
use serde::Serialize;

/// Coverage of one extracted color over the source image.
#[derive(Debug, Clone, Serialize)]
pub struct ColorStats {
    pub hex: String,
    pub rgb: [u8; 3],
    /// Fraction of image pixels whose nearest palette color is this one,
    /// in [0,1]. When the palette repeats a color (padding), the first
    /// occurrence absorbs the whole share.
    pub fraction: f32,
}

fn rgb_dist_sq(a: RGB8, b: RGB8) -> i32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    dr * dr + dg * dg + db * db
}

/// Assign every pixel of `image` to its nearest palette color and report
/// the member fraction per palette entry, in palette order.
pub fn color_stats(image: &ImageData, colors: &[RGB8]) -> Vec<ColorStats> {
    let mut counts = vec![0usize; colors.len()];
    if !colors.is_empty() {
        for p in &image.pixels {
            let mut best_idx = 0;
            let mut best_dist = i32::MAX;
            for (i, &c) in colors.iter().enumerate() {
                let d = rgb_dist_sq(*p, c);
                if d < best_dist {
                    best_dist = d;
                    best_idx = i;
                }
            }
            counts[best_idx] += 1;
        }
    }

    let total = image.pixels.len().max(1) as f32;
    colors
        .iter()
        .zip(counts)
        .map(|(&c, count)| ColorStats {
            hex: rgb_to_hex(c),
            rgb: [c.r, c.g, c.b],
            fraction: count as f32 / total,
        })
        .collect()
}
