//! Turns raw strategy candidates into the fixed-size palette callers get.
//!
//! Clustering may come back with near-identical centers (two passes landing
//! on the same color) or with fewer clusters than requested. This stage
//! merges near-duplicates, then truncates or pads to exactly `n_colors`.
//! Padding repeats the most frequent candidate; that is the documented
//! policy for under-filled results, never an error.

use crate::error::{Error, Result};
use crate::extractor::ColorCandidate;
use rgb::RGB8;

/// Squared RGB distance below which two candidates count as one color
/// (roughly 10 levels per channel combined).
pub const MERGE_THRESHOLD: i32 = 300;

/// The extraction result: exactly `n_colors` entries in contract order,
/// plus the merged candidate list ranked by frequency for reporting.
#[derive(Debug, Clone)]
pub struct Palette {
    pub entries: Vec<ColorCandidate>,
    pub ranked: Vec<ColorCandidate>,
}

impl Palette {
    /// The ordered RGB triples consumers rely on.
    pub fn colors(&self) -> Vec<RGB8> {
        self.entries.iter().map(|c| c.rgb).collect()
    }
}

fn rgb_dist_sq(a: RGB8, b: RGB8) -> i32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    dr * dr + dg * dg + db * db
}

/// Merge candidates whose colors sit within [`MERGE_THRESHOLD`]. The merged
/// entry keeps the higher-count member's RGB; counts add and coordinate
/// centroids combine count-weighted.
fn merge_near_duplicates(candidates: Vec<ColorCandidate>) -> Vec<ColorCandidate> {
    let mut merged: Vec<ColorCandidate> = Vec::with_capacity(candidates.len());
    for cand in candidates {
        match merged
            .iter_mut()
            .find(|kept| rgb_dist_sq(kept.rgb, cand.rgb) < MERGE_THRESHOLD)
        {
            Some(kept) => {
                let total = (kept.count + cand.count).max(1);
                kept.centroid_x = (kept.centroid_x * kept.count as f32
                    + cand.centroid_x * cand.count as f32)
                    / total as f32;
                kept.centroid_y = (kept.centroid_y * kept.count as f32
                    + cand.centroid_y * cand.count as f32)
                    / total as f32;
                if cand.count > kept.count {
                    kept.rgb = cand.rgb;
                }
                kept.count += cand.count;
            }
            None => merged.push(cand),
        }
    }
    merged
}

/// Resolve the requested color count: merge, then truncate (dropping the
/// lowest-count candidates first, survivors keep clustering order) or pad
/// (repeating the most frequent candidate).
pub(crate) fn assemble(candidates: Vec<ColorCandidate>, n_colors: usize) -> Result<Palette> {
    if n_colors == 0 {
        return Err(Error::InvalidParameter(
            "n_colors must be positive".into(),
        ));
    }
    if candidates.is_empty() {
        return Err(Error::EmptyImage);
    }

    let merged = merge_near_duplicates(candidates);

    let mut ranked = merged.clone();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    let mut entries = if merged.len() > n_colors {
        // Mark the n_colors highest counts, keep them in original order.
        let mut by_count: Vec<usize> = (0..merged.len()).collect();
        by_count.sort_by(|&a, &b| merged[b].count.cmp(&merged[a].count));
        let mut keep = vec![false; merged.len()];
        for &i in by_count.iter().take(n_colors) {
            keep[i] = true;
        }
        merged
            .into_iter()
            .zip(keep)
            .filter_map(|(c, k)| k.then_some(c))
            .collect()
    } else {
        merged
    };

    if entries.len() < n_colors {
        // Earliest candidate wins count ties.
        let mut best = 0;
        for (i, c) in entries.iter().enumerate() {
            if c.count > entries[best].count {
                best = i;
            }
        }
        let most_frequent = entries[best].clone();
        while entries.len() < n_colors {
            entries.push(most_frequent.clone());
        }
    }

    Ok(Palette { entries, ranked })
}
