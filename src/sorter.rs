//! Deterministic reordering of an assembled palette.
//!
//! Sorting never changes membership, only order. Every mode uses a stable
//! sort, so ties keep their clustering output position and repeated runs
//! agree exactly.

use crate::assembler::Palette;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Palette ordering modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Ascending by the member-coordinate centroid's x position.
    SpatialX,
    /// Ascending by the member-coordinate centroid's y position.
    SpatialY,
    /// Descending by member count.
    Frequency,
    /// Keep clustering output order.
    #[default]
    None,
}

impl SortBy {
    pub fn name(&self) -> &'static str {
        match self {
            SortBy::SpatialX => "spatial-x",
            SortBy::SpatialY => "spatial-y",
            SortBy::Frequency => "frequency",
            SortBy::None => "none",
        }
    }
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "spatial-x" => Ok(SortBy::SpatialX),
            "spatial-y" => Ok(SortBy::SpatialY),
            "frequency" => Ok(SortBy::Frequency),
            "none" => Ok(SortBy::None),
            other => Err(Error::InvalidParameter(format!(
                "unknown sort mode {:?} (expected spatial-x, spatial-y, frequency, or none)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Reorder the palette's entries in place.
pub fn sort_palette(palette: &mut Palette, sort_by: SortBy) {
    match sort_by {
        SortBy::SpatialX => palette
            .entries
            .sort_by(|a, b| a.centroid_x.total_cmp(&b.centroid_x)),
        SortBy::SpatialY => palette
            .entries
            .sort_by(|a, b| a.centroid_y.total_cmp(&b.centroid_y)),
        SortBy::Frequency => palette.entries.sort_by(|a, b| b.count.cmp(&a.count)),
        SortBy::None => {}
    }
}
