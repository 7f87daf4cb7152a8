//! color-extract - clustering-based dominant color extraction
//!
//! This library reduces an image to a small ordered set of representative
//! colors for palette generation and creative-coding pipelines.
//!
//! ## Features
//!
//! - **Five strategies**: plain k-means, CIELAB k-means, saturation-boosted,
//!   vibrant split, and a two-pass multistage extraction
//! - **Weighted k-means** with k-means++ initialization and a per-call seed
//!   for reproducible results
//! - **Deterministic ordering** by spatial position or frequency
//!
//! ## Example
//!
//! ```rust,no_run
//! use color_extract::{extract, load_image, ExtractOptions, Method, SortBy};
//! use std::path::Path;
//!
//! let image = load_image(Path::new("input.png"))?;
//! let options = ExtractOptions {
//!     method: Method::Lab,
//!     n_colors: 5,
//!     sort_by: SortBy::SpatialX,
//!     ..Default::default()
//! };
//! let colors = extract(&image, &options)?;
//! # Ok::<(), color_extract::Error>(())
//! ```

pub mod assembler;
pub mod colorspace;
pub mod error;
pub mod extractor;
pub mod image_data;
pub mod kmeans;
pub mod preprocessor;
pub mod sorter;
pub mod stats;
pub mod weighting;

pub use assembler::Palette;
pub use colorspace::{hex_to_rgb, rgb_to_hex};
pub use error::{Error, Result};
pub use extractor::{ColorCandidate, Method};
pub use image_data::{ImageData, load_image};
pub use preprocessor::DEFAULT_MAX_DIMENSION;
pub use sorter::SortBy;
pub use stats::{ColorStats, color_stats};
pub use rgb::RGB8;

/// Options for a color extraction call.
///
/// Defaults are explicit configuration, not hidden process state: every
/// extraction is a pure function of (image, options).
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Extraction strategy (default: [`Method::Lab`])
    pub method: Method,
    /// Number of colors to return (default: 5)
    pub n_colors: usize,
    /// Post-hoc ordering of the result (default: [`SortBy::None`])
    pub sort_by: SortBy,
    /// Longer-side bound applied before clustering (default: 64)
    pub max_dimension: u32,
    /// Saturation boost exponent; `None` uses the strategy's default
    pub saturation_boost: Option<f32>,
    /// Colors drawn from the high-saturation subset by the vibrant
    /// strategy; `None` uses half of `n_colors`
    pub n_vibrant: Option<usize>,
    /// Seed for clustering initialization (default: 42)
    pub seed: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            method: Method::Lab,
            n_colors: 5,
            sort_by: SortBy::None,
            max_dimension: DEFAULT_MAX_DIMENSION,
            saturation_boost: None,
            n_vibrant: None,
            seed: 42,
        }
    }
}

/// Run the full pipeline and return the assembled, sorted palette.
pub fn extract_palette(image: &ImageData, options: &ExtractOptions) -> Result<Palette> {
    if options.n_colors == 0 {
        return Err(Error::InvalidParameter(
            "n_colors must be positive".into(),
        ));
    }

    let small = preprocessor::downscale(image, options.max_dimension)?;
    let samples = preprocessor::sample_pixels(&small);
    if samples.is_empty() {
        return Err(Error::EmptyImage);
    }

    let params = extractor::StrategyParams {
        n_colors: options.n_colors,
        saturation_boost: options.saturation_boost,
        n_vibrant: options.n_vibrant,
        seed: options.seed,
    };
    let candidates = extractor::run_strategy(options.method, &samples, &params)?;
    let mut palette = assembler::assemble(candidates, options.n_colors)?;
    sorter::sort_palette(&mut palette, options.sort_by);
    Ok(palette)
}

/// Extract exactly `options.n_colors` RGB triples from an image.
pub fn extract(image: &ImageData, options: &ExtractOptions) -> Result<Vec<RGB8>> {
    Ok(extract_palette(image, options)?.colors())
}

/// Extract colors together with each color's member-pixel fraction of the
/// full-resolution image.
pub fn extract_with_stats(
    image: &ImageData,
    options: &ExtractOptions,
) -> Result<(Vec<RGB8>, Vec<ColorStats>)> {
    let colors = extract(image, options)?;
    let stats = color_stats(image, &colors);
    Ok((colors, stats))
}
