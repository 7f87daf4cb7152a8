use thiserror::Error;

/// Errors raised by the extraction pipeline.
///
/// All variants are raised immediately to the caller; there is no internal
/// retry. "Fewer clusters than requested" is not an error — the assembler
/// pads the result instead (see `assembler`).
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: wrong channel count, empty array, or non-finite
    /// values after normalization.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// No samples survived preprocessing.
    #[error("empty image: no pixels to cluster")]
    EmptyImage,

    /// Out-of-range count, boost, or unknown method/sort name.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numerical failure inside clustering (zero total weight or a
    /// non-finite centroid).
    #[error("clustering failed: {0}")]
    ClusteringFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
