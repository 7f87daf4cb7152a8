use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "color-extract")]
#[command(about = "Clustering-based dominant color extraction")]
#[command(version)]
pub struct Cli {
    /// Input image file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Extraction method: kmeans, lab, aggressive, vibrant, multistage
    #[arg(short, long, default_value = "lab")]
    pub method: String,

    /// Number of colors to extract (default: 5)
    #[arg(short = 'n', long, default_value = "5")]
    pub colors: usize,

    /// Result ordering: spatial-x, spatial-y, frequency, none
    #[arg(short, long, default_value = "none")]
    pub sort: String,

    /// Longer-side bound applied before clustering
    #[arg(long, default_value = "64")]
    pub max_dimension: u32,

    /// Saturation boost exponent (strategy-specific default when omitted)
    #[arg(long)]
    pub boost: Option<f32>,

    /// Colors taken from the high-saturation subset (vibrant method)
    #[arg(long)]
    pub vibrant: Option<usize>,

    /// Seed for clustering initialization
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Emit JSON with per-color statistics instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Run every method on the image and print each palette
    #[arg(long)]
    pub compare: bool,
}
