mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use color_extract::{ExtractOptions, extract_with_stats, load_image};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
struct Report {
    method: String,
    colors: Vec<color_extract::ColorStats>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let image = load_image(&cli.input)?;
    let options = ExtractOptions {
        method: cli.method.parse()?,
        n_colors: cli.colors,
        sort_by: cli.sort.parse()?,
        max_dimension: cli.max_dimension,
        saturation_boost: cli.boost,
        n_vibrant: cli.vibrant,
        seed: cli.seed,
    };

    let methods = if cli.compare {
        color_extract::Method::ALL.to_vec()
    } else {
        vec![options.method]
    };

    // Each extraction is stateless, so comparing methods fans out cleanly.
    let reports: Vec<Result<Report>> = methods
        .par_iter()
        .map(|&method| {
            let opts = ExtractOptions { method, ..options.clone() };
            let (_, stats) = extract_with_stats(&image, &opts)?;
            Ok(Report {
                method: method.to_string(),
                colors: stats,
            })
        })
        .collect();

    let reports = reports.into_iter().collect::<Result<Vec<_>>>()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}:", report.method);
            for stat in &report.colors {
                println!("  {}  {:>5.1}%", stat.hex, stat.fraction * 100.0);
            }
        }
    }

    Ok(())
}
