//! Downscaling and sample extraction ahead of clustering.
//!
//! Clustering quality barely changes past ~64px on the long side, while
//! runtime grows with the pixel count, so the image is bounded first. The
//! triangle filter averages source pixels on shrink, which keeps sampled
//! noise from skewing the clusters.

use crate::error::{Error, Result};
use crate::image_data::ImageData;
use image::imageops::FilterType;
use rgb::RGB8;

pub const DEFAULT_MAX_DIMENSION: u32 = 64;

/// One flattened pixel: color in the active clustering space plus its
/// coordinate in the downscaled frame. Coordinates are fixed at sampling
/// time and survive color-space transforms.
#[derive(Debug, Clone, Copy)]
pub struct PixelSample {
    pub color: [f32; 3],
    pub x: u32,
    pub y: u32,
}

/// Bound the longer side by `max_dimension`, preserving aspect ratio.
/// Images already within the bound pass through unchanged.
pub fn downscale(image: &ImageData, max_dimension: u32) -> Result<ImageData> {
    if max_dimension == 0 {
        return Err(Error::InvalidParameter(
            "max_dimension must be positive".into(),
        ));
    }
    let longer = image.width.max(image.height);
    if longer <= max_dimension {
        return Ok(image.clone());
    }

    let scale = max_dimension as f64 / longer as f64;
    let new_w = ((image.width as f64 * scale).round() as u32).max(1);
    let new_h = ((image.height as f64 * scale).round() as u32).max(1);

    let raw: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|p| [p.r, p.g, p.b])
        .collect();
    let buf = image::RgbImage::from_raw(image.width, image.height, raw)
        .ok_or_else(|| Error::InvalidImage("pixel buffer does not match dimensions".into()))?;

    let resized = image::imageops::resize(&buf, new_w, new_h, FilterType::Triangle);
    let pixels = resized
        .pixels()
        .map(|p| RGB8::new(p[0], p[1], p[2]))
        .collect();

    Ok(ImageData {
        width: new_w,
        height: new_h,
        pixels,
    })
}

/// Flatten an image into row-major samples with [0,1] sRGB colors.
pub fn sample_pixels(image: &ImageData) -> Vec<PixelSample> {
    let w = image.width as usize;
    image
        .pixels
        .iter()
        .enumerate()
        .map(|(i, p)| PixelSample {
            color: [
                p.r as f32 / 255.0,
                p.g as f32 / 255.0,
                p.b as f32 / 255.0,
            ],
            x: (i % w) as u32,
            y: (i / w) as u32,
        })
        .collect()
}
