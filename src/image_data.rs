use crate::error::{Error, Result};
use rgb::RGB8;

/// A 3-channel pixel array, the input contract of the extraction pipeline.
///
/// Callers may construct it from interleaved 8-bit RGB ([0,255]) or from
/// floats in [0,1]; both are normalized to 8-bit storage here.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<RGB8>,
}

impl ImageData {
    /// Build from an interleaved 8-bit RGB buffer of length `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let expected = check_dimensions(width, height, data.len())?;
        let pixels = data
            .chunks_exact(3)
            .map(|c| RGB8::new(c[0], c[1], c[2]))
            .collect::<Vec<_>>();
        debug_assert_eq!(pixels.len() * 3, expected);
        Ok(Self { width, height, pixels })
    }

    /// Build from an interleaved float RGB buffer in [0,1].
    ///
    /// Fails with [`Error::InvalidImage`] if any value is non-finite.
    /// Values slightly outside [0,1] are clamped.
    pub fn from_f32_raw(width: u32, height: u32, data: &[f32]) -> Result<Self> {
        check_dimensions(width, height, data.len())?;
        if data.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidImage(
                "non-finite value in float pixel buffer".into(),
            ));
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| {
                RGB8::new(
                    (c[0].clamp(0.0, 1.0) * 255.0).round() as u8,
                    (c[1].clamp(0.0, 1.0) * 255.0).round() as u8,
                    (c[2].clamp(0.0, 1.0) * 255.0).round() as u8,
                )
            })
            .collect();
        Ok(Self { width, height, pixels })
    }

    /// Build from a decoded image, discarding any alpha channel.
    pub fn from_image(img: &image::DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let pixels = rgb.pixels().map(|p| RGB8::new(p[0], p[1], p[2])).collect();
        Self {
            width: rgb.width(),
            height: rgb.height(),
            pixels,
        }
    }
}

fn check_dimensions(width: u32, height: u32, len: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage("image has zero dimension".into()));
    }
    let expected = width as usize * height as usize * 3;
    if len != expected {
        return Err(Error::InvalidImage(format!(
            "expected 3-channel buffer of {} values, got {}",
            expected, len
        )));
    }
    Ok(expected)
}

/// Load an image file into an [`ImageData`]. Decoding is delegated to the
/// `image` crate; any decoder error surfaces as [`Error::InvalidImage`].
pub fn load_image(path: &std::path::Path) -> Result<ImageData> {
    let img = image::open(path).map_err(|e| Error::InvalidImage(e.to_string()))?;
    Ok(ImageData::from_image(&img))
}
