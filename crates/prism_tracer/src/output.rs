//! Converting rendered colors to displayable 8-bit images.
//!
//! The tracer produces unclamped colors: specular highlights and mirror
//! weights routinely push channels past 1.0. Quantizing is the output
//! stage's job and always goes through an explicit `ToneMap` policy.

use std::path::Path;

use image::RgbImage;
use thiserror::Error;

use crate::renderer::{Color, ImageBuffer};

/// Errors that can occur while encoding a rendered image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Buffer holds {actual} pixels, expected {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// How out-of-range colors are brought into [0, 1] before quantizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToneMap {
    /// Clamp each channel independently. Bright highlights lose their hue.
    #[default]
    Clamp,
    /// Divide the whole color by its largest channel when that exceeds 1,
    /// keeping the hue of over-bright pixels.
    NormalizeMax,
}

impl ToneMap {
    /// Map a color into [0, 1] per channel.
    pub fn apply(self, color: Color) -> Color {
        match self {
            ToneMap::Clamp => color.clamp(Color::ZERO, Color::ONE),
            ToneMap::NormalizeMax => {
                let max = color.max_element().max(1.0);
                (color / max).max(Color::ZERO)
            }
        }
    }
}

/// Convert a color to 8-bit RGB.
///
/// NaN channels become 0.
pub fn color_to_rgb8(color: Color, tone_map: ToneMap) -> [u8; 3] {
    let c = tone_map.apply(color);
    [
        (255.0 * c.x) as u8,
        (255.0 * c.y) as u8,
        (255.0 * c.z) as u8,
    ]
}

/// Quantize a rendered buffer into an `image` RGB image.
pub fn to_rgb_image(buffer: &ImageBuffer, tone_map: ToneMap) -> OutputResult<RgbImage> {
    let (width, height) = (buffer.width, buffer.height);
    let actual = buffer.pixels.len();
    RgbImage::from_raw(width, height, buffer.to_rgb8(tone_map)).ok_or(OutputError::SizeMismatch {
        width,
        height,
        actual,
    })
}

/// Encode a rendered buffer to `path`; the format follows the extension
/// (`.png`, `.ppm`, `.jpg`, ...).
pub fn save_image<P: AsRef<Path>>(
    buffer: &ImageBuffer,
    path: P,
    tone_map: ToneMap,
) -> OutputResult<()> {
    let path = path.as_ref();
    to_rgb_image(buffer, tone_map)?.save(path)?;
    log::info!(
        "Saved {}x{} image to {} ({:?})",
        buffer.width,
        buffer.height,
        path.display(),
        tone_map
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_policy() {
        assert_eq!(color_to_rgb8(Color::new(0.0, 0.5, 1.0), ToneMap::Clamp), [0, 127, 255]);
        assert_eq!(color_to_rgb8(Color::new(-1.0, 2.0, 30.0), ToneMap::Clamp), [0, 255, 255]);
    }

    #[test]
    fn test_normalize_policy_keeps_hue() {
        let rgb = color_to_rgb8(Color::new(4.0, 2.0, 1.0), ToneMap::NormalizeMax);
        assert_eq!(rgb, [255, 127, 63]);

        // In-range colors pass through untouched
        let rgb = color_to_rgb8(Color::new(0.2, 0.7, 0.8), ToneMap::NormalizeMax);
        assert_eq!(rgb, color_to_rgb8(Color::new(0.2, 0.7, 0.8), ToneMap::Clamp));
    }

    #[test]
    fn test_nan_channel_becomes_zero() {
        let rgb = color_to_rgb8(Color::new(f32::NAN, 0.5, 1.0), ToneMap::Clamp);
        assert_eq!(rgb[0], 0);
    }

    #[test]
    fn test_size_mismatch() {
        let mut buffer = ImageBuffer::new(4, 4);
        buffer.pixels.pop();
        assert!(matches!(
            to_rgb_image(&buffer, ToneMap::Clamp),
            Err(OutputError::SizeMismatch { actual: 15, .. })
        ));
    }

    #[test]
    fn test_save_png() {
        let mut buffer = ImageBuffer::new(3, 2);
        buffer.set(0, 0, Color::new(2.0, 0.0, 0.0));
        buffer.set(2, 1, Color::new(0.0, 0.0, 1.0));

        let path = std::env::temp_dir()
            .join(format!("prism_output_test_{}.png", std::process::id()));
        save_image(&buffer, &path, ToneMap::Clamp).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (3, 2));
        assert_eq!(loaded.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(loaded.get_pixel(2, 1).0, [0, 0, 255]);

        std::fs::remove_file(&path).ok();
    }
}
