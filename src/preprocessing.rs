// src/preprocessing.rs
//
// Exposure-aware preprocessing for hazard detection.
//
// Dark photos systematically under-expose rust hue/texture and create false
// dark-damage readings from ambient lighting alone. When the mean grayscale
// intensity falls below DARK_IMAGE_MEAN, every channel is pushed through a
// power-law (gamma) lookup table before any thresholding happens, and the
// grayscale plane is rederived from the corrected copy.

use crate::types::AnalysisError;
use image::{GrayImage, Luma, RgbImage};
use tracing::debug;

/// Mean grayscale intensity below which gamma correction kicks in.
const DARK_IMAGE_MEAN: f64 = 60.0;
/// Below this mean the image is severely underexposed and gets a stronger lift.
const VERY_DARK_MEAN: f64 = 40.0;

const GAMMA_STRONG: f64 = 1.5;
const GAMMA_MILD: f64 = 1.2;

/// Output of the preprocessing stage.
///
/// `working` is the brightness-corrected copy (identical to the input when no
/// correction was needed); `gray` is derived from `working`. HSV thresholds in
/// the rust detector read the *original* input, matching the observed system.
pub struct Preprocessed {
    pub working: RgbImage,
    pub gray: GrayImage,
    pub mean_brightness: f64,
    /// Gamma value applied, if any.
    pub gamma: Option<f64>,
}

pub fn preprocess(input: &RgbImage) -> Result<Preprocessed, AnalysisError> {
    if input.width() == 0 || input.height() == 0 {
        return Err(AnalysisError::InvalidInput);
    }

    let gray = grayscale(input);
    let mean_brightness = mean_intensity(&gray);

    if mean_brightness >= DARK_IMAGE_MEAN {
        return Ok(Preprocessed {
            working: input.clone(),
            gray,
            mean_brightness,
            gamma: None,
        });
    }

    let gamma = if mean_brightness < VERY_DARK_MEAN {
        GAMMA_STRONG
    } else {
        GAMMA_MILD
    };
    debug!(
        "Dark image (mean brightness {:.1}), applying gamma {:.1}",
        mean_brightness, gamma
    );

    let lut = gamma_lut(gamma);
    let mut working = input.clone();
    for pixel in working.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = lut[*channel as usize];
        }
    }

    // Grayscale must reflect the corrected exposure.
    let gray = grayscale(&working);

    Ok(Preprocessed {
        working,
        gray,
        mean_brightness,
        gamma: Some(gamma),
    })
}

/// Rec.601 luma, matching the grayscale conversion of the observed system.
pub fn grayscale(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        let luma =
            0.299 * p.0[0] as f64 + 0.587 * p.0[1] as f64 + 0.114 * p.0[2] as f64;
        Luma([luma.round() as u8])
    })
}

pub fn mean_intensity(gray: &GrayImage) -> f64 {
    let total: u64 = gray.pixels().map(|p| p.0[0] as u64).sum();
    total as f64 / (gray.width() as u64 * gray.height() as u64) as f64
}

/// 256-entry power-law lookup table: lut[i] = 255 * (i/255)^(1/gamma).
/// Monotonic, so ordering of intensities is preserved.
fn gamma_lut(gamma: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let corrected = 255.0 * (i as f64 / 255.0).powf(1.0 / gamma);
        *entry = corrected.round() as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_zero_area_rejected() {
        let img = RgbImage::new(0, 0);
        assert!(matches!(
            preprocess(&img),
            Err(AnalysisError::InvalidInput)
        ));
    }

    #[test]
    fn test_gamma_lut_endpoints_and_monotonic() {
        let lut = gamma_lut(1.5);
        assert_eq!(lut[0], 0);
        assert_eq!(lut[255], 255);
        for i in 1..256 {
            assert!(lut[i] >= lut[i - 1]);
        }
        // Power-law with gamma > 1 lifts midtones.
        assert!(lut[64] > 64);
    }

    #[test]
    fn test_bright_image_untouched() {
        let img = RgbImage::from_pixel(32, 32, Rgb([120, 120, 120]));
        let pre = preprocess(&img).unwrap();
        assert!(pre.gamma.is_none());
        assert_eq!(pre.working, img);
        assert!((pre.mean_brightness - 120.0).abs() < 1.0);
    }

    #[test]
    fn test_dark_image_brightened() {
        let img = RgbImage::from_pixel(32, 32, Rgb([45, 45, 45]));
        let pre = preprocess(&img).unwrap();
        assert_eq!(pre.gamma, Some(GAMMA_MILD));
        assert!(mean_intensity(&pre.gray) > 45.0);
    }

    #[test]
    fn test_very_dark_image_gets_strong_gamma() {
        let img = RgbImage::from_pixel(32, 32, Rgb([30, 30, 30]));
        let pre = preprocess(&img).unwrap();
        assert_eq!(pre.gamma, Some(GAMMA_STRONG));
    }

    #[test]
    fn test_gamma_suppresses_false_dark_readings() {
        // Every pixel starts inside the dark-damage band [0, 55]. After the
        // adaptive lift the ambient-lighting darkness should clear the band.
        let img = RgbImage::from_pixel(32, 32, Rgb([45, 45, 45]));
        let raw_dark = grayscale(&img)
            .pixels()
            .filter(|p| p.0[0] <= 55)
            .count();
        assert_eq!(raw_dark, 32 * 32);

        let pre = preprocess(&img).unwrap();
        let corrected_dark = pre.gray.pixels().filter(|p| p.0[0] <= 55).count();
        assert_eq!(corrected_dark, 0);
    }

    #[test]
    fn test_grayscale_rec601_weights() {
        let img = RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]));
        let gray = grayscale(&img);
        assert_eq!(gray.get_pixel(0, 0).0[0], 76); // 0.299 * 255
    }
}
