// src/color_analysis.rs
//
// HSV-based rust/corrosion detection.
//
// Rust has a specific signature that neither color nor texture captures alone:
//   - Color alone misclassifies bright orange plastics (slides, climbers).
//   - Texture alone misclassifies any rough non-rust material.
// The detector therefore requires a pixel to be BOTH dull orange-brown in HSV
// space AND locally rough (high deviation from its gaussian-blurred
// neighborhood) before it counts as rust.
//
// HSV here uses OpenCV-style units (H 0-180, S 0-255, V 0-255) so the band
// constants read the same as in the observed system.

use image::{GrayImage, Luma, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::open;
use tracing::debug;

// Orange-brown band, excluding bright saturated plastics and near-white
// highlights. Inclusive bounds.
const RUST_HUE: (u8, u8) = (5, 25);
const RUST_SAT: (u8, u8) = (50, 200);
const RUST_VAL: (u8, u8) = (40, 180);

/// Sigma matching a 7x7 gaussian kernel in the observed system.
const TEXTURE_BLUR_SIGMA: f32 = 1.4;
/// Minimum |gray - blurred| for a pixel to count as rough/pitted.
const TEXTURE_THRESHOLD: u8 = 25;

/// Radius of the square structuring element for morphological opening
/// (k=2 under the L-infinity norm is a 5x5 square).
pub const OPENING_RADIUS: u8 = 2;

/// Result of rust detection on one image.
pub struct RustDetection {
    /// Post-opening rust mask (0/255), same dimensions as the input.
    pub mask: GrayImage,
    /// Fraction of image area flagged as rust, in [0, 1].
    pub ratio: f64,
}

/// Convert RGB to HSV in OpenCV-style units.
/// Returns (H: 0-180, S: 0-255, V: 0-255).
#[inline]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r_n = r as f32 / 255.0;
    let g_n = g as f32 / 255.0;
    let b_n = b as f32 / 255.0;

    let max = r_n.max(g_n).max(b_n);
    let min = r_n.min(g_n).min(b_n);
    let delta = max - min;

    // Hue in degrees
    let h = if delta < 1e-6 {
        0.0
    } else if (max - r_n).abs() < 1e-6 {
        60.0 * (((g_n - b_n) / delta) % 6.0)
    } else if (max - g_n).abs() < 1e-6 {
        60.0 * (((b_n - r_n) / delta) + 2.0)
    } else {
        60.0 * (((r_n - g_n) / delta) + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h };

    let s = if max < 1e-6 { 0.0 } else { delta / max };

    (
        (h / 2.0).round().min(180.0) as u8,
        (s * 255.0).round() as u8,
        (max * 255.0).round() as u8,
    )
}

/// Detect rust/corrosion.
///
/// `input` is the original (pre-correction) image the HSV bands are read
/// from; `gray` is the post-correction grayscale plane the texture filter
/// runs on. Both must have identical dimensions.
pub fn detect_rust(input: &RgbImage, gray: &GrayImage) -> RustDetection {
    // Color mask: dull orange-brown pixels.
    let color_mask = GrayImage::from_fn(input.width(), input.height(), |x, y| {
        let p = input.get_pixel(x, y);
        let (h, s, v) = rgb_to_hsv(p.0[0], p.0[1], p.0[2]);
        let hit = (RUST_HUE.0..=RUST_HUE.1).contains(&h)
            && (RUST_SAT.0..=RUST_SAT.1).contains(&s)
            && (RUST_VAL.0..=RUST_VAL.1).contains(&v);
        Luma([if hit { 255 } else { 0 }])
    });

    // Texture mask: rough surfaces deviate from their blurred neighborhood.
    let blurred = gaussian_blur_f32(gray, TEXTURE_BLUR_SIGMA);
    let texture_mask = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let original = gray.get_pixel(x, y).0[0];
        let smooth = blurred.get_pixel(x, y).0[0];
        let diff = original.abs_diff(smooth);
        Luma([if diff > TEXTURE_THRESHOLD { 255 } else { 0 }])
    });

    // Fuse: a pixel must be both dull orange-brown AND textured.
    let fused = GrayImage::from_fn(input.width(), input.height(), |x, y| {
        let c = color_mask.get_pixel(x, y).0[0];
        let t = texture_mask.get_pixel(x, y).0[0];
        Luma([c.min(t)])
    });

    // Opening removes isolated single-pixel false positives.
    let mask = open(&fused, Norm::LInf, OPENING_RADIUS);
    let ratio = mask_area_ratio(&mask);

    debug!(
        "Rust detection: color mask {:.4}, texture mask {:.4}, fused ratio {:.4}",
        mask_area_ratio(&color_mask),
        mask_area_ratio(&texture_mask),
        ratio
    );

    RustDetection { mask, ratio }
}

/// Fraction of nonzero pixels in a mask, in [0, 1].
pub fn mask_area_ratio(mask: &GrayImage) -> f64 {
    let foreground = mask.pixels().filter(|p| p.0[0] > 0).count();
    foreground as f64 / (mask.width() as u64 * mask.height() as u64) as f64
}
