// src/dark_damage.rs
//
// Crack / heavy-wear detection via near-black intensity thresholding.
//
// Cracks and heavily worn surfaces register as localized dark regions even
// after exposure correction. The same 5x5 morphological opening used by the
// rust detector removes shadow speckle before the area ratio is computed.

use crate::color_analysis::{mask_area_ratio, OPENING_RADIUS};
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::open;
use tracing::debug;

/// Upper bound of the near-black band (inclusive).
const DARK_MAX: u8 = 55;

/// Result of dark-damage detection on one image.
pub struct DarkDamageDetection {
    /// Post-opening dark-damage mask (0/255), same dimensions as the input.
    pub mask: GrayImage,
    /// Fraction of image area flagged as dark damage, in [0, 1].
    pub ratio: f64,
}

/// Detect cracks and dark surface damage on the post-correction grayscale plane.
pub fn detect_dark_damage(gray: &GrayImage) -> DarkDamageDetection {
    let thresholded = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y).0[0];
        Luma([if v <= DARK_MAX { 255 } else { 0 }])
    });

    let mask = open(&thresholded, Norm::LInf, OPENING_RADIUS);
    let ratio = mask_area_ratio(&mask);

    debug!("Dark-damage detection: ratio {:.4}", ratio);

    DarkDamageDetection { mask, ratio }
}
