use image::RgbImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub image: ImageIoConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageIoConfig {
    pub input_dir: String,
    pub output_dir: String,
    pub save_annotated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Errors the analysis pipeline can surface to the caller. Everything past a
/// valid decoded image is a pure transform, so the taxonomy stays small.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The input image has zero area (0x0 or a degenerate dimension).
    #[error("input image has zero area")]
    InvalidInput,

    /// Failed to decode the input file into an RGB raster.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
}

/// Complete result of one analysis run on a single photograph.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Safety score in [0, 100], rounded to one decimal place.
    pub score: f64,
    /// Human-readable hazard labels, in detection order. Never empty on a
    /// successful run: either specific hazards or the "none detected" sentinel.
    pub hazards: Vec<String>,
    /// Copy of the input with hazard outlines and the score badge drawn on top.
    pub annotated: RgbImage,
    /// Fraction of image area flagged as rust (post-denoise, pre-noise-floor).
    pub rust_ratio: f64,
    /// Fraction of image area flagged as dark damage (post-denoise, pre-noise-floor).
    pub dark_ratio: f64,
}
