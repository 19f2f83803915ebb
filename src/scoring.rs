// src/scoring.rs
//
// Deterministic mapping from hazard-area ratios to a bounded safety score and
// an ordered hazard report. Penalties are independent and additive: an image
// can be flagged rust + dark damage + general wear at once. The only
// non-determinism is a bounded random draw on the clean path, preserved from
// the observed system.

use rand::Rng;

/// Ratios below these floors are treated as zero: negligible detections are
/// neither reported nor penalized.
pub const RUST_NOISE_FLOOR: f64 = 0.02;
pub const DARK_NOISE_FLOOR: f64 = 0.03;

/// Penalty per unit of hazard-area ratio.
const RUST_PENALTY_RATE: f64 = 250.0;
const DARK_PENALTY_RATE: f64 = 180.0;

/// Combined ratio above which a flat general-wear penalty applies.
const WEAR_TOTAL_THRESHOLD: f64 = 0.08;
const WEAR_PENALTY: f64 = 10.0;

/// Combined ratio below which (with nothing else flagged) the image is clean.
const CLEAN_TOTAL_THRESHOLD: f64 = 0.02;
const CLEAN_BASE_SCORE: f64 = 97.0;

pub const HAZARD_RUST: &str = "Rust or corrosion";
pub const HAZARD_DARK: &str = "Cracks or dark surface damage";
pub const HAZARD_WEAR: &str = "General surface wear or fading";
pub const HAZARD_NONE: &str = "No visible hazards detected";

/// Score plus the ordered hazard report it was derived from.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    /// In [0, 100], rounded to one decimal place.
    pub score: f64,
    /// Detection order: rust, dark damage, general wear, or the clean sentinel.
    pub hazards: Vec<String>,
}

/// Score an image from its post-denoise hazard ratios.
pub fn score_hazards(rust_ratio: f64, dark_ratio: f64) -> ScoreBreakdown {
    let jitter = rand::rng().random_range(0..3);
    score_hazards_with_jitter(rust_ratio, dark_ratio, jitter)
}

/// Same as [`score_hazards`] with the clean-path jitter pinned, for tests.
fn score_hazards_with_jitter(rust_ratio: f64, dark_ratio: f64, jitter: u8) -> ScoreBreakdown {
    // Noise floors first; everything downstream sees the floored values.
    let rust_ratio = if rust_ratio < RUST_NOISE_FLOOR { 0.0 } else { rust_ratio };
    let dark_ratio = if dark_ratio < DARK_NOISE_FLOOR { 0.0 } else { dark_ratio };
    let total = rust_ratio + dark_ratio;

    let mut hazards = Vec::new();
    let mut score = 100.0;

    if rust_ratio > 0.0 {
        hazards.push(HAZARD_RUST.to_string());
        score -= RUST_PENALTY_RATE * rust_ratio;
    }

    if dark_ratio > 0.0 {
        hazards.push(HAZARD_DARK.to_string());
        score -= DARK_PENALTY_RATE * dark_ratio;
    }

    if total > WEAR_TOTAL_THRESHOLD {
        hazards.push(HAZARD_WEAR.to_string());
        score -= WEAR_PENALTY;
    }

    if total < CLEAN_TOTAL_THRESHOLD && hazards.is_empty() {
        hazards.push(HAZARD_NONE.to_string());
        score = CLEAN_BASE_SCORE + jitter as f64;
    }

    ScoreBreakdown {
        score: round_one_decimal(score.clamp(0.0, 100.0)),
        hazards,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
