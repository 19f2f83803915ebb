// src/analyzer.rs
//
// Straight-line analysis pipeline over a single photograph:
//
//   preprocess -> rust detection -> dark-damage detection -> scoring -> annotation
//
// Annotation runs last because the badge needs the final score. Every
// intermediate buffer is function-local; apart from the bounded random draw
// on the clean scoring path, the pipeline is a pure function of its input.

use crate::annotation::annotate;
use crate::color_analysis::detect_rust;
use crate::dark_damage::detect_dark_damage;
use crate::preprocessing::preprocess;
use crate::scoring::score_hazards;
use crate::types::{AnalysisError, AnalysisReport};
use image::RgbImage;
use tracing::debug;

/// Analyze one image and produce the full safety report.
pub fn analyze(input: &RgbImage) -> Result<AnalysisReport, AnalysisError> {
    // Stage 1: exposure-aware preprocessing.
    let pre = preprocess(input)?;
    debug!(
        "Preprocessing: mean brightness {:.1}, gamma {:?}",
        pre.mean_brightness, pre.gamma
    );

    // Stage 2: rust/corrosion. HSV bands read the original input; the
    // texture filter runs on the corrected grayscale plane.
    let rust = detect_rust(input, &pre.gray);

    // Stage 3: cracks / dark surface damage.
    let dark = detect_dark_damage(&pre.gray);

    // Stage 4: score shaping from the post-denoise area ratios.
    let breakdown = score_hazards(rust.ratio, dark.ratio);

    // Stage 5: overlay on the working (corrected) copy.
    let annotated = annotate(&pre.working, &rust.mask, &dark.mask, breakdown.score);

    debug!(
        "Analysis complete: score {:.1}, rust {:.4}, dark {:.4}",
        breakdown.score, rust.ratio, dark.ratio
    );

    Ok(AnalysisReport {
        score: breakdown.score,
        hazards: breakdown.hazards,
        annotated,
        rust_ratio: rust.ratio,
        dark_ratio: dark.ratio,
    })
}
