// src/main.rs

mod analyzer;
mod annotation;
mod color_analysis;
mod config;
mod dark_damage;
mod image_io;
mod preprocessing;
mod quiz;
mod scoring;
mod types;

use anyhow::Result;
use image_io::ImageScanner;
use quiz::{Answer, QUESTIONS};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use types::{AnalysisReport, Config};

#[derive(Default)]
struct RunStats {
    images_analyzed: usize,
    clean_images: usize,
    images_with_hazards: usize,
    failures: usize,
}

fn main() -> Result<()> {
    let config = if Path::new("config.yaml").exists() {
        Config::load("config.yaml")?
    } else {
        Config::default()
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("playground_safety={}", config.logging.level))
        .init();

    info!("🏞️ Playground Safety Checker Starting");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--quiz") {
        return run_quiz();
    }

    let scanner = ImageScanner::new(config.clone());
    let image_files: Vec<PathBuf> = if args.is_empty() {
        scanner.find_image_files()?
    } else {
        args.iter().map(PathBuf::from).collect()
    };

    if image_files.is_empty() {
        error!("No image files found in {}", config.image.input_dir);
        return Ok(());
    }

    info!("Found {} image(s) to analyze", image_files.len());

    let mut stats = RunStats::default();
    for (idx, path) in image_files.iter().enumerate() {
        info!("\n========================================");
        info!(
            "Analyzing image {}/{}: {}",
            idx + 1,
            image_files.len(),
            path.display()
        );

        match process_image(&scanner, path) {
            Ok(report) => {
                stats.images_analyzed += 1;
                let is_clean =
                    report.hazards.len() == 1 && report.hazards[0] == scoring::HAZARD_NONE;
                if is_clean {
                    stats.clean_images += 1;
                } else {
                    stats.images_with_hazards += 1;
                }
            }
            Err(e) => {
                stats.failures += 1;
                error!("Failed to analyze {}: {:#}", path.display(), e);
            }
        }
    }

    info!("\n========================================");
    info!("Run complete");
    info!("  Images analyzed: {}", stats.images_analyzed);
    info!("  ✅ Clean: {}", stats.clean_images);
    info!("  ⚠️  With hazards: {}", stats.images_with_hazards);
    info!("  Failures: {}", stats.failures);

    Ok(())
}

fn process_image(scanner: &ImageScanner, path: &Path) -> Result<AnalysisReport> {
    let input = scanner.load_image(path)?;
    info!("Image loaded: {}x{}", input.width(), input.height());

    let report = analyzer::analyze(&input)?;

    info!("AI Safety Score: {:.1}/100", report.score);
    info!("Detected hazards: {}", report.hazards.join(", "));
    info!(
        "Hazard area: rust {:.1}%, dark damage {:.1}%",
        report.rust_ratio * 100.0,
        report.dark_ratio * 100.0
    );

    // Verdict thresholds match the manual checklist presentation.
    if report.score > 70.0 {
        info!("✅ Playground looks safe");
    } else if report.score > 40.0 {
        warn!("⚠️  Moderate risk detected");
    } else {
        error!("🚨 High risk detected!");
    }

    scanner.save_annotated(path, &report.annotated)?;
    Ok(report)
}

/// Interactive manual checklist: 13 yes/no questions, weighted sum.
/// Completely independent of the image pipeline.
fn run_quiz() -> Result<()> {
    println!("Playground Safety Quiz — answer y/n:\n");

    let mut answers = [Answer::No; QUESTIONS.len()];
    let stdin = std::io::stdin();
    for (i, (question, _)) in QUESTIONS.iter().enumerate() {
        print!("{} [y/N] ", question);
        std::io::stdout().flush()?;

        let mut line = String::new();
        stdin.read_line(&mut line)?;
        if line.trim().eq_ignore_ascii_case("y") || line.trim().eq_ignore_ascii_case("yes") {
            answers[i] = Answer::Yes;
        }
    }

    let score = quiz::score_answers(&answers);
    println!("\nManual Safety Score: {}/100", score);

    if score > 70 {
        println!("✅ Playground looks relatively safe!");
    } else if score > 40 {
        println!("⚠️  Moderate risk detected. Caution advised.");
    } else {
        println!("🚨 High risk detected! Supervision and repairs needed.");
    }

    Ok(())
}
