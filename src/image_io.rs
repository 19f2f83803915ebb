// src/image_io.rs

use crate::types::{AnalysisError, Config};
use anyhow::Result;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "bmp", "JPG", "JPEG", "PNG", "BMP"];

pub struct ImageScanner {
    config: Config,
}

impl ImageScanner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Recursively collect image files under the configured input directory.
    pub fn find_image_files(&self) -> Result<Vec<PathBuf>> {
        let mut images = Vec::new();

        for entry in WalkDir::new(&self.config.image.input_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if is_image_file(path) {
                images.push(path.to_path_buf());
            }
        }

        info!("Found {} image files", images.len());
        Ok(images)
    }

    /// Decode an image file to RGB. Decode failures and zero-area rasters
    /// surface as [`AnalysisError`], the same taxonomy the pipeline uses.
    pub fn load_image(&self, path: &Path) -> Result<RgbImage, AnalysisError> {
        let img = image::open(path)?.to_rgb8();
        if img.width() == 0 || img.height() == 0 {
            return Err(AnalysisError::InvalidInput);
        }
        Ok(img)
    }

    /// Save the annotated copy next to the configured output directory.
    /// Returns `None` when annotated output is disabled.
    pub fn save_annotated(
        &self,
        input_path: &Path,
        annotated: &RgbImage,
    ) -> Result<Option<PathBuf>> {
        if !self.config.image.save_annotated {
            return Ok(None);
        }

        std::fs::create_dir_all(&self.config.image.output_dir)?;
        let output_path = annotated_output_path(&self.config.image.output_dir, input_path);
        annotated.save(&output_path)?;

        info!("Annotated image saved: {}", output_path.display());
        Ok(Some(output_path))
    }
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

fn annotated_output_path(output_dir: &str, input_path: &Path) -> PathBuf {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    PathBuf::from(output_dir).join(format!("{}_annotated.png", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file(Path::new("playground.jpg")));
        assert!(is_image_file(Path::new("slide.PNG")));
        assert!(is_image_file(Path::new("dir/swing.jpeg")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("clip.mp4")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_annotated_output_path() {
        let path = annotated_output_path("output", Path::new("photos/slide.jpg"));
        assert_eq!(path, PathBuf::from("output/slide_annotated.png"));
    }

    #[test]
    fn test_save_respects_disabled_flag() {
        let mut config = Config::default();
        config.image.save_annotated = false;
        let scanner = ImageScanner::new(config);
        let img = RgbImage::new(4, 4);
        let saved = scanner.save_annotated(Path::new("a.jpg"), &img).unwrap();
        assert!(saved.is_none());
    }
}
