use crate::types::{Config, ImageIoConfig, LoggingConfig};
use anyhow::Result;
use std::fs;

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image: ImageIoConfig {
                input_dir: "images".to_string(),
                output_dir: "output".to_string(),
                save_annotated: true,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
image:
  input_dir: photos
  output_dir: out
  save_annotated: false
logging:
  level: debug
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.image.input_dir, "photos");
        assert!(!config.image.save_annotated);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.image.input_dir, "images");
        assert!(config.image.save_annotated);
    }
}
