//! Demo configuration loading and saving
//!
//! Uses RON (Rusty Object Notation). Every field is optional in the file and
//! falls back to the hello-triangle defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::export::FrameFormat;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// What the demo renders and where frames go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
    /// Frames to render (one swap each)
    pub frames: u32,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub format: FrameFormat,
    /// RGBA, 0.0-1.0
    pub clear_color: [f32; 4],
    /// RGBA written by the fragment shader
    pub fill_color: [f32; 4],
    /// Triangle vertices in NDC
    pub triangle: [[f32; 3]; 3],
    /// Tracked by the pipeline, not applied
    pub depth_test: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "Hello Triangle".to_string(),
            frames: 60,
            output_dir: PathBuf::from("."),
            file_prefix: "out".to_string(),
            format: FrameFormat::Tga,
            clear_color: [0.7, 0.6, 0.8, 1.0],
            fill_color: [0.5, 0.0, 0.5, 1.0],
            triangle: [
                [0.0, 0.5, 0.0],
                [0.5, -0.5, 0.0],
                [-0.5, -0.5, 0.0],
            ],
            depth_test: true,
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.format == FrameFormat::Tga && (self.width > u16::MAX as usize || self.height > u16::MAX as usize) {
            return Err(ConfigError::Invalid(format!(
                "TGA frames are limited to {}x{}",
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Triangle vertices as a tightly packed xyz float array
    pub fn vertex_data(&self) -> Vec<f32> {
        self.triangle.iter().flatten().copied().collect()
    }
}

/// Load a config from a RON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DemoConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<DemoConfig, ConfigError> {
    let config: DemoConfig = ron::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Save a config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &DemoConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}
