//! Conversion settings.
//!
//! Every knob the converter consults at runtime lives in [`ConvertConfig`]:
//! the ImageMagick command names, the downscale threshold, JPEG quality, and
//! the label typography constants. The struct is built once at startup and
//! passed by reference everywhere — nothing reads globals.
//!
//! ## Override file
//!
//! Defaults suit most collections. For fine-tuning, a `mapready.toml` in the
//! working directory overrides individual fields; anything not mentioned in
//! the file keeps its default:
//!
//! ```toml
//! quality = 85
//! max_side = 1600
//! font = "Roboto-Black"
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Name of the optional override file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "mapready.toml";

/// Immutable conversion settings.
///
/// The label fitter scales `font_size` (which corresponds to a photo whose
/// long side is `font_size_photo_side` pixels) to the actual image, clamping
/// at `min_font_size` and thinning the stroke below `thin_stroke_threshold`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// ImageMagick convert command. On Windows the plain `convert` collides
    /// with a system utility, so the renamed `magick` binary is assumed.
    pub convert_command: String,
    /// ImageMagick identify command.
    pub identify_command: String,
    /// File extensions (lowercase, no dot) that are picked up for conversion.
    pub extensions: Vec<String>,
    /// Images with either dimension above this are downscaled so the long
    /// edge equals it.
    pub max_side: u32,
    /// JPEG quality percentage handed to `-quality`.
    pub quality: u32,
    /// ImageMagick font name for the label (`magick -list font`).
    pub font: String,
    /// Label fill color.
    pub fill: String,
    /// Base font size, valid for a photo whose long side is
    /// `font_size_photo_side`.
    pub font_size: u32,
    /// Photo long side that `font_size` was tuned for.
    pub font_size_photo_side: u32,
    /// Scaled font sizes never drop below this.
    pub min_font_size: u32,
    /// Below this font size the stroke narrows from 2 to 1.
    pub thin_stroke_threshold: u32,
    /// Maximum label line length in characters at the base font size.
    pub line_width: u32,
    /// Composed labels longer than this are rejected.
    pub label_max_len: usize,
    /// Reuse the composed text across images when the template references no
    /// image-dependent tags. Off by default: every image is composed afresh.
    pub reuse_static_labels: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            convert_command: if cfg!(windows) { "magick" } else { "convert" }.to_string(),
            identify_command: "identify".to_string(),
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
            max_side: 1920,
            quality: 91,
            font: if cfg!(windows) {
                "Arial-Black"
            } else {
                "Liberation-Sans-Bold"
            }
            .to_string(),
            fill: "rgb(255,255,255)".to_string(),
            font_size: 40,
            font_size_photo_side: 1920,
            min_font_size: 16,
            thin_stroke_threshold: 26,
            line_width: 60,
            label_max_len: 4000,
            reuse_static_labels: false,
        }
    }
}

impl ConvertConfig {
    /// Load config, merging `mapready.toml` from `dir` over the defaults if
    /// the file exists.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&content)?)
    }

    /// True when `path` has one of the supported extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        self.extensions.iter().any(|e| e == &ext)
    }
}
