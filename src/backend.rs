//! Image processing backend trait and invocation parameter types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: read an EXIF tag, read a pixel dimension, and execute a convert.
//! The production implementation is [`MagickBackend`], which shells out to the
//! ImageMagick `identify` and `convert` commands. Everything above this module
//! is backend-agnostic, so tests drive the whole pipeline through a recording
//! mock instead of a real ImageMagick install.
//!
//! The parameter structs describe *what* to do, not *how*: [`ConvertParams`]
//! is the full specification of one conversion (resize, quality, strip,
//! optional annotation), assembled by the walker and rendered into
//! command-line arguments only here.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    /// The external tool binary could not be located. Fatal: the run cannot
    /// proceed without ImageMagick.
    #[error("ImageMagick not found; this command may be wrong: {0}")]
    ToolNotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{command} exited with status {status}")]
    CommandFailed { command: String, status: i32 },
}

/// Which pixel dimension to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Downscale instruction: constrain one edge, preserve aspect ratio.
///
/// Landscape photos constrain the width (`1920x`), portrait and square
/// photos constrain the height (`x1920`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Width(u32),
    Height(u32),
}

impl Resize {
    fn as_geometry(self) -> String {
        match self {
            Resize::Width(w) => format!("{w}x"),
            Resize::Height(h) => format!("x{h}"),
        }
    }
}

/// ImageMagick gravity for the four label corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Gravity {
    pub fn as_arg(self) -> &'static str {
        match self {
            Gravity::NorthWest => "NorthWest",
            Gravity::NorthEast => "NorthEast",
            Gravity::SouthWest => "SouthWest",
            Gravity::SouthEast => "SouthEast",
        }
    }
}

/// Label text handed to `-annotate`: either a literal argument or a
/// reference to a UTF-8 text file (old ImageMagick versions cannot take
/// non-ASCII text on the command line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPayload {
    Inline(String),
    File(PathBuf),
}

/// Full specification of a label annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub gravity: Gravity,
    pub point_size: u32,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: u32,
    pub font: String,
    /// Offset from the gravity corner, rendered as `+X+Y`.
    pub offset: (i32, i32),
    pub payload: LabelPayload,
}

/// Full specification of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub target: PathBuf,
    pub auto_orient: bool,
    pub resize: Option<Resize>,
    /// JPEG quality percentage.
    pub quality: u32,
    /// Remove all embedded metadata from the output.
    pub strip: bool,
    pub annotation: Option<Annotation>,
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Read a single formatted EXIF value; empty string when the tag is
    /// absent.
    fn exif_tag(&self, path: &Path, tag: &str) -> Result<String, BackendError>;

    /// Read one pixel dimension of the stored image (before any orientation
    /// correction).
    fn dimension(&self, path: &Path, axis: Axis) -> Result<u32, BackendError>;

    /// Execute a conversion. `Ok` only on a zero exit status.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}

/// Production backend shelling out to ImageMagick.
pub struct MagickBackend {
    convert_command: String,
    identify_command: String,
}

impl MagickBackend {
    pub fn new(convert_command: &str, identify_command: &str) -> Self {
        Self {
            convert_command: convert_command.to_string(),
            identify_command: identify_command.to_string(),
        }
    }

    /// Build a `Command` from a command spec. The spec may carry leading
    /// arguments (`magick convert` for ImageMagick 7), split on whitespace.
    fn command(spec: &str) -> Command {
        let mut parts = spec.split_whitespace();
        let mut cmd = Command::new(parts.next().unwrap_or(spec));
        cmd.args(parts);
        cmd
    }

    fn identify_format(&self, path: &Path, format: &str) -> Result<String, BackendError> {
        let output = Self::command(&self.identify_command)
            .arg("-format")
            .arg(format)
            .arg(path)
            .output()
            .map_err(|e| self.spawn_error(e, &self.identify_command))?;

        // identify prints one value; only the first line is needed
        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text.lines().next().unwrap_or("").trim().to_string())
    }

    fn spawn_error(&self, error: std::io::Error, command: &str) -> BackendError {
        if error.kind() == std::io::ErrorKind::NotFound {
            BackendError::ToolNotFound(command.to_string())
        } else {
            BackendError::Io(error)
        }
    }
}

impl ImageBackend for MagickBackend {
    fn exif_tag(&self, path: &Path, tag: &str) -> Result<String, BackendError> {
        self.identify_format(path, &format!("%[EXIF:{tag}]"))
    }

    fn dimension(&self, path: &Path, axis: Axis) -> Result<u32, BackendError> {
        let format = match axis {
            Axis::Horizontal => "%w",
            Axis::Vertical => "%h",
        };
        let text = self.identify_format(path, format)?;
        text.parse().map_err(|_| BackendError::CommandFailed {
            command: self.identify_command.clone(),
            status: 0,
        })
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let mut cmd = Self::command(&self.convert_command);
        cmd.arg(&params.source);
        if params.auto_orient {
            cmd.arg("-auto-orient");
        }
        if let Some(resize) = params.resize {
            cmd.arg("-resize").arg(resize.as_geometry());
        }
        cmd.arg("-quality").arg(format!("{}%", params.quality));
        if params.strip {
            cmd.arg("-strip");
        }
        if let Some(annotation) = &params.annotation {
            cmd.arg("-gravity").arg(annotation.gravity.as_arg());
            cmd.arg("-pointsize").arg(annotation.point_size.to_string());
            cmd.arg("-fill").arg(&annotation.fill);
            cmd.arg("-stroke").arg(&annotation.stroke);
            cmd.arg("-strokewidth")
                .arg(annotation.stroke_width.to_string());
            cmd.arg("-font").arg(&annotation.font);
            let (x, y) = annotation.offset;
            cmd.arg("-annotate").arg(format!("{x:+}{y:+}"));
            match &annotation.payload {
                LabelPayload::Inline(text) => cmd.arg(text),
                LabelPayload::File(path) => cmd.arg(format!("@{}", path.display())),
            };
        }
        cmd.arg(&params.target);

        let status = cmd
            .status()
            .map_err(|e| self.spawn_error(e, &self.convert_command))?;
        if status.success() {
            Ok(())
        } else {
            Err(BackendError::CommandFailed {
                command: self.convert_command.clone(),
                status: status.code().unwrap_or(-1),
            })
        }
    }
}
