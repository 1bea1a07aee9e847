//! # mapready
//!
//! Batch-converts photo collections for upload to web mapping services by
//! shelling out to ImageMagick. Each photo is downscaled to a bounded long
//! edge, recompressed, stripped of metadata, and optionally stamped with a
//! templated text label built from its EXIF data:
//!
//! ```text
//! mapready trip/ --label "[Month YYYY, ][file_name]"
//! ```
//!
//! Conversion is in place by default, with every original moved into a
//! `backup` directory first; `--destination` mirrors the source tree into a
//! separate folder instead and leaves the originals alone.
//!
//! # Architecture
//!
//! One pass per file, fully sequential: the walker discovers a file, the
//! metrics provider lazily reads its EXIF facts, the label pipeline turns
//! the template into an annotation sized for the image, the path resolver
//! picks collision-free backup/target names, and the backend runs a single
//! `convert` invocation. Everything above [`backend`] is backend-agnostic,
//! so the whole pipeline is testable against a recording mock without an
//! ImageMagick install.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`walker`] | Run orchestration — scan inputs, drive per-file conversion, prune empty dirs |
//! | [`label`] | Label pipeline: template parsing, per-image composition, typography, delivery |
//! | [`metrics`] | Lazy, memoized per-image EXIF facts (dimensions, orientation, capture date) |
//! | [`paths`] | Collision-free backup/target path allocation and created-directory tracking |
//! | [`backend`] | `ImageBackend` trait, ImageMagick implementation, conversion parameter types |
//! | [`config`] | Conversion settings with optional `mapready.toml` overrides |
//! | [`output`] | CLI output — error/warning prefixes and the end-of-run statistics block |

pub mod backend;
pub mod config;
pub mod label;
pub mod metrics;
pub mod output;
pub mod paths;
pub mod walker;
