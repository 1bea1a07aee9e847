//! Per-image metadata with lazy, memoized retrieval.
//!
//! [`ImageMetrics`] is created per source file immediately before conversion
//! and discarded after. Every fact it serves — orientation, pixel dimensions,
//! the EXIF capture date, the filename stem — is fetched from the backend at
//! most once and cached, including failures: a field that could not be read
//! stays "unavailable" for the lifetime of the instance instead of being
//! re-queried.
//!
//! The six date subfields come from a single EXIF fetch and therefore fail
//! together; width and height are independent queries and fail independently.
//!
//! The path is the only mutable piece of identity: when the walker moves the
//! source into a backup location it calls [`ImageMetrics::move_to`], which
//! updates the path and nothing else — the cached fields describe image
//! content, not location, and stay valid.

use crate::backend::{Axis, BackendError, ImageBackend};
use crate::output;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// EXIF date tags tried in priority order.
///
/// `DateTimeOriginal` is the shoot time. `DateTimeDigitized` matches it for
/// digital photos. `DateTime` is the modification date — often mangled by
/// editors, but some cameras write only this tag.
const DATE_TAGS: [&str; 3] = ["DateTimeOriginal", "DateTimeDigitized", "DateTime"];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // identify returns e.g. "2020:08:19 15:47:45"
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{4}):(\d{2}):(\d{2})\b.*\b(\d{2}):(\d{2}):(\d{2})\b").unwrap()
    })
}

/// Rotation part of an EXIF orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Rotate90,
    Rotate180,
    Rotate270,
}

/// Flip part of an EXIF orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    None,
    Horizontal,
    Vertical,
}

/// One of the eight EXIF orientation classes, decomposed into a rotate/flip
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub rotation: Rotation,
    pub flip: Flip,
}

impl Orientation {
    pub const NORMAL: Orientation = Orientation {
        rotation: Rotation::None,
        flip: Flip::None,
    };

    /// Map an EXIF orientation digit (1–8) to its rotate/flip pair.
    pub fn from_exif_digit(digit: u8) -> Option<Orientation> {
        let (rotation, flip) = match digit {
            1 => (Rotation::None, Flip::None),
            2 => (Rotation::None, Flip::Horizontal),
            3 => (Rotation::Rotate180, Flip::None),
            4 => (Rotation::Rotate180, Flip::Horizontal),
            5 => (Rotation::Rotate270, Flip::Vertical),
            6 => (Rotation::Rotate270, Flip::None),
            7 => (Rotation::Rotate90, Flip::Vertical),
            8 => (Rotation::Rotate90, Flip::None),
            _ => return None,
        };
        Some(Orientation { rotation, flip })
    }

    /// Orientations 5–8 store the image rotated a quarter turn, so the
    /// stored width is the displayed height and vice versa.
    pub fn swaps_axes(self) -> bool {
        matches!(self.rotation, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

/// Memoization state of a lazily fetched field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Fetch<T> {
    Unfetched,
    Available(T),
    Unavailable,
}

impl<T> Fetch<T> {
    fn known(&self) -> bool {
        !matches!(self, Fetch::Unfetched)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ExifDate {
    year: String,
    month: String,
    day: String,
    hour: String,
    minute: String,
    second: String,
}

/// Lazily fetched facts about one source image.
pub struct ImageMetrics<'a, B: ImageBackend> {
    backend: &'a B,
    path: PathBuf,
    orientation: Option<Orientation>,
    width: Fetch<u32>,
    height: Fetch<u32>,
    date: Fetch<ExifDate>,
    month_name: Fetch<String>,
    file_stem: Fetch<String>,
    tool_missing: Option<String>,
}

impl<'a, B: ImageBackend> ImageMetrics<'a, B> {
    pub fn new(backend: &'a B, path: PathBuf) -> Self {
        Self {
            backend,
            path,
            orientation: None,
            width: Fetch::Unfetched,
            height: Fetch::Unfetched,
            date: Fetch::Unfetched,
            month_name: Fetch::Unfetched,
            file_stem: Fetch::Unfetched,
            tool_missing: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Update the path after the file was moved to a backup location.
    /// All cached fields remain valid — they describe the image, not where
    /// it lives.
    pub fn move_to(&mut self, path: PathBuf) {
        self.path = path;
    }

    /// Name of a missing external tool, if any query hit one. Checked by the
    /// walker so a missing ImageMagick aborts the run instead of degrading
    /// every field to "unavailable".
    pub fn tool_missing(&self) -> Option<&str> {
        self.tool_missing.as_deref()
    }

    fn query(&mut self, result: Result<String, BackendError>) -> Option<String> {
        match result {
            Ok(value) => Some(value),
            Err(BackendError::ToolNotFound(command)) => {
                self.tool_missing = Some(command);
                None
            }
            Err(_) => None,
        }
    }

    pub fn orientation(&mut self) -> Orientation {
        if let Some(orientation) = self.orientation {
            return orientation;
        }
        let raw = self
            .query(self.backend.exif_tag(&self.path, "Orientation"))
            .unwrap_or_default();
        let orientation = raw
            .bytes()
            .next()
            .filter(|_| raw.len() == 1)
            .filter(u8::is_ascii_digit)
            .and_then(|d| Orientation::from_exif_digit(d - b'0'))
            .unwrap_or(Orientation::NORMAL);
        self.orientation = Some(orientation);
        orientation
    }

    /// Displayed width in pixels; 0 when it could not be read.
    pub fn width(&mut self) -> u32 {
        if !self.width.known() {
            self.width = self.fetch_dimension(Axis::Horizontal);
        }
        match self.width {
            Fetch::Available(v) => v,
            _ => 0,
        }
    }

    /// Displayed height in pixels; 0 when it could not be read.
    pub fn height(&mut self) -> u32 {
        if !self.height.known() {
            self.height = self.fetch_dimension(Axis::Vertical);
        }
        match self.height {
            Fetch::Available(v) => v,
            _ => 0,
        }
    }

    fn fetch_dimension(&mut self, axis: Axis) -> Fetch<u32> {
        // Orientations with a quarter turn store the axes swapped.
        let stored_axis = if self.orientation().swaps_axes() {
            match axis {
                Axis::Horizontal => Axis::Vertical,
                Axis::Vertical => Axis::Horizontal,
            }
        } else {
            axis
        };
        match self.backend.dimension(&self.path, stored_axis) {
            Ok(v) if v > 0 => Fetch::Available(v),
            Err(BackendError::ToolNotFound(command)) => {
                self.tool_missing = Some(command);
                Fetch::Unavailable
            }
            Ok(_) | Err(_) => {
                output::error(&format!(
                    "can't detect image {}:\n  {}",
                    match axis {
                        Axis::Horizontal => "width",
                        Axis::Vertical => "height",
                    },
                    self.path.display()
                ));
                Fetch::Unavailable
            }
        }
    }

    fn ensure_date(&mut self) {
        if self.date.known() {
            return;
        }
        self.date = self.fetch_date();
    }

    fn fetch_date(&mut self) -> Fetch<ExifDate> {
        let mut raw = String::new();
        let mut source_tag = "";
        for tag in DATE_TAGS {
            let value = self.backend.exif_tag(&self.path, tag);
            match self.query(value) {
                Some(text) if !text.is_empty() => {
                    raw = text;
                    source_tag = tag;
                    break;
                }
                Some(_) => continue,
                None => return Fetch::Unavailable,
            }
        }

        if raw.is_empty() {
            output::error(&format!(
                "can't get image date and time from EXIF:\n  {}",
                self.path.display()
            ));
            return Fetch::Unavailable;
        }
        if source_tag != DATE_TAGS[0] {
            output::warn(&format!(
                "no original capture date in EXIF, using {source_tag}:\n  {}\nthe date may be wrong",
                self.path.display()
            ));
        }

        match date_regex().captures(&raw) {
            Some(captures) => Fetch::Available(ExifDate {
                year: captures[1].to_string(),
                month: captures[2].to_string(),
                day: captures[3].to_string(),
                hour: captures[4].to_string(),
                minute: captures[5].to_string(),
                second: captures[6].to_string(),
            }),
            None => {
                output::error(&format!(
                    "can't parse EXIF date and time:\n  {}",
                    self.path.display()
                ));
                Fetch::Unavailable
            }
        }
    }

    fn date_field(&mut self, pick: fn(&ExifDate) -> &String) -> String {
        self.ensure_date();
        match &self.date {
            Fetch::Available(date) => pick(date).clone(),
            _ => String::new(),
        }
    }

    pub fn year(&mut self) -> String {
        self.date_field(|d| &d.year)
    }

    pub fn month(&mut self) -> String {
        self.date_field(|d| &d.month)
    }

    pub fn day(&mut self) -> String {
        self.date_field(|d| &d.day)
    }

    pub fn hour(&mut self) -> String {
        self.date_field(|d| &d.hour)
    }

    pub fn minute(&mut self) -> String {
        self.date_field(|d| &d.minute)
    }

    pub fn second(&mut self) -> String {
        self.date_field(|d| &d.second)
    }

    /// Lowercase English month name, empty when the date is unavailable.
    pub fn month_name(&mut self) -> String {
        if !self.month_name.known() {
            let month = self.month();
            self.month_name = month
                .parse::<usize>()
                .ok()
                .and_then(|m| MONTH_NAMES.get(m.wrapping_sub(1)))
                .map(|name| Fetch::Available(name.to_string()))
                .unwrap_or(Fetch::Unavailable);
        }
        match &self.month_name {
            Fetch::Available(name) => name.clone(),
            _ => String::new(),
        }
    }

    /// Month name in all caps (`AUGUST`).
    pub fn month_name_upper(&mut self) -> String {
        self.month_name().to_uppercase()
    }

    /// Month name capitalized (`August`).
    pub fn month_name_capitalized(&mut self) -> String {
        let name = self.month_name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// File name without directory or extension.
    pub fn file_stem(&mut self) -> String {
        if !self.file_stem.known() {
            self.file_stem = match self.path.file_stem() {
                Some(stem) if !stem.is_empty() => {
                    Fetch::Available(stem.to_string_lossy().to_string())
                }
                _ => Fetch::Unavailable,
            };
        }
        match &self.file_stem {
            Fetch::Available(stem) => stem.clone(),
            _ => String::new(),
        }
    }
}
