//! Label geometry: font size, stroke width, and line wrapping.
//!
//! The base font size in [`ConvertConfig`] is tuned for a photo whose long
//! side is `font_size_photo_side` pixels; everything else scales linearly
//! from there, clamped below at `min_font_size`. The wrap width shrinks for
//! portrait images (less horizontal room) and shrinks again when the clamp
//! engaged, because then rendered glyphs are larger than the unclamped
//! calculation assumed.
//!
//! All functions here are pure and testable without images or I/O.

use crate::config::ConvertConfig;

/// Typography derived from one image's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFit {
    /// Point size actually used, never below the configured minimum.
    pub font_size: u32,
    /// Unclamped size from the linear scale; differs from `font_size` only
    /// when the clamp engaged.
    pub exact_font_size: u32,
    /// Outline stroke width: 1 for small labels, 2 otherwise.
    pub stroke_width: u32,
    /// Wrap width in characters.
    pub line_width: usize,
}

/// Compute label typography for an image of `width` x `height` pixels.
pub fn fit(width: u32, height: u32, config: &ConvertConfig) -> LabelFit {
    // Label size tracks the converted photo, which never exceeds max_side.
    let effective_max_side = width.max(height).min(config.max_side);

    let (font_size, exact_font_size, stroke_width) =
        if effective_max_side == config.font_size_photo_side {
            (config.font_size, config.font_size, 2)
        } else {
            let exact = (config.font_size as f64 * effective_max_side as f64
                / config.font_size_photo_side as f64)
                .round() as u32;
            let clamped = exact.max(config.min_font_size);
            let stroke = if clamped < config.thin_stroke_threshold {
                1
            } else {
                2
            };
            (clamped, exact, stroke)
        };

    let mut line_width = if width >= height {
        config.line_width
    } else {
        // Portrait: proportionally less horizontal room.
        (config.line_width as f64 * width as f64 / height as f64) as u32
    };
    if exact_font_size != font_size {
        line_width = (line_width as f64 * exact_font_size as f64 / font_size as f64) as u32;
    }

    LabelFit {
        font_size,
        exact_font_size,
        stroke_width,
        line_width: line_width.max(1) as usize,
    }
}

/// Greedy word-wrap of `text` to lines of at most `width` characters.
///
/// Breaks at whitespace; a single word longer than the width goes onto its
/// own line and is hard-broken at the width.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > width && current_len == 0 {
            // Oversized word: hard-break at the width.
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let piece: String = chunk.iter().collect();
                if chunk.len() == width {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
