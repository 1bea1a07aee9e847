//! Template evaluation against one image.
//!
//! Bracket groups render all-or-nothing: if any tag inside a group resolves
//! empty (say, the EXIF date is missing), the whole group contributes nothing
//! instead of leaving partial text with gaps:
//!
//! ```text
//! Correct: "[Month DD, YYYY]" → ""
//! Wrong:   "[Month DD, YYYY]" → " , "
//! ```
//!
//! Spans outside any group append unconditionally.

use super::template::LabelTemplate;
use crate::backend::ImageBackend;
use crate::metrics::ImageMetrics;

/// Evaluate a parsed template into the final label text for `image`.
pub fn compose<B: ImageBackend>(
    template: &LabelTemplate,
    image: &mut ImageMetrics<'_, B>,
) -> String {
    let mut out = String::new();
    let mut in_group = false;
    let mut group_empty = false;
    let mut group_text = String::new();

    for span in template.spans() {
        if span.group_start {
            in_group = true;
            group_empty = false;
        }

        if in_group {
            // Once a group went empty, stop accumulating but keep scanning
            // to its end marker.
            if !group_empty {
                let value = span.resolve(image);
                if value.is_empty() {
                    group_empty = true;
                    group_text.clear();
                } else {
                    group_text.push_str(&value);
                }
            }
        } else {
            out.push_str(&span.resolve(image));
        }

        if span.group_end {
            out.push_str(&group_text);
            in_group = false;
            group_text.clear();
        }
    }

    out
}
