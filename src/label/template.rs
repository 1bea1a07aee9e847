//! Label template parsing.
//!
//! A template is plain text interspersed with bracket regions. Text inside
//! `[...]` may mix tags with literal text; the whole region is a *group* and
//! is later rendered all-or-nothing. `[[` and `]]` are escapes producing
//! literal brackets and never open or close a group.
//!
//! ```text
//! "[Month YYYY, ][file_name]"  →  "August 2020, HAPPY_SHOT"
//! "[YYYY-MM-DD hh:mm:ss]"      →  "2020-08-19 15:47:45"
//! "[[square brackets]]"        →  "[square brackets]"
//! ```
//!
//! Parsing is recovery-oriented, not validating: a `[` that is never closed
//! turns into literal text from the bracket to the end of the template.

use crate::backend::ImageBackend;
use crate::metrics::ImageMetrics;

/// A placeholder resolvable against one image's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `YYYY` — four-digit year
    Year,
    /// `MM` — two-digit month
    Month,
    /// `month` — lowercase month name (august)
    MonthName,
    /// `MONTH` — uppercase month name (AUGUST)
    MonthNameUpper,
    /// `Month` — capitalized month name (August)
    MonthNameCapitalized,
    /// `DD` — two-digit day
    Day,
    /// `hh` — two-digit hour
    Hour,
    /// `mm` — two-digit minute
    Minute,
    /// `ss` — two-digit second
    Second,
    /// `file_name` — file name without extension
    FileName,
}

impl Tag {
    /// Tag names in match order: at each position inside a bracket region the
    /// first table entry that matches wins, so entries listed earlier shadow
    /// later ones on shared prefixes. Matching is case-sensitive (`mm` is the
    /// minute, `MM` the month).
    pub const TABLE: [(&'static str, Tag); 10] = [
        ("YYYY", Tag::Year),
        ("MM", Tag::Month),
        ("month", Tag::MonthName),
        ("MONTH", Tag::MonthNameUpper),
        ("Month", Tag::MonthNameCapitalized),
        ("DD", Tag::Day),
        ("hh", Tag::Hour),
        ("mm", Tag::Minute),
        ("ss", Tag::Second),
        ("file_name", Tag::FileName),
    ];

    /// Whether the tag's value is independent of the specific image.
    ///
    /// No current tag is: every one reads EXIF data or the file name. The
    /// flag exists so a future image-independent tag can opt into composed-
    /// text reuse without touching the parser.
    pub fn is_static(self) -> bool {
        false
    }

    /// Fixed dispatch from tag to metadata accessor.
    pub fn resolve<B: ImageBackend>(self, image: &mut ImageMetrics<'_, B>) -> String {
        match self {
            Tag::Year => image.year(),
            Tag::Month => image.month(),
            Tag::MonthName => image.month_name(),
            Tag::MonthNameUpper => image.month_name_upper(),
            Tag::MonthNameCapitalized => image.month_name_capitalized(),
            Tag::Day => image.day(),
            Tag::Hour => image.hour(),
            Tag::Minute => image.minute(),
            Tag::Second => image.second(),
            Tag::FileName => image.file_stem(),
        }
    }
}

/// Payload of one parsed span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Text(String),
    Tag(Tag),
}

/// An atomic parsed unit of a template: literal text or a tag reference,
/// with markers for the bracket group it belongs to. Plain top-level text
/// has neither marker set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub group_start: bool,
    pub group_end: bool,
}

impl Span {
    fn text(text: String) -> Self {
        Span {
            kind: SpanKind::Text(text),
            group_start: false,
            group_end: false,
        }
    }

    fn tag(tag: Tag) -> Self {
        Span {
            kind: SpanKind::Tag(tag),
            group_start: false,
            group_end: false,
        }
    }

    /// Literal text or the tag's value for this image.
    pub fn resolve<B: ImageBackend>(&self, image: &mut ImageMetrics<'_, B>) -> String {
        match &self.kind {
            SpanKind::Text(text) => text.clone(),
            SpanKind::Tag(tag) => tag.resolve(image),
        }
    }
}

/// A parsed label template: an ordered span sequence plus a flag telling
/// whether every referenced tag is image-independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTemplate {
    spans: Vec<Span>,
    is_static: bool,
}

impl LabelTemplate {
    /// Parse a template string. Never fails: malformed bracket structure
    /// degrades to literal text.
    pub fn parse(template: &str) -> Self {
        let chars: Vec<char> = template.chars().collect();
        let mut spans = Vec::new();
        let mut text = String::new();
        let mut depth = 0usize;
        // Index just past the '[' that opened the current outermost group.
        let mut group_from = 0usize;

        let mut i = 0;
        while i < chars.len() {
            if depth == 0 && (matches_at(&chars, i, "[[") || matches_at(&chars, i, "]]")) {
                text.push(chars[i]);
                i += 2;
                continue;
            }
            match chars[i] {
                '[' => {
                    depth += 1;
                    if depth == 1 {
                        group_from = i + 1;
                    }
                }
                ']' if depth > 0 => {
                    depth -= 1;
                    if depth == 0 {
                        if !text.is_empty() {
                            spans.push(Span::text(std::mem::take(&mut text)));
                        }
                        parse_group(&chars[group_from..i], &mut spans);
                    }
                }
                c => {
                    if depth == 0 {
                        text.push(c);
                    }
                }
            }
            i += 1;
        }

        // Unterminated bracket: everything from the opening '[' is literal.
        if depth > 0 {
            text.extend(&chars[group_from - 1..]);
        }
        if !text.is_empty() {
            spans.push(Span::text(text));
        }

        let is_static = spans.iter().all(|span| match &span.kind {
            SpanKind::Text(_) => true,
            SpanKind::Tag(tag) => tag.is_static(),
        });

        LabelTemplate { spans, is_static }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// True iff no referenced tag depends on the image (vacuously true for
    /// an all-literal template).
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

/// Split one bracket region into tag and text spans and mark the produced
/// run as a group.
fn parse_group(content: &[char], spans: &mut Vec<Span>) {
    let group_start_index = spans.len();
    let mut text = String::new();

    let mut i = 0;
    'scan: while i < content.len() {
        for (name, tag) in Tag::TABLE {
            if matches_at(content, i, name) {
                if !text.is_empty() {
                    spans.push(Span::text(std::mem::take(&mut text)));
                }
                spans.push(Span::tag(tag));
                i += name.chars().count();
                continue 'scan;
            }
        }
        // Escaped brackets collapse inside groups too.
        text.push(content[i]);
        if matches_at(content, i, "[[") || matches_at(content, i, "]]") {
            i += 2;
        } else {
            i += 1;
        }
    }
    if !text.is_empty() {
        spans.push(Span::text(text));
    }

    if spans.len() > group_start_index {
        spans[group_start_index].group_start = true;
        spans.last_mut().unwrap().group_end = true;
    }
}

fn matches_at(chars: &[char], at: usize, pattern: &str) -> bool {
    let mut i = at;
    for p in pattern.chars() {
        if chars.get(i) != Some(&p) {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(template: &str) -> Vec<SpanKind> {
        LabelTemplate::parse(template)
            .spans()
            .iter()
            .map(|s| s.kind.clone())
            .collect()
    }

    fn text(s: &str) -> SpanKind {
        SpanKind::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_ungrouped_span() {
        let t = LabelTemplate::parse("Central park");
        assert_eq!(t.spans().len(), 1);
        assert_eq!(t.spans()[0].kind, text("Central park"));
        assert!(!t.spans()[0].group_start);
        assert!(!t.spans()[0].group_end);
    }

    #[test]
    fn empty_template_has_no_spans() {
        assert!(LabelTemplate::parse("").spans().is_empty());
    }

    #[test]
    fn date_template_splits_tags_and_separators() {
        assert_eq!(
            kinds("[YYYY-MM-DD hh:mm:ss]"),
            vec![
                SpanKind::Tag(Tag::Year),
                text("-"),
                SpanKind::Tag(Tag::Month),
                text("-"),
                SpanKind::Tag(Tag::Day),
                text(" "),
                SpanKind::Tag(Tag::Hour),
                text(":"),
                SpanKind::Tag(Tag::Minute),
                text(":"),
                SpanKind::Tag(Tag::Second),
            ]
        );
    }

    #[test]
    fn group_markers_bound_each_bracket_region() {
        let t = LabelTemplate::parse("[Month YYYY, ][file_name]");
        let spans = t.spans();
        // First group: Month, " ", YYYY, ", "
        assert_eq!(spans.len(), 5);
        assert!(spans[0].group_start);
        assert!(!spans[0].group_end);
        assert!(spans[3].group_end);
        // Second group is a single span carrying both markers.
        assert!(spans[4].group_start);
        assert!(spans[4].group_end);
        assert_eq!(spans[4].kind, SpanKind::Tag(Tag::FileName));
    }

    #[test]
    fn top_level_text_between_groups_is_unmarked() {
        let t = LabelTemplate::parse("[YYYY] and [DD]");
        let spans = t.spans();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].kind, text(" and "));
        assert!(!spans[1].group_start);
        assert!(!spans[1].group_end);
    }

    #[test]
    fn escaped_brackets_are_literal_and_open_no_group() {
        let t = LabelTemplate::parse("[[square brackets]]");
        assert_eq!(t.spans().len(), 1);
        assert_eq!(t.spans()[0].kind, text("[square brackets]"));
        assert!(!t.spans()[0].group_start);
    }

    #[test]
    fn escapes_collapse_inside_groups_too() {
        assert_eq!(kinds("[YYYY [[only]]]"), vec![
            SpanKind::Tag(Tag::Year),
            text(" [only]"),
        ]);
    }

    #[test]
    fn nested_brackets_stay_inside_one_group() {
        let t = LabelTemplate::parse("[a[b]c]");
        let spans = t.spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, text("a[b]c"));
        assert!(spans[0].group_start && spans[0].group_end);
    }

    #[test]
    fn unterminated_bracket_recovers_as_literal_text() {
        assert_eq!(kinds("abc[YYYY"), vec![text("abc[YYYY")]);
        assert_eq!(kinds("["), vec![text("[")]);
    }

    #[test]
    fn stray_close_bracket_is_literal() {
        assert_eq!(kinds("a]b"), vec![text("a]b")]);
    }

    #[test]
    fn first_table_match_wins_case_sensitively() {
        // "mm" is the minute, "MM" the month, "Month" the capitalized name.
        assert_eq!(kinds("[mm]"), vec![SpanKind::Tag(Tag::Minute)]);
        assert_eq!(kinds("[MM]"), vec![SpanKind::Tag(Tag::Month)]);
        assert_eq!(kinds("[Month]"), vec![SpanKind::Tag(Tag::MonthNameCapitalized)]);
        assert_eq!(kinds("[MONTH]"), vec![SpanKind::Tag(Tag::MonthNameUpper)]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let template = "[Month DD, YYYY. ]Any text [[x]] [file_name]";
        assert_eq!(
            LabelTemplate::parse(template),
            LabelTemplate::parse(template)
        );
    }

    #[test]
    fn no_tag_is_static_so_tagged_templates_are_not() {
        assert!(!LabelTemplate::parse("[YYYY]").is_static());
        assert!(!LabelTemplate::parse("[file_name]").is_static());
    }

    #[test]
    fn all_literal_template_is_static() {
        assert!(LabelTemplate::parse("Central park").is_static());
        assert!(LabelTemplate::parse("[[brackets]]").is_static());
    }
}
