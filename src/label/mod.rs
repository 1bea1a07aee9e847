//! Photo labels: parse a template once, evaluate it per image, fit the
//! typography to the image, and hand the text to the image backend.
//!
//! The pipeline is template → compose → fit/wrap → delivery:
//!
//! | Stage        | Module       | Responsibility                              |
//! |--------------|--------------|---------------------------------------------|
//! | parse        | [`template`] | template string into spans and groups       |
//! | evaluate     | [`compose`]  | spans into final text for one image         |
//! | typography   | [`fit`]      | font size, stroke width, line wrapping      |
//! | hand-off     | [`delivery`] | inline argument or temp file payload        |
//!
//! [`Labeler`] ties the stages together and is the only type the rest of the
//! converter needs.

pub mod compose;
pub mod delivery;
pub mod fit;
pub mod template;

use crate::backend::{Annotation, Gravity, ImageBackend};
use crate::config::ConvertConfig;
use crate::metrics::ImageMetrics;
use delivery::{DeliveryError, LabelWriter};
use std::path::Path;
use template::LabelTemplate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("label is {len} characters, the maximum is {max}")]
    TooLong { len: usize, max: usize },
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Produces [`Annotation`]s from a label template, one image at a time.
pub struct Labeler {
    config: ConvertConfig,
    template: Option<LabelTemplate>,
    gravity: Gravity,
    writer: LabelWriter,
    /// Composed text cached across images when the template is static and
    /// reuse is switched on in the config.
    static_text: Option<String>,
}

impl Labeler {
    /// Parse `template` once for the whole run.
    ///
    /// An oversized template is rejected here, before any file is touched:
    /// templates only ever grow during composition (tags expand to at most a
    /// file stem), so one that already exceeds the ceiling can never compose
    /// into a valid label.
    pub fn new(
        template: Option<&str>,
        gravity: Gravity,
        config: &ConvertConfig,
    ) -> Result<Self, LabelError> {
        if let Some(raw) = template {
            let len = raw.chars().count();
            if len > config.label_max_len {
                return Err(LabelError::TooLong {
                    len,
                    max: config.label_max_len,
                });
            }
        }
        Ok(Self {
            config: config.clone(),
            template: template.map(LabelTemplate::parse),
            gravity,
            writer: LabelWriter::new(),
            static_text: None,
        })
    }

    /// Whether any labeling happens at all this run.
    pub fn is_active(&self) -> bool {
        self.template.is_some()
    }

    /// Build the annotation for `image`, writing a label file into `dir` when
    /// the text can't travel inline.
    ///
    /// Returns `Ok(None)` when no template was given or the composed text is
    /// empty, in which case the image converts unlabeled.
    pub fn annotation<B: ImageBackend>(
        &mut self,
        image: &mut ImageMetrics<'_, B>,
        dir: &Path,
    ) -> Result<Option<Annotation>, LabelError> {
        let Some(template) = &self.template else {
            return Ok(None);
        };

        let text = if self.config.reuse_static_labels && template.is_static() {
            match &self.static_text {
                Some(text) => text.clone(),
                None => {
                    let text = compose::compose(template, image);
                    self.static_text = Some(text.clone());
                    text
                }
            }
        } else {
            compose::compose(template, image)
        };

        if text.is_empty() {
            return Ok(None);
        }
        let len = text.chars().count();
        if len > self.config.label_max_len {
            return Err(LabelError::TooLong {
                len,
                max: self.config.label_max_len,
            });
        }

        // Without dimensions the label still renders, at the base typography.
        let (width, height) = match (image.width(), image.height()) {
            (0, _) | (_, 0) => (
                self.config.font_size_photo_side,
                self.config.font_size_photo_side,
            ),
            pair => pair,
        };
        let fit = fit::fit(width, height, &self.config);
        let lines = fit::wrap_lines(&text, fit.line_width);
        let payload = self.writer.render(&lines, dir)?;

        Ok(Some(Annotation {
            gravity: self.gravity,
            point_size: fit.font_size,
            fill: self.config.fill.clone(),
            stroke: "black".to_string(),
            stroke_width: fit.stroke_width,
            font: self.config.font.clone(),
            offset: (2, 0),
            payload,
        }))
    }
}
