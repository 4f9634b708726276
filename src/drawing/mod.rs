pub mod rectangle;
pub mod text;

pub use text::{LabelFont, TextMetrics};

use image::RgbImage;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::detection::{BoundingBox, Detection};
use crate::services::Translator;

/// A translator together with the language labels should be translated into.
pub struct LabelTranslation<'a> {
    pub translator: &'a dyn Translator,
    pub target_language: &'a str,
}

/// What was drawn for one detection.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    pub bbox: BoundingBox,
    /// Label as drawn, translated when translation succeeded.
    pub text: String,
    /// Extent of the text, which is also the extent of its plate.
    pub metrics: TextMetrics,
    pub translated: bool,
}

pub struct AnnotatedImage {
    pub image: RgbImage,
    /// One entry per detection, in draw order.
    pub labels: Vec<RenderedLabel>,
}

/// Draw every detection onto `image` in input order, so later boxes paint over
/// earlier ones. A failed translation keeps the original label.
pub fn render(
    mut image: RgbImage,
    detections: &[Detection],
    config: &RenderConfig,
    translation: Option<&LabelTranslation<'_>>,
) -> AnnotatedImage {
    let mut labels = Vec::with_capacity(detections.len());

    for detection in detections {
        let (text, translated) = resolve_label(&detection.label, translation);
        let metrics = config.font.measure(&text, config.font_size);
        let bbox = detection.bbox;

        rectangle::draw_outline(&mut image, &bbox, config.box_color, config.box_stroke_width);
        rectangle::fill_plate(
            &mut image,
            bbox.x,
            bbox.y,
            metrics.width,
            metrics.height,
            config.label_background_color,
        );
        config.font.draw(
            &mut image,
            &text,
            bbox.x,
            bbox.y,
            config.font_size,
            config.label_text_color,
        );

        debug!(
            "Drew '{}' at ({}, {}) size {}x{}, plate {}x{}",
            text, bbox.x, bbox.y, bbox.width, bbox.height, metrics.width, metrics.height
        );

        labels.push(RenderedLabel {
            bbox,
            text,
            metrics,
            translated,
        });
    }

    AnnotatedImage { image, labels }
}

fn resolve_label(label: &str, translation: Option<&LabelTranslation<'_>>) -> (String, bool) {
    let Some(translation) = translation else {
        return (label.to_string(), false);
    };

    match translation
        .translator
        .translate(label, translation.target_language)
    {
        Ok(translated) => (translated, true),
        Err(e) => {
            warn!(
                "Translation of '{}' to {} failed, keeping original: {}",
                label, translation.target_language, e
            );
            (label.to_string(), false)
        }
    }
}
