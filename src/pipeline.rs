use std::io::Cursor;

use image::{ImageFormat, RgbImage};
use tracing::info;

use crate::config::{DisplayLanguage, RenderConfig};
use crate::detection;
use crate::drawing::{self, LabelTranslation, RenderedLabel};
use crate::error::PipelineError;
use crate::services::{Translator, VisionService};
use crate::tags;

/// Everything one run hands back to the shell.
pub struct AnnotationOutcome {
    /// Annotated image encoded as PNG.
    pub png: Vec<u8>,
    pub tag_line: String,
    pub labels: Vec<RenderedLabel>,
}

/// One annotation run per call: detect, normalize, translate, render, tag.
///
/// Holds only immutable collaborators; every buffer lives inside `run`.
pub struct Pipeline {
    vision: Box<dyn VisionService + Send + Sync>,
    translator: Box<dyn Translator + Send + Sync>,
}

impl Pipeline {
    pub fn new(
        vision: Box<dyn VisionService + Send + Sync>,
        translator: Box<dyn Translator + Send + Sync>,
    ) -> Self {
        Self { vision, translator }
    }

    pub fn run(
        &self,
        image_bytes: &[u8],
        language: DisplayLanguage,
        render_config: &RenderConfig,
    ) -> Result<AnnotationOutcome, PipelineError> {
        let image = decode(image_bytes)?;

        info!("Starting object detection");
        let raw = self.vision.detect_objects(image_bytes)?;
        let detections = detection::normalize(&raw)?;
        info!(
            "Detected {} objects, drawing with {}",
            detections.len(),
            render_config.font_family()
        );

        let translation = language
            .translation_target()
            .map(|target_language| LabelTranslation {
                translator: self.translator.as_ref(),
                target_language,
            });
        let annotated = drawing::render(image, &detections, render_config, translation.as_ref());
        let png = encode_png(&annotated.image)?;

        let tags = self.vision.estimate_tags(image_bytes, language.tag_language())?;
        let tag_line = tags::summarize(&tags);
        info!("Done: {} labels, {} tags", annotated.labels.len(), tags.len());

        Ok(AnnotationOutcome {
            png,
            tag_line,
            labels: annotated.labels,
        })
    }
}

fn decode(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    let format = image::guess_format(bytes).map_err(|_| PipelineError::UnsupportedFormat)?;
    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(PipelineError::UnsupportedFormat);
    }
    let image = image::load_from_memory_with_format(bytes, format).map_err(PipelineError::Decode)?;
    Ok(image.to_rgb8())
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, PipelineError> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(PipelineError::Encode)?;
    Ok(png)
}
