//! End-to-end pipeline runs against in-process vision and translation fakes

use std::io::Cursor;
use std::sync::Mutex;

use image::{ImageFormat, Rgb, RgbImage};
use object_annotator::detection::{RawDetectedObject, RawRectangle};
use object_annotator::drawing::LabelFont;
use object_annotator::services::{Translator, VisionService};
use object_annotator::{
    BoundingBox, DisplayLanguage, MalformedDetectionError, Pipeline, PipelineError,
    RenderConfig, ServiceCallFailure, TranslationFailure,
};

const FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/res/fonts/DejaVuSans.ttf");
const BACKGROUND: Rgb<u8> = Rgb([40, 40, 40]);

struct FakeVision {
    objects: Vec<RawDetectedObject>,
    tags: Vec<String>,
    fail_detection: bool,
    tag_languages: Mutex<Vec<String>>,
}

impl FakeVision {
    fn new(objects: Vec<RawDetectedObject>, tags: &[&str]) -> Self {
        Self {
            objects,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            fail_detection: false,
            tag_languages: Mutex::new(Vec::new()),
        }
    }
}

impl VisionService for &'static FakeVision {
    fn detect_objects(&self, _image: &[u8]) -> Result<Vec<RawDetectedObject>, ServiceCallFailure> {
        if self.fail_detection {
            return Err(ServiceCallFailure::Status {
                service: "vision service",
                status: 401,
                body: "Access denied".into(),
            });
        }
        Ok(self.objects.clone())
    }

    fn estimate_tags(&self, _image: &[u8], language: &str) -> Result<Vec<String>, ServiceCallFailure> {
        self.tag_languages.lock().unwrap().push(language.to_string());
        Ok(self.tags.clone())
    }
}

struct Dictionary;

impl Translator for Dictionary {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationFailure> {
        match (text, target_language) {
            ("dog", "ja") => Ok("犬".into()),
            _ => Err(TranslationFailure::Other(format!("no entry for {text}"))),
        }
    }
}

fn leak(vision: FakeVision) -> &'static FakeVision {
    Box::leak(Box::new(vision))
}

fn render_config() -> RenderConfig {
    RenderConfig::with_font(LabelFont::load(FONT).unwrap())
}

fn png_input() -> Vec<u8> {
    let image = RgbImage::from_pixel(200, 150, BACKGROUND);
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn dog_record() -> RawDetectedObject {
    RawDetectedObject::new(RawRectangle::new(10, 10, 50, 50), "dog")
}

#[test]
fn secondary_language_draws_untranslated_labels() {
    let vision = leak(FakeVision::new(
        vec![dog_record(), RawDetectedObject::new(RawRectangle::new(80, 40, 60, 60), "cat")],
        &["dog", "outdoor", "grass"],
    ));
    let pipeline = Pipeline::new(Box::new(vision), Box::new(Dictionary));

    let outcome = pipeline
        .run(&png_input(), DisplayLanguage::Secondary, &render_config())
        .unwrap();

    let labels: Vec<_> = outcome.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(labels, ["dog", "cat"]);
    assert_eq!(outcome.labels[0].bbox, BoundingBox::new(10, 10, 50, 50));
    assert_eq!(outcome.tag_line, "dog, outdoor, grass");
    assert_eq!(*vision.tag_languages.lock().unwrap(), ["en"]);

    let annotated = image::load_from_memory_with_format(&outcome.png, ImageFormat::Png)
        .unwrap()
        .to_rgb8();
    assert_eq!(annotated.dimensions(), (200, 150));
    assert_eq!(*annotated.get_pixel(60, 58), Rgb([0, 128, 0]));
    assert_eq!(*annotated.get_pixel(199, 149), BACKGROUND);
}

#[test]
fn primary_language_translates_and_falls_back() {
    let vision = leak(FakeVision::new(
        vec![dog_record(), RawDetectedObject::new(RawRectangle::new(80, 40, 60, 60), "cat")],
        &["犬", "屋外"],
    ));
    let pipeline = Pipeline::new(Box::new(vision), Box::new(Dictionary));

    let outcome = pipeline
        .run(&png_input(), DisplayLanguage::Primary, &render_config())
        .unwrap();

    assert_eq!(outcome.labels[0].text, "犬");
    assert!(outcome.labels[0].translated);
    assert_eq!(outcome.labels[1].text, "cat");
    assert!(!outcome.labels[1].translated);
    assert_eq!(outcome.tag_line, "犬, 屋外");
    assert_eq!(*vision.tag_languages.lock().unwrap(), ["ja"]);
}

#[test]
fn no_detections_returns_input_pixels() {
    let vision = leak(FakeVision::new(Vec::new(), &[]));
    let pipeline = Pipeline::new(Box::new(vision), Box::new(Dictionary));

    let outcome = pipeline
        .run(&png_input(), DisplayLanguage::Secondary, &render_config())
        .unwrap();

    assert!(outcome.labels.is_empty());
    assert_eq!(outcome.tag_line, "");
    let annotated = image::load_from_memory(&outcome.png).unwrap().to_rgb8();
    assert!(annotated.pixels().all(|p| *p == BACKGROUND));
}

#[test]
fn malformed_record_aborts_the_run() {
    let mut broken = dog_record();
    broken.object = None;
    let vision = leak(FakeVision::new(vec![dog_record(), broken], &["dog"]));
    let pipeline = Pipeline::new(Box::new(vision), Box::new(Dictionary));

    let err = pipeline
        .run(&png_input(), DisplayLanguage::Secondary, &render_config())
        .err()
        .unwrap();

    assert!(matches!(
        err,
        PipelineError::Malformed(MalformedDetectionError::MissingField { index: 1, field: "object" })
    ));
    assert!(vision.tag_languages.lock().unwrap().is_empty());
}

#[test]
fn service_failure_propagates() {
    let mut fake = FakeVision::new(Vec::new(), &[]);
    fake.fail_detection = true;
    let pipeline = Pipeline::new(Box::new(leak(fake)), Box::new(Dictionary));

    let err = pipeline
        .run(&png_input(), DisplayLanguage::Secondary, &render_config())
        .err()
        .unwrap();

    assert!(matches!(err, PipelineError::Service(ServiceCallFailure::Status { status: 401, .. })));
}

#[test]
fn a_failed_run_does_not_poison_the_next() {
    let vision = leak(FakeVision::new(vec![dog_record()], &["dog"]));
    let pipeline = Pipeline::new(Box::new(vision), Box::new(Dictionary));
    let config = render_config();

    let err = pipeline
        .run(b"definitely not an image", DisplayLanguage::Secondary, &config)
        .err()
        .unwrap();
    assert!(matches!(err, PipelineError::UnsupportedFormat));

    let outcome = pipeline
        .run(&png_input(), DisplayLanguage::Secondary, &config)
        .unwrap();
    assert_eq!(outcome.labels.len(), 1);
}
