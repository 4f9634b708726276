//! Object detection annotator: sends an image to a remote vision service,
//! draws labelled boxes for every detected object and summarizes the image's
//! content tags.

pub mod config;
pub mod detection;
pub mod drawing;
pub mod error;
pub mod pipeline;
pub mod services;
pub mod tags;

pub use config::{Config, Credentials, DisplayLanguage, RenderConfig};
pub use detection::{normalize, BoundingBox, Detection};
pub use drawing::{render, AnnotatedImage, LabelTranslation};
pub use error::{ConfigError, MalformedDetectionError, PipelineError, ServiceCallFailure, TranslationFailure};
pub use pipeline::{AnnotationOutcome, Pipeline};
pub use tags::summarize;
