use std::path::PathBuf;

use thiserror::Error;

/// A raw detection record that cannot be turned into a [`crate::detection::Detection`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedDetectionError {
    #[error("detection record {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("detection record {index} has an out-of-range `{field}`: {value}")]
    InvalidField {
        index: usize,
        field: &'static str,
        value: i64,
    },
}

/// Label translation errors. The renderer recovers from these by keeping the
/// untranslated label.
#[derive(Debug, Error)]
pub enum TranslationFailure {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation service answered with status {status}")]
    Status { status: u16 },

    #[error("unexpected translation response: {0}")]
    UnexpectedResponse(String),

    #[error("translation failed: {0}")]
    Other(String),
}

/// Failures talking to the vision service (auth, network, quota, bad payloads).
#[derive(Debug, Error)]
pub enum ServiceCallFailure {
    #[error("service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{service} answered with status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
}

/// Startup configuration errors: credentials and font assets.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse credentials in {path}: {source}")]
    ParseCredentials {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no font configured for {language:?} labels")]
    MissingFont {
        language: crate::config::DisplayLanguage,
    },

    #[error("credential `{0}` is empty")]
    MissingCredential(&'static str),

    #[error("font `{family}` is not a valid TrueType/OpenType face")]
    InvalidFont { family: String },
}

/// Everything that can abort one annotation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported image format (expected JPEG or PNG)")]
    UnsupportedFormat,

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode annotated image: {0}")]
    Encode(#[source] image::ImageError),

    #[error(transparent)]
    Malformed(#[from] MalformedDetectionError),

    #[error(transparent)]
    Service(#[from] ServiceCallFailure),
}
