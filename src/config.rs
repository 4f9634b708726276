use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use image::Rgb;
use serde::Deserialize;

use crate::drawing::text::LabelFont;
use crate::error::ConfigError;

/// File name the annotated PNG is offered under.
pub const DOWNLOAD_FILE_NAME: &str = "predict_img.png";

/// The display languages a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisplayLanguage {
    /// Japanese labels and tags
    Primary,
    /// English labels and tags
    Secondary,
}

impl DisplayLanguage {
    /// Target code for label translation. `None` when the service already
    /// reports labels in this language.
    pub fn translation_target(self) -> Option<&'static str> {
        match self {
            DisplayLanguage::Primary => Some("ja"),
            DisplayLanguage::Secondary => None,
        }
    }

    pub fn tag_language(self) -> &'static str {
        match self {
            DisplayLanguage::Primary => "ja",
            DisplayLanguage::Secondary => "en",
        }
    }
}

pub struct Config {
    pub secret_path: PathBuf,
    /// CJK-capable font for primary-language labels; not bundled.
    pub primary_font_path: Option<PathBuf>,
    pub secondary_font_path: PathBuf,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_path: PathBuf::from("key/secret.json"),
            primary_font_path: None,
            secondary_font_path: PathBuf::from("res/fonts/DejaVuSans.ttf"),
            output_dir: PathBuf::from("."),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn font_path(&self, language: DisplayLanguage) -> Result<&Path, ConfigError> {
        match language {
            DisplayLanguage::Primary => self
                .primary_font_path
                .as_deref()
                .ok_or(ConfigError::MissingFont { language }),
            DisplayLanguage::Secondary => Ok(&self.secondary_font_path),
        }
    }

    pub fn download_path(&self) -> PathBuf {
        self.output_dir.join(DOWNLOAD_FILE_NAME)
    }
}

/// Vision service credentials, read from a JSON file of the form
/// `{"KEY": "...", "ENDPOINT": "https://..."}`.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(rename = "KEY")]
    pub key: String,
    #[serde(rename = "ENDPOINT")]
    pub endpoint: String,
}

impl Credentials {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let credentials: Credentials =
            serde_json::from_str(&raw).map_err(|source| ConfigError::ParseCredentials {
                path: path.to_path_buf(),
                source,
            })?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.key.trim().is_empty() {
            return Err(ConfigError::MissingCredential("KEY"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingCredential("ENDPOINT"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// How labels and boxes are drawn. Selected once per request from the
/// display language.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub font: LabelFont,
    pub font_size: u32,
    pub box_color: Rgb<u8>,
    pub box_stroke_width: u32,
    pub label_background_color: Rgb<u8>,
    pub label_text_color: Rgb<u8>,
}

impl RenderConfig {
    /// Green boxes and plates with white 50px text.
    pub fn with_font(font: LabelFont) -> Self {
        Self {
            font,
            font_size: 50,
            box_color: Rgb([0, 128, 0]),
            box_stroke_width: 5,
            label_background_color: Rgb([0, 128, 0]),
            label_text_color: Rgb([255, 255, 255]),
        }
    }

    pub fn for_language(language: DisplayLanguage, config: &Config) -> Result<Self, ConfigError> {
        let font = LabelFont::load(config.font_path(language)?)?;
        Ok(Self::with_font(font))
    }

    pub fn font_family(&self) -> &str {
        self.font.family()
    }
}
