use std::fmt;
use std::fs;
use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::debug;

use crate::error::ConfigError;

/// Rendered extent of a label at a given font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextMetrics {
    pub width: u32,
    pub height: u32,
}

/// A font face loaded from a TrueType/OpenType asset.
#[derive(Clone)]
pub struct LabelFont {
    family: String,
    face: FontArc,
}

impl LabelFont {
    /// Load a font asset; the family name is taken from the file stem.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let family = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();

        debug!("Loaded font {} from {}", family, path.display());
        Self::from_bytes(family, bytes)
    }

    pub fn from_bytes(family: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ConfigError> {
        let family = family.into();
        let face = FontArc::try_from_vec(bytes).map_err(|_| ConfigError::InvalidFont {
            family: family.clone(),
        })?;
        Ok(Self { family, face })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn measure(&self, text: &str, size: u32) -> TextMetrics {
        let (width, height) = text_size(scale(size), &self.face, text);
        TextMetrics { width, height }
    }

    /// Draw `text` with its layout box anchored at `(x, y)`. Glyphs off the
    /// canvas are clipped; text that cannot reach the canvas is skipped.
    pub fn draw(&self, image: &mut RgbImage, text: &str, x: i32, y: i32, size: u32, color: Rgb<u8>) {
        let metrics = self.measure(text, size);
        // Descenders and overhangs stay within one font size of the layout box.
        let reach = i64::from(size);
        let (x, y) = (i64::from(x), i64::from(y));
        if x >= i64::from(image.width())
            || y >= i64::from(image.height())
            || x + i64::from(metrics.width) + reach < 0
            || y + i64::from(metrics.height) + reach < 0
        {
            return;
        }
        draw_text_mut(image, color, x as i32, y as i32, scale(size), &self.face, text);
    }
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

fn scale(size: u32) -> PxScale {
    PxScale::from(size as f32)
}
