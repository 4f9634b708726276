pub mod bbox;
pub mod raw;

pub use bbox::BoundingBox;
pub use raw::{RawDetectedObject, RawRectangle};

use crate::error::MalformedDetectionError;
use tracing::debug;

/// One detected object: where it is and what it is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub label: String,
    pub confidence: Option<f32>,
}

impl Detection {
    pub fn new(bbox: BoundingBox, label: impl Into<String>) -> Self {
        Self {
            bbox,
            label: label.into(),
            confidence: None,
        }
    }

    fn from_raw(index: usize, raw: &RawDetectedObject) -> Result<Self, MalformedDetectionError> {
        let rectangle = raw
            .rectangle
            .as_ref()
            .ok_or(MalformedDetectionError::MissingField {
                index,
                field: "rectangle",
            })?;

        let bbox = BoundingBox {
            x: coordinate(index, "rectangle.x", rectangle.x)?,
            y: coordinate(index, "rectangle.y", rectangle.y)?,
            width: extent(index, "rectangle.w", rectangle.w)?,
            height: extent(index, "rectangle.h", rectangle.h)?,
        };

        let label = raw
            .object
            .clone()
            .ok_or(MalformedDetectionError::MissingField {
                index,
                field: "object",
            })?;

        Ok(Self {
            bbox,
            label,
            confidence: raw.confidence,
        })
    }
}

/// Convert service records into detections, keeping order and length.
///
/// Every record is passed through: nothing is deduplicated or filtered on
/// confidence. The first malformed record fails the whole batch.
pub fn normalize(raw: &[RawDetectedObject]) -> Result<Vec<Detection>, MalformedDetectionError> {
    let detections = raw
        .iter()
        .enumerate()
        .map(|(index, record)| Detection::from_raw(index, record))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Normalized {} detections", detections.len());
    Ok(detections)
}

fn coordinate(
    index: usize,
    field: &'static str,
    value: Option<i64>,
) -> Result<i32, MalformedDetectionError> {
    let value = value.ok_or(MalformedDetectionError::MissingField { index, field })?;
    i32::try_from(value).map_err(|_| MalformedDetectionError::InvalidField { index, field, value })
}

fn extent(
    index: usize,
    field: &'static str,
    value: Option<i64>,
) -> Result<u32, MalformedDetectionError> {
    let value = value.ok_or(MalformedDetectionError::MissingField { index, field })?;
    u32::try_from(value).map_err(|_| MalformedDetectionError::InvalidField { index, field, value })
}
