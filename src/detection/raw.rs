use serde::Deserialize;

/// Rectangle as the vision service reports it. Every field is optional on the
/// wire so that a truncated record is reported rather than rejected wholesale
/// by the deserializer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRectangle {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub w: Option<i64>,
    pub h: Option<i64>,
}

impl RawRectangle {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
        }
    }
}

/// One entry of the service's `objects` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDetectedObject {
    pub rectangle: Option<RawRectangle>,
    /// Object property name, i.e. the caption.
    pub object: Option<String>,
    pub confidence: Option<f32>,
}

impl RawDetectedObject {
    pub fn new(rectangle: RawRectangle, object: impl Into<String>) -> Self {
        Self {
            rectangle: Some(rectangle),
            object: Some(object.into()),
            confidence: None,
        }
    }
}
