/// Top-left corner plus extent, in pixel coordinates of the source image.
///
/// Boxes are not clamped to the image; the drawing surface clips whatever
/// falls outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive bottom-right corner `(x + width, y + height)`.
    pub fn far_corner(&self) -> (i64, i64) {
        (
            i64::from(self.x) + i64::from(self.width),
            i64::from(self.y) + i64::from(self.height),
        )
    }
}
