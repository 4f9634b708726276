use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::detection::BoundingBox;

/// Outline `bbox` covering `x..=x+width` by `y..=y+height`, with the stroke
/// growing inward from that edge. A zero-area box leaves a single dot.
pub fn draw_outline(image: &mut RgbImage, bbox: &BoundingBox, color: Rgb<u8>, thickness: u32) {
    let (left, top) = (i64::from(bbox.x), i64::from(bbox.y));
    let (right, bottom) = bbox.far_corner();

    for t in 0..i64::from(thickness) {
        let (x1, y1, x2, y2) = (left + t, top + t, right - t, bottom - t);
        if x1 > x2 || y1 > y2 {
            break;
        }

        // Draw horizontal lines
        draw_row(image, y1, x1, x2, color);
        draw_row(image, y2, x1, x2, color);

        // Draw vertical lines
        draw_column(image, x1, y1, y2, color);
        draw_column(image, x2, y1, y2, color);
    }
}

/// Fill the `width` x `height` plate whose top-left corner is `(x, y)`,
/// clipped to the canvas.
pub fn fill_plate(image: &mut RgbImage, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
    let (left, top) = (i64::from(x).max(0), i64::from(y).max(0));
    let right = (i64::from(x) + i64::from(width)).min(i64::from(image.width()));
    let bottom = (i64::from(y) + i64::from(height)).min(i64::from(image.height()));
    if left >= right || top >= bottom {
        return;
    }

    // Clipped corners lie inside the canvas, so they fit the rect's i32/u32 fields.
    let rect = Rect::at(left as i32, top as i32).of_size((right - left) as u32, (bottom - top) as u32);
    draw_filled_rect_mut(image, rect, color);
}

fn draw_row(image: &mut RgbImage, y: i64, x1: i64, x2: i64, color: Rgb<u8>) {
    if y < 0 || y >= i64::from(image.height()) {
        return;
    }
    let (from, to) = (x1.max(0), x2.min(i64::from(image.width()) - 1));
    for x in from..=to {
        image.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_column(image: &mut RgbImage, x: i64, y1: i64, y2: i64, color: Rgb<u8>) {
    if x < 0 || x >= i64::from(image.width()) {
        return;
    }
    let (from, to) = (y1.max(0), y2.min(i64::from(image.height()) - 1));
    for y in from..=to {
        image.put_pixel(x as u32, y as u32, color);
    }
}
