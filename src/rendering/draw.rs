use crate::annotations::bounding_box::BoundingBox;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

/// Annotation color for the detected bin.
pub const BOX_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

/// Outline thickness in pixels.
pub const BOX_THICKNESS: u32 = 4;

/// Draws the detection rectangle onto the image, thickened by nesting hollow
/// rectangles inward so the outline never spills outside the box.
pub fn draw_detection_box(image: &mut RgbImage, bounding_box: &BoundingBox) {
    let x = bounding_box.x.round() as i32;
    let y = bounding_box.y.round() as i32;
    let width = bounding_box.width.round() as u32;
    let height = bounding_box.height.round() as u32;
    for inset in 0..BOX_THICKNESS {
        if width <= 2 * inset || height <= 2 * inset {
            break;
        }
        let rect = Rect::at(x + inset as i32, y + inset as i32)
            .of_size(width - 2 * inset, height - 2 * inset);
        draw_hollow_rect_mut(image, rect, BOX_COLOR);
    }
}
