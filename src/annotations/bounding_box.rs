use serde::Serialize;
use std::fmt;

/// A struct representing a bounding box.
///
/// A bounding box is the axis-aligned rectangle an object detection model places
/// around an object it found in an image. Detectors natively report boxes as a
/// corner pair (x1, y1, x2, y2); callers of this crate want the top-left corner
/// plus a width and height, so that is the form stored here.
///
/// This project uses the standard convention of the left side of the image being x=0
/// and the top of the image being y=0, with all values in pixel coordinates of the
/// submitted image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// Builds a box from a detector's corner pair, checking the corners are ordered
    /// before constructing.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self, String> {
        if x1 > x2 {
            Err(format!(
                "Failed to create BoundingBox, value for x1 > value for x2 ({} > {}).",
                x1, x2
            ))
        } else if y1 > y2 {
            Err(format!(
                "Failed to create BoundingBox, value for y1 > value for y2 ({} > {}).",
                y1, y2
            ))
        } else {
            Ok(BoundingBox {
                x: x1,
                y: y1,
                width: x2 - x1,
                height: y2 - y1,
            })
        }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BoundingBox {{ x: {}, y: {}, width: {}, height: {} }}",
            self.x, self.y, self.width, self.height
        )
    }
}
