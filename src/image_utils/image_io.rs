use image::{ImageResult, RgbImage};
use std::path::Path;

pub fn read_image_as_rgb8(filepath: &Path) -> ImageResult<RgbImage> {
    Ok(image::open(filepath)?.into_rgb8())
}

/// Decodes uploaded image bytes (JPEG/PNG and anything else the image crate
/// recognizes) into an rgb8 pixel buffer ready to hand to the detector.
pub fn decode_image_bytes(bytes: &[u8]) -> ImageResult<RgbImage> {
    Ok(image::load_from_memory(bytes)?.into_rgb8())
}
