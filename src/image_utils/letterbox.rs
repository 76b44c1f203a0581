use crate::image_utils::image_conversion::convert_rgb_image_to_owned_array;
use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::{Array, Array4};

/// Gray value YOLO-family models are trained to treat as padding.
pub const PAD_FILL: f32 = 114.0 / 255.0;

/// The geometry of one letterbox operation.
///
/// A detector has a fixed input size, so an arbitrary image is resized to fit
/// inside it (preserving aspect ratio) and centered on a gray canvas. Boxes the
/// detector reports live in canvas coordinates; this records enough of the
/// transform to map them back into pixel coordinates of the original image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: f32,
    pub pad_y: f32,
    pub original_width: f32,
    pub original_height: f32,
}

impl Letterbox {
    /// Maps a point from detector input coordinates back onto the original
    /// image, clamping to the image bounds.
    pub fn to_original(&self, x: f32, y: f32) -> (f32, f32) {
        (
            ((x - self.pad_x) / self.scale).clamp(0.0, self.original_width),
            ((y - self.pad_y) / self.scale).clamp(0.0, self.original_height),
        )
    }
}

/// Resizes an image into a (1, 3, target_height, target_width) float array with
/// aspect-preserving scaling and centered gray padding.
pub fn letterbox_to_array(
    image: &RgbImage,
    target_width: u32,
    target_height: u32,
) -> (Array4<f32>, Letterbox) {
    let (original_width, original_height) = image.dimensions();
    let scale = f32::min(
        target_width as f32 / original_width as f32,
        target_height as f32 / original_height as f32,
    );
    let scaled_width = ((original_width as f32 * scale).round() as u32)
        .clamp(1, target_width);
    let scaled_height = ((original_height as f32 * scale).round() as u32)
        .clamp(1, target_height);
    let pad_x = (target_width - scaled_width) / 2;
    let pad_y = (target_height - scaled_height) / 2;

    let scaled_array = if (scaled_width, scaled_height) == (original_width, original_height) {
        convert_rgb_image_to_owned_array(image)
    } else {
        let resized = imageops::resize(image, scaled_width, scaled_height, FilterType::Triangle);
        convert_rgb_image_to_owned_array(&resized)
    };

    let mut canvas = Array::from_elem(
        (1, 3, target_height as usize, target_width as usize),
        PAD_FILL,
    );
    for channel in 0..3 {
        for y in 0..scaled_height as usize {
            for x in 0..scaled_width as usize {
                canvas[[0, channel, y + pad_y as usize, x + pad_x as usize]] =
                    scaled_array[[0, channel, y, x]];
            }
        }
    }

    let letterbox = Letterbox {
        scale,
        pad_x: pad_x as f32,
        pad_y: pad_y as f32,
        original_width: original_width as f32,
        original_height: original_height as f32,
    };
    (canvas, letterbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn exact_fit_has_no_padding() {
        let mut img = RgbImage::new(4, 4);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        let (canvas, letterbox) = letterbox_to_array(&img, 4, 4);

        assert_eq!(canvas.shape(), &[1, 3, 4, 4]);
        assert_eq!(letterbox.scale, 1.0);
        assert_eq!(letterbox.pad_x, 0.0);
        assert_eq!(letterbox.pad_y, 0.0);
        assert_eq!(canvas[[0, 0, 0, 0]], 1.0);
        assert_eq!(canvas[[0, 0, 3, 3]], 0.0);
    }

    #[test]
    fn narrow_image_is_padded_left_and_right() {
        let img = RgbImage::new(2, 4);
        let (canvas, letterbox) = letterbox_to_array(&img, 4, 4);

        assert_eq!(letterbox.scale, 1.0);
        assert_eq!(letterbox.pad_x, 1.0);
        assert_eq!(letterbox.pad_y, 0.0);
        // Padding columns carry the gray fill, image columns the black pixels.
        assert_eq!(canvas[[0, 0, 0, 0]], PAD_FILL);
        assert_eq!(canvas[[0, 0, 0, 3]], PAD_FILL);
        assert_eq!(canvas[[0, 0, 0, 1]], 0.0);
        assert_eq!(canvas[[0, 0, 0, 2]], 0.0);
    }

    #[test]
    fn small_image_is_scaled_up() {
        let img = RgbImage::new(2, 2);
        let (canvas, letterbox) = letterbox_to_array(&img, 8, 8);

        assert_eq!(canvas.shape(), &[1, 3, 8, 8]);
        assert_eq!(letterbox.scale, 4.0);
        assert_eq!(letterbox.pad_x, 0.0);
        assert_eq!(letterbox.pad_y, 0.0);
    }

    #[test]
    fn to_original_undoes_scale_and_padding() {
        let img = RgbImage::new(2, 4);
        let (_, letterbox) = letterbox_to_array(&img, 8, 8);
        // scale = 2, scaled size 4x8, pad_x = 2.
        assert_eq!(letterbox.to_original(2.0, 0.0), (0.0, 0.0));
        assert_eq!(letterbox.to_original(6.0, 8.0), (2.0, 4.0));
    }

    #[test]
    fn to_original_clamps_to_image_bounds() {
        let letterbox = Letterbox {
            scale: 1.0,
            pad_x: 10.0,
            pad_y: 0.0,
            original_width: 20.0,
            original_height: 20.0,
        };
        assert_eq!(letterbox.to_original(0.0, -5.0), (0.0, 0.0));
        assert_eq!(letterbox.to_original(100.0, 100.0), (20.0, 20.0));
    }
}
