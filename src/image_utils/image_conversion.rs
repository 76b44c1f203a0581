use image::RgbImage;
use ndarray::{Array, Array4};

/// Converts an rgb8 image into the (1, 3, height, width) float array the ONNX
/// detector consumes, with channel values scaled into [0, 1].
pub fn convert_rgb_image_to_owned_array(rgb_image: &RgbImage) -> Array4<f32> {
    let mut image_array = Array::zeros((
        1,
        3,
        rgb_image.height() as usize,
        rgb_image.width() as usize,
    ));
    for pixel in rgb_image.enumerate_pixels() {
        let x = pixel.0 as usize;
        let y = pixel.1 as usize;
        let [r, g, b] = pixel.2.0;
        image_array[[0, 0, y, x]] = (r as f32) / 255.;
        image_array[[0, 1, y, x]] = (g as f32) / 255.;
        image_array[[0, 2, y, x]] = (b as f32) / 255.;
    }
    image_array
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn convert_rgb_image_to_owned_array_test() {
        let mut img = RgbImage::new(3, 3);
        img.put_pixel(0, 1, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 255, 0]));
        img.put_pixel(2, 1, Rgb([0, 0, 255]));
        img.put_pixel(0, 2, Rgb([255, 255, 255]));

        let arr = convert_rgb_image_to_owned_array(&img);
        // The dimensions for these arrays encode (image, channel, row, column).
        assert_eq!(arr.shape(), &[1, 3, 3, 3]);
        assert_eq!(
            (arr[[0, 0, 0, 0]], arr[[0, 1, 0, 0]], arr[[0, 2, 0, 0]]),
            (0.0, 0.0, 0.0)
        );
        assert_eq!(
            (arr[[0, 0, 1, 0]], arr[[0, 1, 1, 0]], arr[[0, 2, 1, 0]]),
            (1.0, 0.0, 0.0)
        );
        assert_eq!(
            (arr[[0, 0, 1, 1]], arr[[0, 1, 1, 1]], arr[[0, 2, 1, 1]]),
            (0.0, 1.0, 0.0)
        );
        assert_eq!(
            (arr[[0, 0, 1, 2]], arr[[0, 1, 1, 2]], arr[[0, 2, 1, 2]]),
            (0.0, 0.0, 1.0)
        );
        assert_eq!(
            (arr[[0, 0, 2, 0]], arr[[0, 1, 2, 0]], arr[[0, 2, 2, 0]]),
            (1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn non_square_images_keep_row_column_order() {
        let mut img = RgbImage::new(4, 2);
        img.put_pixel(3, 1, Rgb([255, 0, 0]));

        let arr = convert_rgb_image_to_owned_array(&img);
        assert_eq!(arr.shape(), &[1, 3, 2, 4]);
        assert_eq!(arr[[0, 0, 1, 3]], 1.0);
        assert_eq!(arr[[0, 0, 1, 2]], 0.0);
    }
}
