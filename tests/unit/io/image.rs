//! Tests for image to matrix conversion and disk round trips

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
    use quilting::QuiltError;
    use quilting::io::image::{image_from_matrix, load_sample, matrix_from_image, save_matrix};
    use tempfile::TempDir;

    // Tests pixel layout: rows follow y and columns follow x
    // Verified by swapping width and height in the array shape
    #[test]
    fn test_rgb_layout() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 7]));
        let matrix = matrix_from_image(&DynamicImage::ImageRgb8(img)).expect("supported");

        assert_eq!((matrix.rows(), matrix.cols(), matrix.channels()), (2, 3, 3));
        assert_eq!(matrix.view()[[1, 2, 0]], 2);
        assert_eq!(matrix.view()[[1, 2, 1]], 1);
        assert_eq!(matrix.view()[[1, 2, 2]], 7);
    }

    // Tests channel counts for gray and RGBA inputs
    // Verified by converting gray input to RGB
    #[test]
    fn test_gray_and_rgba_channels() {
        let gray = GrayImage::from_pixel(4, 4, image::Luma([9]));
        let matrix = matrix_from_image(&DynamicImage::ImageLuma8(gray)).expect("supported");
        assert_eq!(matrix.channels(), 1);

        let rgba = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4]));
        let matrix = matrix_from_image(&DynamicImage::ImageRgba8(rgba)).expect("supported");
        assert_eq!(matrix.channels(), 4);
        assert_eq!(matrix.view()[[3, 3, 3]], 4);
    }

    // Tests 16-bit input is reduced to 8 bits per channel
    // Verified by rejecting 16-bit images
    #[test]
    fn test_sixteen_bit_reduced() {
        let deep: ImageBuffer<Rgb<u16>, Vec<u16>> = ImageBuffer::from_pixel(2, 2, Rgb([65535, 0, 65535]));
        let matrix = matrix_from_image(&DynamicImage::ImageRgb16(deep)).expect("supported");

        assert_eq!(matrix.channels(), 3);
        assert_eq!(matrix.view()[[0, 0, 0]], 255);
        assert_eq!(matrix.view()[[0, 0, 1]], 0);
    }

    // Tests two-channel gray-alpha input is rejected
    // Verified by accepting any channel count
    #[test]
    fn test_gray_alpha_rejected() {
        let img = GrayAlphaImage::from_pixel(2, 2, LumaA([5, 255]));
        let result = matrix_from_image(&DynamicImage::ImageLumaA8(img));
        assert!(matches!(result, Err(QuiltError::UnsupportedFormat { channels: 2 })));
    }

    // Tests conversion back to an image keeps every pixel
    // Verified by writing the buffer column-major
    #[test]
    fn test_image_from_matrix() {
        let img = RgbaImage::from_fn(5, 3, |x, y| Rgba([x as u8, y as u8, (x + y) as u8, 200]));
        let original = DynamicImage::ImageRgba8(img);
        let matrix = matrix_from_image(&original).expect("supported");

        let restored = image_from_matrix(&matrix).expect("supported");
        assert_eq!(restored, original);
    }

    // Tests save and load through PNG, creating missing directories
    // Verified by skipping parent directory creation
    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("deep/nested/out.png");

        let img = GrayImage::from_fn(6, 4, |x, y| image::Luma([(x * 10 + y) as u8]));
        let matrix = matrix_from_image(&DynamicImage::ImageLuma8(img)).expect("supported");

        save_matrix(&matrix, &path).expect("saved");
        let loaded = load_sample(&path).expect("loaded");
        assert_eq!(loaded, matrix);
    }

    // Tests loading a missing file reports the path
    // Verified by mapping load failures to a generic error
    #[test]
    fn test_load_missing_file() {
        let result = load_sample(std::path::Path::new("does/not/exist.png"));
        match result {
            Err(QuiltError::ImageLoad { path, .. }) => {
                assert!(path.ends_with("exist.png"));
            }
            other => panic!("Expected ImageLoad error, got {other:?}"),
        }
    }
}
