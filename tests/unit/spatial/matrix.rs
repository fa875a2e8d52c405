//! Tests for pixel matrix construction, region access and channel extraction

#[cfg(test)]
mod tests {
    use ndarray::{Array2, Array3};
    use quilting::QuiltError;
    use quilting::spatial::PixelMatrix;
    use quilting::spatial::placement::Rect;

    fn ramp(rows: usize, cols: usize, channels: usize) -> PixelMatrix {
        let data = Array3::from_shape_fn((rows, cols, channels), |(r, c, ch)| {
            (r * 10 + c + ch * 100) as u8
        });
        PixelMatrix::from_array(data).expect("valid channel count")
    }

    // Tests accepted and rejected channel counts
    // Verified by adding 2 to the supported channel list
    #[test]
    fn test_channel_count_validation() {
        for channels in [1, 3, 4] {
            assert!(PixelMatrix::zeros(2, 2, channels).is_ok());
        }

        for channels in [0, 2, 5] {
            let result = PixelMatrix::zeros(2, 2, channels);
            assert!(matches!(
                result,
                Err(QuiltError::UnsupportedFormat { channels: c }) if c == channels
            ));
        }
    }

    // Tests dimension accessors follow rows x cols x channels ordering
    // Verified by swapping rows and cols in the accessors
    #[test]
    fn test_dimensions() {
        let matrix = ramp(3, 5, 4);
        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 5);
        assert_eq!(matrix.channels(), 4);
        assert_eq!(matrix.into_array().dim(), (3, 5, 4));
    }

    // Tests single-channel construction keeps values in place
    // Verified by transposing the plane before inserting the axis
    #[test]
    fn test_from_gray() {
        let plane = Array2::from_shape_fn((2, 3), |(r, c)| (r * 3 + c) as u8);
        let matrix = PixelMatrix::from_gray(&plane);

        assert_eq!(matrix.channels(), 1);
        assert_eq!(matrix.view()[[1, 2, 0]], 5);
        assert_eq!(matrix.channel_f64(0), plane.mapv(f64::from));
    }

    // Tests region views start at the rectangle origin
    // Verified by slicing from the origin of the image instead
    #[test]
    fn test_region_offsets() {
        let matrix = ramp(6, 6, 1);
        let region = matrix.region(Rect::new(2, 3, 2, 2)).expect("in bounds");

        assert_eq!(region.dim(), (2, 2, 1));
        assert_eq!(region[[0, 0, 0]], 23);
        assert_eq!(region[[1, 1, 0]], 34);
    }

    // Tests out-of-bounds rectangles are rejected rather than clamped
    // Verified by removing the bounds check
    #[test]
    fn test_region_out_of_bounds() {
        let matrix = ramp(4, 4, 3);
        let result = matrix.region(Rect::new(2, 2, 3, 2));
        assert!(matches!(result, Err(QuiltError::DimensionMismatch { .. })));
    }

    // Tests per-channel extraction of a rectangle
    // Verified by always reading channel 0
    #[test]
    fn test_region_channel_f64() {
        let matrix = ramp(4, 4, 3);
        let rect = Rect::new(1, 1, 2, 2);

        let green = matrix.region_channel_f64(rect, 1).expect("in bounds");
        assert!((green[[0, 0]] - 111.0).abs() < f64::EPSILON);

        let luminance = matrix.luminance_region(rect).expect("in bounds");
        assert!((luminance[[1, 1]] - 22.0).abs() < f64::EPSILON);
    }

    // Tests writing a window touches only the target rectangle
    // Verified by writing the full image instead of the region
    #[test]
    fn test_write_region() {
        let mut canvas = PixelMatrix::zeros(4, 4, 1).expect("valid");
        let source = ramp(2, 2, 1);
        let rect = Rect::new(1, 2, 2, 2);

        canvas
            .write_region(rect, &source.view())
            .expect("shapes agree");

        let view = canvas.view();
        assert_eq!(view[[1, 2, 0]], 0);
        assert_eq!(view[[2, 3, 0]], 11);
        assert_eq!(view[[0, 0, 0]], 0);
        assert_eq!(view.iter().filter(|&&v| v != 0).count(), 3);
    }

    // Tests mismatched source windows are rejected
    // Verified by removing the shape comparison
    #[test]
    fn test_write_region_shape_mismatch() {
        let mut canvas = PixelMatrix::zeros(4, 4, 1).expect("valid");
        let source = ramp(3, 2, 1);

        let result = canvas.write_region(Rect::new(0, 0, 2, 2), &source.view());
        assert!(matches!(result, Err(QuiltError::DimensionMismatch { .. })));
    }
}
