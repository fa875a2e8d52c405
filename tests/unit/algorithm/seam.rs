//! Tests for minimum-error boundary cuts

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use quilting::QuiltError;
    use quilting::algorithm::seam::{CutAxis, min_cut, new_side_mask, partition, seam_path, side};

    fn path_cost(cost: &Array2<f64>, path: &[usize]) -> f64 {
        path.iter().enumerate().map(|(r, &c)| cost[[r, c]]).sum()
    }

    // Tests a single-row surface cuts at the first minimum
    // Verified by taking the last minimum instead of the first
    #[test]
    fn test_single_row_is_argmin() {
        let cost = array![[4.0, 1.0, 3.0, 1.0, 2.0]];
        assert_eq!(seam_path(&cost.view()).expect("non-empty"), vec![1]);
    }

    // Tests the path follows a cheap diagonal
    // Verified by restricting parents to the column directly above
    #[test]
    fn test_diagonal_path() {
        let cost = array![[1.0, 9.0, 9.0], [9.0, 1.0, 9.0], [9.0, 9.0, 1.0]];
        let path = seam_path(&cost.view()).expect("non-empty");

        assert_eq!(path, vec![0, 1, 2]);
        assert!((path_cost(&cost, &path) - 3.0).abs() < f64::EPSILON);
    }

    // Tests ties prefer staying in the current column
    // Verified by reordering the parent offsets
    #[test]
    fn test_ties_prefer_current_column() {
        let cost = Array2::<f64>::zeros((4, 3));
        assert_eq!(seam_path(&cost.view()).expect("non-empty"), vec![0, 0, 0, 0]);

        let cost = array![[1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 1.0]];
        assert_eq!(seam_path(&cost.view()).expect("non-empty"), vec![1, 1, 1]);
    }

    // Tests adjacent rows never move the seam by more than one column
    // Verified by widening the parent neighbourhood to two columns
    #[test]
    fn test_path_is_connected() {
        let cost = Array2::from_shape_fn((12, 7), |(r, c)| ((r * 31 + c * 17) % 13) as f64);
        let path = seam_path(&cost.view()).expect("non-empty");

        assert_eq!(path.len(), 12);
        for pair in path.windows(2) {
            if let [a, b] = pair {
                assert!(a.abs_diff(*b) <= 1);
            }
        }
        assert!(path.iter().all(|&c| c < 7));
    }

    // Tests the cut is no more expensive than any straight column
    // Verified by returning the last-row argmin column for every row
    #[test]
    fn test_path_beats_straight_columns() {
        let cost = Array2::from_shape_fn((9, 5), |(r, c)| ((r * 7 + c * 11 + r * c) % 10) as f64);
        let path = seam_path(&cost.view()).expect("non-empty");
        let best = path_cost(&cost, &path);

        for col in 0..5 {
            let straight = vec![col; 9];
            assert!(best <= path_cost(&cost, &straight));
        }
    }

    // Tests empty surfaces are rejected
    // Verified by removing the emptiness check
    #[test]
    fn test_empty_surface() {
        let cost = Array2::<f64>::zeros((0, 3));
        assert!(matches!(
            seam_path(&cost.view()),
            Err(QuiltError::DimensionMismatch { .. })
        ));
    }

    // Tests partition values on each side of the seam
    // Verified by swapping the OLD and NEW constants
    #[test]
    fn test_partition() {
        let sides = partition(&[1, 2], 4);
        assert_eq!(
            sides,
            array![
                [side::OLD, side::SEAM, side::NEW, side::NEW],
                [side::OLD, side::OLD, side::SEAM, side::NEW]
            ]
        );
    }

    // Tests each row of the partition is monotonic from old to new
    // Verified by marking the seam as the old side
    #[test]
    fn test_partition_monotonic() {
        let cost = Array2::from_shape_fn((10, 4), |(r, c)| ((r + 3 * c) % 5) as f64);
        let sides = min_cut(&cost.view(), CutAxis::Vertical).expect("non-empty");

        for row in sides.rows() {
            assert_eq!(row.iter().filter(|&&v| v == side::SEAM).count(), 1);
            let values: Vec<i8> = row.to_vec();
            assert!(values.windows(2).all(|w| matches!(w, [a, b] if a <= b)));
        }
    }

    // Tests horizontal cuts run left to right and keep the band shape
    // Verified by skipping the transpose back
    #[test]
    fn test_horizontal_cut() {
        let cost = array![
            [0.0, 9.0, 9.0, 9.0, 9.0],
            [9.0, 0.0, 0.0, 9.0, 9.0],
            [9.0, 9.0, 9.0, 0.0, 0.0]
        ];
        let sides = min_cut(&cost.view(), CutAxis::Horizontal).expect("non-empty");

        assert_eq!(sides.dim(), (3, 5));
        for col in sides.columns() {
            assert_eq!(col.iter().filter(|&&v| v == side::SEAM).count(), 1);
        }
        assert_eq!(sides[[0, 0]], side::SEAM);
        assert_eq!(sides[[1, 2]], side::SEAM);
        assert_eq!(sides[[2, 4]], side::SEAM);
        assert_eq!(sides[[2, 0]], side::NEW);
        assert_eq!(sides[[0, 4]], side::OLD);
    }

    // Tests the seam itself is taken from the new patch
    // Verified by changing the threshold to strictly positive
    #[test]
    fn test_new_side_mask() {
        let sides = array![[side::OLD, side::SEAM, side::NEW]];
        assert_eq!(new_side_mask(&sides), array![[0_u8, 1, 1]]);
    }
}
