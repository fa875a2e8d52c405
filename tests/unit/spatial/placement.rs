//! Tests for grid placement geometry and overlap bands

#[cfg(test)]
mod tests {
    use quilting::SynthesisConfig;
    use quilting::spatial::placement::{Neighbours, Rect, TilePlacement, grid_placements};

    // Tests rectangle end coordinates are exclusive
    // Verified by subtracting one from the end coordinates
    #[test]
    fn test_rect_ends() {
        let rect = Rect::new(3, 4, 5, 6);
        assert_eq!(rect.row_end(), 8);
        assert_eq!(rect.col_end(), 10);
    }

    // Tests placement origins advance by the stride
    // Verified by advancing by the full tile size
    #[test]
    fn test_placement_origin() {
        let placement = TilePlacement::new(2, 3, 10, 2);
        assert_eq!(placement.rect, Rect::new(16, 24, 10, 10));
        assert_eq!(placement.tile_size(), 10);
    }

    // Tests neighbour classification for the four kinds of cell
    // Verified by swapping the Left and Top cases
    #[test]
    fn test_neighbours() {
        assert_eq!(TilePlacement::new(0, 0, 8, 2).neighbours(), Neighbours::None);
        assert_eq!(TilePlacement::new(0, 1, 8, 2).neighbours(), Neighbours::Left);
        assert_eq!(TilePlacement::new(1, 0, 8, 2).neighbours(), Neighbours::Top);
        assert_eq!(TilePlacement::new(3, 2, 8, 2).neighbours(), Neighbours::Both);

        assert!(Neighbours::Both.has_left() && Neighbours::Both.has_top());
        assert!(Neighbours::Left.has_left() && !Neighbours::Left.has_top());
        assert!(!Neighbours::Top.has_left() && Neighbours::Top.has_top());
        assert!(!Neighbours::None.has_left() && !Neighbours::None.has_top());
    }

    // Tests overlap bands cover the shared pixels with the neighbours
    // Verified by swapping the band extents
    #[test]
    fn test_overlap_bands() {
        let placement = TilePlacement::new(1, 1, 10, 3);

        assert_eq!(placement.left_strip(), Rect::new(7, 7, 10, 3));
        assert_eq!(placement.top_strip(), Rect::new(7, 7, 3, 10));
        assert_eq!(placement.corner(), Rect::new(7, 7, 3, 3));

        // The left band is the right edge of the tile to the left
        let left = TilePlacement::new(1, 0, 10, 3);
        assert_eq!(left.rect.col_end(), placement.left_strip().col_end());
    }

    // Tests the grid walk is row-major and ends on the canvas edge
    // Verified by iterating columns in the outer loop
    #[test]
    fn test_grid_placements_raster_order() {
        let config = SynthesisConfig {
            tile_size: 10,
            overlap: 2,
            num_tiles: 3,
            ..SynthesisConfig::default()
        };

        let cells: Vec<(usize, usize)> = grid_placements(&config)
            .map(|p| (p.grid_row, p.grid_col))
            .collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells.get(1), Some(&(0, 1)));
        assert_eq!(cells.get(3), Some(&(1, 0)));

        let last = grid_placements(&config).last().expect("non-empty grid");
        assert_eq!(last.rect.row_end(), config.output_size());
        assert_eq!(last.rect.col_end(), config.output_size());
    }
}
