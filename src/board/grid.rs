use crate::geometry::{EPSILON, Insets, Point, Rect, Size};

/// Derived grid geometry. Recomputed whenever the item count, item
/// geometry or viewport changes; never stored across those mutations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Always odd and at least 1, so a single cell can sit on the exact
    /// horizontal center of the grid.
    pub items_per_line: usize,
    pub line_count: usize,
    /// Grid proper, without the border margin.
    pub grid_size: Size,
    /// Border margin letting edge items center in the viewport at full
    /// zoom. `content_size_unscaled = grid_size + content_size_extra`.
    pub content_size_extra: Size,
    pub content_size_unscaled: Size,
    /// Zoom at which the whole grid fits the inset viewport.
    pub minimum_zoom_scale: f64,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::compute(0, 1.0, 0.0, Size::new(1.0, 1.0), Insets::default())
    }
}

impl GridGeometry {
    pub fn compute(
        item_count: usize,
        item_diameter: f64,
        item_padding: f64,
        viewport: Size,
        insets: Insets,
    ) -> Self {
        let viewport = viewport.clamped();
        let items_per_line = Self::items_per_line(item_count, viewport);
        let line_count = item_count.div_ceil(items_per_line);

        let ipl = items_per_line as f64;
        let grid_size = Size::new(
            ipl * item_diameter + (ipl + 1.0) * item_padding + (item_diameter + item_padding) / 2.0,
            line_count as f64 * item_diameter + 2.0 * item_padding,
        );

        let minimum_zoom_scale = f64::min(
            (viewport.width - insets.horizontal()).max(EPSILON) / grid_size.width,
            (viewport.height - insets.vertical()).max(EPSILON) / grid_size.height,
        );

        let content_size_extra = Size::new(
            ((viewport.width - item_diameter * 0.5) / minimum_zoom_scale).max(0.0),
            ((viewport.height - item_diameter * 0.5) / minimum_zoom_scale).max(0.0),
        );

        let content_size_unscaled = Size::new(
            grid_size.width + content_size_extra.width,
            grid_size.height + content_size_extra.height,
        );

        Self {
            items_per_line,
            line_count,
            grid_size,
            content_size_extra,
            content_size_unscaled,
            minimum_zoom_scale,
        }
    }

    fn items_per_line(item_count: usize, viewport: Size) -> usize {
        let aspect = viewport.min_side() / viewport.max_side();
        let mut per_line = (aspect * (item_count as f64).sqrt()).ceil() as usize;

        if per_line % 2 == 0 {
            per_line += 1;
        }
        per_line.max(1)
    }

    /// Grid cell for a sequence index. Item 0 takes the visual center
    /// cell; whichever item would have landed there naturally takes
    /// `(0, 0)` instead.
    pub fn cell_for_index(&self, index: usize, item_count: usize) -> (usize, usize) {
        let center_line =
            (item_count as f64 / self.items_per_line as f64 / 2.0).floor() as usize;
        let center_in_line = self.items_per_line / 2;

        if index == 0 {
            return (center_line, center_in_line);
        }

        let line = index / self.items_per_line;
        let in_line = index % self.items_per_line;
        if line == center_line && in_line == center_in_line {
            return (0, 0);
        }
        (line, in_line)
    }

    /// Content-space center of a sequence index. Odd lines shift half a
    /// cell for the brick pattern.
    pub fn center_for_index(
        &self,
        index: usize,
        item_count: usize,
        item_diameter: f64,
        item_padding: f64,
    ) -> Point {
        let (line, in_line) = self.cell_for_index(index, item_count);

        let line_offset = if line % 2 == 1 {
            (item_diameter + item_padding) / 2.0
        } else {
            0.0
        };

        Point::new(
            self.content_size_extra.width * 0.5
                + item_padding
                + line_offset
                + in_line as f64 * (item_diameter + item_padding)
                + item_diameter / 2.0,
            self.content_size_extra.height * 0.5
                + item_padding
                + line as f64 * item_diameter
                + item_diameter / 2.0,
        )
    }

    /// The grid proper in content space, border margin excluded. This is
    /// the show-all rect and the valid settle area for drag targets.
    pub fn full_content_rect(&self) -> Rect {
        Rect::new(
            self.content_size_extra.width * 0.5,
            self.content_size_extra.height * 0.5,
            self.content_size_unscaled.width - self.content_size_extra.width,
            self.content_size_unscaled.height - self.content_size_extra.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_grid() -> GridGeometry {
        // 9 items at 320x480 with the default item geometry.
        GridGeometry::compute(9, 128.0, 48.0, Size::new(320.0, 480.0), Insets::default())
    }

    #[test]
    fn test_items_per_line_is_odd_for_all_counts_and_aspects() {
        let viewports = [
            Size::new(320.0, 480.0),
            Size::new(480.0, 320.0),
            Size::new(1024.0, 1024.0),
            Size::new(2560.0, 350.0),
        ];

        for viewport in viewports {
            for n in 1..=150 {
                let grid = GridGeometry::compute(n, 128.0, 48.0, viewport, Insets::default());
                assert!(grid.items_per_line >= 1);
                assert_eq!(grid.items_per_line % 2, 1, "n={n} viewport={viewport:?}");
            }
        }
    }

    #[test]
    fn test_reference_scenario_geometry() {
        let grid = reference_grid();
        assert_eq!(grid.items_per_line, 3);
        assert_eq!(grid.line_count, 3);
        assert!((grid.grid_size.width - 664.0).abs() < 1e-9);
        assert!((grid.grid_size.height - 480.0).abs() < 1e-9);
        assert!((grid.minimum_zoom_scale - 320.0 / 664.0).abs() < 1e-9);
        assert!(
            (grid.content_size_unscaled.width
                - (grid.grid_size.width + grid.content_size_extra.width))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_item_zero_swaps_with_center_cell() {
        let grid = reference_grid();
        // Natural center cell of a 3x3 grid is line 1, slot 1 => index 4.
        assert_eq!(grid.cell_for_index(0, 9), (1, 1));
        assert_eq!(grid.cell_for_index(4, 9), (0, 0));
        // Everyone else stays in sequence order.
        assert_eq!(grid.cell_for_index(1, 9), (0, 1));
        assert_eq!(grid.cell_for_index(5, 9), (1, 2));
        assert_eq!(grid.cell_for_index(8, 9), (2, 2));
    }

    #[test]
    fn test_centers_fall_inside_unscaled_content() {
        for n in 1..=80 {
            let grid =
                GridGeometry::compute(n, 128.0, 48.0, Size::new(375.0, 812.0), Insets::default());
            for i in 0..n {
                let c = grid.center_for_index(i, n, 128.0, 48.0);
                assert!(c.x >= 0.0 && c.x <= grid.content_size_unscaled.width, "i={i} n={n}");
                assert!(c.y >= 0.0 && c.y <= grid.content_size_unscaled.height, "i={i} n={n}");
            }
        }
    }

    #[test]
    fn test_odd_lines_are_brick_offset() {
        let grid = reference_grid();
        let top_left = grid.center_for_index(1, 9, 128.0, 48.0); // line 0, slot 1
        let middle_left = grid.center_for_index(3, 9, 128.0, 48.0); // line 1, slot 0
        assert!(
            (middle_left.x - (top_left.x - (128.0 + 48.0) + (128.0 + 48.0) / 2.0)).abs() < 1e-9
        );
    }

    #[test]
    fn test_empty_grid_degrades() {
        let grid = GridGeometry::compute(0, 128.0, 48.0, Size::new(320.0, 480.0), Insets::default());
        assert_eq!(grid.items_per_line, 1);
        assert_eq!(grid.line_count, 0);
        assert!(grid.minimum_zoom_scale.is_finite());
        assert!(grid.content_size_unscaled.width.is_finite());
    }

    #[test]
    fn test_degenerate_viewport_stays_finite() {
        let grid = GridGeometry::compute(9, 128.0, 48.0, Size::new(0.0, 0.0), Insets::default());
        assert!(grid.minimum_zoom_scale.is_finite());
        assert!(grid.content_size_extra.width.is_finite());
    }

    #[test]
    fn test_grid_fits_viewport_at_minimum_zoom() {
        let viewport = Size::new(414.0, 896.0);
        let insets = Insets::new(0.0, 44.0, 0.0, 34.0);
        let grid = GridGeometry::compute(30, 128.0, 48.0, viewport, insets);

        let tol = 1e-9;
        assert!(grid.grid_size.width * grid.minimum_zoom_scale <= viewport.width - insets.horizontal() + tol);
        assert!(grid.grid_size.height * grid.minimum_zoom_scale <= viewport.height - insets.vertical() + tol);
    }
}
