use serde::{Deserialize, Serialize};

/// Smallest viewport dimension / zoom scale we operate on. Degenerate
/// sizes are clamped to this before any division.
pub const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Clamps both dimensions away from zero so downstream divisions
    /// stay finite.
    pub fn clamped(&self) -> Size {
        Size::new(self.width.max(EPSILON), self.height.max(EPSILON))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn with_center(center: Point, size: Size) -> Self {
        Self {
            origin: Point::new(
                center.x - size.width * 0.5,
                center.y - size.height * 0.5,
            ),
            size,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width * 0.5,
            self.origin.y + self.size.height * 0.5,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x <= self.origin.x + self.size.width
            && point.y <= self.origin.y + self.size.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Content space scaled by the current zoom, shifted by the scroll
/// position: `viewport = content * zoom - offset`.
pub fn content_to_viewport(point: Point, zoom: f64, offset: Point) -> Point {
    Point::new(point.x * zoom - offset.x, point.y * zoom - offset.y)
}

pub fn viewport_to_content(point: Point, zoom: f64, offset: Point) -> Point {
    let zoom = zoom.max(EPSILON);
    Point::new((point.x + offset.x) / zoom, (point.y + offset.y) / zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_with_center_round_trips() {
        let rect = Rect::with_center(Point::new(10.0, -4.0), Size::new(8.0, 6.0));
        assert_eq!(rect.origin, Point::new(6.0, -7.0));
        assert_eq!(rect.center(), Point::new(10.0, -4.0));
    }

    #[test]
    fn test_rect_contains_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(10.1, 5.0)));
    }

    #[test]
    fn test_viewport_content_round_trip() {
        let offsets = [Point::default(), Point::new(37.5, -120.0)];
        let zooms = [0.1, 0.48, 1.0, 3.0];
        let p = Point::new(123.4, 567.8);

        for offset in offsets {
            for zoom in zooms {
                let back = viewport_to_content(content_to_viewport(p, zoom, offset), zoom, offset);
                assert!((back.x - p.x).abs() < 1e-9);
                assert!((back.y - p.y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_degenerate_zoom_stays_finite() {
        let p = viewport_to_content(Point::new(5.0, 5.0), 0.0, Point::default());
        assert!(p.x.is_finite() && p.y.is_finite());
    }
}
