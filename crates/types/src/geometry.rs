//! Plain rectangle primitives.
//!
//! Units are not encoded in the types. Layout code works in millimeters;
//! preview code maps the same rectangles into screen pixels.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// True when both sides are strictly positive (and not NaN).
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// `width / height`, or `None` for a degenerate size.
    pub fn aspect_ratio(self) -> Option<f32> {
        self.is_positive().then(|| self.width / self.height)
    }
}

/// An axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_rejects_degenerate_sizes() {
        assert_eq!(Size::new(210.0, 0.0).aspect_ratio(), None);
        assert_eq!(Size::new(-1.0, 10.0).aspect_ratio(), None);
        assert_eq!(Size::new(200.0, 100.0).aspect_ratio(), Some(2.0));
    }

    #[test]
    fn test_rect_edges_and_contains() {
        let rect = Rect::new(12.0, 15.0, 59.0, 86.0);
        assert_eq!(rect.right(), 71.0);
        assert_eq!(rect.bottom(), 101.0);
        assert!(rect.contains(Point::new(12.0, 15.0)));
        assert!(!rect.contains(Point::new(71.0, 20.0)));
    }
}
