use crate::bbox::BoundingBox;
use crate::scaled::Scaled;

/// An axis-aligned rectangle in table coordinates (`y` grows upward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub x: Scaled,
    pub y: Scaled,
    pub width: Scaled,
    pub height: Scaled,
}

impl Rectangle {
    pub fn new(x: Scaled, y: Scaled, width: Scaled, height: Scaled) -> Self {
        Self { x, y, width, height }
    }

    /// The rectangle covered by `bbox` when its baseline origin is at `(x, y)`.
    pub fn from_box(x: Scaled, y: Scaled, bbox: &BoundingBox) -> Self {
        Self {
            x,
            y: y - bbox.depth,
            width: bbox.width,
            height: bbox.vertical_extent(),
        }
    }

    pub fn right(&self) -> Scaled {
        self.x + self.width
    }

    pub fn top(&self) -> Scaled {
        self.y + self.height
    }

    pub fn is_inside(&self, x: Scaled, y: Scaled) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.top()
    }

    pub fn overlaps(&self, other: &Rectangle) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.top()
            && other.y <= self.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: i32) -> Scaled {
        Scaled::from_int(v)
    }

    #[test]
    fn test_from_box_spans_depth_to_height() {
        let bbox = BoundingBox::new(s(10), s(4), s(2));
        let rect = Rectangle::from_box(s(5), s(0), &bbox);
        assert_eq!(rect, Rectangle::new(s(5), s(-2), s(10), s(6)));
        assert!(rect.is_inside(s(5), s(-2)));
        assert!(rect.is_inside(s(15), s(4)));
        assert!(!rect.is_inside(s(16), s(0)));
        assert!(!rect.is_inside(s(6), s(5)));
    }

    #[test]
    fn test_overlaps() {
        let a = Rectangle::new(s(0), s(0), s(10), s(10));
        let b = Rectangle::new(s(5), s(5), s(10), s(10));
        let c = Rectangle::new(s(11), s(0), s(2), s(2));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
