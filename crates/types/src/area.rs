//! Renderable output areas.
//!
//! Areas are immutable once built and shared through [`AreaRef`]. Every area
//! is positioned by its baseline origin; children of a boxed layout carry
//! their own displacement relative to that origin, with `dy` growing upward.

use crate::bbox::BoundingBox;
use crate::color::RgbColor;
use crate::geometry::Rectangle;
use crate::ids::ElementId;
use crate::scaled::Scaled;
use std::sync::Arc;

pub type AreaRef = Arc<Area>;

#[derive(Debug, Clone, PartialEq)]
pub enum Area {
    /// A pre-measured box produced by a content element.
    Content { element: ElementId, bbox: BoundingBox },
    /// A rule centred on the baseline, extending rightward.
    HorizontalLine { thickness: Scaled, length: Scaled, color: RgbColor },
    /// A rule hanging downward from the origin.
    VerticalLine { thickness: Scaled, length: Scaled, color: RgbColor },
    /// A composite with an explicit box and displaced children.
    BoxedLayout { bbox: BoundingBox, content: Vec<XYArea> },
}

/// A child area displaced by `(dx, dy)` from its parent's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct XYArea {
    pub dx: Scaled,
    pub dy: Scaled,
    pub area: AreaRef,
}

impl XYArea {
    pub fn new(dx: Scaled, dy: Scaled, area: AreaRef) -> Self {
        Self { dx, dy, area }
    }
}

impl Area {
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Area::Content { bbox, .. } | Area::BoxedLayout { bbox, .. } => *bbox,
            Area::HorizontalLine { thickness, length, .. } => {
                let height = *thickness / 2;
                BoundingBox::new(*length, height, *thickness - height)
            }
            Area::VerticalLine { thickness, length, .. } => {
                BoundingBox::new(*thickness, Scaled::ZERO, *length)
            }
        }
    }

    pub fn element(&self) -> Option<ElementId> {
        match self {
            Area::Content { element, .. } => Some(*element),
            _ => None,
        }
    }

    pub fn children(&self) -> &[XYArea] {
        match self {
            Area::BoxedLayout { content, .. } => content,
            _ => &[],
        }
    }

    /// Finds the innermost content element covering the point `(x, y)`,
    /// relative to this area's origin. Later children are on top.
    pub fn find_element(&self, x: Scaled, y: Scaled) -> Option<ElementId> {
        match self {
            Area::Content { element, bbox } => {
                Rectangle::from_box(Scaled::ZERO, Scaled::ZERO, bbox)
                    .is_inside(x, y)
                    .then_some(*element)
            }
            Area::BoxedLayout { content, .. } => content
                .iter()
                .rev()
                .find_map(|child| child.area.find_element(x - child.dx, y - child.dy)),
            Area::HorizontalLine { .. } | Area::VerticalLine { .. } => None,
        }
    }

    /// Every content element reachable from this area with its absolute
    /// origin, in paint order.
    pub fn elements(&self) -> Vec<(ElementId, Scaled, Scaled)> {
        let mut out = Vec::new();
        self.collect_elements(Scaled::ZERO, Scaled::ZERO, &mut out);
        out
    }

    fn collect_elements(&self, x: Scaled, y: Scaled, out: &mut Vec<(ElementId, Scaled, Scaled)>) {
        match self {
            Area::Content { element, .. } => out.push((*element, x, y)),
            Area::BoxedLayout { content, .. } => {
                for child in content {
                    child.area.collect_elements(x + child.dx, y + child.dy, out);
                }
            }
            Area::HorizontalLine { .. } | Area::VerticalLine { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: i32) -> Scaled {
        Scaled::from_int(v)
    }

    fn content(id: u32, w: i32, h: i32, d: i32) -> AreaRef {
        Arc::new(Area::Content {
            element: ElementId::new(id),
            bbox: BoundingBox::new(s(w), s(h), s(d)),
        })
    }

    #[test]
    fn test_line_boxes() {
        let h = Area::HorizontalLine { thickness: s(3), length: s(20), color: RgbColor::BLACK };
        let hb = h.bounding_box();
        assert_eq!(hb.width, s(20));
        assert_eq!(hb.vertical_extent(), s(3));
        assert_eq!(hb.height, Scaled::from_f64(1.5));

        let v = Area::VerticalLine { thickness: s(1), length: s(12), color: RgbColor::BLACK };
        assert_eq!(v.bounding_box(), BoundingBox::new(s(1), s(0), s(12)));
    }

    #[test]
    fn test_find_element_walks_children() {
        let table = Area::BoxedLayout {
            bbox: BoundingBox::new(s(30), s(10), s(10)),
            content: vec![
                XYArea::new(s(0), s(4), content(1, 10, 4, 2)),
                XYArea::new(s(15), s(-6), content(2, 10, 4, 2)),
            ],
        };
        assert_eq!(table.find_element(s(5), s(6)), Some(ElementId::new(1)));
        assert_eq!(table.find_element(s(20), s(-7)), Some(ElementId::new(2)));
        assert_eq!(table.find_element(s(12), s(0)), None);
    }

    #[test]
    fn test_later_children_win() {
        let stacked = Area::BoxedLayout {
            bbox: BoundingBox::new(s(10), s(5), s(0)),
            content: vec![
                XYArea::new(s(0), s(0), content(1, 10, 5, 0)),
                XYArea::new(s(0), s(0), content(2, 10, 5, 0)),
            ],
        };
        assert_eq!(stacked.find_element(s(1), s(1)), Some(ElementId::new(2)));
        let elements = stacked.elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].0, ElementId::new(1));
    }
}
