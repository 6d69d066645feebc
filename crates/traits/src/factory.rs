//! AreaFactory trait for abstracting area construction.
//!
//! Layout code never builds [`Area`] values directly; it asks the factory of
//! the current graphic device, so a backend can decorate or intern areas
//! without the layout engine knowing.

use mathtab_types::{Area, AreaRef, BoundingBox, ElementId, RgbColor, Scaled, XYArea};
use std::fmt::Debug;
use std::sync::Arc;

pub trait AreaFactory: Send + Sync + Debug {
    /// Wraps a pre-measured element box.
    fn content(&self, element: ElementId, bbox: BoundingBox) -> AreaRef;

    /// A horizontal rule of `length`, centred on the baseline.
    fn fixed_horizontal_line(&self, thickness: Scaled, length: Scaled, color: RgbColor) -> AreaRef;

    /// A vertical rule of `length`, hanging down from the origin.
    fn fixed_vertical_line(&self, thickness: Scaled, length: Scaled, color: RgbColor) -> AreaRef;

    /// A composite area with an explicit bounding box.
    ///
    /// # Arguments
    ///
    /// * `bbox` - The box reported for the composite, independent of its children
    /// * `content` - Children with their displacement from the composite's origin
    fn boxed_layout(&self, bbox: BoundingBox, content: Vec<XYArea>) -> AreaRef;

    /// Returns a human-readable name for this factory (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Builds plain shared [`Area`] values.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardAreaFactory;

impl StandardAreaFactory {
    pub fn new() -> Self {
        Self
    }
}

impl AreaFactory for StandardAreaFactory {
    fn content(&self, element: ElementId, bbox: BoundingBox) -> AreaRef {
        Arc::new(Area::Content { element, bbox })
    }

    fn fixed_horizontal_line(&self, thickness: Scaled, length: Scaled, color: RgbColor) -> AreaRef {
        Arc::new(Area::HorizontalLine { thickness, length, color })
    }

    fn fixed_vertical_line(&self, thickness: Scaled, length: Scaled, color: RgbColor) -> AreaRef {
        Arc::new(Area::VerticalLine { thickness, length, color })
    }

    fn boxed_layout(&self, bbox: BoundingBox, content: Vec<XYArea>) -> AreaRef {
        Arc::new(Area::BoxedLayout { bbox, content })
    }

    fn name(&self) -> &'static str {
        "StandardAreaFactory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_factory_builds_areas() {
        let factory = StandardAreaFactory::new();
        let s = Scaled::from_int;
        let line = factory.fixed_horizontal_line(s(2), s(30), RgbColor::BLACK);
        assert_eq!(line.bounding_box().width, s(30));

        let cell = factory.content(ElementId::new(1), BoundingBox::new(s(5), s(3), s(1)));
        let table = factory.boxed_layout(
            BoundingBox::new(s(40), s(10), s(10)),
            vec![XYArea::new(s(1), s(2), cell.clone()), XYArea::new(s(0), s(0), line)],
        );
        assert_eq!(table.children().len(), 2);
        assert_eq!(table.find_element(s(2), s(2)), Some(ElementId::new(1)));
        assert_eq!(factory.name(), "StandardAreaFactory");
    }
}
