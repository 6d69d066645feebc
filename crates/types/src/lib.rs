pub mod area;
pub mod bbox;
pub mod color;
pub mod geometry;
pub mod ids;
pub mod scaled;

pub use area::{Area, AreaRef, XYArea};
pub use bbox::BoundingBox;
pub use color::RgbColor;
pub use geometry::Rectangle;
pub use ids::{ElementId, ElementIdGenerator};
pub use scaled::{Fixed, SCALED_PRECISION, Scaled};
