use crate::scaled::Scaled;
use serde::{Deserialize, Serialize};

/// The extent of a box around its baseline.
///
/// `height` is the ascent above the baseline and `depth` the descent below
/// it; both are normally non-negative, but the algebra does not require it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub width: Scaled,
    pub height: Scaled,
    pub depth: Scaled,
}

impl BoundingBox {
    pub const fn new(width: Scaled, height: Scaled, depth: Scaled) -> Self {
        Self { width, height, depth }
    }

    pub const fn zero() -> Self {
        Self::new(Scaled::ZERO, Scaled::ZERO, Scaled::ZERO)
    }

    pub fn set(&mut self, height: Scaled, depth: Scaled, width: Scaled) {
        self.height = height;
        self.depth = depth;
        self.width = width;
    }

    pub fn vertical_extent(&self) -> Scaled {
        self.height + self.depth
    }

    pub fn is_null(&self) -> bool {
        self.width == Scaled::ZERO && self.height == Scaled::ZERO && self.depth == Scaled::ZERO
    }

    /// Places `other` to the right of `self` on a shared baseline.
    pub fn append(&mut self, other: &BoundingBox) {
        self.width += other.width;
        self.height = self.height.max(other.height);
        self.depth = self.depth.max(other.depth);
    }

    /// Smallest box enclosing both boxes drawn at the same origin.
    pub fn join(&mut self, other: &BoundingBox) {
        self.width = self.width.max(other.width);
        self.height = self.height.max(other.height);
        self.depth = self.depth.max(other.depth);
    }

    #[must_use]
    pub fn appended(mut self, other: &BoundingBox) -> Self {
        self.append(other);
        self
    }
}
