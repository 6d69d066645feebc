//! Non-owning handles to externally owned content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a pre-measured element in the caller's document tree.
///
/// The layout engine never owns or dereferences the element; it only hands
/// the id back inside the produced areas so the caller can map geometry to
/// its own nodes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u32);

impl ElementId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl From<u32> for ElementId {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out sequential [`ElementId`]s.
#[derive(Debug, Default, Clone)]
pub struct ElementIdGenerator {
    next: u32,
}

impl ElementIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_is_sequential() {
        let mut ids = ElementIdGenerator::new();
        assert_eq!(ids.next_id(), ElementId::new(0));
        assert_eq!(ids.next_id(), ElementId::new(1));
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_hash_map_usage() {
        use std::collections::HashMap;

        let mut names = HashMap::new();
        names.insert(ElementId::new(7), "x");
        assert_eq!(names.get(&ElementId::from(7)), Some(&"x"));
        assert_eq!(ElementId::new(7).to_string(), "#7");
    }
}
