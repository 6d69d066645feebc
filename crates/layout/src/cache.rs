use mathtab_traits::AreaFactory;
use mathtab_types::{AreaRef, RgbColor, Scaled};
use std::collections::HashMap;
use std::sync::Arc;

/// Orientation of a rule area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleOrientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub orientation: RuleOrientation,
    pub thickness: Scaled,
    pub length: Scaled,
    pub color: RgbColor,
}

/// Shares identical rule areas between the cells of one table.
///
/// Tables with many ruled cells of the same size emit the same line over and
/// over; the cache hands out one `AreaRef` per distinct rule.
#[derive(Debug, Default)]
pub struct AreaCache {
    rules: HashMap<RuleKey, AreaRef>,
    capacity: usize,
}

impl AreaCache {
    pub fn new(capacity: usize) -> Self {
        Self { rules: HashMap::new(), capacity }
    }

    /// Returns the cached area for `key`, or builds it with `factory`.
    /// The flag is true on a cache hit.
    pub fn rule(&mut self, factory: &dyn AreaFactory, key: RuleKey) -> (AreaRef, bool) {
        if let Some(area) = self.rules.get(&key) {
            return (Arc::clone(area), true);
        }
        if self.rules.len() >= self.capacity {
            self.prune();
        }
        let area = match key.orientation {
            RuleOrientation::Horizontal => factory.fixed_horizontal_line(key.thickness, key.length, key.color),
            RuleOrientation::Vertical => factory.fixed_vertical_line(key.thickness, key.length, key.color),
        };
        if self.capacity > 0 {
            self.rules.insert(key, Arc::clone(&area));
        }
        (area, false)
    }

    /// Drops the entries no emitted layout holds on to anymore; clears the
    /// whole cache if every entry is still referenced.
    fn prune(&mut self) {
        let before = self.rules.len();
        self.rules.retain(|_, area| Arc::strong_count(area) > 1);
        if self.rules.len() >= self.capacity {
            self.rules.clear();
        }
        log::trace!("rule cache pruned from {} to {} entries", before, self.rules.len());
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
