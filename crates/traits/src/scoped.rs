//! A stack of override maps with lookup through enclosing scopes.

use std::collections::HashMap;
use std::hash::Hash;

/// Layered key/value store.
///
/// The bottom layer is the root scope and is always present. `get` returns
/// the value from the innermost scope that sets the key; `pop` drops the
/// innermost scope together with everything written into it.
#[derive(Debug, Clone)]
pub struct ScopedMap<K, V> {
    scopes: Vec<HashMap<K, V>>,
}

impl<K: Eq + Hash, V> Default for ScopedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> ScopedMap<K, V> {
    pub fn new() -> Self {
        Self { scopes: vec![HashMap::new()] }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Discards the innermost scope.
    ///
    /// # Panics
    ///
    /// Panics when only the root scope is left.
    pub fn pop(&mut self) -> HashMap<K, V> {
        assert!(self.scopes.len() > 1, "cannot pop the root scope");
        self.scopes.pop().unwrap_or_default()
    }

    /// Writes into the innermost scope, returning the value it shadowed there.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.current_mut().insert(key, value)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.scopes.iter().rev().find_map(|scope| scope.get(key))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// True when the innermost scope itself sets `key`.
    pub fn is_local(&self, key: &K) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains_key(key))
    }

    /// Number of scopes, the root included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn current_mut(&mut self) -> &mut HashMap<K, V> {
        if self.scopes.is_empty() {
            self.scopes.push(HashMap::new());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_scope_shadows_and_pop_restores() {
        let mut map = ScopedMap::new();
        map.set("a", 1);
        map.push();
        assert_eq!(map.get(&"a"), Some(&1));
        assert!(!map.is_local(&"a"));
        map.set("a", 2);
        map.set("b", 3);
        assert_eq!(map.get(&"a"), Some(&2));
        map.pop();
        assert_eq!(map.get(&"a"), Some(&1));
        assert_eq!(map.get(&"b"), None);
        assert_eq!(map.depth(), 1);
    }

    #[test]
    fn test_set_in_same_scope_overwrites() {
        let mut map = ScopedMap::new();
        assert_eq!(map.set(1, 'x'), None);
        assert_eq!(map.set(1, 'y'), Some('x'));
        assert_eq!(map.get(&1), Some(&'y'));
    }

    #[test]
    #[should_panic(expected = "root scope")]
    fn test_popping_root_panics() {
        let mut map: ScopedMap<u8, u8> = ScopedMap::new();
        map.pop();
    }
}
