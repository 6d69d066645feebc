use std::slice;

/// A non-empty list of attribute values.
///
/// Indexing past the end repeats the last value, so `"1ex 2ex"` applied to
/// five rows yields `1ex, 2ex, 2ex, 2ex, 2ex`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueList<T>(Vec<T>);

impl<T> ValueList<T> {
    /// Returns `None` when `values` is empty.
    pub fn new(values: Vec<T>) -> Option<Self> {
        if values.is_empty() { None } else { Some(Self(values)) }
    }

    pub fn single(value: T) -> Self {
        Self(vec![value])
    }

    pub fn component(&self, index: usize) -> &T {
        let last = self.0.len() - 1;
        &self.0[index.min(last)]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: Default> Default for ValueList<T> {
    fn default() -> Self {
        Self::single(T::default())
    }
}

impl<T> From<T> for ValueList<T> {
    fn from(value: T) -> Self {
        Self::single(value)
    }
}

impl<'a, T> IntoIterator for &'a ValueList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_repeats_last() {
        let list = ValueList::new(vec![1, 2]).unwrap();
        assert_eq!(*list.component(0), 1);
        assert_eq!(*list.component(1), 2);
        assert_eq!(*list.component(7), 2);
    }

    #[test]
    fn test_empty_is_rejected() {
        assert!(ValueList::<u8>::new(Vec::new()).is_none());
        assert_eq!(ValueList::<u8>::default().len(), 1);
    }
}
