//! The formatting context: a scoped, typed property stack.
//!
//! Layout code threads ambient parameters (font size, script level,
//! available width, stretch targets) through nested calls by pushing a scope,
//! setting what changes, and popping on the way out. A lookup always sees
//! the innermost value still in scope.

use crate::property::{PropertyId, PropertyType, PropertyValue};
use crate::scoped::ScopedMap;
use log::trace;
use mathtab_style::{MathVariant, NamedSpace};
use mathtab_types::{ElementId, RgbColor, Scaled};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContextError {
    #[error("Property {id} holds a {found}, requested as {expected}")]
    TypeMismatch {
        id: PropertyId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Property {0} is not set in any enclosing scope")]
    Unset(PropertyId),
}

/// Default multiplier applied to the size per script level.
pub const DEFAULT_SIZE_MULTIPLIER: f32 = 0.71;
/// Default lower bound for sizes reached through script levels.
pub const DEFAULT_MIN_SIZE: i32 = 8;

#[derive(Debug, Clone)]
pub struct FormattingContext {
    map: ScopedMap<PropertyId, PropertyValue>,
}

impl FormattingContext {
    /// Creates a context whose root scope is seeded with defaults derived
    /// from the base font `size`.
    pub fn new(size: Scaled) -> Self {
        let mut ctx = Self { map: ScopedMap::new() };
        ctx.set(PropertyId::MathMode, false);
        ctx.set(PropertyId::Size, size);
        ctx.set(PropertyId::ActualSize, size);
        ctx.set(PropertyId::Variant, MathVariant::Normal);
        ctx.set(PropertyId::Color, RgbColor::BLACK);
        ctx.set(PropertyId::BackgroundColor, RgbColor::WHITE);
        ctx.set(PropertyId::ScriptLevel, 0i32);
        ctx.set(PropertyId::MinSize, Scaled::from_int(DEFAULT_MIN_SIZE));
        ctx.set(PropertyId::DisplayStyle, false);
        ctx.set(PropertyId::SizeMultiplier, DEFAULT_SIZE_MULTIPLIER);
        ctx.set(PropertyId::AvailableWidth, Scaled::ZERO);
        for space in NamedSpace::ALL {
            ctx.set(PropertyId::MathSpace(space), size * space.eighteenths() / 18);
        }
        ctx
    }

    pub fn push(&mut self) {
        self.map.push();
        trace!("formatting context push, depth {}", self.map.depth());
    }

    /// Drops the innermost scope.
    ///
    /// # Panics
    ///
    /// Panics when called on the root scope.
    pub fn pop(&mut self) {
        self.map.pop();
        trace!("formatting context pop, depth {}", self.map.depth());
    }

    /// Opens a scope bound to `element`.
    pub fn push_element(&mut self, element: ElementId) {
        self.push();
        self.set(PropertyId::Element, element);
    }

    /// Runs `f` inside its own scope.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push();
        let result = f(self);
        self.pop();
        result
    }

    pub fn depth(&self) -> usize {
        self.map.depth()
    }

    pub fn set<T: PropertyType>(&mut self, id: PropertyId, value: T) {
        self.map.set(id, value.wrap());
    }

    pub fn set_value(&mut self, id: PropertyId, value: PropertyValue) {
        self.map.set(id, value);
    }

    pub fn value(&self, id: PropertyId) -> Option<&PropertyValue> {
        self.map.get(&id)
    }

    pub fn is_set(&self, id: PropertyId) -> bool {
        self.map.contains(&id)
    }

    /// Typed lookup; a missing property is `Ok(None)`.
    pub fn lookup<T: PropertyType>(&self, id: PropertyId) -> Result<Option<T>, ContextError> {
        match self.map.get(&id) {
            None => Ok(None),
            Some(value) => T::unwrap(value).map(Some).ok_or(ContextError::TypeMismatch {
                id,
                expected: T::NAME,
                found: value.type_name(),
            }),
        }
    }

    pub fn get<T: PropertyType>(&self, id: PropertyId) -> Result<T, ContextError> {
        self.lookup(id)?.ok_or(ContextError::Unset(id))
    }

    pub fn size(&self) -> Result<Scaled, ContextError> {
        self.get(PropertyId::Size)
    }

    /// Element bound by the innermost [`push_element`](Self::push_element),
    /// if any.
    pub fn element(&self) -> Result<Option<ElementId>, ContextError> {
        self.lookup(PropertyId::Element)
    }

    /// Moves `delta` script levels, rescaling the size by the size
    /// multiplier. Shrinking never goes below the minimum size.
    pub fn add_script_level(&mut self, delta: i32) -> Result<(), ContextError> {
        if delta == 0 {
            return Ok(());
        }
        let level: i32 = self.get(PropertyId::ScriptLevel)?;
        let multiplier: f32 = self.get(PropertyId::SizeMultiplier)?;
        let size = self.size()?;
        let mut new_size = size * multiplier.powi(delta);
        if delta > 0 {
            let min: Scaled = self.get(PropertyId::MinSize)?;
            new_size = new_size.max(min.min(size));
        }
        trace!("script level {} -> {}, size {} -> {}", level, level + delta, size, new_size);
        self.set(PropertyId::ScriptLevel, level + delta);
        self.set(PropertyId::Size, new_size);
        self.set(PropertyId::ActualSize, new_size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx() -> FormattingContext {
        FormattingContext::new(Scaled::from_int(18))
    }

    #[test]
    fn test_root_defaults() {
        let ctx = ctx();
        assert_eq!(ctx.size().unwrap(), Scaled::from_int(18));
        assert_eq!(ctx.get::<i32>(PropertyId::ScriptLevel).unwrap(), 0);
        assert_eq!(
            ctx.get::<Scaled>(PropertyId::MathSpace(NamedSpace::Medium)).unwrap(),
            Scaled::from_int(4)
        );
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.element(), Ok(None));
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let ctx = ctx();
        let err = ctx.get::<bool>(PropertyId::Size).unwrap_err();
        assert_eq!(
            err,
            ContextError::TypeMismatch {
                id: PropertyId::Size,
                expected: "bool",
                found: "scaled"
            }
        );
        assert!(err.to_string().contains("Size"));
    }

    #[test]
    fn test_unset_property() {
        let ctx = ctx();
        assert_eq!(
            ctx.get::<Scaled>(PropertyId::StretchToWidth),
            Err(ContextError::Unset(PropertyId::StretchToWidth))
        );
        assert_eq!(ctx.lookup::<Scaled>(PropertyId::StretchToWidth), Ok(None));
    }

    #[test]
    fn test_push_element_and_scoped() {
        let mut ctx = ctx();
        ctx.push_element(ElementId::new(4));
        assert_eq!(ctx.element(), Ok(Some(ElementId::new(4))));
        let inner = ctx.scoped(|ctx| {
            ctx.set(PropertyId::AvailableWidth, Scaled::from_int(100));
            ctx.depth()
        });
        assert_eq!(inner, 3);
        assert_eq!(ctx.get::<Scaled>(PropertyId::AvailableWidth).unwrap(), Scaled::ZERO);
        ctx.pop();
        assert_eq!(ctx.element(), Ok(None));
    }

    #[test]
    fn test_element_of_wrong_type_is_reported() {
        let mut ctx = ctx();
        ctx.push();
        ctx.set(PropertyId::Element, 4i32);
        assert!(matches!(
            ctx.element(),
            Err(ContextError::TypeMismatch { id: PropertyId::Element, found: "int", .. })
        ));
    }

    #[test]
    fn test_script_level_rescales_and_clamps() {
        let mut ctx = ctx();
        ctx.push();
        ctx.add_script_level(1).unwrap();
        assert_eq!(ctx.get::<i32>(PropertyId::ScriptLevel).unwrap(), 1);
        assert_eq!(ctx.size().unwrap(), Scaled::from_int(18) * 0.71f32);

        ctx.add_script_level(5).unwrap();
        assert_eq!(ctx.size().unwrap(), Scaled::from_int(DEFAULT_MIN_SIZE));
        ctx.pop();
        assert_eq!(ctx.size().unwrap(), Scaled::from_int(18));
    }

    #[test]
    #[should_panic(expected = "root scope")]
    fn test_root_cannot_be_popped() {
        ctx().pop();
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push,
        Pop,
        Set(usize, i32),
    }

    const IDS: [PropertyId; 4] = [
        PropertyId::ScriptLevel,
        PropertyId::Size,
        PropertyId::StretchToWidth,
        PropertyId::DisplayStyle,
    ];

    fn snapshot(ctx: &FormattingContext) -> Vec<Option<PropertyValue>> {
        IDS.iter().map(|id| ctx.value(*id).copied()).collect()
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Push),
            Just(Op::Pop),
            (0..IDS.len(), -50i32..50).prop_map(|(i, v)| Op::Set(i, v)),
        ]
    }

    proptest! {
        #[test]
        fn pop_restores_the_state_seen_before_push(ops in prop::collection::vec(op(), 0..64)) {
            let mut ctx = ctx();
            let mut saved = Vec::new();
            for op in ops {
                match op {
                    Op::Push => {
                        saved.push(snapshot(&ctx));
                        ctx.push();
                    }
                    Op::Pop => {
                        if let Some(before) = saved.pop() {
                            ctx.pop();
                            prop_assert_eq!(snapshot(&ctx), before);
                        }
                    }
                    Op::Set(i, v) => ctx.set_value(IDS[i], PropertyValue::Int(v)),
                }
            }
            prop_assert_eq!(ctx.depth(), saved.len() + 1);
        }
    }
}
