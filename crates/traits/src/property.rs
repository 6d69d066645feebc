//! Property identifiers and the tagged values stored under them.

use mathtab_style::{Length, MathVariant, NamedSpace};
use mathtab_types::{ElementId, RgbColor, Scaled};
use std::fmt;

/// The closed set of properties carried by a formatting context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    MathMode,
    Size,
    ActualSize,
    Variant,
    Color,
    BackgroundColor,
    ScriptLevel,
    MinSize,
    DisplayStyle,
    SizeMultiplier,
    Element,
    AvailableWidth,
    StretchOperator,
    StretchToWidth,
    StretchToHeight,
    StretchToDepth,
    StretchHorizontal,
    StretchVertical,
    MathSpace(NamedSpace),
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::MathSpace(space) => write!(f, "{}", space.keyword()),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Length(Length),
    Scaled(Scaled),
    Color(RgbColor),
    Variant(MathVariant),
    Element(ElementId),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Bool(_) => bool::NAME,
            PropertyValue::Int(_) => i32::NAME,
            PropertyValue::Float(_) => f32::NAME,
            PropertyValue::Length(_) => Length::NAME,
            PropertyValue::Scaled(_) => Scaled::NAME,
            PropertyValue::Color(_) => RgbColor::NAME,
            PropertyValue::Variant(_) => MathVariant::NAME,
            PropertyValue::Element(_) => ElementId::NAME,
        }
    }
}

/// A Rust type that can be stored in a [`PropertyValue`].
pub trait PropertyType: Sized + Copy {
    const NAME: &'static str;

    fn wrap(self) -> PropertyValue;

    /// Returns `None` when `value` holds a different type.
    fn unwrap(value: &PropertyValue) -> Option<Self>;
}

macro_rules! property_type {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl PropertyType for $ty {
                const NAME: &'static str = $name;

                fn wrap(self) -> PropertyValue {
                    PropertyValue::$variant(self)
                }

                fn unwrap(value: &PropertyValue) -> Option<Self> {
                    match value {
                        PropertyValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

property_type! {
    bool => Bool, "bool";
    i32 => Int, "int";
    f32 => Float, "float";
    Length => Length, "length";
    Scaled => Scaled, "scaled";
    RgbColor => Color, "color";
    MathVariant => Variant, "variant";
    ElementId => Element, "element";
}
