//! Length specifications as written in table attributes.
//!
//! A [`Length`] is unresolved: relative units and named spaces only become a
//! concrete scaled length once a graphic device evaluates
//! them against the current formatting context.
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// A bare number: a multiple of the default value.
    None,
    Em,
    Ex,
    Px,
    In,
    Cm,
    Mm,
    Pt,
    Pc,
    Percentage,
}

impl Unit {
    pub fn is_relative(self) -> bool {
        matches!(self, Unit::None | Unit::Percentage)
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Unit::None => "",
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Px => "px",
            Unit::In => "in",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Pt => "pt",
            Unit::Pc => "pc",
            Unit::Percentage => "%",
        }
    }
}

/// The seven MathML named spaces, thinnest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedSpace {
    VeryVeryThin,
    VeryThin,
    Thin,
    Medium,
    Thick,
    VeryThick,
    VeryVeryThick,
}

impl NamedSpace {
    pub const ALL: [NamedSpace; 7] = [
        NamedSpace::VeryVeryThin,
        NamedSpace::VeryThin,
        NamedSpace::Thin,
        NamedSpace::Medium,
        NamedSpace::Thick,
        NamedSpace::VeryThick,
        NamedSpace::VeryVeryThick,
    ];

    /// Default size in eighteenths of an em.
    pub fn eighteenths(self) -> i32 {
        self as i32 + 1
    }

    pub fn default_em(self) -> f32 {
        self.eighteenths() as f32 / 18.0
    }

    pub fn keyword(self) -> &'static str {
        match self {
            NamedSpace::VeryVeryThin => "veryverythinmathspace",
            NamedSpace::VeryThin => "verythinmathspace",
            NamedSpace::Thin => "thinmathspace",
            NamedSpace::Medium => "mediummathspace",
            NamedSpace::Thick => "thickmathspace",
            NamedSpace::VeryThick => "verythickmathspace",
            NamedSpace::VeryVeryThick => "veryverythickmathspace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Length {
    Value { value: f32, unit: Unit },
    Space { space: NamedSpace, negative: bool },
}

impl Hash for Length {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Length::Value { value, unit } => {
                0u8.hash(state);
                value.to_bits().hash(state);
                unit.hash(state);
            }
            Length::Space { space, negative } => {
                1u8.hash(state);
                space.hash(state);
                negative.hash(state);
            }
        }
    }
}

impl Eq for Length {}

impl Default for Length {
    fn default() -> Self {
        Length::Value { value: 0.0, unit: Unit::Px }
    }
}

impl Length {
    pub const fn new(value: f32, unit: Unit) -> Self {
        Length::Value { value, unit }
    }

    pub const fn em(value: f32) -> Self {
        Self::new(value, Unit::Em)
    }

    pub const fn ex(value: f32) -> Self {
        Self::new(value, Unit::Ex)
    }

    pub const fn px(value: f32) -> Self {
        Self::new(value, Unit::Px)
    }

    pub const fn pt(value: f32) -> Self {
        Self::new(value, Unit::Pt)
    }

    pub const fn percent(value: f32) -> Self {
        Self::new(value, Unit::Percentage)
    }

    pub const fn space(space: NamedSpace) -> Self {
        Length::Space { space, negative: false }
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self, Length::Value { unit: Unit::Percentage, .. })
    }

    /// Percentages as a fraction of the whole, `None` for anything else.
    pub fn as_fraction(&self) -> Option<f32> {
        match self {
            Length::Value { value, unit: Unit::Percentage } => Some(value / 100.0),
            _ => None,
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Length::Value { value, unit } => write!(f, "{}{}", value, unit.suffix()),
            Length::Space { space, negative } => {
                if *negative {
                    write!(f, "negative")?;
                }
                write!(f, "{}", space.keyword())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_space_defaults() {
        assert_eq!(NamedSpace::VeryVeryThin.default_em(), 1.0 / 18.0);
        assert_eq!(NamedSpace::Medium.default_em(), 4.0 / 18.0);
        assert_eq!(NamedSpace::VeryVeryThick.default_em(), 7.0 / 18.0);
    }

    #[test]
    fn test_fraction_only_for_percentages() {
        assert_eq!(Length::percent(25.0).as_fraction(), Some(0.25));
        assert_eq!(Length::em(25.0).as_fraction(), None);
        assert!(Length::percent(1.0).is_percentage());
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::ex(1.5).to_string(), "1.5ex");
        assert_eq!(Length::percent(50.0).to_string(), "50%");
        let neg = Length::Space { space: NamedSpace::Thin, negative: true };
        assert_eq!(neg.to_string(), "negativethinmathspace");
    }
}
