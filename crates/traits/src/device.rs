//! GraphicDevice trait for resolving lengths and font-derived metrics.
//!
//! The layout engine works purely in [`Scaled`] units. A device turns the
//! unresolved [`Length`] specifications found in attributes into concrete
//! values, using the ambient font size carried by the formatting context.

use crate::context::{ContextError, FormattingContext};
use crate::factory::{AreaFactory, StandardAreaFactory};
use crate::property::PropertyId;
use mathtab_style::{Length, Unit};
use mathtab_types::Scaled;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub trait GraphicDevice: Debug {
    /// Size of one em in the current context.
    fn em(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError>;

    /// Size of one ex in the current context.
    fn ex(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError>;

    /// Offset of the math axis above the baseline.
    fn axis(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError>;

    /// Thickness used for frame and rule lines.
    fn default_line_thickness(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError>;

    /// Device units per inch.
    fn pixels_per_inch(&self) -> f32;

    fn factory(&self) -> &dyn AreaFactory;

    /// Returns a human-readable name for this device (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Resolves a length specification.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Supplies the font size and named space sizes
    /// * `length` - The specification, or `None` when the attribute is absent
    /// * `default` - Returned for an absent length; also the base that
    ///   percentages and bare numbers multiply
    fn evaluate(
        &self,
        ctx: &FormattingContext,
        length: Option<&Length>,
        default: Scaled,
    ) -> Result<Scaled, ContextError> {
        let Some(length) = length else {
            return Ok(default);
        };
        let ppi = self.pixels_per_inch();
        match *length {
            Length::Space { space, negative } => {
                let value: Scaled = ctx.get(PropertyId::MathSpace(space))?;
                Ok(if negative { -value } else { value })
            }
            Length::Value { value, unit } => Ok(match unit {
                Unit::None => default * value,
                Unit::Percentage => default * (value / 100.0),
                Unit::Em => self.em(ctx)? * value,
                Unit::Ex => self.ex(ctx)? * value,
                Unit::Px => Scaled::from_f32(value),
                Unit::In => Scaled::from_f32(value * ppi),
                Unit::Cm => Scaled::from_f32(value * ppi / 2.54),
                Unit::Mm => Scaled::from_f32(value * ppi / 25.4),
                Unit::Pt => Scaled::from_f32(value * ppi / 72.0),
                Unit::Pc => Scaled::from_f32(value * ppi / 6.0),
            }),
        }
    }
}

fn default_x_height_ratio() -> f32 {
    0.5
}

fn default_axis_ratio() -> f32 {
    0.5
}

fn default_rule_thickness_ratio() -> f32 {
    1.0 / 18.0
}

fn default_min_line_thickness() -> Scaled {
    Scaled::ONE
}

fn default_pixels_per_inch() -> f32 {
    72.0
}

/// Font-derived ratios used by [`StandardDevice`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Height of an ex as a fraction of the em.
    #[serde(default = "default_x_height_ratio")]
    pub x_height_ratio: f32,
    /// Axis height as a fraction of the ex.
    #[serde(default = "default_axis_ratio")]
    pub axis_ratio: f32,
    /// Rule thickness as a fraction of the font size.
    #[serde(default = "default_rule_thickness_ratio")]
    pub rule_thickness_ratio: f32,
    #[serde(default = "default_min_line_thickness")]
    pub min_line_thickness: Scaled,
    #[serde(default = "default_pixels_per_inch")]
    pub pixels_per_inch: f32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            x_height_ratio: default_x_height_ratio(),
            axis_ratio: default_axis_ratio(),
            rule_thickness_ratio: default_rule_thickness_ratio(),
            min_line_thickness: default_min_line_thickness(),
            pixels_per_inch: default_pixels_per_inch(),
        }
    }
}

/// A device computing every metric from the context's font size alone.
#[derive(Debug, Default, Clone)]
pub struct StandardDevice {
    config: DeviceConfig,
    factory: StandardAreaFactory,
}

impl StandardDevice {
    pub fn new(config: DeviceConfig) -> Self {
        Self { config, factory: StandardAreaFactory }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }
}

impl GraphicDevice for StandardDevice {
    fn em(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError> {
        ctx.size()
    }

    fn ex(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError> {
        Ok(self.em(ctx)? * self.config.x_height_ratio)
    }

    fn axis(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError> {
        Ok(self.ex(ctx)? * self.config.axis_ratio)
    }

    fn default_line_thickness(&self, ctx: &FormattingContext) -> Result<Scaled, ContextError> {
        let thickness = ctx.size()? * self.config.rule_thickness_ratio;
        Ok(thickness.max(self.config.min_line_thickness))
    }

    fn pixels_per_inch(&self) -> f32 {
        self.config.pixels_per_inch
    }

    fn factory(&self) -> &dyn AreaFactory {
        &self.factory
    }

    fn name(&self) -> &'static str {
        "StandardDevice"
    }
}
