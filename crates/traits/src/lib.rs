pub mod context;
pub mod device;
pub mod factory;
pub mod property;
pub mod scoped;

pub use context::{ContextError, FormattingContext};
pub use device::{DeviceConfig, GraphicDevice, StandardDevice};
pub use factory::{AreaFactory, StandardAreaFactory};
pub use property::{PropertyId, PropertyType, PropertyValue};
pub use scoped::ScopedMap;
