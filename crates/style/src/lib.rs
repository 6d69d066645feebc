pub mod length;
pub mod parsers;
pub mod table;
pub mod values;
pub mod variant;

pub use length::{Length, NamedSpace, Unit};
pub use parsers::StyleParseError;
pub use table::{ColumnAlign, ColumnWidth, LineStyle, RowAlign, Side, TableAlign};
pub use values::ValueList;
pub use variant::MathVariant;
