//! Layout of MathML `mtable` grids: pre-measured cells with spans, row
//! labels, spacing, frames and rules, sized in exact fixed-point units.
//!
//! The work is split across the workspace crates, re-exported here:
//! `mathtab-types` (fixed-point values, boxes, areas), `mathtab-style`
//! (lengths and table attributes), `mathtab-traits` (formatting context and
//! device) and `mathtab-layout` (the table formatter). [`TableDocument`]
//! describes a whole table as JSON for the command line and tests.

pub mod document;
pub mod error;

pub use document::{CellDocument, LayoutReport, RowDocument, TableDocument, layout_document};
pub use error::MathtabError;

pub use mathtab_layout::{
    AreaCache, CellContent, ColumnGeometry, DebugProfiler, LayoutConfig, LayoutError, NoOpProfiler,
    PlacedCell, Profiler, RowGeometry, Stage, TableCell, TableFormatter, TableLayout, TableSpec,
    TrackKind,
};
pub use mathtab_style::{
    ColumnAlign, ColumnWidth, Length, LineStyle, NamedSpace, RowAlign, Side, StyleParseError,
    TableAlign, Unit, ValueList,
};
pub use mathtab_traits::{
    AreaFactory, DeviceConfig, FormattingContext, GraphicDevice, StandardAreaFactory,
    StandardDevice,
};
pub use mathtab_types::{
    Area, AreaRef, BoundingBox, ElementId, ElementIdGenerator, RgbColor, Scaled, XYArea,
};
