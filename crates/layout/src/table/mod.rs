mod align;
mod formatter;
pub mod grid;
mod heights;
mod rules;
mod solver;
pub mod spec;
mod widths;

pub use formatter::{ColumnGeometry, PlacedCell, RowGeometry, TableFormatter, TableLayout};
pub use grid::{Column, ColumnSpec, Grid, GridCell, Row, RowSpec, TrackKind};
pub use spec::{CellContent, TableCell, TableSpec};
