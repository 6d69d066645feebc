use mathtab_traits::ContextError;
use std::fmt;
use thiserror::Error;

/// The two axes a table is sized along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        })
    }
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Scale fractions on the {axis} axis sum to {sum:.3}, leaving no room for the remaining tracks.")]
    DegenerateScale { axis: Axis, sum: f32 },
    #[error("The {axis} table extent does not fit in a fixed-point length.")]
    ExtentOverflow { axis: Axis },
    #[error("Formatting context error: {0}")]
    Context(#[from] ContextError),
}

pub mod cache;
pub mod config;
pub mod perf;
pub mod table;

pub use self::cache::AreaCache;
pub use self::config::LayoutConfig;
pub use self::perf::{DebugProfiler, NoOpProfiler, Profiler, Stage};
pub use self::table::{
    CellContent, ColumnGeometry, PlacedCell, RowGeometry, TableCell, TableFormatter, TableLayout,
    TableSpec, TrackKind,
};

#[cfg(test)]
mod test_utils;
