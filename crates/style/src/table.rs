use crate::length::Length;
use serde::{Deserialize, Serialize};

/// Sizing policy requested for a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    #[default]
    Auto,
    Fit,
    Length(Length),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    None,
    Solid,
    Dashed,
}

impl LineStyle {
    pub fn is_visible(self) -> bool {
        self != LineStyle::None
    }
}

/// Where row labels go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    #[default]
    Right,
    LeftOverlap,
    RightOverlap,
}

impl Side {
    pub fn is_left(self) -> bool {
        matches!(self, Side::Left | Side::LeftOverlap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RowAlign {
    #[default]
    Baseline,
    Top,
    Bottom,
    Center,
    Axis,
}

/// Vertical alignment of the whole table, optionally pivoting on a row.
///
/// `row` is 1-based; negative values count from the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableAlign {
    pub align: RowAlign,
    pub row: Option<i32>,
}

impl Default for TableAlign {
    fn default() -> Self {
        Self { align: RowAlign::Axis, row: None }
    }
}

impl TableAlign {
    pub fn new(align: RowAlign) -> Self {
        Self { align, row: None }
    }

    pub fn at_row(align: RowAlign, row: i32) -> Self {
        Self { align, row: Some(row) }
    }
}
