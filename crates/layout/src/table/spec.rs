//! The logical description of a table, as handed over by the caller.

use mathtab_style::{
    ColumnAlign, ColumnWidth, Length, LineStyle, RowAlign, Side, TableAlign, ValueList,
};
use mathtab_types::{AreaRef, BoundingBox, ElementId};

/// A pre-measured element placed in a cell.
///
/// The table never owns the element: `element` is a handle into the
/// caller's tree and `area` is the box the caller already formatted for it.
#[derive(Debug, Clone)]
pub struct CellContent {
    pub element: ElementId,
    pub area: AreaRef,
}

impl CellContent {
    pub fn new(element: ElementId, area: AreaRef) -> Self {
        Self { element, area }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.area.bounding_box()
    }
}

#[derive(Debug, Clone)]
pub struct TableCell {
    pub content: CellContent,
    pub row_span: usize,
    pub column_span: usize,
    pub column_align: ColumnAlign,
    pub row_align: RowAlign,
}

impl TableCell {
    pub fn new(element: ElementId, area: AreaRef) -> Self {
        Self {
            content: CellContent::new(element, area),
            row_span: 1,
            column_span: 1,
            column_align: ColumnAlign::default(),
            row_align: RowAlign::default(),
        }
    }

    pub fn with_spans(mut self, row_span: usize, column_span: usize) -> Self {
        self.row_span = row_span;
        self.column_span = column_span;
        self
    }

    pub fn with_column_align(mut self, align: ColumnAlign) -> Self {
        self.column_align = align;
        self
    }

    pub fn with_row_align(mut self, align: RowAlign) -> Self {
        self.row_align = align;
        self
    }
}

/// Everything `TableFormatter::init` needs to build the grid.
///
/// Cells are stored row-major; `None` is an empty cell. Defaults follow the
/// MathML `mtable` attribute defaults.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Option<TableCell>>,
    pub labels: Vec<Option<TableCell>>,
    pub column_widths: ValueList<ColumnWidth>,
    pub row_spacing: ValueList<Length>,
    pub column_spacing: ValueList<Length>,
    pub frame: LineStyle,
    pub frame_spacing: ValueList<Length>,
    pub equal_rows: bool,
    pub equal_columns: bool,
    pub side: Side,
    pub min_label_spacing: Length,
    pub align: TableAlign,
    pub row_lines: ValueList<LineStyle>,
    pub column_lines: ValueList<LineStyle>,
}

impl TableSpec {
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(rows: usize, columns: usize) -> Self {
        assert!(rows > 0 && columns > 0, "table must have at least one row and one column, got {}x{}", rows, columns);
        let frame_spacing = ValueList::new(vec![Length::em(0.4), Length::ex(0.5)])
            .unwrap_or_else(|| ValueList::single(Length::em(0.4)));
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
            labels: vec![None; rows],
            column_widths: ValueList::single(ColumnWidth::Auto),
            row_spacing: ValueList::single(Length::ex(1.0)),
            column_spacing: ValueList::single(Length::em(0.8)),
            frame: LineStyle::None,
            frame_spacing,
            equal_rows: false,
            equal_columns: false,
            side: Side::Right,
            min_label_spacing: Length::em(0.8),
            align: TableAlign::default(),
            row_lines: ValueList::single(LineStyle::None),
            column_lines: ValueList::single(LineStyle::None),
        }
    }

    /// # Panics
    ///
    /// Panics if `(row, column)` is outside the table.
    pub fn set_cell(&mut self, row: usize, column: usize, cell: TableCell) -> &mut Self {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({}, {}) outside a {}x{} table",
            row,
            column,
            self.rows,
            self.columns
        );
        self.cells[row * self.columns + column] = Some(cell);
        self
    }

    /// # Panics
    ///
    /// Panics if `row` is outside the table.
    pub fn set_label(&mut self, row: usize, label: TableCell) -> &mut Self {
        assert!(row < self.rows, "label row {} outside a table of {} rows", row, self.rows);
        self.labels[row] = Some(label);
        self
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.cells.get(row * self.columns + column).and_then(Option::as_ref)
    }

    pub fn has_labels(&self) -> bool {
        self.labels.iter().any(Option::is_some)
    }

    pub fn with_column_widths(mut self, widths: ValueList<ColumnWidth>) -> Self {
        self.column_widths = widths;
        self
    }

    pub fn with_row_spacing(mut self, spacing: ValueList<Length>) -> Self {
        self.row_spacing = spacing;
        self
    }

    pub fn with_column_spacing(mut self, spacing: ValueList<Length>) -> Self {
        self.column_spacing = spacing;
        self
    }

    pub fn with_frame(mut self, frame: LineStyle) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_frame_spacing(mut self, spacing: ValueList<Length>) -> Self {
        self.frame_spacing = spacing;
        self
    }

    pub fn with_equal_rows(mut self, equal: bool) -> Self {
        self.equal_rows = equal;
        self
    }

    pub fn with_equal_columns(mut self, equal: bool) -> Self {
        self.equal_columns = equal;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_min_label_spacing(mut self, spacing: Length) -> Self {
        self.min_label_spacing = spacing;
        self
    }

    pub fn with_align(mut self, align: TableAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_row_lines(mut self, lines: ValueList<LineStyle>) -> Self {
        self.row_lines = lines;
        self
    }

    pub fn with_column_lines(mut self, lines: ValueList<LineStyle>) -> Self {
        self.column_lines = lines;
        self
    }

    /// Checks the structural preconditions of the grid.
    ///
    /// # Panics
    ///
    /// Panics on a cell list of the wrong length, a zero or out-of-bounds
    /// span, two cells covering the same position, or a label spanning more
    /// than one row or column.
    pub fn validate(&self) {
        assert!(self.rows > 0 && self.columns > 0, "table must have at least one row and one column");
        assert_eq!(
            self.cells.len(),
            self.rows * self.columns,
            "expected {} cells for a {}x{} table",
            self.rows * self.columns,
            self.rows,
            self.columns
        );
        assert_eq!(self.labels.len(), self.rows, "expected one label slot per row");

        let mut covered = vec![false; self.rows * self.columns];
        for i in 0..self.rows {
            for j in 0..self.columns {
                let Some(cell) = self.cell(i, j) else { continue };
                assert!(
                    cell.row_span >= 1 && cell.column_span >= 1,
                    "cell ({}, {}) has an empty span",
                    i,
                    j
                );
                assert!(
                    i + cell.row_span <= self.rows && j + cell.column_span <= self.columns,
                    "cell ({}, {}) spanning {}x{} exceeds the {}x{} table",
                    i,
                    j,
                    cell.row_span,
                    cell.column_span,
                    self.rows,
                    self.columns
                );
                for si in i..i + cell.row_span {
                    for sj in j..j + cell.column_span {
                        let slot = &mut covered[si * self.columns + sj];
                        assert!(!*slot, "cell ({}, {}) overlaps position ({}, {})", i, j, si, sj);
                        *slot = true;
                    }
                }
            }
        }
        for (i, label) in self.labels.iter().enumerate() {
            if let Some(label) = label {
                assert!(
                    label.row_span == 1 && label.column_span == 1,
                    "label of row {} must not span",
                    i
                );
            }
        }
    }
}
