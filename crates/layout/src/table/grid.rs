//! The decorated grid: logical cells interleaved with spacing tracks, plus
//! optional frame and label tracks around them.
//!
//! A table of `n` logical columns becomes `2n - 1` grid columns (content,
//! spacing, content, ...). A frame adds one track on each side, labels add a
//! label track and a label spacing track on the label side. Rows follow the
//! same scheme without label tracks.

use super::spec::{TableCell, TableSpec};
use crate::LayoutError;
use log::debug;
use mathtab_style::{ColumnAlign, ColumnWidth, Length, LineStyle, RowAlign, ValueList};
use mathtab_traits::{FormattingContext, GraphicDevice};
use mathtab_types::{AreaRef, BoundingBox, ElementId, Scaled};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackKind {
    Frame,
    Content,
    Spacing,
    LabelSpacing,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnSpec {
    Auto,
    Fit,
    Fixed(Scaled),
    /// Fraction of the table width.
    Scale(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowSpec {
    Auto,
    Fixed(Scaled),
    /// Fraction of the table height plus depth.
    Scale(f32),
}

#[derive(Debug, Clone)]
pub struct Column {
    pub kind: TrackKind,
    pub spec: ColumnSpec,
    pub content_width: Scaled,
    pub temp_width: Scaled,
    pub width: Scaled,
    pub displacement: Scaled,
}

impl Column {
    fn new(kind: TrackKind, spec: ColumnSpec) -> Self {
        Self {
            kind,
            spec,
            content_width: Scaled::ZERO,
            temp_width: Scaled::ZERO,
            width: Scaled::ZERO,
            displacement: Scaled::ZERO,
        }
    }

    pub fn is_content(&self) -> bool {
        self.kind == TrackKind::Content
    }

    pub fn left(&self) -> Scaled {
        self.displacement
    }

    pub fn center(&self) -> Scaled {
        self.displacement + self.width / 2
    }

    pub fn right(&self) -> Scaled {
        self.displacement + self.width
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub kind: TrackKind,
    pub spec: RowSpec,
    pub temp_height: Scaled,
    pub temp_depth: Scaled,
    pub height: Scaled,
    pub depth: Scaled,
    /// Baseline of the row relative to the table baseline, growing upward.
    pub displacement: Scaled,
}

impl Row {
    fn new(kind: TrackKind, spec: RowSpec) -> Self {
        Self {
            kind,
            spec,
            temp_height: Scaled::ZERO,
            temp_depth: Scaled::ZERO,
            height: Scaled::ZERO,
            depth: Scaled::ZERO,
            displacement: Scaled::ZERO,
        }
    }

    pub fn is_content(&self) -> bool {
        self.kind == TrackKind::Content
    }

    pub fn temp_extent(&self) -> Scaled {
        self.temp_height + self.temp_depth
    }

    pub fn vertical_extent(&self) -> Scaled {
        self.height + self.depth
    }

    pub fn top(&self) -> Scaled {
        self.displacement + self.height
    }

    pub fn bottom(&self) -> Scaled {
        self.displacement - self.depth
    }

    pub fn center(&self) -> Scaled {
        (self.top() + self.bottom()) / 2
    }
}

/// A cell anchored at its top-left grid position.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub element: ElementId,
    pub area: AreaRef,
    pub bbox: BoundingBox,
    /// Logical position; the label of row `i` reports column `None`.
    pub row: usize,
    pub column: Option<usize>,
    pub row_span: usize,
    pub column_span: usize,
    /// Spans measured in grid tracks (`2s - 1`).
    pub grid_row_span: usize,
    pub grid_column_span: usize,
    pub column_align: ColumnAlign,
    pub row_align: RowAlign,
    pub dx: Scaled,
    pub dy: Scaled,
}

impl GridCell {
    fn new(cell: &TableCell, row: usize, column: Option<usize>) -> Self {
        Self {
            element: cell.content.element,
            area: cell.content.area.clone(),
            bbox: cell.content.bounding_box(),
            row,
            column,
            row_span: cell.row_span,
            column_span: cell.column_span,
            grid_row_span: 2 * cell.row_span - 1,
            grid_column_span: 2 * cell.column_span - 1,
            column_align: cell.column_align,
            row_align: cell.row_align,
            dx: Scaled::ZERO,
            dy: Scaled::ZERO,
        }
    }

    pub fn is_label(&self) -> bool {
        self.column.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct Grid {
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
    cells: Vec<Option<GridCell>>,
    pub n_rows: usize,
    pub n_columns: usize,
    pub content_row_offset: usize,
    pub content_column_offset: usize,
    pub label_column: Option<usize>,
    pub frame: LineStyle,
    pub row_lines: ValueList<LineStyle>,
    pub column_lines: ValueList<LineStyle>,
    pub bbox: BoundingBox,
}

/// A spacing or width attribute resolved for one track.
#[derive(Debug, Clone, Copy)]
enum TrackSize {
    Fixed(Scaled),
    Scale(f32),
}

impl TrackSize {
    /// Percentages become fractions of the table, anything else is
    /// evaluated to a fixed size.
    fn resolve(
        ctx: &FormattingContext,
        device: &dyn GraphicDevice,
        length: &Length,
    ) -> Result<Self, LayoutError> {
        Ok(match length.as_fraction() {
            Some(fraction) => TrackSize::Scale(fraction),
            None => TrackSize::Fixed(device.evaluate(ctx, Some(length), Scaled::ZERO)?),
        })
    }

    fn column(self) -> ColumnSpec {
        match self {
            TrackSize::Fixed(width) => ColumnSpec::Fixed(width),
            TrackSize::Scale(fraction) => ColumnSpec::Scale(fraction),
        }
    }

    fn row(self) -> RowSpec {
        match self {
            TrackSize::Fixed(height) => RowSpec::Fixed(height),
            TrackSize::Scale(fraction) => RowSpec::Scale(fraction),
        }
    }
}

impl Grid {
    /// Builds the decorated grid for `spec`, resolving every spacing and
    /// fixed width through `device`.
    ///
    /// # Panics
    ///
    /// Panics if `spec` violates a structural precondition (see
    /// [`TableSpec::validate`]).
    pub fn build(
        ctx: &FormattingContext,
        device: &dyn GraphicDevice,
        spec: &TableSpec,
    ) -> Result<Self, LayoutError> {
        spec.validate();

        let has_frame = spec.frame.is_visible();
        let has_labels = spec.has_labels();
        let frame = usize::from(has_frame);
        let labels_left = has_labels && spec.side.is_left();

        let n_grid_rows = 2 * frame + 2 * spec.rows - 1;
        let n_grid_columns = 2 * frame + 2 * usize::from(has_labels) + 2 * spec.columns - 1;
        let content_row_offset = frame;
        let content_column_offset = frame + if labels_left { 2 } else { 0 };
        let label_column = has_labels.then(|| {
            if labels_left { frame } else { frame + 2 * spec.columns }
        });

        debug!(
            "table {}x{} -> grid {}x{} (frame: {}, labels: {:?})",
            spec.rows, spec.columns, n_grid_rows, n_grid_columns, has_frame, label_column
        );

        let mut rows = vec![Row::new(TrackKind::Spacing, RowSpec::Fixed(Scaled::ZERO)); n_grid_rows];
        let mut columns =
            vec![Column::new(TrackKind::Spacing, ColumnSpec::Fixed(Scaled::ZERO)); n_grid_columns];

        if has_frame {
            let h_spacing = device.evaluate(ctx, Some(spec.frame_spacing.component(0)), Scaled::ZERO)?;
            let v_spacing = device.evaluate(ctx, Some(spec.frame_spacing.component(1)), Scaled::ZERO)?;
            rows[0] = Row::new(TrackKind::Frame, RowSpec::Fixed(v_spacing));
            rows[n_grid_rows - 1] = Row::new(TrackKind::Frame, RowSpec::Fixed(v_spacing));
            columns[0] = Column::new(TrackKind::Frame, ColumnSpec::Fixed(h_spacing));
            columns[n_grid_columns - 1] = Column::new(TrackKind::Frame, ColumnSpec::Fixed(h_spacing));
        }

        if let Some(label) = label_column {
            let spacing = TrackSize::resolve(ctx, device, &spec.min_label_spacing)?.column();
            let spacing_column = if labels_left { label + 1 } else { label - 1 };
            columns[label] = Column::new(TrackKind::Label, ColumnSpec::Fit);
            columns[spacing_column] = Column::new(TrackKind::LabelSpacing, spacing);
        }

        for j in 0..spec.columns {
            let jj = content_column_offset + 2 * j;
            let width_spec = if spec.equal_columns {
                ColumnSpec::Auto
            } else {
                match spec.column_widths.component(j) {
                    ColumnWidth::Auto => ColumnSpec::Auto,
                    ColumnWidth::Fit => ColumnSpec::Fit,
                    ColumnWidth::Length(length) => TrackSize::resolve(ctx, device, length)?.column(),
                }
            };
            columns[jj] = Column::new(TrackKind::Content, width_spec);

            if j + 1 < spec.columns {
                let spacing = TrackSize::resolve(ctx, device, spec.column_spacing.component(j))?.column();
                columns[jj + 1] = Column::new(TrackKind::Spacing, spacing);
            }
        }

        let mut cells = vec![None; n_grid_rows * n_grid_columns];
        for i in 0..spec.rows {
            let ii = content_row_offset + 2 * i;
            rows[ii] = Row::new(TrackKind::Content, RowSpec::Auto);

            if let (Some(jj), Some(label)) = (label_column, &spec.labels[i]) {
                cells[ii * n_grid_columns + jj] = Some(GridCell::new(label, i, None));
            }
            for j in 0..spec.columns {
                if let Some(cell) = spec.cell(i, j) {
                    let jj = content_column_offset + 2 * j;
                    cells[ii * n_grid_columns + jj] = Some(GridCell::new(cell, i, Some(j)));
                }
            }

            if i + 1 < spec.rows {
                let spacing = TrackSize::resolve(ctx, device, spec.row_spacing.component(i))?.row();
                rows[ii + 1] = Row::new(TrackKind::Spacing, spacing);
            }
        }

        Ok(Self {
            rows,
            columns,
            cells,
            n_rows: spec.rows,
            n_columns: spec.columns,
            content_row_offset,
            content_column_offset,
            label_column,
            frame: spec.frame,
            row_lines: spec.row_lines.clone(),
            column_lines: spec.column_lines.clone(),
            bbox: BoundingBox::default(),
        })
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_visible()
    }

    /// The cell anchored at grid position `(i, j)`; interior span positions
    /// and empty cells are `None`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn cell(&self, i: usize, j: usize) -> Option<&GridCell> {
        assert!(
            i < self.rows.len() && j < self.columns.len(),
            "grid position ({}, {}) outside a {}x{} grid",
            i,
            j,
            self.rows.len(),
            self.columns.len()
        );
        self.cells[i * self.columns.len() + j].as_ref()
    }

    /// Anchored cells with their grid coordinates, row-major.
    pub fn anchored(&self) -> impl Iterator<Item = (usize, usize, &GridCell)> {
        let width = self.columns.len();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| cell.as_ref().map(|c| (index / width, index % width, c)))
    }

    pub fn anchored_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut GridCell)> {
        let width = self.columns.len();
        self.cells
            .iter_mut()
            .enumerate()
            .filter_map(move |(index, cell)| cell.as_mut().map(|c| (index / width, index % width, c)))
    }

    /// Grid row of logical row `i`.
    pub fn grid_row(&self, i: usize) -> usize {
        self.content_row_offset + 2 * i
    }

    /// Grid column of logical column `j`.
    pub fn grid_column(&self, j: usize) -> usize {
        self.content_column_offset + 2 * j
    }

    /// Box covered by a cell anchored at `(i, j)` spanning the given grid
    /// tracks, measured from the anchor row's baseline.
    pub fn cell_bounding_box(&self, i: usize, j: usize, row_span: usize, column_span: usize) -> BoundingBox {
        let mut bbox = BoundingBox::new(self.columns[j].width, self.rows[i].height, self.rows[i].depth);
        for row in &self.rows[i + 1..i + row_span] {
            bbox.depth += row.vertical_extent();
        }
        for column in &self.columns[j + 1..j + column_span] {
            bbox.width += column.width;
        }
        bbox
    }
}
