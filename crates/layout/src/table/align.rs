//! Table alignment and the positioning passes that follow it.

use super::grid::Grid;
use log::{debug, trace};
use mathtab_style::{ColumnAlign, RowAlign, TableAlign};
use mathtab_types::{BoundingBox, Scaled};

/// Vertical offset of a box aligned inside a taller cell box, both measured
/// from the same baseline. `axis` is the math axis above the baseline.
fn row_offset(align: RowAlign, cell: &BoundingBox, content: &BoundingBox, axis: Scaled) -> Scaled {
    let center = (cell.height - cell.depth - content.height + content.depth) / 2;
    match align {
        RowAlign::Baseline => Scaled::ZERO,
        RowAlign::Top => cell.height - content.height,
        RowAlign::Bottom => content.depth - cell.depth,
        RowAlign::Center => center,
        RowAlign::Axis => center + axis,
    }
}

fn column_offset(align: ColumnAlign, cell: &BoundingBox, content: &BoundingBox) -> Scaled {
    match align {
        ColumnAlign::Left => Scaled::ZERO,
        ColumnAlign::Right => cell.width - content.width,
        ColumnAlign::Center => (cell.width - content.width) / 2,
    }
}

impl Grid {
    /// Grid row selected by a pivot index: `r > 0` counts from the top
    /// starting at 1, `r < 0` from the bottom.
    ///
    /// # Panics
    ///
    /// Panics if the index is zero or names a row outside the table.
    fn pivot_row(&self, row: i32) -> usize {
        let n = self.n_rows as i64;
        let logical = if row < 0 { n + row as i64 } else { row as i64 - 1 };
        assert!(
            row != 0 && (0..n).contains(&logical),
            "alignment row {} outside a table of {} rows",
            row,
            self.n_rows
        );
        self.grid_row(logical as usize)
    }

    /// Splits the total vertical extent into the table's height above and
    /// depth below its baseline.
    ///
    /// A pivot row is aligned the way the whole table would be, measured
    /// within that row: `Axis` puts the row's center on the math axis and
    /// `Baseline` uses the row's own baseline.
    pub fn align_table(&mut self, align: TableAlign, axis: Scaled) {
        let total = self.bbox.vertical_extent();
        let height = match align.row {
            None => match align.align {
                RowAlign::Top => Scaled::ZERO,
                RowAlign::Bottom => total,
                RowAlign::Axis => total / 2 + axis,
                RowAlign::Center | RowAlign::Baseline => total / 2,
            },
            Some(index) => {
                let pivot = self.pivot_row(index);
                let before: Scaled = self.rows[..pivot].iter().map(|r| r.vertical_extent()).sum();
                let row = &self.rows[pivot];
                match align.align {
                    RowAlign::Top => before,
                    RowAlign::Bottom => before + row.vertical_extent(),
                    RowAlign::Center => before + row.vertical_extent() / 2,
                    RowAlign::Baseline => before + row.height,
                    RowAlign::Axis => before + row.vertical_extent() / 2 + axis,
                }
            }
        };
        self.bbox.height = height;
        self.bbox.depth = total - height;
        debug!("table aligned {:?}: height {} depth {}", align, self.bbox.height, self.bbox.depth);
    }

    /// Running row baselines from the top and column origins from the left.
    pub fn set_displacements(&mut self) {
        let mut v = self.bbox.height;
        for row in &mut self.rows {
            row.displacement = v - row.height;
            v -= row.vertical_extent();
        }
        let mut h = Scaled::ZERO;
        for column in &mut self.columns {
            column.displacement = h;
            h += column.width;
        }
    }

    /// Places every anchored cell, labels included, inside the box its
    /// span covers.
    pub fn set_cell_positions(&mut self, axis: Scaled) {
        let offsets: Vec<(Scaled, Scaled)> = self
            .anchored()
            .map(|(i, j, cell)| {
                let span = self.cell_bounding_box(i, j, cell.grid_row_span, cell.grid_column_span);
                let dx = column_offset(cell.column_align, &span, &cell.bbox);
                let dy = row_offset(cell.row_align, &span, &cell.bbox, axis);
                (self.columns[j].displacement + dx, self.rows[i].displacement + dy)
            })
            .collect();

        for ((i, j, cell), (dx, dy)) in self.anchored_mut().zip(offsets) {
            cell.dx = dx;
            cell.dy = dy;
            trace!("cell {} at ({}, {}) placed at ({}, {})", cell.element, i, j, dx, dy);
        }
    }
}
