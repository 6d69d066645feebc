//! Row, column and frame rules.

use super::grid::{Grid, TrackKind};
use crate::cache::{AreaCache, RuleKey, RuleOrientation};
use crate::perf::Profiler;
use log::trace;
use mathtab_traits::AreaFactory;
use mathtab_types::{RgbColor, Scaled, XYArea};

/// Emits rule areas for a positioned grid, sharing identical rules through
/// the formatter's cache.
pub(crate) struct RulePainter<'a> {
    pub factory: &'a dyn AreaFactory,
    pub cache: &'a mut AreaCache,
    pub profiler: &'a dyn Profiler,
    pub thickness: Scaled,
    pub color: RgbColor,
}

impl RulePainter<'_> {
    fn push(&mut self, out: &mut Vec<XYArea>, orientation: RuleOrientation, length: Scaled, x: Scaled, y: Scaled) {
        if length <= Scaled::ZERO {
            return;
        }
        let key = RuleKey { orientation, thickness: self.thickness, length, color: self.color };
        let (area, hit) = self.cache.rule(self.factory, key);
        if hit {
            self.profiler.count_hit();
        } else {
            self.profiler.count_miss();
        }
        trace!("{:?} rule of {} at ({}, {})", orientation, length, x, y);
        out.push(XYArea::new(x, y, area));
    }

    /// Interior rules below and right of every content cell whose far edge
    /// carries a visible line. Dashed lines are drawn solid.
    ///
    /// A rule that reaches the table border runs on through an adjacent
    /// frame track but stops short of label tracks.
    pub fn interior(&mut self, grid: &Grid) -> Vec<XYArea> {
        let mut out = Vec::new();
        let t = self.thickness;

        for (ii, jj, cell) in grid.anchored() {
            let Some(j) = cell.column else {
                continue;
            };
            let i = cell.row;
            let (grs, gcs) = (cell.grid_row_span, cell.grid_column_span);

            if i + cell.row_span < grid.n_rows && grid.row_lines.component(i + cell.row_span - 1).is_visible() {
                let x0 = if j > 0 {
                    grid.columns[jj - 1].center()
                } else {
                    match jj.checked_sub(1).map(|k| &grid.columns[k]) {
                        Some(column) if column.kind == TrackKind::Frame => column.left(),
                        _ => grid.columns[jj].left(),
                    }
                };
                let x1 = if j + cell.column_span < grid.n_columns {
                    grid.columns[jj + gcs].center()
                } else {
                    match grid.columns.get(jj + gcs) {
                        Some(column) if column.kind == TrackKind::Frame => column.right(),
                        _ => grid.columns[jj + gcs - 1].right(),
                    }
                };
                let y = grid.rows[ii + grs].center();
                self.push(&mut out, RuleOrientation::Horizontal, x1 - x0, x0, y);
            }

            if j + cell.column_span < grid.n_columns
                && grid.column_lines.component(j + cell.column_span - 1).is_visible()
            {
                let y0 = if i > 0 {
                    grid.rows[ii - 1].center()
                } else {
                    match ii.checked_sub(1).map(|k| &grid.rows[k]) {
                        Some(row) if row.kind == TrackKind::Frame => row.top(),
                        _ => grid.rows[ii].top(),
                    }
                };
                let y1 = if i + cell.row_span < grid.n_rows {
                    grid.rows[ii + grs].center()
                } else {
                    match grid.rows.get(ii + grs) {
                        Some(row) if row.kind == TrackKind::Frame => row.bottom(),
                        _ => grid.rows[ii + grs - 1].bottom(),
                    }
                };
                let x = grid.columns[jj + gcs].center() - t / 2;
                self.push(&mut out, RuleOrientation::Vertical, y0 - y1, x, y0);
            }
        }
        out
    }

    /// The four rules around the table box.
    pub fn frame(&mut self, grid: &Grid) -> Vec<XYArea> {
        let mut out = Vec::new();
        let bbox = grid.bbox;
        let t = self.thickness;
        let extent = bbox.vertical_extent();
        self.push(&mut out, RuleOrientation::Horizontal, bbox.width, Scaled::ZERO, bbox.height - t / 2);
        self.push(&mut out, RuleOrientation::Horizontal, bbox.width, Scaled::ZERO, -bbox.depth + (t - t / 2));
        self.push(&mut out, RuleOrientation::Vertical, extent, Scaled::ZERO, bbox.height);
        self.push(&mut out, RuleOrientation::Vertical, extent, bbox.width - t, bbox.height);
        out
    }
}
