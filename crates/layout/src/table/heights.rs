//! Row sizing. Mirrors the width passes on vertical extents, keeping the
//! split between height above and depth below each row's baseline.

use super::grid::{Grid, RowSpec};
use super::solver::{SizingMode, TrackClass, TrackRequest, TrackSolver, distribute};
use crate::{Axis, LayoutError};
use log::{debug, trace, warn};
use mathtab_style::RowAlign;
use mathtab_types::Scaled;

impl Grid {
    /// Seeds every row's temporary height and depth.
    ///
    /// Baseline-aligned cells share the row baseline, so the row takes the
    /// largest ascent and descent among them; other single-row cells only
    /// require the row's total extent. Spanning cells then deepen the
    /// content rows they cover.
    pub fn init_temp_heights(&mut self) {
        for i in 0..self.rows.len() {
            let (height, depth) = match self.rows[i].spec {
                RowSpec::Fixed(height) => (height, Scaled::ZERO),
                RowSpec::Scale(_) => (Scaled::ZERO, Scaled::ZERO),
                RowSpec::Auto => {
                    let mut height = Scaled::ZERO;
                    let mut depth = Scaled::ZERO;
                    for j in 0..self.columns.len() {
                        if let Some(cell) = self.cell(i, j) {
                            if cell.grid_row_span == 1 && cell.row_align == RowAlign::Baseline {
                                height = height.max(cell.bbox.height);
                                depth = depth.max(cell.bbox.depth);
                            }
                        }
                    }
                    for j in 0..self.columns.len() {
                        if let Some(cell) = self.cell(i, j) {
                            let extent = cell.bbox.vertical_extent();
                            if cell.grid_row_span == 1
                                && cell.row_align != RowAlign::Baseline
                                && height + depth < extent
                            {
                                depth = extent - height;
                            }
                        }
                    }
                    (height, depth)
                }
            };
            self.rows[i].temp_height = height;
            self.rows[i].temp_depth = depth;
        }

        let spanning: Vec<(usize, usize, Scaled)> = self
            .anchored()
            .filter(|(_, _, cell)| cell.grid_row_span > 1)
            .map(|(i, _, cell)| (i, cell.grid_row_span, cell.bbox.vertical_extent()))
            .collect();

        for (i, span, cell_extent) in spanning {
            let spanned: Scaled = self.rows[i..i + span].iter().map(|r| r.temp_extent()).sum();
            if cell_extent <= spanned {
                continue;
            }
            let flexible: Vec<usize> = (i..i + span).filter(|&z| self.rows[z].is_content()).collect();
            if flexible.is_empty() {
                warn!("spanning cell at row {} needs {} but spans no content row", i, cell_extent);
                continue;
            }
            let mut depths: Vec<Scaled> = self.rows.iter().map(|r| r.temp_depth).collect();
            distribute(cell_extent - spanned, &mut depths, &flexible);
            for z in flexible {
                self.rows[z].temp_depth = depths[z];
            }
        }

        for (i, row) in self.rows.iter().enumerate() {
            trace!("row {} {:?}: temp {} + {}", i, row.kind, row.temp_height, row.temp_depth);
        }
    }

    fn height_requests(&self) -> Vec<TrackRequest> {
        self.rows
            .iter()
            .map(|row| {
                let class = match row.spec {
                    RowSpec::Auto => TrackClass::Plain,
                    RowSpec::Fixed(_) => TrackClass::Fixed,
                    RowSpec::Scale(fraction) => TrackClass::Scale(fraction),
                };
                TrackRequest { class, requirement: row.temp_extent(), content: row.is_content() }
            })
            .collect()
    }

    /// Resolves row heights and depths, returning the table's total
    /// vertical extent. `equal` gives every content row the same extent.
    /// The whole extent sits above the baseline until the table is aligned.
    ///
    /// Content rows keep their temporary height; whatever extent they gain
    /// goes below the baseline. Fixed and scaled rows are all height.
    pub fn init_heights(&mut self, equal: bool) -> Result<Scaled, LayoutError> {
        let mode = if equal { SizingMode::Equal } else { SizingMode::Content };
        let requests = self.height_requests();
        let solution = TrackSolver::new(Axis::Vertical, &requests).solve(mode)?;
        for (row, extent) in self.rows.iter_mut().zip(solution.extents) {
            if row.spec == RowSpec::Auto {
                row.height = row.temp_height;
                row.depth = extent - row.temp_height;
            } else {
                row.height = extent;
                row.depth = Scaled::ZERO;
            }
        }
        self.bbox.height = solution.total;
        self.bbox.depth = Scaled::ZERO;
        debug!("table height + depth {} ({:?} rows)", solution.total, mode);
        Ok(solution.total)
    }
}
