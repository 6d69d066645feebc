//! Column sizing: content widths, the span pass, then resolution.

use super::grid::{ColumnSpec, Grid, TrackKind};
use super::solver::{SizingMode, TrackClass, TrackRequest, TrackSolver, distribute};
use crate::{Axis, LayoutError};
use log::{debug, trace, warn};
use mathtab_types::Scaled;

impl Grid {
    /// Widest cell anchored in grid column `j` that spans no other column.
    pub fn column_content_width(&self, j: usize) -> Scaled {
        (0..self.rows.len())
            .filter_map(|i| self.cell(i, j))
            .filter(|cell| cell.grid_column_span == 1)
            .map(|cell| cell.bbox.width)
            .max()
            .unwrap_or(Scaled::ZERO)
    }

    fn is_flexible_column(&self, j: usize) -> bool {
        let column = &self.columns[j];
        column.is_content() && !matches!(column.spec, ColumnSpec::Fixed(_))
    }

    /// Seeds every column's temporary width, then widens the flexible
    /// content columns under each spanning cell that does not fit.
    pub fn init_temp_widths(&mut self) {
        for j in 0..self.columns.len() {
            let content_width = if matches!(self.columns[j].kind, TrackKind::Content | TrackKind::Label) {
                self.column_content_width(j)
            } else {
                Scaled::ZERO
            };
            let column = &mut self.columns[j];
            column.content_width = content_width;
            column.temp_width = match column.spec {
                ColumnSpec::Fixed(width) => {
                    if column.is_content() && content_width > width {
                        warn!("column {} content width {} overflows its fixed width {}", j, content_width, width);
                    }
                    width
                }
                ColumnSpec::Scale(_) if !column.is_content() => Scaled::ZERO,
                _ => content_width,
            };
        }

        let spanning: Vec<(usize, usize, Scaled)> = self
            .anchored()
            .filter(|(_, _, cell)| cell.grid_column_span > 1)
            .map(|(_, j, cell)| (j, cell.grid_column_span, cell.bbox.width))
            .collect();

        for (j, span, cell_width) in spanning {
            let spanned: Scaled = self.columns[j..j + span].iter().map(|c| c.temp_width).sum();
            if cell_width <= spanned {
                continue;
            }
            let flexible: Vec<usize> = (j..j + span).filter(|&z| self.is_flexible_column(z)).collect();
            if flexible.is_empty() {
                warn!("spanning cell at column {} needs {} but only fixed columns are spanned", j, cell_width);
                continue;
            }
            let mut temps: Vec<Scaled> = self.columns.iter().map(|c| c.temp_width).collect();
            distribute(cell_width - spanned, &mut temps, &flexible);
            for z in flexible {
                self.columns[z].temp_width = temps[z];
            }
        }

        for (j, column) in self.columns.iter().enumerate() {
            trace!("column {} {:?}: content {} temp {}", j, column.kind, column.content_width, column.temp_width);
        }
    }

    fn width_requests(&self) -> Vec<TrackRequest> {
        self.columns
            .iter()
            .map(|column| {
                let class = match (column.kind, column.spec) {
                    (TrackKind::Content, ColumnSpec::Auto | ColumnSpec::Fit) => TrackClass::Plain,
                    (_, ColumnSpec::Scale(fraction)) => TrackClass::Scale(fraction),
                    _ => TrackClass::Fixed,
                };
                TrackRequest { class, requirement: column.temp_width, content: column.is_content() }
            })
            .collect()
    }

    /// Resolves column widths; `equal` selects equal-width content columns.
    ///
    /// Labels are sized by their widest label and then held fixed.
    pub fn init_widths(&mut self, equal: bool) -> Result<Scaled, LayoutError> {
        let mode = if equal { SizingMode::Equal } else { SizingMode::Content };
        let requests = self.width_requests();
        let solution = TrackSolver::new(Axis::Horizontal, &requests).solve(mode)?;
        for (column, width) in self.columns.iter_mut().zip(solution.extents) {
            column.width = width;
        }
        self.bbox.width = solution.total;
        debug!("table width {} ({:?} columns)", solution.total, mode);
        Ok(solution.total)
    }
}
