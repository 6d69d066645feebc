//! The formatter driving a table through grid construction, sizing,
//! alignment, positioning and composition.

use super::grid::{Grid, TrackKind};
use super::rules::RulePainter;
use super::spec::TableSpec;
use crate::cache::AreaCache;
use crate::config::LayoutConfig;
use crate::perf::{NoOpProfiler, Profiler, Stage};
use crate::LayoutError;
use log::debug;
use mathtab_style::TableAlign;
use mathtab_traits::{FormattingContext, GraphicDevice};
use mathtab_types::{AreaRef, BoundingBox, ElementId, Scaled, XYArea};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

fn timed<R>(profiler: &dyn Profiler, stage: Stage, f: impl FnOnce() -> R) -> R {
    let start = Instant::now();
    let result = f();
    profiler.record(stage, start.elapsed());
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnGeometry {
    pub kind: TrackKind,
    pub width: Scaled,
    /// Left edge relative to the table origin.
    pub displacement: Scaled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowGeometry {
    pub kind: TrackKind,
    pub height: Scaled,
    pub depth: Scaled,
    /// Baseline relative to the table baseline.
    pub displacement: Scaled,
}

impl RowGeometry {
    pub fn vertical_extent(&self) -> Scaled {
        self.height + self.depth
    }
}

/// A cell or label after positioning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedCell {
    pub element: ElementId,
    pub row: usize,
    /// `None` for the label of `row`.
    pub column: Option<usize>,
    pub dx: Scaled,
    pub dy: Scaled,
    pub bbox: BoundingBox,
}

/// The immutable result of formatting a table.
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub area: AreaRef,
    pub bbox: BoundingBox,
    pub columns: Vec<ColumnGeometry>,
    pub rows: Vec<RowGeometry>,
    pub cells: Vec<PlacedCell>,
    pub rule_count: usize,
}

impl TableLayout {
    pub fn content_column_widths(&self) -> Vec<Scaled> {
        self.columns
            .iter()
            .filter(|c| c.kind == TrackKind::Content)
            .map(|c| c.width)
            .collect()
    }

    pub fn content_rows(&self) -> Vec<RowGeometry> {
        self.rows.iter().filter(|r| r.kind == TrackKind::Content).copied().collect()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&PlacedCell> {
        self.cells.iter().find(|c| c.row == row && c.column == Some(column))
    }

    pub fn label(&self, row: usize) -> Option<&PlacedCell> {
        self.cells.iter().find(|c| c.row == row && c.column.is_none())
    }
}

/// Lays out `mtable`-style grids of pre-measured cells.
///
/// A formatter is reusable: every [`init`](Self::init) replaces the grid and
/// clears the rule cache; [`format`](Self::format) may run any number of
/// times on the current grid.
pub struct TableFormatter {
    config: LayoutConfig,
    grid: Option<Grid>,
    cache: AreaCache,
    profiler: Arc<dyn Profiler>,
}

impl TableFormatter {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            grid: None,
            cache: AreaCache::new(config.rule_cache_capacity),
            profiler: Arc::new(NoOpProfiler),
        }
    }

    pub fn with_profiler(mut self, profiler: Arc<dyn Profiler>) -> Self {
        self.profiler = profiler;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The grid built by the last `init`, as far as formatting got.
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// Builds the decorated grid for `spec`.
    ///
    /// # Panics
    ///
    /// Panics if `spec` violates a structural precondition (see
    /// [`TableSpec::validate`]).
    pub fn init(
        &mut self,
        ctx: &FormattingContext,
        device: &dyn GraphicDevice,
        spec: &TableSpec,
    ) -> Result<(), LayoutError> {
        self.cache.clear();
        let profiler = Arc::clone(&self.profiler);
        self.grid = Some(timed(&*profiler, Stage::Init, || Grid::build(ctx, device, spec))?);
        Ok(())
    }

    /// Sizes, aligns and positions the grid, then composes the table area.
    ///
    /// # Panics
    ///
    /// Panics if [`init`](Self::init) has not run.
    pub fn format(
        &mut self,
        ctx: &FormattingContext,
        device: &dyn GraphicDevice,
        equal_rows: bool,
        equal_columns: bool,
        align: TableAlign,
    ) -> Result<TableLayout, LayoutError> {
        let profiler = Arc::clone(&self.profiler);
        let profiler = &*profiler;
        let grid = match self.grid.as_mut() {
            Some(grid) => grid,
            None => panic!("TableFormatter::format called before init"),
        };

        timed(profiler, Stage::TempWidths, || grid.init_temp_widths());
        timed(profiler, Stage::Widths, || grid.init_widths(equal_columns))?;
        timed(profiler, Stage::TempHeights, || grid.init_temp_heights());
        timed(profiler, Stage::Heights, || grid.init_heights(equal_rows))?;

        let axis = device.axis(ctx)?;
        timed(profiler, Stage::Align, || grid.align_table(align, axis));
        timed(profiler, Stage::Displacements, || grid.set_displacements());
        timed(profiler, Stage::CellPositions, || grid.set_cell_positions(axis));

        let grid = &*grid;
        let thickness = device.default_line_thickness(ctx)?;
        let factory = device.factory();
        let draw_frame = self.config.draw_frame && grid.has_frame();
        let mut painter = RulePainter {
            factory,
            cache: &mut self.cache,
            profiler,
            thickness,
            color: self.config.rule_color,
        };
        let rules = timed(profiler, Stage::Rules, || {
            let mut rules = painter.interior(grid);
            if draw_frame {
                rules.extend(painter.frame(grid));
            }
            rules
        });

        let layout = timed(profiler, Stage::Compose, || {
            let rule_count = rules.len();
            let mut content: Vec<XYArea> = grid
                .anchored()
                .map(|(_, _, cell)| XYArea::new(cell.dx, cell.dy, Arc::clone(&cell.area)))
                .collect();
            content.extend(rules);

            TableLayout {
                area: factory.boxed_layout(grid.bbox, content),
                bbox: grid.bbox,
                columns: grid
                    .columns
                    .iter()
                    .map(|c| ColumnGeometry { kind: c.kind, width: c.width, displacement: c.displacement })
                    .collect(),
                rows: grid
                    .rows
                    .iter()
                    .map(|r| RowGeometry {
                        kind: r.kind,
                        height: r.height,
                        depth: r.depth,
                        displacement: r.displacement,
                    })
                    .collect(),
                cells: grid
                    .anchored()
                    .map(|(_, _, cell)| PlacedCell {
                        element: cell.element,
                        row: cell.row,
                        column: cell.column,
                        dx: cell.dx,
                        dy: cell.dy,
                        bbox: cell.bbox,
                    })
                    .collect(),
                rule_count,
            }
        });

        debug!(
            "table formatted: {} x ({} + {}), {} cells, {} rules",
            layout.bbox.width,
            layout.bbox.height,
            layout.bbox.depth,
            layout.cells.len(),
            layout.rule_count
        );
        Ok(layout)
    }

    /// `init` followed by `format` with the table's own flags and alignment.
    pub fn layout(
        &mut self,
        ctx: &FormattingContext,
        device: &dyn GraphicDevice,
        spec: &TableSpec,
    ) -> Result<TableLayout, LayoutError> {
        self.init(ctx, device, spec)?;
        self.format(ctx, device, spec.equal_rows, spec.equal_columns, spec.align)
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
