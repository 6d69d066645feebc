use crate::table::{TableCell, TableFormatter, TableLayout, TableSpec};
use crate::{LayoutConfig, LayoutError};
use mathtab_style::{Length, ValueList};
use mathtab_traits::{AreaFactory, DeviceConfig, FormattingContext, GraphicDevice, StandardDevice};
use mathtab_types::{BoundingBox, ElementIdGenerator, Scaled};

/// Font size of the test context. With the default device ratios this gives
/// em = 18, ex = 9, axis = 4.5 and a rule thickness of 1.
pub const TEST_FONT_SIZE: i32 = 18;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn s(v: i32) -> Scaled {
    Scaled::from_int(v)
}

pub fn create_test_device() -> (StandardDevice, FormattingContext) {
    init_logger();
    let device = StandardDevice::new(DeviceConfig::default());
    let ctx = FormattingContext::new(s(TEST_FONT_SIZE));
    (device, ctx)
}

/// Builds pre-measured cells through the standard factory.
pub struct CellMaker<'a> {
    factory: &'a dyn AreaFactory,
    ids: ElementIdGenerator,
}

impl<'a> CellMaker<'a> {
    pub fn new(device: &'a dyn GraphicDevice) -> Self {
        Self { factory: device.factory(), ids: ElementIdGenerator::new() }
    }

    pub fn cell(&mut self, width: i32, height: i32, depth: i32) -> TableCell {
        let id = self.ids.next_id();
        let area = self.factory.content(id, BoundingBox::new(s(width), s(height), s(depth)));
        TableCell::new(id, area)
    }
}

/// A table without any spacing, so extents are exactly the cell sizes.
pub fn tight_spec(rows: usize, columns: usize) -> TableSpec {
    TableSpec::new(rows, columns)
        .with_row_spacing(ValueList::single(Length::px(0.0)))
        .with_column_spacing(ValueList::single(Length::px(0.0)))
}

/// Fills a tight table from `(width, height, depth)` triples, row-major.
pub fn tight_grid(device: &dyn GraphicDevice, sizes: &[&[(i32, i32, i32)]]) -> TableSpec {
    let columns = sizes.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut spec = tight_spec(sizes.len(), columns);
    let mut cells = CellMaker::new(device);
    for (i, row) in sizes.iter().enumerate() {
        for (j, &(w, h, d)) in row.iter().enumerate() {
            spec.set_cell(i, j, cells.cell(w, h, d));
        }
    }
    spec
}

pub fn layout_spec(
    device: &StandardDevice,
    ctx: &FormattingContext,
    spec: &TableSpec,
) -> Result<TableLayout, LayoutError> {
    TableFormatter::new(LayoutConfig::default()).layout(ctx, device, spec)
}
