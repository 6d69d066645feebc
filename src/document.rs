//! A JSON description of a whole table: pre-measured cell boxes plus the
//! MathML `mtable` attributes as strings.
//!
//! ```json
//! {
//!   "mathsize": 18,
//!   "columnspacing": "0.8em",
//!   "frame": "solid",
//!   "rows": [
//!     { "cells": [{ "width": 10, "height": 6, "depth": 2 }, null],
//!       "label": { "width": 12, "height": 6, "depth": 2 } }
//!   ]
//! }
//! ```

use crate::error::MathtabError;
use mathtab_layout::{
    ColumnGeometry, LayoutConfig, PlacedCell, RowGeometry, TableCell, TableFormatter, TableLayout,
    TableSpec,
};
use mathtab_style::parsers::{
    list, parse_bool, parse_column_align, parse_column_width, parse_length_list, parse_line_style,
    parse_row_align, run_parser,
};
use mathtab_style::{ColumnAlign, Length, RowAlign, Side, StyleParseError, TableAlign, ValueList};
use mathtab_traits::{AreaFactory, DeviceConfig, FormattingContext, GraphicDevice, StandardDevice};
use mathtab_types::{BoundingBox, ElementIdGenerator, Scaled};
use serde::{Deserialize, Serialize};

fn default_span() -> usize {
    1
}

fn default_mathsize() -> f32 {
    16.0
}

/// A pre-measured cell. Dimensions are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDocument {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub depth: f32,
    #[serde(default = "default_span")]
    pub rowspan: usize,
    #[serde(default = "default_span")]
    pub columnspan: usize,
    /// Overrides the table's `columnalign` for this cell.
    #[serde(default)]
    pub columnalign: Option<String>,
    /// Overrides the table's `rowalign` for this cell.
    #[serde(default)]
    pub rowalign: Option<String>,
}

/// One logical row. `null` cells are empty or covered by a span.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowDocument {
    #[serde(default)]
    pub cells: Vec<Option<CellDocument>>,
    #[serde(default)]
    pub label: Option<CellDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    /// Font size in pixels.
    #[serde(default = "default_mathsize")]
    pub mathsize: f32,
    #[serde(default)]
    pub device: DeviceConfig,
    pub rows: Vec<RowDocument>,
    pub rowspacing: Option<String>,
    pub columnspacing: Option<String>,
    pub columnwidth: Option<String>,
    pub frame: Option<String>,
    pub framespacing: Option<String>,
    pub side: Option<String>,
    pub minlabelspacing: Option<String>,
    pub equalrows: Option<String>,
    pub equalcolumns: Option<String>,
    pub align: Option<String>,
    pub rowlines: Option<String>,
    pub columnlines: Option<String>,
    /// Per-row default alignment, repeating the last entry.
    pub rowalign: Option<String>,
    /// Per-column default alignment, repeating the last entry.
    pub columnalign: Option<String>,
}

/// Parses an optional attribute, reporting failures against its name.
fn attribute<T>(
    property: &str,
    value: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, StyleParseError>,
) -> Result<Option<T>, MathtabError> {
    let Some(value) = value else {
        return Ok(None);
    };
    parse(value).map(Some).map_err(|_| {
        MathtabError::Style(StyleParseError::InvalidValue {
            property: property.to_string(),
            value: value.to_string(),
        })
    })
}

impl CellDocument {
    fn to_cell(
        &self,
        factory: &dyn AreaFactory,
        ids: &mut ElementIdGenerator,
        row_align: RowAlign,
        column_align: ColumnAlign,
    ) -> Result<TableCell, MathtabError> {
        let row_align = attribute("rowalign", self.rowalign.as_deref(), |s| s.parse::<RowAlign>())?.unwrap_or(row_align);
        let column_align =
            attribute("columnalign", self.columnalign.as_deref(), |s| s.parse::<ColumnAlign>())?.unwrap_or(column_align);
        let bbox = BoundingBox::new(
            Scaled::from_f32(self.width),
            Scaled::from_f32(self.height),
            Scaled::from_f32(self.depth),
        );
        let id = ids.next_id();
        Ok(TableCell::new(id, factory.content(id, bbox))
            .with_spans(self.rowspan, self.columnspan)
            .with_row_align(row_align)
            .with_column_align(column_align))
    }
}

impl TableDocument {
    pub fn from_json(json: &str) -> Result<Self, MathtabError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn columns(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Rejects tables the formatter cannot build: no rows or columns, empty
    /// or overflowing spans, overlapping cells and spanning labels.
    pub fn check(&self) -> Result<(), MathtabError> {
        let rows = self.rows.len();
        let columns = self.columns();
        if rows == 0 || columns == 0 {
            return Err(MathtabError::InvalidDocument(format!(
                "table must have at least one row and one column, got {}x{}",
                rows, columns
            )));
        }

        let mut covered = vec![false; rows * columns];
        for (i, row) in self.rows.iter().enumerate() {
            if let Some(label) = &row.label {
                if label.rowspan != 1 || label.columnspan != 1 {
                    return Err(MathtabError::InvalidDocument(format!("label of row {} spans", i)));
                }
            }
            for (j, cell) in row.cells.iter().enumerate() {
                let Some(cell) = cell else { continue };
                if cell.rowspan == 0 || cell.columnspan == 0 {
                    return Err(MathtabError::InvalidDocument(format!("cell ({}, {}) has an empty span", i, j)));
                }
                if i + cell.rowspan > rows || j + cell.columnspan > columns {
                    return Err(MathtabError::InvalidDocument(format!(
                        "cell ({}, {}) spans past the {}x{} table",
                        i, j, rows, columns
                    )));
                }
                for si in i..i + cell.rowspan {
                    for sj in j..j + cell.columnspan {
                        let slot = &mut covered[si * columns + sj];
                        if *slot {
                            return Err(MathtabError::InvalidDocument(format!(
                                "cell ({}, {}) overlaps position ({}, {})",
                                i, j, si, sj
                            )));
                        }
                        *slot = true;
                    }
                }
            }
        }
        Ok(())
    }

    /// Parses the attributes and builds the formatter input. Element ids
    /// are handed out in reading order, each row's label after its cells.
    pub fn to_spec(&self, factory: &dyn AreaFactory, ids: &mut ElementIdGenerator) -> Result<TableSpec, MathtabError> {
        self.check()?;
        let mut spec = TableSpec::new(self.rows.len(), self.columns());

        if let Some(widths) = attribute("columnwidth", self.columnwidth.as_deref(), |s| {
            run_parser(list(parse_column_width), s)
        })? {
            spec.column_widths = widths;
        }
        if let Some(spacing) = attribute("rowspacing", self.rowspacing.as_deref(), |s| run_parser(parse_length_list, s))? {
            spec.row_spacing = spacing;
        }
        if let Some(spacing) =
            attribute("columnspacing", self.columnspacing.as_deref(), |s| run_parser(parse_length_list, s))?
        {
            spec.column_spacing = spacing;
        }
        if let Some(frame) = attribute("frame", self.frame.as_deref(), |s| run_parser(parse_line_style, s))? {
            spec.frame = frame;
        }
        if let Some(spacing) =
            attribute("framespacing", self.framespacing.as_deref(), |s| run_parser(parse_length_list, s))?
        {
            spec.frame_spacing = spacing;
        }
        if let Some(side) = attribute("side", self.side.as_deref(), |s| s.parse::<Side>())? {
            spec.side = side;
        }
        if let Some(spacing) = attribute("minlabelspacing", self.minlabelspacing.as_deref(), |s| s.parse::<Length>())? {
            spec.min_label_spacing = spacing;
        }
        if let Some(equal) = attribute("equalrows", self.equalrows.as_deref(), |s| run_parser(parse_bool, s))? {
            spec.equal_rows = equal;
        }
        if let Some(equal) = attribute("equalcolumns", self.equalcolumns.as_deref(), |s| run_parser(parse_bool, s))? {
            spec.equal_columns = equal;
        }
        if let Some(align) = attribute("align", self.align.as_deref(), |s| s.parse::<TableAlign>())? {
            spec.align = align;
        }
        if let Some(lines) = attribute("rowlines", self.rowlines.as_deref(), |s| run_parser(list(parse_line_style), s))? {
            spec.row_lines = lines;
        }
        if let Some(lines) =
            attribute("columnlines", self.columnlines.as_deref(), |s| run_parser(list(parse_line_style), s))?
        {
            spec.column_lines = lines;
        }

        let row_aligns: ValueList<RowAlign> =
            attribute("rowalign", self.rowalign.as_deref(), |s| run_parser(list(parse_row_align), s))?
                .unwrap_or_default();
        let column_aligns: ValueList<ColumnAlign> =
            attribute("columnalign", self.columnalign.as_deref(), |s| run_parser(list(parse_column_align), s))?
                .unwrap_or_default();

        for (i, row) in self.rows.iter().enumerate() {
            let row_align = *row_aligns.component(i);
            for (j, cell) in row.cells.iter().enumerate() {
                if let Some(cell) = cell {
                    let cell = cell.to_cell(factory, ids, row_align, *column_aligns.component(j))?;
                    spec.set_cell(i, j, cell);
                }
            }
            if let Some(label) = &row.label {
                let label = label.to_cell(factory, ids, row_align, ColumnAlign::default())?;
                spec.set_label(i, label);
            }
        }
        Ok(spec)
    }

    /// Lays the table out on a [`StandardDevice`] configured by the
    /// document.
    pub fn layout(&self, config: LayoutConfig) -> Result<TableLayout, MathtabError> {
        let device = StandardDevice::new(self.device.clone());
        let ctx = FormattingContext::new(Scaled::from_f32(self.mathsize));
        let mut ids = ElementIdGenerator::new();
        let spec = self.to_spec(device.factory(), &mut ids)?;
        log::debug!("laying out a {}x{} table document", spec.rows, spec.columns);
        Ok(TableFormatter::new(config).layout(&ctx, &device, &spec)?)
    }
}

/// The serialisable outcome of a layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutReport {
    pub bbox: BoundingBox,
    pub columns: Vec<ColumnGeometry>,
    pub rows: Vec<RowGeometry>,
    pub cells: Vec<PlacedCell>,
    pub rules: usize,
}

impl From<&TableLayout> for LayoutReport {
    fn from(layout: &TableLayout) -> Self {
        Self {
            bbox: layout.bbox,
            columns: layout.columns.clone(),
            rows: layout.rows.clone(),
            cells: layout.cells.clone(),
            rules: layout.rule_count,
        }
    }
}

/// Parses `json` as a [`TableDocument`] and lays it out.
pub fn layout_document(json: &str, config: LayoutConfig) -> Result<LayoutReport, MathtabError> {
    let document = TableDocument::from_json(json)?;
    let layout = document.layout(config)?;
    Ok(LayoutReport::from(&layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathtab_style::LineStyle;
    use mathtab_traits::StandardAreaFactory;

    fn document(json: &str) -> TableDocument {
        TableDocument::from_json(json).unwrap()
    }

    #[test]
    fn test_attributes_reach_the_spec() {
        let doc = document(
            r#"{
                "rows": [{ "cells": [{ "width": 1, "height": 1 }, { "width": 1, "height": 1 }] }],
                "frame": "dashed",
                "side": "left",
                "equalcolumns": "true",
                "align": "top 1",
                "columnlines": "solid none"
            }"#,
        );
        let spec = doc.to_spec(&StandardAreaFactory, &mut ElementIdGenerator::new()).unwrap();
        assert_eq!(spec.frame, LineStyle::Dashed);
        assert_eq!(spec.side, Side::Left);
        assert!(spec.equal_columns);
        assert_eq!(spec.align, TableAlign::at_row(RowAlign::Top, 1));
        assert_eq!(spec.column_lines.as_slice(), &[LineStyle::Solid, LineStyle::None]);
    }

    #[test]
    fn test_table_aligns_are_cell_defaults() {
        let doc = document(
            r#"{
                "rows": [{ "cells": [
                    { "width": 1, "height": 1 },
                    { "width": 1, "height": 1, "columnalign": "left" }
                ] }],
                "columnalign": "right"
            }"#,
        );
        let spec = doc.to_spec(&StandardAreaFactory, &mut ElementIdGenerator::new()).unwrap();
        assert_eq!(spec.cell(0, 0).unwrap().column_align, ColumnAlign::Right);
        assert_eq!(spec.cell(0, 1).unwrap().column_align, ColumnAlign::Left);
    }

    #[test]
    fn test_invalid_attribute_names_property() {
        let doc = document(r#"{ "rows": [{ "cells": [{ "width": 1, "height": 1 }] }], "frame": "wavy" }"#);
        let err = doc.to_spec(&StandardAreaFactory, &mut ElementIdGenerator::new()).unwrap_err();
        match err {
            MathtabError::Style(StyleParseError::InvalidValue { property, value }) => {
                assert_eq!(property, "frame");
                assert_eq!(value, "wavy");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_overlapping_cells_are_rejected() {
        let doc = document(
            r#"{ "rows": [{ "cells": [{ "width": 1, "height": 1, "columnspan": 2 }, { "width": 1, "height": 1 }] }] }"#,
        );
        assert!(matches!(doc.check(), Err(MathtabError::InvalidDocument(_))));
        let empty = document(r#"{ "rows": [] }"#);
        assert!(matches!(empty.check(), Err(MathtabError::InvalidDocument(_))));
    }
}
