use serde_json::{Map, Value, json};

/// A pre-measured cell of the given pixel box.
pub fn cell(width: f32, height: f32, depth: f32) -> Value {
    json!({ "width": width, "height": height, "depth": depth })
}

/// A cell spanning `rowspan` rows and `columnspan` columns.
pub fn spanning_cell(width: f32, height: f32, depth: f32, rowspan: usize, columnspan: usize) -> Value {
    json!({
        "width": width,
        "height": height,
        "depth": depth,
        "rowspan": rowspan,
        "columnspan": columnspan
    })
}

pub fn row(cells: Vec<Value>) -> Value {
    json!({ "cells": cells })
}

pub fn labelled_row(cells: Vec<Value>, label: Value) -> Value {
    json!({ "cells": cells, "label": label })
}

/// A table document at 18px with the given rows and attributes.
pub fn table(rows: Vec<Value>, attributes: Value) -> Value {
    let mut document = Map::new();
    document.insert("mathsize".to_string(), json!(18.0));
    document.insert("rows".to_string(), Value::Array(rows));
    if let Value::Object(attributes) = attributes {
        document.extend(attributes);
    }
    Value::Object(document)
}

/// Same as [`table`] with no spacing between rows and columns.
pub fn tight_table(rows: Vec<Value>, attributes: Value) -> Value {
    let mut merged = json!({ "rowspacing": "0px", "columnspacing": "0px" });
    if let (Value::Object(base), Value::Object(extra)) = (&mut merged, attributes) {
        base.extend(extra);
    }
    table(rows, merged)
}
