pub mod fixtures;

use mathtab::{LayoutConfig, LayoutReport, MathtabError, TableDocument, TableLayout, layout_document};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Lays out a JSON table document through the public entry point.
pub fn layout_json(document: &Value) -> Result<LayoutReport, MathtabError> {
    init_logger();
    let json = serde_json::to_string(document)?;
    layout_document(&json, LayoutConfig::default())
}

/// Lays out a document keeping the composite area.
pub fn layout_table(document: &Value) -> Result<TableLayout, MathtabError> {
    init_logger();
    let document: TableDocument = serde_json::from_value(document.clone())?;
    document.layout(LayoutConfig::default())
}

pub fn px(value: f32) -> mathtab::Scaled {
    mathtab::Scaled::from_f32(value)
}
