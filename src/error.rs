use mathtab_layout::LayoutError;
use mathtab_style::StyleParseError;
use mathtab_traits::ContextError;
use thiserror::Error;

/// Everything that can go wrong between a table document and its layout.
#[derive(Error, Debug)]
pub enum MathtabError {
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Invalid attribute: {0}")]
    Style(#[from] StyleParseError),

    #[error("Formatting context error: {0}")]
    Context(#[from] ContextError),

    #[error("Table document is malformed: {0}")]
    InvalidDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
