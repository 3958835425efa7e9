//! Receipt and Bill Printing Module
//!
//! - Thermal printing: ESC/POS tickets sent over a serial connection
//! - Page printing: HTML documents opened with the print dialog
//! - Last receipt: a single cached slot used for reprints

pub mod document;
pub mod renderer;
pub mod service;
pub mod storage;
pub mod viewer;

pub use document::DocumentRenderer;
pub use renderer::{OrderReceiptRenderer, TableBillRenderer};
pub use service::{PrintOutcome, PrintServiceError, PrintServiceResult, ReceiptPrintService};
pub use storage::{ReceiptCache, ReceiptCacheError, ReceiptCacheResult};
pub use viewer::{DocumentViewer, SystemViewer};

/// Optional text that is present and not blank
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
