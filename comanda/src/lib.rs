//! Comanda - receipt printing for delivery and table service
//!
//! # Module structure
//!
//! ```text
//! comanda/src/
//! ├── core/          # configuration
//! ├── printing/      # renderers, document viewer, receipt cache, print service
//! └── utils/         # logging
//! ```
//!
//! Low-level ESC/POS and serial handling lives in `comanda-printer`; the
//! record types live in `shared`.

pub mod core;
pub mod printing;
pub mod utils;

pub use core::Config;
pub use printing::{
    DocumentRenderer, DocumentViewer, OrderReceiptRenderer, PrintOutcome, PrintServiceError,
    PrintServiceResult, ReceiptCache, ReceiptCacheError, ReceiptPrintService, SystemViewer,
    TableBillRenderer,
};
pub use utils::init_logger;
