//! # comanda-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Layout primitives (currency, padded lines, dividers)
//! - ESC/POS command building
//! - Windows-1252 encoding for Latin receipt text
//! - Serial device connections (9600 baud)
//!
//! Business logic (WHAT to print) stays in the `comanda` crate:
//! - Order receipt and table bill rendering
//! - Page documents, last-receipt cache, orchestration
//!
//! ## Example
//!
//! ```ignore
//! use comanda_printer::{EscPosBuilder, SerialPrinter, SystemSerialHost};
//! use std::sync::Arc;
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.double_size();
//! builder.line("COMANDA");
//! builder.reset_size();
//! builder.sep_single();
//! builder.left();
//! builder.line("Cliente: Maria");
//! builder.feed(4);
//! builder.cut();
//!
//! let mut printer = SerialPrinter::new(Arc::new(SystemSerialHost::new(None)));
//! if printer.connect().await {
//!     printer.print(&builder.build()).await;
//!     printer.disconnect().await;
//! }
//! ```

mod encoding;
mod error;
mod escpos;
mod serial;

pub mod layout;

// Re-exports
pub use encoding::{convert_to_cp1252, text_width};
pub use error::{PrintError, PrintResult};
pub use escpos::EscPosBuilder;
pub use layout::{divider, double_columns, format_currency, money, pad_line};
pub use serial::{DEFAULT_BAUD_RATE, PortHandle, SerialHost, SerialPrinter, SystemSerialHost};
