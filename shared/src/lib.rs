//! Shared types for Comanda
//!
//! Receipt records, printer profiles and the errors raised when validating
//! them at the boundary.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ProfileParseError, ReceiptError, ReceiptResult};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
