//! Error types for the shared crate

use rust_decimal::Decimal;
use thiserror::Error;

/// A record that must not reach the renderers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReceiptError {
    #[error("Line {index} has quantity 0")]
    ZeroQuantity { index: usize },

    #[error("{field} must not be negative: {value}")]
    NegativeAmount { field: &'static str, value: Decimal },
}

pub type ReceiptResult<T> = Result<T, ReceiptError>;

/// Unknown printer profile name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown printer profile: {0} (expected narrow, standard or page)")]
pub struct ProfileParseError(pub String);
