//! Order Receipt Model (comanda)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ReceiptError, ReceiptResult};

/// How the order leaves the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Delivery,
    Pickup,
    DineIn,
}

impl ServiceType {
    /// Banner text printed at the bottom of the comanda
    pub fn banner(self) -> &'static str {
        match self {
            Self::Delivery => "ENTREGAR",
            Self::Pickup => "RETIRAR",
            Self::DineIn => "MESA",
        }
    }
}

/// One ordered item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub quantity: u32,
    pub name: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Order receipt printed when the order is placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_number: i64,
    /// Pre-formatted local time
    pub issued_at: String,
    pub customer_name: String,
    pub customer_contact: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub address_reference: Option<String>,
    pub payment_method: String,
    /// Amount the customer will pay with
    #[serde(default)]
    pub change_for: Option<String>,
    #[serde(default)]
    pub lines: Vec<ReceiptLine>,
    pub total: Decimal,
    #[serde(default)]
    pub delivery_fee: Decimal,
    pub service_type: ServiceType,
    /// Point-of-sale table; overrides the service banner
    #[serde(default)]
    pub table_label: Option<String>,
}

impl OrderReceipt {
    /// Reject records the renderers must never see
    pub fn validate(&self) -> ReceiptResult<()> {
        if let Some(index) = self.lines.iter().position(|l| l.quantity == 0) {
            return Err(ReceiptError::ZeroQuantity { index });
        }
        ensure_non_negative("total", self.total)?;
        ensure_non_negative("delivery_fee", self.delivery_fee)?;
        Ok(())
    }

    /// Table label when present and not blank
    pub fn table_label(&self) -> Option<&str> {
        self.table_label
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

/// Last saved receipt with its save time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedReceipt {
    pub receipt: OrderReceipt,
    /// Unix timestamp (millis)
    pub saved_at: i64,
}

pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> ReceiptResult<()> {
    if value < Decimal::ZERO {
        return Err(ReceiptError::NegativeAmount { field, value });
    }
    Ok(())
}
