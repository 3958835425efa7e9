//! Table Bill Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::receipt::ensure_non_negative;
use crate::error::{ReceiptError, ReceiptResult};

/// Consumed item on a table bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLineItem {
    pub quantity: u32,
    pub name: String,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// Payment applied to a table bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillPayment {
    pub method: String,
    pub amount: Decimal,
}

/// Consolidated bill for a seated table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableBill {
    pub table_label: String,
    pub issued_at: String,
    /// e.g. "1h 25min"
    pub occupancy_duration: String,
    #[serde(default)]
    pub line_items: Vec<BillLineItem>,
    pub subtotal: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub payments: Vec<BillPayment>,
    #[serde(default)]
    pub change_given: Option<Decimal>,
}

impl TableBill {
    /// Reject records the renderers must never see
    pub fn validate(&self) -> ReceiptResult<()> {
        for (index, item) in self.line_items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(ReceiptError::ZeroQuantity { index });
            }
            ensure_non_negative("unit_price", item.unit_price)?;
            ensure_non_negative("line_total", item.line_total)?;
        }
        ensure_non_negative("subtotal", self.subtotal)?;
        ensure_non_negative("total", self.total)?;
        for payment in &self.payments {
            ensure_non_negative("payment", payment.amount)?;
        }
        if let Some(change) = self.change_given {
            ensure_non_negative("change_given", change)?;
        }
        Ok(())
    }

    /// Change handed back, only when there is some
    pub fn change(&self) -> Option<Decimal> {
        self.change_given.filter(|c| *c > Decimal::ZERO)
    }
}
