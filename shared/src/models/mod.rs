//! Data models
//!
//! Records handed to the printing subsystem by the order-management and
//! store-configuration surfaces. Money is `rust_decimal::Decimal`.

pub mod branding;
pub mod printer_profile;
pub mod receipt;
pub mod table_bill;

// Re-exports
pub use branding::*;
pub use printer_profile::*;
pub use receipt::*;
pub use table_bill::*;
