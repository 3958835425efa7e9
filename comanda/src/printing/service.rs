//! Receipt print service - routes records to the right printer and keeps
//! the last receipt for reprints

use super::document::DocumentRenderer;
use super::renderer::{OrderReceiptRenderer, TableBillRenderer};
use super::storage::{ReceiptCache, ReceiptCacheError};
use super::viewer::DocumentViewer;
use comanda_printer::SerialPrinter;
use shared::error::ReceiptError;
use shared::models::{BrandingFooter, CachedReceipt, OrderReceipt, PrinterProfile, TableBill};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

#[derive(Debug, Error)]
pub enum PrintServiceError {
    #[error("Cache error: {0}")]
    Cache(#[from] ReceiptCacheError),

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] ReceiptError),

    #[error("Document error: {0}")]
    Document(#[from] std::io::Error),

    #[error("No receipt to reprint")]
    NothingToReprint,
}

pub type PrintServiceResult<T> = Result<T, PrintServiceError>;

/// Result of [`ReceiptPrintService::print_order`]
///
/// Printing and caching are independent: either may fail alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOutcome {
    pub printed: bool,
    pub cached: bool,
}

/// Receipt print service
///
/// Responsibilities:
/// - Pick the ESC/POS or document path from the configured profile
/// - Validate records before rendering
/// - Save every printed order receipt as the last receipt
#[derive(Clone)]
pub struct ReceiptPrintService {
    profile: PrinterProfile,
    cache: ReceiptCache,
    documents: DocumentRenderer,
    viewer: Arc<dyn DocumentViewer>,
    branding: Option<BrandingFooter>,
}

impl ReceiptPrintService {
    pub fn new(profile: PrinterProfile, cache: ReceiptCache, viewer: Arc<dyn DocumentViewer>) -> Self {
        Self {
            profile,
            cache,
            documents: DocumentRenderer::default(),
            viewer,
            branding: None,
        }
    }

    /// Store identity used on page documents
    pub fn with_branding(mut self, branding: Option<BrandingFooter>, logo_url: Option<String>) -> Self {
        self.branding = branding;
        self.documents = DocumentRenderer::new(logo_url);
        self
    }

    pub fn profile(&self) -> PrinterProfile {
        self.profile
    }

    // ========== Thermal ==========

    /// Render `receipt` for `profile` and send it to `printer`
    ///
    /// Never fails outward; a rejected record or a device failure is logged
    /// and reported as `false`.
    #[instrument(skip_all, fields(order_number = receipt.order_number, profile = %profile))]
    pub async fn print_thermal(
        &self,
        printer: &mut SerialPrinter,
        receipt: &OrderReceipt,
        profile: PrinterProfile,
    ) -> bool {
        if let Err(e) = receipt.validate() {
            warn!(error = %e, "Receipt rejected");
            return false;
        }

        let data = OrderReceiptRenderer::new(profile).render(receipt);
        printer.print(&data).await
    }

    /// Render `bill` for `profile` and send it to `printer`
    #[instrument(skip_all, fields(table = %bill.table_label, profile = %profile))]
    pub async fn print_bill_thermal(
        &self,
        printer: &mut SerialPrinter,
        bill: &TableBill,
        profile: PrinterProfile,
    ) -> bool {
        if let Err(e) = bill.validate() {
            warn!(error = %e, "Bill rejected");
            return false;
        }

        let data = TableBillRenderer::new(profile).render(bill);
        printer.print(&data).await
    }

    // ========== Page documents ==========

    /// Render `receipt` as a page document and open it for printing
    #[instrument(skip_all, fields(order_number = receipt.order_number))]
    pub async fn print_document(
        &self,
        receipt: &OrderReceipt,
        branding: Option<&BrandingFooter>,
    ) -> PrintServiceResult<()> {
        receipt.validate()?;

        let html = self.documents.render_order(receipt, branding);
        self.viewer
            .open(&format!("Comanda #{}", receipt.order_number), &html)
            .await?;
        Ok(())
    }

    /// Render `bill` as a page document and open it for printing
    #[instrument(skip_all, fields(table = %bill.table_label))]
    pub async fn print_bill_document(
        &self,
        bill: &TableBill,
        branding: Option<&BrandingFooter>,
    ) -> PrintServiceResult<()> {
        bill.validate()?;

        let html = self.documents.render_bill(bill, branding);
        self.viewer
            .open(&format!("Mesa {}", bill.table_label.trim()), &html)
            .await?;
        Ok(())
    }

    // ========== Last receipt ==========

    pub async fn save_last(&self, receipt: &OrderReceipt) -> PrintServiceResult<CachedReceipt> {
        Ok(self.cache.save(receipt).await?)
    }

    pub async fn get_last(&self) -> PrintServiceResult<Option<CachedReceipt>> {
        Ok(self.cache.get().await?)
    }

    pub async fn clear_last(&self) -> PrintServiceResult<bool> {
        Ok(self.cache.clear().await?)
    }

    // ========== Orchestration ==========

    /// Print an order on the configured printer, then keep it as the last receipt
    ///
    /// Invalid records are rejected before anything is printed or saved. A
    /// cache failure does not undo or block the print.
    #[instrument(skip_all, fields(order_number = receipt.order_number, profile = %self.profile))]
    pub async fn print_order(
        &self,
        printer: Option<&mut SerialPrinter>,
        receipt: &OrderReceipt,
    ) -> PrintServiceResult<PrintOutcome> {
        receipt.validate()?;

        let printed = self.route_receipt(printer, receipt).await;

        let cached = match self.cache.save(receipt).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Receipt not cached");
                false
            }
        };

        info!(printed, cached, "Order processed");
        Ok(PrintOutcome { printed, cached })
    }

    /// Print a table bill on the configured printer
    ///
    /// Bills are never cached.
    #[instrument(skip_all, fields(table = %bill.table_label, profile = %self.profile))]
    pub async fn print_bill(
        &self,
        printer: Option<&mut SerialPrinter>,
        bill: &TableBill,
    ) -> PrintServiceResult<bool> {
        bill.validate()?;

        if !self.profile.is_thermal() {
            return match self.print_bill_document(bill, self.branding.as_ref()).await {
                Ok(()) => Ok(true),
                Err(e) => {
                    error!(error = %e, "Bill document failed");
                    Ok(false)
                }
            };
        }

        match printer {
            Some(printer) => Ok(self.print_bill_thermal(printer, bill, self.profile).await),
            None => {
                warn!("No thermal printer for bill");
                Ok(false)
            }
        }
    }

    /// Print the last saved receipt again
    ///
    /// The slot is left untouched, so `saved_at` keeps the original time.
    #[instrument(skip_all)]
    pub async fn reprint_last(&self, printer: Option<&mut SerialPrinter>) -> PrintServiceResult<bool> {
        let cached = self
            .cache
            .get()
            .await?
            .ok_or(PrintServiceError::NothingToReprint)?;

        info!(order_number = cached.receipt.order_number, saved_at = cached.saved_at, "Reprinting");
        Ok(self.route_receipt(printer, &cached.receipt).await)
    }

    async fn route_receipt(&self, printer: Option<&mut SerialPrinter>, receipt: &OrderReceipt) -> bool {
        if !self.profile.is_thermal() {
            return match self.print_document(receipt, self.branding.as_ref()).await {
                Ok(()) => true,
                Err(e) => {
                    error!(error = %e, "Receipt document failed");
                    false
                }
            };
        }

        match printer {
            Some(printer) => self.print_thermal(printer, receipt, self.profile).await,
            None => {
                warn!("No thermal printer for receipt");
                false
            }
        }
    }
}
