//! Thermal ticket renderers
//!
//! Renders order receipts (comandas) and table bills into ESC/POS format.
//! Rendering is pure; records are validated before they get here.

use super::present;
use comanda_printer::{EscPosBuilder, money};
use rust_decimal::Decimal;
use shared::models::{
    BillLineItem, DEFAULT_THANK_YOU, OrderReceipt, PrinterProfile, ReceiptLine, TableBill,
};

/// Header printed above the order number
const HEADER_LABEL: &str = "COMANDA";
/// Lines fed before the cut so the last line clears the blade
const FEED_LINES: u8 = 4;

/// Order receipt renderer
///
/// Lays out a comanda for the kitchen and the delivery driver: order
/// number, customer block, items with notes, totals and the service banner.
pub struct OrderReceiptRenderer {
    width: usize,
}

impl OrderReceiptRenderer {
    pub fn new(profile: PrinterProfile) -> Self {
        Self {
            width: profile.columns(),
        }
    }

    /// Render a receipt to ESC/POS bytes (Windows-1252 text)
    pub fn render(&self, receipt: &OrderReceipt) -> Vec<u8> {
        self.compose(receipt).build()
    }

    /// Render a receipt keeping UTF-8 text, for previews
    pub fn render_raw(&self, receipt: &OrderReceipt) -> Vec<u8> {
        self.compose(receipt).build_raw()
    }

    fn compose(&self, receipt: &OrderReceipt) -> EscPosBuilder {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, receipt);
        self.render_customer(&mut b, receipt);
        self.render_items(&mut b, &receipt.lines);
        self.render_totals(&mut b, receipt);
        self.render_banner(&mut b, receipt);

        b.feed(FEED_LINES);
        b.cut();
        b
    }

    fn render_header(&self, b: &mut EscPosBuilder, receipt: &OrderReceipt) {
        b.center();
        b.bold();
        b.line(HEADER_LABEL);
        b.large_size();
        b.line(&format!("#{}", receipt.order_number));
        b.reset_size();
        b.bold_off();
        b.line(&receipt.issued_at);
        b.newline();
    }

    fn render_customer(&self, b: &mut EscPosBuilder, receipt: &OrderReceipt) {
        b.left();
        b.sep_single();

        b.line(&format!("Cliente: {}", receipt.customer_name));
        b.line(&format!("Contato: {}", receipt.customer_contact));
        if let Some(address) = present(&receipt.address) {
            b.line(&format!("Endereço: {}", address));
        }
        if let Some(reference) = present(&receipt.address_reference) {
            b.line(&format!("Referência: {}", reference));
        }
        b.line(&format!("Pagamento: {}", receipt.payment_method));
        if let Some(change_for) = present(&receipt.change_for) {
            b.line(&format!("Troco para: {}", change_for));
        }
    }

    fn render_items(&self, b: &mut EscPosBuilder, lines: &[ReceiptLine]) {
        b.sep_single();
        b.bold();
        b.line("ITENS");
        b.bold_off();
        b.newline();

        for line in lines {
            b.line(&format!("{}x {}", line.quantity, line.name));
            if let Some(note) = present(&line.note) {
                render_note(b, note);
            }
        }

        b.newline();
        b.sep_single();
    }

    fn render_totals(&self, b: &mut EscPosBuilder, receipt: &OrderReceipt) {
        if receipt.delivery_fee > Decimal::ZERO {
            b.line_lr("TAXA ENTREGA:", &money(receipt.delivery_fee));
        }

        b.bold();
        b.double_size();
        b.line_lr_double("TOTAL:", &money(receipt.total));
        b.reset_size();
        b.bold_off();
    }

    /// Table label wins over the service type
    fn render_banner(&self, b: &mut EscPosBuilder, receipt: &OrderReceipt) {
        b.newline();
        b.center();
        b.bold();
        match receipt.table_label() {
            Some(label) => {
                b.double_size();
                b.line(&format!("MESA {}", label));
                b.reset_size();
            }
            None => {
                b.line(&format!("[ {} ]", receipt.service_type.banner()));
            }
        }
        b.bold_off();
    }
}

/// Note lines stay indented under their item
fn render_note(b: &mut EscPosBuilder, note: &str) {
    let mut parts = note.lines().map(str::trim).filter(|l| !l.is_empty());
    if let Some(first) = parts.next() {
        b.line(&format!("   Obs: {}", first));
    }
    for part in parts {
        b.line(&format!("   {}", part));
    }
}

impl Default for OrderReceiptRenderer {
    fn default() -> Self {
        Self::new(PrinterProfile::default())
    }
}

/// Table bill renderer
///
/// Consolidated bill handed to a seated table when it closes.
pub struct TableBillRenderer {
    width: usize,
}

impl TableBillRenderer {
    pub fn new(profile: PrinterProfile) -> Self {
        Self {
            width: profile.columns(),
        }
    }

    /// Render a bill to ESC/POS bytes (Windows-1252 text)
    pub fn render(&self, bill: &TableBill) -> Vec<u8> {
        self.compose(bill).build()
    }

    /// Render a bill keeping UTF-8 text, for previews
    pub fn render_raw(&self, bill: &TableBill) -> Vec<u8> {
        self.compose(bill).build_raw()
    }

    fn compose(&self, bill: &TableBill) -> EscPosBuilder {
        let mut b = EscPosBuilder::new(self.width);

        self.render_header(&mut b, bill);
        self.render_items(&mut b, &bill.line_items);
        self.render_totals(&mut b, bill);
        self.render_payments(&mut b, bill);
        self.render_footer(&mut b);

        b
    }

    fn render_header(&self, b: &mut EscPosBuilder, bill: &TableBill) {
        b.center();
        b.bold();
        b.large_size();
        b.line(&format!("MESA {}", bill.table_label.trim()));
        b.reset_size();
        b.bold_off();
        b.line(&bill.issued_at);
        b.line(&format!("Permanência: {}", bill.occupancy_duration));
        b.newline();
    }

    fn render_items(&self, b: &mut EscPosBuilder, items: &[BillLineItem]) {
        b.left();
        b.sep_single();
        b.bold();
        b.line("CONSUMO");
        b.bold_off();
        b.newline();

        for item in items {
            b.line(&format!("{}x {}", item.quantity, item.name));
            b.line_lr(
                &format!("   {} un", money(item.unit_price)),
                &money(item.line_total),
            );
        }

        b.newline();
        b.sep_single();
    }

    fn render_totals(&self, b: &mut EscPosBuilder, bill: &TableBill) {
        b.line_lr("SUBTOTAL:", &money(bill.subtotal));

        b.bold();
        b.double_size();
        b.line_lr_double("TOTAL:", &money(bill.total));
        b.reset_size();
        b.bold_off();
    }

    fn render_payments(&self, b: &mut EscPosBuilder, bill: &TableBill) {
        b.sep_double();
        b.bold();
        b.line("PAGAMENTOS");
        b.bold_off();

        for payment in &bill.payments {
            b.line_lr(&payment.method, &money(payment.amount));
        }

        if let Some(change) = bill.change() {
            b.bold();
            b.line_lr("TROCO:", &money(change));
            b.bold_off();
        }
    }

    fn render_footer(&self, b: &mut EscPosBuilder) {
        b.newline();
        b.center();
        b.line(DEFAULT_THANK_YOU);
        b.line("Volte sempre!");

        b.feed(FEED_LINES);
        b.cut();
    }
}

impl Default for TableBillRenderer {
    fn default() -> Self {
        Self::new(PrinterProfile::default())
    }
}
