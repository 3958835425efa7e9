//! Page-printer document renderer
//!
//! Builds a complete, self-contained HTML page for A4/letter printers. The
//! page opens the print dialog as soon as it has loaded.

use super::present;
use comanda_printer::money;
use rust_decimal::Decimal;
use shared::models::{BrandingFooter, DEFAULT_THANK_YOU, OrderReceipt, TableBill};

const STYLE: &str = r#"
body { font-family: "Helvetica Neue", Arial, sans-serif; margin: 0; padding: 24px; color: #111; background: #fff; }
.receipt { max-width: 640px; margin: 0 auto; }
.center { text-align: center; }
.logo { max-height: 96px; margin-bottom: 8px; }
h1 { font-size: 20px; margin: 0; letter-spacing: 2px; }
.number { font-size: 40px; font-weight: bold; margin: 4px 0; }
.muted { color: #555; font-size: 13px; }
.section { margin-top: 14px; border-top: 1px dashed #111; padding-top: 10px; }
.section h3 { margin: 0 0 6px 0; font-size: 14px; text-transform: uppercase; }
.line { display: flex; justify-content: space-between; gap: 12px; font-size: 14px; }
.note { color: #555; font-size: 12px; padding-left: 24px; }
.total { font-size: 22px; font-weight: bold; }
.banner { margin-top: 18px; font-size: 22px; font-weight: bold; letter-spacing: 2px; }
.table { font-size: 36px; font-weight: bold; }
.footer { margin-top: 22px; border-top: 1px solid #111; padding-top: 10px; font-size: 13px; }
@media print { body { padding: 0; } }
"#;

/// HTML document renderer
#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    logo_url: Option<String>,
}

impl DocumentRenderer {
    pub fn new(logo_url: Option<String>) -> Self {
        Self {
            logo_url: logo_url.filter(|url| !url.trim().is_empty()),
        }
    }

    /// Render an order receipt as a print-on-load page
    pub fn render_order(&self, receipt: &OrderReceipt, branding: Option<&BrandingFooter>) -> String {
        let mut body = self.render_logo();

        body.push_str(&format!(
            "<div class=\"center\"><h1>COMANDA</h1><div class=\"number\">#{}</div>\
             <div class=\"muted\">{}</div></div>",
            receipt.order_number,
            esc(&receipt.issued_at)
        ));

        body.push_str("<div class=\"section\"><h3>Cliente</h3>");
        body.push_str(&field("Nome", &receipt.customer_name));
        body.push_str(&field("Contato", &receipt.customer_contact));
        if let Some(address) = present(&receipt.address) {
            body.push_str(&field("Endereço", address));
        }
        if let Some(reference) = present(&receipt.address_reference) {
            body.push_str(&field("Referência", reference));
        }
        body.push_str(&field("Pagamento", &receipt.payment_method));
        if let Some(change_for) = present(&receipt.change_for) {
            body.push_str(&field("Troco para", change_for));
        }
        body.push_str("</div>");

        body.push_str("<div class=\"section\"><h3>Itens</h3>");
        for line in &receipt.lines {
            body.push_str(&format!(
                "<div class=\"line\"><span>{}x {}</span></div>",
                line.quantity,
                esc(&line.name)
            ));
            if let Some(note) = present(&line.note) {
                body.push_str(&format!("<div class=\"note\">Obs: {}</div>", esc(note)));
            }
        }
        body.push_str("</div>");

        body.push_str("<div class=\"section\">");
        if receipt.delivery_fee > Decimal::ZERO {
            body.push_str(&amount_line("Taxa de entrega", receipt.delivery_fee, ""));
        }
        body.push_str(&amount_line("TOTAL", receipt.total, " total"));
        body.push_str("</div>");

        match receipt.table_label() {
            Some(label) => body.push_str(&format!(
                "<div class=\"center banner table\">MESA {}</div>",
                esc(label)
            )),
            None => body.push_str(&format!(
                "<div class=\"center banner\">[ {} ]</div>",
                receipt.service_type.banner()
            )),
        }

        body.push_str(&render_footer(branding));

        html_shell(&format!("Comanda #{}", receipt.order_number), &body)
    }

    /// Render a table bill as a print-on-load page
    pub fn render_bill(&self, bill: &TableBill, branding: Option<&BrandingFooter>) -> String {
        let mut body = self.render_logo();

        body.push_str(&format!(
            "<div class=\"center\"><div class=\"table\">MESA {}</div>\
             <div class=\"muted\">{}</div><div class=\"muted\">Permanência: {}</div></div>",
            esc(bill.table_label.trim()),
            esc(&bill.issued_at),
            esc(&bill.occupancy_duration)
        ));

        body.push_str("<div class=\"section\"><h3>Consumo</h3>");
        for item in &bill.line_items {
            body.push_str(&format!(
                "<div class=\"line\"><span>{}x {}</span><span>{}</span></div>\
                 <div class=\"note\">{} un</div>",
                item.quantity,
                esc(&item.name),
                esc(&money(item.line_total)),
                esc(&money(item.unit_price))
            ));
        }
        body.push_str("</div>");

        body.push_str("<div class=\"section\">");
        body.push_str(&amount_line("Subtotal", bill.subtotal, ""));
        body.push_str(&amount_line("TOTAL", bill.total, " total"));
        body.push_str("</div>");

        body.push_str("<div class=\"section\"><h3>Pagamentos</h3>");
        for payment in &bill.payments {
            body.push_str(&amount_line(&payment.method, payment.amount, ""));
        }
        if let Some(change) = bill.change() {
            body.push_str(&amount_line("Troco", change, " total"));
        }
        body.push_str("</div>");

        body.push_str(&render_footer(branding));

        html_shell(&format!("Mesa {}", bill.table_label.trim()), &body)
    }

    fn render_logo(&self) -> String {
        match &self.logo_url {
            Some(url) => format!(
                "<div class=\"center\"><img class=\"logo\" src=\"{}\" alt=\"logo\"/></div>",
                esc(url)
            ),
            None => String::new(),
        }
    }
}

fn render_footer(branding: Option<&BrandingFooter>) -> String {
    let Some(footer) = branding else {
        return format!("<div class=\"center footer\">{}</div>", esc(DEFAULT_THANK_YOU));
    };

    let mut out = String::from("<div class=\"center footer\">");
    if !footer.name.trim().is_empty() {
        out.push_str(&format!("<strong>{}</strong><br/>", esc(&footer.name)));
    }
    for value in [&footer.address, &footer.phone, &footer.contact_handle]
        .into_iter()
        .filter_map(present)
    {
        out.push_str(&format!("<div class=\"muted\">{}</div>", esc(value)));
    }
    out.push_str(&format!("<p>{}</p></div>", esc(footer.message())));
    out
}

fn field(label: &str, value: &str) -> String {
    format!(
        "<div class=\"line\"><span>{}:</span><span>{}</span></div>",
        esc(label),
        esc(value)
    )
}

fn amount_line(label: &str, value: Decimal, class: &str) -> String {
    format!(
        "<div class=\"line{}\"><span>{}</span><span>{}</span></div>",
        class,
        esc(label),
        esc(&money(value))
    )
}

/// Escape text for HTML element content and quoted attribute values
pub fn esc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn html_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>{}</title>
<style>{}</style>
</head>
<body><div class="receipt">{}</div>
<script>window.onload = function () {{ window.print(); }};</script>
</body>
</html>"#,
        esc(title),
        STYLE,
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BillLineItem, BillPayment, ReceiptLine, ServiceType};

    fn create_test_receipt() -> OrderReceipt {
        OrderReceipt {
            order_number: 42,
            issued_at: "16/10/2026 20:15".to_string(),
            customer_name: "Maria <b>Souza</b>".to_string(),
            customer_contact: "(11) 98765-4321".to_string(),
            address: Some("Rua \"A\" & Cia".to_string()),
            address_reference: None,
            payment_method: "Pix".to_string(),
            change_for: None,
            lines: vec![ReceiptLine {
                quantity: 2,
                name: "Coca-Cola".to_string(),
                note: Some("sem gelo".to_string()),
            }],
            total: Decimal::new(5850, 2),
            delivery_fee: Decimal::new(500, 2),
            service_type: ServiceType::Delivery,
            table_label: None,
        }
    }

    fn create_test_bill() -> TableBill {
        TableBill {
            table_label: "3".to_string(),
            issued_at: "16/10/2026 23:00".to_string(),
            occupancy_duration: "2h 05min".to_string(),
            line_items: vec![BillLineItem {
                quantity: 1,
                name: "Picanha".to_string(),
                unit_price: Decimal::new(8900, 2),
                line_total: Decimal::new(8900, 2),
            }],
            subtotal: Decimal::new(8900, 2),
            total: Decimal::new(9790, 2),
            payments: vec![BillPayment {
                method: "Crédito".to_string(),
                amount: Decimal::new(9790, 2),
            }],
            change_given: None,
        }
    }

    #[test]
    fn test_esc() {
        assert_eq!(
            esc(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(esc("Pão de queijo"), "Pão de queijo");
    }

    #[test]
    fn test_render_order_document() {
        let html = DocumentRenderer::default().render_order(&create_test_receipt(), None);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("window.print()"));
        assert!(html.contains("#42"));
        assert!(html.contains("R$ 58,50"));
        assert!(html.contains("R$ 5,00"));
        assert!(html.contains("Obs: sem gelo"));
        assert!(html.contains("[ ENTREGAR ]"));
        assert!(html.contains(DEFAULT_THANK_YOU));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_fields_are_escaped() {
        let html = DocumentRenderer::default().render_order(&create_test_receipt(), None);

        assert!(html.contains("Maria &lt;b&gt;Souza&lt;/b&gt;"));
        assert!(!html.contains("<b>Souza</b>"));
        assert!(html.contains("Rua &quot;A&quot; &amp; Cia"));
    }

    #[test]
    fn test_logo_url_escaped() {
        let renderer = DocumentRenderer::new(Some("https://x.test/logo.png\" onerror=\"alert(1)".to_string()));
        let html = renderer.render_order(&create_test_receipt(), None);

        assert!(html.contains("src=\"https://x.test/logo.png&quot; onerror=&quot;alert(1)\""));
    }

    #[test]
    fn test_table_label_replaces_banner() {
        let mut receipt = create_test_receipt();
        receipt.service_type = ServiceType::DineIn;
        receipt.table_label = Some("12".to_string());

        let html = DocumentRenderer::default().render_order(&receipt, None);
        assert!(html.contains("MESA 12"));
        assert!(!html.contains("[ MESA ]"));
    }

    #[test]
    fn test_branding_footer() {
        let branding = BrandingFooter {
            name: "Pizzaria <Donatello>".to_string(),
            address: Some("Av. Paulista, 1000".to_string()),
            phone: None,
            contact_handle: Some("@donatello".to_string()),
            custom_message: Some("Volte sempre!".to_string()),
        };

        let html = DocumentRenderer::default().render_order(&create_test_receipt(), Some(&branding));
        assert!(html.contains("<strong>Pizzaria &lt;Donatello&gt;</strong>"));
        assert!(html.contains("Av. Paulista, 1000"));
        assert!(html.contains("@donatello"));
        assert!(html.contains("Volte sempre!"));
        assert!(!html.contains(DEFAULT_THANK_YOU));
    }

    #[test]
    fn test_blank_optionals_skipped() {
        let mut receipt = create_test_receipt();
        receipt.address = Some("   ".to_string());
        receipt.address_reference = Some(String::new());
        receipt.change_for = Some(" ".to_string());
        let branding = BrandingFooter {
            name: "Pizzaria Donatello".to_string(),
            address: Some("  ".to_string()),
            phone: Some(String::new()),
            contact_handle: None,
            custom_message: None,
        };

        let html = DocumentRenderer::default().render_order(&receipt, Some(&branding));
        assert!(!html.contains("Endereço"));
        assert!(!html.contains("Referência"));
        assert!(!html.contains("Troco para"));
        assert!(!html.contains("<div class=\"muted\">  </div>"));
        assert!(!html.contains("<div class=\"muted\"></div>"));
    }

    #[test]
    fn test_render_bill_document() {
        let html = DocumentRenderer::default().render_bill(&create_test_bill(), None);

        assert!(html.contains("MESA 3"));
        assert!(html.contains("Permanência: 2h 05min"));
        assert!(html.contains("R$ 89,00 un"));
        assert!(html.contains("R$ 97,90"));
        assert!(html.contains("Crédito"));
        assert!(!html.contains("Troco"));
        assert!(html.contains("window.print()"));
    }

    #[test]
    fn test_bill_document_change() {
        let mut bill = create_test_bill();
        bill.change_given = Some(Decimal::new(210, 2));

        let html = DocumentRenderer::default().render_bill(&bill, None);
        assert!(html.contains("Troco"));
        assert!(html.contains("R$ 2,10"));
    }
}
