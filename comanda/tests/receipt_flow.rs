//! Order flow against a file-backed cache and an in-process serial device

use async_trait::async_trait;
use comanda::{DocumentViewer, PrintOutcome, ReceiptCache, ReceiptPrintService};
use comanda_printer::{PortHandle, SerialHost, SerialPrinter};
use rust_decimal::Decimal;
use shared::models::{OrderReceipt, PrinterProfile, ReceiptLine, ServiceType};
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct CapturePort(Capture);

impl PortHandle for CapturePort {
    fn writer(&mut self) -> std::io::Result<Box<dyn Write + Send>> {
        Ok(Box::new(self.0.clone()))
    }
}

struct CaptureHost(Capture);

impl SerialHost for CaptureHost {
    fn is_available(&self) -> bool {
        true
    }

    fn request_port(&self) -> Option<String> {
        Some("/dev/ttyS0".to_string())
    }

    fn open(&self, _path: &str, baud_rate: u32) -> std::io::Result<Box<dyn PortHandle>> {
        assert_eq!(baud_rate, 9600);
        Ok(Box::new(CapturePort(self.0.clone())))
    }
}

struct NoViewer;

#[async_trait]
impl DocumentViewer for NoViewer {
    async fn open(&self, _title: &str, _html: &str) -> std::io::Result<()> {
        Err(std::io::Error::other("no page printer in this test"))
    }
}

fn order_42() -> OrderReceipt {
    OrderReceipt {
        order_number: 42,
        issued_at: "16/10/2026 20:15".to_string(),
        customer_name: "Maria Souza".to_string(),
        customer_contact: "(11) 98765-4321".to_string(),
        address: Some("Rua das Flores, 120".to_string()),
        address_reference: None,
        payment_method: "Dinheiro".to_string(),
        change_for: Some("R$ 100,00".to_string()),
        lines: vec![
            ReceiptLine {
                quantity: 1,
                name: "Pizza Calabresa".to_string(),
                note: None,
            },
            ReceiptLine {
                quantity: 2,
                name: "Coca-Cola".to_string(),
                note: Some("sem gelo".to_string()),
            },
        ],
        total: Decimal::new(5850, 2),
        delivery_fee: Decimal::new(500, 2),
        service_type: ServiceType::Delivery,
        table_label: None,
    }
}

#[tokio::test]
async fn test_print_order_and_reprint_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("receipts.redb");

    let capture = Capture::default();
    let mut printer = SerialPrinter::new(Arc::new(CaptureHost(capture.clone())));
    assert!(printer.connect().await);
    assert_eq!(printer.port_name(), Some("/dev/ttyS0"));

    let before = chrono::Utc::now().timestamp_millis();
    {
        let cache = ReceiptCache::open(&cache_path).unwrap();
        let service = ReceiptPrintService::new(PrinterProfile::Standard, cache, Arc::new(NoViewer));

        let outcome = service
            .print_order(Some(&mut printer), &order_42())
            .await
            .unwrap();
        assert_eq!(outcome, PrintOutcome { printed: true, cached: true });
    }

    // Latin text is Windows-1252 on the wire, ASCII content is unchanged
    let printed = capture.text();
    assert!(printed.contains(&format!("\n{}\n", "-".repeat(48))));
    assert!(!printed.contains(&"-".repeat(49)));
    assert!(printed.contains("R$ 58,50"));
    assert!(printed.contains("R$ 5,00"));
    assert!(printed.contains("2x Coca-Cola\n   Obs: sem gelo\n"));

    capture.0.lock().unwrap().clear();

    // a fresh process sees the same slot
    let cache = ReceiptCache::open(&cache_path).unwrap();
    let cached = cache.get().await.unwrap().unwrap();
    assert_eq!(cached.receipt, order_42());
    assert!(cached.saved_at >= before);

    let service = ReceiptPrintService::new(PrinterProfile::Standard, cache, Arc::new(NoViewer));
    assert!(service.reprint_last(Some(&mut printer)).await.unwrap());
    assert_eq!(capture.text(), printed);

    printer.disconnect().await;
    assert!(!printer.is_connected());
    assert!(!service.reprint_last(Some(&mut printer)).await.unwrap());
}

#[tokio::test]
async fn test_page_profile_failure_keeps_receipt() {
    let cache = ReceiptCache::open_in_memory().unwrap();
    let service = ReceiptPrintService::new(PrinterProfile::Page, cache, Arc::new(NoViewer));

    let outcome = service.print_order(None, &order_42()).await.unwrap();
    assert_eq!(outcome, PrintOutcome { printed: false, cached: true });

    let last = service.get_last().await.unwrap().unwrap();
    assert_eq!(last.receipt.order_number, 42);
}
