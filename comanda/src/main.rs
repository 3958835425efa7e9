//! # Comanda CLI
//!
//! ## Usage
//!
//! ```bash
//! # List serial ports
//! comanda ports
//!
//! # Print an order receipt and keep it for reprints
//! comanda print order.json
//!
//! # Print a table bill on a 58mm printer
//! comanda --profile narrow bill mesa-7.json
//!
//! # Print the last receipt again
//! comanda reprint
//!
//! # Write the ESC/POS bytes (or the HTML page) to a file
//! comanda render order.json --out order.bin
//! comanda render order.json --html --out order.html
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use comanda::{
    Config, DocumentRenderer, OrderReceiptRenderer, ReceiptCache, ReceiptPrintService,
    SystemViewer, init_logger,
};
use comanda_printer::{SerialPrinter, SystemSerialHost};
use serde::de::DeserializeOwned;
use shared::models::{OrderReceipt, PrinterProfile, TableBill};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Comanda - receipt printing for thermal and page printers
#[derive(Parser, Debug)]
#[command(name = "comanda")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer width class: narrow, standard or page (overrides PRINTER_PROFILE)
    #[arg(long, global = true)]
    profile: Option<PrinterProfile>,

    /// Serial device path (overrides SERIAL_PORT)
    #[arg(long, global = true)]
    port: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List serial ports
    Ports,
    /// Print an order receipt from a JSON file and keep it as the last receipt
    Print {
        file: PathBuf,
    },
    /// Print a table bill from a JSON file
    Bill {
        file: PathBuf,
    },
    /// Print the last saved receipt again
    Reprint,
    /// Show the last saved receipt
    Last {
        /// Remove it instead
        #[arg(long)]
        clear: bool,
    },
    /// Render an order receipt without printing
    Render {
        file: PathBuf,

        /// Output file (defaults to a text preview on stdout)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Render the page document instead of ESC/POS bytes
        #[arg(long)]
        html: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(profile) = cli.profile {
        config.printer_profile = profile;
    }
    if let Some(port) = cli.port {
        config.serial_port = Some(port);
    }

    std::fs::create_dir_all(&config.work_dir)
        .with_context(|| format!("cannot create work dir {}", config.work_dir))?;
    let logs_dir = config.log_to_file.then(|| config.logs_dir());
    init_logger(&config.log_level, config.log_json, logs_dir.as_deref())?;

    match cli.command {
        Commands::Ports => {
            let ports = SystemSerialHost::list_ports();
            if ports.is_empty() {
                println!("No serial ports found");
            }
            for port in ports {
                println!("{}", port);
            }
            Ok(())
        }
        Commands::Print { file } => {
            let receipt: OrderReceipt = read_record(&file)?;
            let service = build_service(&config)?;
            let mut printer = open_printer(&config).await;

            let outcome = service.print_order(printer.as_mut(), &receipt).await?;
            close_printer(printer).await;

            if !outcome.cached {
                eprintln!("Warning: receipt was not saved for reprint");
            }
            if !outcome.printed {
                bail!("order #{} was not printed", receipt.order_number);
            }
            println!("Printed order #{}", receipt.order_number);
            Ok(())
        }
        Commands::Bill { file } => {
            let bill: TableBill = read_record(&file)?;
            let service = build_service(&config)?;
            let mut printer = open_printer(&config).await;

            let printed = service.print_bill(printer.as_mut(), &bill).await?;
            close_printer(printer).await;

            if !printed {
                bail!("bill for table {} was not printed", bill.table_label);
            }
            println!("Printed bill for table {}", bill.table_label);
            Ok(())
        }
        Commands::Reprint => {
            let service = build_service(&config)?;
            let mut printer = open_printer(&config).await;

            let printed = service.reprint_last(printer.as_mut()).await?;
            close_printer(printer).await;

            if !printed {
                bail!("last receipt was not printed");
            }
            println!("Reprinted last receipt");
            Ok(())
        }
        Commands::Last { clear } => {
            let service = build_service(&config)?;
            if clear {
                if service.clear_last().await? {
                    println!("Last receipt removed");
                } else {
                    println!("No receipt saved");
                }
                return Ok(());
            }
            match service.get_last().await? {
                Some(cached) => println!("{}", serde_json::to_string_pretty(&cached)?),
                None => println!("No receipt saved"),
            }
            Ok(())
        }
        Commands::Render { file, out, html } => {
            let receipt: OrderReceipt = read_record(&file)?;
            receipt.validate()?;

            let data = if html {
                DocumentRenderer::new(config.logo_url.clone())
                    .render_order(&receipt, config.branding.as_ref())
                    .into_bytes()
            } else if out.is_some() {
                OrderReceiptRenderer::new(config.printer_profile).render(&receipt)
            } else {
                OrderReceiptRenderer::new(config.printer_profile).render_raw(&receipt)
            };

            match out {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    println!("Wrote {} bytes to {}", data.len(), path.display());
                }
                None => println!("{}", String::from_utf8_lossy(&data)),
            }
            Ok(())
        }
    }
}

fn read_record<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("invalid record in {}", path.display()))
}

fn build_service(config: &Config) -> anyhow::Result<ReceiptPrintService> {
    let cache = ReceiptCache::open(config.cache_path())
        .with_context(|| format!("cannot open {}", config.cache_path().display()))?;
    let viewer = Arc::new(SystemViewer::new(config.documents_dir()));

    Ok(
        ReceiptPrintService::new(config.printer_profile, cache, viewer)
            .with_branding(config.branding.clone(), config.logo_url.clone()),
    )
}

/// Connect the serial printer when the profile is thermal
///
/// A printer that cannot be reached is reported and left out, so the
/// receipt is still saved for a later reprint.
async fn open_printer(config: &Config) -> Option<SerialPrinter> {
    if !config.printer_profile.is_thermal() {
        return None;
    }

    let host = SystemSerialHost::new(config.serial_port.clone());
    let mut printer = SerialPrinter::new(Arc::new(host));
    if !printer.connect().await {
        tracing::warn!("No serial printer connected (set SERIAL_PORT or pass --port)");
        return None;
    }
    Some(printer)
}

async fn close_printer(printer: Option<SerialPrinter>) {
    if let Some(mut printer) = printer {
        printer.disconnect().await;
    }
}
