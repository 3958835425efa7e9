//! Serial printer connections
//!
//! A [`SerialPrinter`] owns at most one open connection to a physical
//! printer. Device discovery and opening go through a [`SerialHost`], so the
//! connection lifecycle can run against real ports ([`SystemSerialHost`]) or
//! a simulated host.
//!
//! Blocking port I/O runs on the blocking thread pool. All operations take
//! `&mut self`: a manager never has two jobs in flight.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use crate::error::{PrintError, PrintResult};

/// Baud rate used for every receipt printer connection
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Port-level write timeout, enforced by the serial driver
const PORT_TIMEOUT: Duration = Duration::from_secs(5);

/// An open serial port
pub trait PortHandle: Send {
    /// Acquire an owned write handle to the port
    fn writer(&mut self) -> std::io::Result<Box<dyn Write + Send>>;
}

/// Host environment access to serial devices
pub trait SerialHost: Send + Sync {
    /// Whether the host exposes serial devices at all
    fn is_available(&self) -> bool;

    /// Pick the device to use; `None` when no device is selected
    fn request_port(&self) -> Option<String>;

    /// Open the named device
    fn open(&self, path: &str, baud_rate: u32) -> std::io::Result<Box<dyn PortHandle>>;
}

/// Serial host backed by the operating system's ports
///
/// Uses the configured port when one is given, otherwise the first port the
/// system enumerates.
#[derive(Debug, Clone, Default)]
pub struct SystemSerialHost {
    preferred: Option<String>,
}

impl SystemSerialHost {
    pub fn new(preferred: Option<String>) -> Self {
        Self { preferred }
    }

    /// List available serial port names on the system
    pub fn list_ports() -> Vec<String> {
        match serialport::available_ports() {
            Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
            Err(e) => {
                warn!(error = %e, "Failed to enumerate serial ports");
                Vec::new()
            }
        }
    }
}

impl SerialHost for SystemSerialHost {
    fn is_available(&self) -> bool {
        match serialport::available_ports() {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Serial enumeration unavailable");
                false
            }
        }
    }

    fn request_port(&self) -> Option<String> {
        self.preferred
            .clone()
            .or_else(|| Self::list_ports().into_iter().next())
    }

    fn open(&self, path: &str, baud_rate: u32) -> std::io::Result<Box<dyn PortHandle>> {
        let port = serialport::new(path, baud_rate)
            .timeout(PORT_TIMEOUT)
            .open()?;
        Ok(Box::new(SystemPort(port)))
    }
}

struct SystemPort(Box<dyn serialport::SerialPort>);

impl PortHandle for SystemPort {
    fn writer(&mut self) -> std::io::Result<Box<dyn Write + Send>> {
        let writer = self.0.try_clone()?;
        Ok(Box::new(writer))
    }
}

/// Port and writer handles of an open connection
struct OpenConnection {
    path: String,
    // Held so the port stays open for as long as the writer is in use
    _port: Box<dyn PortHandle>,
    writer: Box<dyn Write + Send>,
}

enum Connection {
    Disconnected,
    Connected(OpenConnection),
}

/// Serial receipt printer connection manager
///
/// `Disconnected → connect() → Connected → disconnect() → Disconnected`.
/// Construct one per physical printer and pass it to whatever prints.
pub struct SerialPrinter {
    host: Arc<dyn SerialHost>,
    baud_rate: u32,
    connection: Connection,
}

impl SerialPrinter {
    /// Create a disconnected manager using `host` for device access
    pub fn new(host: Arc<dyn SerialHost>) -> Self {
        Self {
            host,
            baud_rate: DEFAULT_BAUD_RATE,
            connection: Connection::Disconnected,
        }
    }

    /// True iff both the port and the writer are held
    pub fn is_connected(&self) -> bool {
        matches!(self.connection, Connection::Connected(_))
    }

    /// Path of the connected device
    pub fn port_name(&self) -> Option<&str> {
        match &self.connection {
            Connection::Connected(open) => Some(&open.path),
            Connection::Disconnected => None,
        }
    }

    /// Connect to a printer, reporting failure as `false`
    pub async fn connect(&mut self) -> bool {
        match self.try_connect().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Printer connection failed");
                false
            }
        }
    }

    /// Request a device from the host, open it and acquire its writer
    ///
    /// A no-op when already connected. On failure the manager stays
    /// disconnected.
    #[instrument(skip(self), fields(baud_rate = self.baud_rate))]
    pub async fn try_connect(&mut self) -> PrintResult<()> {
        if let Some(path) = self.port_name() {
            debug!(port = %path, "Already connected");
            return Ok(());
        }

        let host = Arc::clone(&self.host);
        let baud_rate = self.baud_rate;

        let open = tokio::task::spawn_blocking(move || -> PrintResult<OpenConnection> {
            if !host.is_available() {
                return Err(PrintError::Unavailable(
                    "host has no serial capability".to_string(),
                ));
            }

            let path = host.request_port().ok_or(PrintError::SelectionDeclined)?;

            let mut port = host.open(&path, baud_rate).map_err(|source| PrintError::Open {
                port: path.clone(),
                source,
            })?;
            let writer = port.writer().map_err(|source| PrintError::Open {
                port: path.clone(),
                source,
            })?;

            Ok(OpenConnection {
                path,
                _port: port,
                writer,
            })
        })
        .await
        .map_err(|e| PrintError::Io(std::io::Error::other(e)))??;

        info!(port = %open.path, "Printer connected");
        self.connection = Connection::Connected(open);
        Ok(())
    }

    /// Release the writer and close the port
    ///
    /// Safe to call when already disconnected.
    #[instrument(skip(self))]
    pub async fn disconnect(&mut self) {
        let open = match std::mem::replace(&mut self.connection, Connection::Disconnected) {
            Connection::Connected(open) => open,
            Connection::Disconnected => {
                debug!("Already disconnected");
                return;
            }
        };

        let path = open.path.clone();
        let closed = tokio::task::spawn_blocking(move || {
            let mut open = open;
            if let Err(e) = open.writer.flush() {
                warn!(error = %e, "Flush before close failed");
            }
            drop(open);
        })
        .await;

        if let Err(e) = closed {
            error!(error = %e, "Close task failed");
        }
        info!(port = %path, "Printer disconnected");
    }

    /// Send data to the printer, reporting failure as `false`
    pub async fn print(&mut self, data: &[u8]) -> bool {
        match self.try_print(data).await {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "Print failed");
                false
            }
        }
    }

    /// Write the whole buffer to the open connection
    ///
    /// A failed write leaves the connection open; the caller decides whether
    /// to disconnect. Nothing is retried.
    ///
    /// The connection is held by the write task while the job runs. If this
    /// future is dropped before it completes, the manager is left
    /// `Disconnected` and the port closes once the task finishes.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub async fn try_print(&mut self, data: &[u8]) -> PrintResult<()> {
        let Connection::Connected(open) =
            std::mem::replace(&mut self.connection, Connection::Disconnected)
        else {
            return Err(PrintError::NotConnected);
        };

        let data = data.to_vec();
        let written = tokio::task::spawn_blocking(move || {
            let mut open = open;
            let result = open
                .writer
                .write_all(&data)
                .and_then(|()| open.writer.flush());
            (open, result)
        })
        .await;

        match written {
            Ok((open, result)) => {
                self.connection = Connection::Connected(open);
                result.map_err(PrintError::Write)?;
                info!("Print job sent");
                Ok(())
            }
            Err(e) => {
                // Handles went down with the task
                error!(error = %e, "Write task failed, connection dropped");
                Err(PrintError::Io(std::io::Error::other(e)))
            }
        }
    }
}
