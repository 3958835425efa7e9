use shared::models::{BrandingFooter, PrinterProfile};
use std::path::PathBuf;

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | cache database, documents and logs |
/// | PRINTER_PROFILE | standard | narrow / standard / page |
/// | SERIAL_PORT | - | preferred serial device |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_TO_FILE | false | write logs under `<work_dir>/logs` |
/// | STORE_NAME | - | enables the branding footer |
/// | STORE_ADDRESS, STORE_PHONE, STORE_CONTACT, STORE_MESSAGE | - | branding footer fields |
/// | STORE_LOGO_URL | - | logo on page documents |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/comanda PRINTER_PROFILE=narrow SERIAL_PORT=/dev/ttyUSB0 comanda print order.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory
    pub work_dir: String,
    pub printer_profile: PrinterProfile,
    /// Serial device tried before enumerating ports
    pub serial_port: Option<String>,
    pub log_level: String,
    pub log_json: bool,
    pub log_to_file: bool,
    pub branding: Option<BrandingFooter>,
    pub logo_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let branding = non_empty("STORE_NAME").map(|name| BrandingFooter {
            name,
            address: non_empty("STORE_ADDRESS"),
            phone: non_empty("STORE_PHONE"),
            contact_handle: non_empty("STORE_CONTACT"),
            custom_message: non_empty("STORE_MESSAGE"),
        });

        Self {
            work_dir: var("WORK_DIR").unwrap_or_else(|| "./work_dir".into()),
            printer_profile: var("PRINTER_PROFILE")
                .and_then(|p| p.parse().ok())
                .unwrap_or_default(),
            serial_port: non_empty("SERIAL_PORT"),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: var("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_to_file: var("LOG_TO_FILE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            branding,
            logo_url: non_empty("STORE_LOGO_URL"),
        }
    }

    /// Last-receipt cache file
    pub fn cache_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("receipts.redb")
    }

    /// Where page documents are written before opening
    pub fn documents_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("documents")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}
