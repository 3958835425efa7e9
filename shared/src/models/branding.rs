//! Store Branding Model

use serde::{Deserialize, Serialize};

/// Footer used when the store has no custom message
pub const DEFAULT_THANK_YOU: &str = "Obrigado pela preferência!";

/// Store identity block printed at the bottom of page documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandingFooter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Social handle, e.g. "@pizzariadonatello"
    #[serde(default)]
    pub contact_handle: Option<String>,
    #[serde(default)]
    pub custom_message: Option<String>,
}

impl BrandingFooter {
    /// Custom message, or the default thank-you line
    pub fn message(&self) -> &str {
        self.custom_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_THANK_YOU)
    }
}
