//! Printer Profile Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProfileParseError;

/// Printer width class
///
/// Fixes the character budget of every printed line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterProfile {
    /// 58mm thermal paper
    Narrow,
    /// 80mm thermal paper
    #[default]
    Standard,
    /// Page printer
    Page,
}

impl PrinterProfile {
    /// Maximum characters per line
    pub const fn columns(self) -> usize {
        match self {
            Self::Narrow => 32,
            Self::Standard => 48,
            Self::Page => 80,
        }
    }

    /// Whether output goes to a thermal printer rather than a page document
    pub const fn is_thermal(self) -> bool {
        !matches!(self, Self::Page)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Standard => "standard",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for PrinterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrinterProfile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrow" | "58mm" => Ok(Self::Narrow),
            "standard" | "80mm" => Ok(Self::Standard),
            "page" | "a4" => Ok(Self::Page),
            other => Err(ProfileParseError(other.to_string())),
        }
    }
}
