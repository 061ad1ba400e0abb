//! Disclosure document records and recognized filing types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Recognized EDINET disclosure type codes.
///
/// Only these filing types are retained past registry filtering. The wire
/// value is the registry's numeric string code (`"120"` etc.).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocTypeCode {
    /// `120` — annual securities report (有価証券報告書).
    AnnualReport,
    /// `140` — quarterly report (四半期報告書).
    QuarterlyReport,
    /// `160` — semiannual report (半期報告書).
    SemiannualReport,
}

impl DocTypeCode {
    /// Parse a registry type code. Returns `None` for unrecognized codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "120" => Some(Self::AnnualReport),
            "140" => Some(Self::QuarterlyReport),
            "160" => Some(Self::SemiannualReport),
            _ => None,
        }
    }

    /// The registry's wire code for this type.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::AnnualReport => "120",
            Self::QuarterlyReport => "140",
            Self::SemiannualReport => "160",
        }
    }

    /// Human-readable label used in logs and sink filenames.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::AnnualReport => "annual securities report",
            Self::QuarterlyReport => "quarterly report",
            Self::SemiannualReport => "semiannual report",
        }
    }
}

/// One disclosure filing as retained past registry filtering.
///
/// Created transiently per registry response; ownership passes to the caller
/// once returned. Records always satisfy the filter invariant: the company is
/// on the watchlist, the type code is recognized, and a renderable (PDF)
/// format exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Registry-unique document id.
    pub doc_id: String,
    /// EDINET company code (e.g. `E00001`).
    pub company_code: String,
    /// Recognized disclosure type.
    pub doc_type_code: DocTypeCode,
    /// Submission date.
    pub submitted_at: NaiveDate,
    /// Whether the registry exposes a renderable PDF for this filing.
    pub has_pdf: bool,
    /// Registry-supplied description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Registry-supplied filer name, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filer_name: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
