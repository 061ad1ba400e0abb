//! Registry wire types and the target-filter predicate.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Deserialize;

use kaiji_core::{DocTypeCode, DocumentRecord};

/// Wire value of the registry's "PDF available" flag.
pub const PDF_FLAG_SET: &str = "1";

/// Response body of `GET /documents.json`.
#[derive(Debug, Deserialize)]
pub struct DocumentsResponse {
    /// Listed filings; absent on empty days.
    #[serde(default)]
    pub results: Vec<RawDocument>,
}

/// One filing as listed by the registry, before filtering.
///
/// Lenient by design: every field except `docID` is optional, and
/// unrecognized type codes survive deserialization so filtering (not
/// parsing) decides what is kept.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Registry-unique document id.
    #[serde(rename = "docID")]
    pub doc_id: String,
    /// Filer's EDINET company code.
    #[serde(default)]
    pub edinet_code: Option<String>,
    /// Raw filing type code.
    #[serde(default)]
    pub doc_type_code: Option<String>,
    /// `"1"` when a renderable PDF exists.
    #[serde(default)]
    pub pdf_flag: Option<String>,
    /// Submission timestamp, `YYYY-MM-DD hh:mm`.
    #[serde(default)]
    pub submit_date_time: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub doc_description: Option<String>,
    /// Filer display name.
    #[serde(default)]
    pub filer_name: Option<String>,
}

impl RawDocument {
    /// The target-filter predicate — AND of all three conditions:
    /// watchlisted company, recognized disclosure type, renderable PDF.
    #[must_use]
    pub fn matches(&self, watchlist: &HashSet<String>) -> bool {
        let watched = self
            .edinet_code
            .as_ref()
            .is_some_and(|code| watchlist.contains(code));
        let recognized = self
            .doc_type_code
            .as_deref()
            .and_then(DocTypeCode::from_code)
            .is_some();
        let renderable = self.pdf_flag.as_deref() == Some(PDF_FLAG_SET);
        watched && recognized && renderable
    }

    /// Convert a filing that passed [`RawDocument::matches`] into a record.
    ///
    /// `query_date` backfills `submitted_at` when the registry omits or
    /// mangles the timestamp (records carry their own date downstream).
    #[must_use]
    pub fn into_record(self, query_date: NaiveDate) -> Option<DocumentRecord> {
        let doc_type_code = DocTypeCode::from_code(self.doc_type_code.as_deref()?)?;
        let submitted_at = self
            .submit_date_time
            .as_deref()
            .and_then(|ts| NaiveDate::parse_from_str(ts.get(..10)?, "%Y-%m-%d").ok())
            .unwrap_or(query_date);
        Some(DocumentRecord {
            doc_id: self.doc_id,
            company_code: self.edinet_code?,
            doc_type_code,
            submitted_at,
            has_pdf: self.pdf_flag.as_deref() == Some(PDF_FLAG_SET),
            description: self.doc_description,
            filer_name: self.filer_name,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
