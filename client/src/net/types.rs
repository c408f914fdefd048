//! Wire DTOs for the bill-analysis service.
//!
//! DESIGN
//! ======
//! Requests have one fixed shape. Responses do not: the service has returned
//! the headline fields at the top level, under `final_result`, and deep under
//! `processing_stages`. Responses are therefore kept as raw JSON until
//! `analysis::normalize` reduces them to an [`AnalysisSummary`].

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

pub use authflow::session::User;

/// Body of `POST /analyze` and `POST /analyze-enhanced`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    /// Base64 file bytes without a data-URL prefix.
    pub file_content: String,
    pub doc_id: String,
    pub user_id: String,
    /// `"english"` or `"hindi"`.
    pub language: String,
    /// Two-letter Indian state code (e.g. `"DL"`).
    pub state_code: String,
    /// `"general"`, `"cghs"`, `"esi"` or `"private"`.
    pub insurance_type: String,
    /// `"pdf"` or `"image"`.
    pub file_format: String,
    /// Follow-up question; only sent to the enhanced endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Headline result of a bill analysis, whatever shape it arrived in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub verdict: String,
    /// Rupees.
    pub total_overcharge: f64,
    /// Percent, 0 to 100.
    pub confidence_score: f64,
    #[serde(default)]
    pub analysis_details: Option<serde_json::Value>,
    /// Free-text answer from the enhanced endpoint, usually markdown.
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub doc_id: Option<String>,
}

/// Analysis options chosen on the upload page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub language: String,
    pub state_code: String,
    pub insurance_type: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            language: "english".to_owned(),
            state_code: "DL".to_owned(),
            insurance_type: "general".to_owned(),
        }
    }
}

/// `(value, label)` pairs offered for [`AnalysisSettings::language`].
pub const LANGUAGE_OPTIONS: &[(&str, &str)] = &[("english", "English"), ("hindi", "Hindi")];

/// `(value, label)` pairs offered for [`AnalysisSettings::state_code`].
pub const STATE_OPTIONS: &[(&str, &str)] = &[
    ("DL", "Delhi"),
    ("MH", "Maharashtra"),
    ("KA", "Karnataka"),
    ("TN", "Tamil Nadu"),
    ("UP", "Uttar Pradesh"),
];

/// `(value, label)` pairs offered for [`AnalysisSettings::insurance_type`].
pub const INSURANCE_OPTIONS: &[(&str, &str)] =
    &[("general", "General"), ("cghs", "CGHS"), ("esi", "ESI"), ("private", "Private")];
