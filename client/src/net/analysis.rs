//! Client for the bill-analysis service.
//!
//! ERROR HANDLING
//! ==============
//! Transport and HTTP failures surface as `Analysis failed: ...`. A body that
//! matches none of the known shapes is [`AnalysisError::Unreadable`]; one that
//! matches but carries an out-of-range confidence is
//! [`AnalysisError::InvalidResponse`]. Nothing is retried.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "analysis_test.rs"]
mod analysis_test;

use serde_json::Value;

use super::types::{AnalysisRequest, AnalysisSummary};

/// Candidate locations of the headline fields, most common first.
const RESULT_PATHS: &[&[&str]] = &[
    &[],
    &["final_result"],
    &["processing_stages", "domain_analysis", "result", "domain_result"],
];

/// Keys the enhanced endpoint has used for its free-text answer.
const REPLY_KEYS: &[&str] = &["response", "answer", "reply"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis failed: {0}")]
    Transport(String),
    /// Non-2xx with a message from the service.
    #[error("Analysis failed: {0}")]
    Service(String),
    #[error("Analysis failed: API request failed with status: {0}")]
    Status(u16),
    #[error("Invalid response from analysis service")]
    InvalidResponse,
    #[error("Analysis failed: could not read the analysis result")]
    Unreadable,
    #[error("not available on server")]
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnalysisMode {
    /// `/analyze`: one-shot bill analysis.
    Standard,
    /// `/analyze-enhanced`: analysis plus a follow-up `query`.
    Enhanced,
}

impl AnalysisMode {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Standard => "/analyze",
            Self::Enhanced => "/analyze-enhanced",
        }
    }
}

#[must_use]
pub fn analysis_url(base: &str, mode: AnalysisMode) -> String {
    format!("{}{}", base.trim_end_matches('/'), mode.path())
}

fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(key))
}

/// Reduce any known response shape to a summary.
#[must_use]
pub fn normalize(value: &Value) -> Option<AnalysisSummary> {
    let reply = REPLY_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_owned);
    RESULT_PATHS.iter().find_map(|path| {
        let node = at(value, path)?;
        Some(AnalysisSummary {
            verdict: node.get("verdict")?.as_str()?.to_owned(),
            total_overcharge: node.get("total_overcharge")?.as_f64()?,
            confidence_score: node.get("confidence_score")?.as_f64()?,
            analysis_details: node.get("analysis_details").or_else(|| value.get("analysis_details")).cloned(),
            reply: reply.clone(),
            doc_id: value.get("doc_id").and_then(Value::as_str).map(str::to_owned),
        })
    })
}

/// Confidence must be a percentage and the overcharge a real number.
#[must_use]
pub fn is_valid(summary: &AnalysisSummary) -> bool {
    summary.total_overcharge.is_finite() && (0.0..=100.0).contains(&summary.confidence_score)
}

/// Normalize and validate a response body.
///
/// # Errors
///
/// [`AnalysisError::Unreadable`] when no known shape matches,
/// [`AnalysisError::InvalidResponse`] when the values are out of range.
pub fn summarize(value: &Value) -> Result<AnalysisSummary, AnalysisError> {
    let summary = normalize(value).ok_or(AnalysisError::Unreadable)?;
    if !is_valid(&summary) {
        return Err(AnalysisError::InvalidResponse);
    }
    Ok(summary)
}

/// Text to show for a follow-up answer: the free-text reply when present,
/// otherwise the rendered headline.
///
/// # Errors
///
/// [`AnalysisError::Unreadable`] when the body has neither.
pub fn follow_up_text(value: &Value) -> Result<String, AnalysisError> {
    if let Some(reply) = REPLY_KEYS.iter().find_map(|key| value.get(key).and_then(Value::as_str)) {
        return Ok(reply.to_owned());
    }
    summarize(value).map(|summary| summary_markdown(&summary))
}

/// Markdown rendering of a summary for the conversation view.
#[must_use]
pub fn summary_markdown(summary: &AnalysisSummary) -> String {
    let mut out = format!(
        "**Verdict:** {}\n\n**Total overcharge:** ₹{:.2}\n\n**Confidence:** {:.0}%",
        summary.verdict, summary.total_overcharge, summary.confidence_score
    );
    if let Some(reply) = summary.reply.as_deref().filter(|r| !r.trim().is_empty()) {
        out.push_str("\n\n");
        out.push_str(reply);
    }
    out
}

/// Message carried by an error body (`message` or `detail`), if any.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

/// POST `request` and return the raw JSON body.
///
/// # Errors
///
/// Transport, HTTP and decode failures as [`AnalysisError`].
pub async fn request_analysis(base: &str, mode: AnalysisMode, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
    #[cfg(feature = "hydrate")]
    {
        let url = analysis_url(base, mode);
        let resp = gloo_net::http::Request::post(&url)
            .json(request)
            .map_err(|e| AnalysisError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(error_message(&body).map_or(AnalysisError::Status(status), AnalysisError::Service));
        }
        resp.json::<Value>().await.map_err(|_| AnalysisError::Unreadable)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, mode, request);
        Err(AnalysisError::Unavailable)
    }
}

/// Analyze a bill via `/analyze`.
///
/// # Errors
///
/// See [`request_analysis`] and [`summarize`].
pub async fn analyze(base: &str, request: &AnalysisRequest) -> Result<AnalysisSummary, AnalysisError> {
    let body = request_analysis(base, AnalysisMode::Standard, request).await?;
    summarize(&body)
}

/// Ask a follow-up question via `/analyze-enhanced`.
///
/// # Errors
///
/// See [`request_analysis`] and [`follow_up_text`].
pub async fn ask(base: &str, request: &AnalysisRequest) -> Result<String, AnalysisError> {
    let body = request_analysis(base, AnalysisMode::Enhanced, request).await?;
    follow_up_text(&body)
}
