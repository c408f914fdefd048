//! Upload page state: selected file, analysis settings, and the
//! question/answer thread about the analyzed bill.
//!
//! DESIGN
//! ======
//! Transitions are methods so the page stays a thin event router and the
//! guard conditions (no file, already busy, empty question) are testable.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::net::analysis::summary_markdown;
use crate::net::types::{AnalysisSettings, AnalysisSummary};
use crate::util::file::{FileError, SelectedFile};

pub const ANALYSIS_SUCCESS_TEXT: &str = "Bill analyzed successfully! Redirecting to dashboard...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    /// Markdown for assistant messages, plain text for user messages.
    pub content: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadState {
    pub file: Option<SelectedFile>,
    /// Assigned at selection; reused by follow-up questions.
    pub doc_id: Option<String>,
    pub settings: AnalysisSettings,
    pub show_settings: bool,
    pub drag_active: bool,
    pub busy: bool,
    pub error: Option<String>,
    pub success: bool,
    pub summary: Option<AnalysisSummary>,
    pub messages: Vec<ChatMessage>,
}

impl UploadState {
    pub fn select(&mut self, file: SelectedFile, doc_id: String) {
        self.file = Some(file);
        self.doc_id = Some(doc_id);
        self.error = None;
        self.success = false;
        self.summary = None;
        self.messages.clear();
    }

    pub fn reject(&mut self, err: &FileError) {
        self.file = None;
        self.doc_id = None;
        self.success = false;
        self.error = Some(err.to_string());
    }

    pub fn remove_file(&mut self) {
        self.file = None;
        self.doc_id = None;
        self.error = None;
        self.success = false;
    }

    /// Mark the analysis as started. `false` when there is nothing to send.
    pub fn begin_analysis(&mut self) -> bool {
        if self.busy || self.file.is_none() {
            return false;
        }
        self.busy = true;
        self.error = None;
        true
    }

    pub fn finish_analysis(&mut self, summary: AnalysisSummary) {
        self.busy = false;
        self.success = true;
        self.messages.push(ChatMessage { role: MessageRole::Assistant, content: summary_markdown(&summary) });
        self.summary = Some(summary);
    }

    pub fn fail(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }

    /// Queue a follow-up question about the analyzed bill.
    ///
    /// Returns the trimmed question when it should be sent.
    pub fn ask(&mut self, question: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() || self.busy || self.summary.is_none() {
            return None;
        }
        self.busy = true;
        self.error = None;
        self.messages.push(ChatMessage { role: MessageRole::User, content: question.to_owned() });
        Some(question.to_owned())
    }

    pub fn answer(&mut self, reply: String) {
        self.busy = false;
        self.messages.push(ChatMessage { role: MessageRole::Assistant, content: reply });
    }
}
