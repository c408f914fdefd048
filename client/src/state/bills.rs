//! Bills analyzed during this browser session and the dashboard figures
//! derived from them.

#[cfg(test)]
#[path = "bills_test.rs"]
mod bills_test;

use crate::net::types::AnalysisSummary;

/// Shown as the average processing time; the service does not report one.
pub const AVG_PROCESSING_TIME: &str = "2-3 minutes";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BillStatus {
    Uploading,
    Processing,
    Completed,
    Error,
}

impl BillStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Uploading => "Uploading...",
            Self::Processing => "Processing...",
            Self::Completed => "Analysis Complete",
            Self::Error => "Error",
        }
    }

    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Uploading | Self::Processing)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BillRecord {
    /// The analysis `doc_id`.
    pub id: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub uploaded_at_ms: u64,
    pub status: BillStatus,
    pub summary: Option<AnalysisSummary>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardStats {
    pub total_bills: usize,
    /// Sum of reported overcharges, rupees.
    pub total_savings: f64,
    pub pending: usize,
    pub avg_processing_time: &'static str,
}

/// Newest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BillsState {
    pub bills: Vec<BillRecord>,
}

impl BillsState {
    /// Insert `record`, replacing an existing one with the same id.
    pub fn track(&mut self, record: BillRecord) {
        self.bills.retain(|b| b.id != record.id);
        self.bills.insert(0, record);
    }

    pub fn set_status(&mut self, id: &str, status: BillStatus) {
        if let Some(bill) = self.bills.iter_mut().find(|b| b.id == id) {
            bill.status = status;
        }
    }

    pub fn complete(&mut self, id: &str, summary: AnalysisSummary) {
        if let Some(bill) = self.bills.iter_mut().find(|b| b.id == id) {
            bill.status = BillStatus::Completed;
            bill.summary = Some(summary);
        }
    }

    #[must_use]
    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_bills: self.bills.len(),
            total_savings: self
                .bills
                .iter()
                .filter_map(|b| b.summary.as_ref())
                .map(|s| s.total_overcharge.max(0.0))
                .sum(),
            pending: self.bills.iter().filter(|b| b.status.is_pending()).count(),
            avg_processing_time: AVG_PROCESSING_TIME,
        }
    }

    #[must_use]
    pub fn recent(&self, limit: usize) -> &[BillRecord] {
        &self.bills[..self.bills.len().min(limit)]
    }
}

/// `₹1500` for whole amounts, `₹1500.50` otherwise.
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    if amount.fract() == 0.0 { format!("₹{amount:.0}") } else { format!("₹{amount:.2}") }
}
