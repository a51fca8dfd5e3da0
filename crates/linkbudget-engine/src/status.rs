//! Qualitative link status derived from the link margin.

use serde::{Deserialize, Serialize};

/// Margin thresholds in dB, checked top-down with strict `>`.
const EXCELLENT_ABOVE_DB: f64 = 20.0;
const GOOD_ABOVE_DB: f64 = 10.0;
const MARGINAL_ABOVE_DB: f64 = 5.0;
const POOR_ABOVE_DB: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Excellent,
    Good,
    Marginal,
    Poor,
    Failed,
}

/// Display colouring bucket for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Nominal,
    Caution,
    Warning,
    Critical,
}

impl LinkStatus {
    /// Classify a link margin. A margin exactly on a threshold falls into
    /// the lower class; NaN is `Failed`.
    pub fn from_margin(link_margin_db: f64) -> Self {
        if link_margin_db > EXCELLENT_ABOVE_DB {
            LinkStatus::Excellent
        } else if link_margin_db > GOOD_ABOVE_DB {
            LinkStatus::Good
        } else if link_margin_db > MARGINAL_ABOVE_DB {
            LinkStatus::Marginal
        } else if link_margin_db > POOR_ABOVE_DB {
            LinkStatus::Poor
        } else {
            LinkStatus::Failed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LinkStatus::Excellent => "Excellent",
            LinkStatus::Good => "Good",
            LinkStatus::Marginal => "Marginal",
            LinkStatus::Poor => "Poor",
            LinkStatus::Failed => "Failed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LinkStatus::Excellent => "Robust link",
            LinkStatus::Good => "Reliable in most conditions",
            LinkStatus::Marginal => "May struggle in adverse",
            LinkStatus::Poor => "Unreliable",
            LinkStatus::Failed => "No comms possible",
        }
    }

    /// `"<label> - <description>"`, as shown in the results panel.
    pub fn wording(self) -> String {
        format!("{} - {}", self.label(), self.description())
    }

    pub fn severity(self) -> Severity {
        match self {
            LinkStatus::Excellent | LinkStatus::Good => Severity::Nominal,
            LinkStatus::Marginal => Severity::Caution,
            LinkStatus::Poor => Severity::Warning,
            LinkStatus::Failed => Severity::Critical,
        }
    }
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Nominal => "nominal",
            Severity::Caution => "caution",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
