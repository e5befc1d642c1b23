//! 扫描报告类型定义

use serde::{Deserialize, Serialize};

use aegis_provider::IpAnalysisRecord;

/// Where the advisory text of a [`ScanReport`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdvisorySource {
    /// Completion text from the advisory backend.
    Generated,
    /// Advisory generation failed (no key, backend error or empty completion);
    /// the text is one of the fixed failure strings.
    Failed,
    /// Geolocation failed; the fixed "analysis unreachable" text was substituted.
    Unreachable,
    /// Advisory generation was not requested.
    Skipped,
}

/// Result of one complete scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub record: IpAnalysisRecord,
    pub advisory: String,
    pub advisory_source: AdvisorySource,
}
