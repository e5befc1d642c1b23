//! 类型定义模块

mod advisory;
mod report;
mod scan;

pub use advisory::GenerationRequest;
pub use report::{AdvisorySource, ScanReport};
pub use scan::{ScanProgress, ScanStep};

// Re-export provider 库的公共类型
pub use aegis_provider::{IpAnalysisRecord, TimezoneInfo};
