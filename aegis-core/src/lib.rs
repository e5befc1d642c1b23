//! Aegis Core Library
//!
//! Core scan flow of the Aegis IP telemetry tool:
//! - Paced scan state machine ([`ScanOrchestrator`](services::ScanOrchestrator))
//! - Security advisory generation ([`AdvisoryService`](services::AdvisoryService))
//! - Composition of both ([`SecurityScanService`](services::SecurityScanService))
//!
//! The geolocation lookup lives in `aegis-provider`; the generative backend is
//! abstracted behind [`AdvisoryBackend`] so front ends and tests can swap it.

pub mod backends;
pub mod config;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{AdvisoryConfig, PacingConfig};
pub use error::{CoreError, CoreResult};
pub use services::{SecurityScanService, ServiceContext};
pub use traits::AdvisoryBackend;
pub use types::{AdvisorySource, IpAnalysisRecord, ScanProgress, ScanReport, ScanStep};
