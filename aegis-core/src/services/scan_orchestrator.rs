//! 扫描状态机
//!
//! `Idle → Initializing → FetchingIp → AnalyzingAsn → Complete`，
//! 每一步的停留时间由 [`PacingConfig`] 决定。进度快照通过 `tokio::sync::watch` 发布，
//! 逐步事件通过 `tokio::sync::broadcast` 发布（不会合并）。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{broadcast, watch};
use tokio::time::{Instant, sleep};

use aegis_provider::{GeoLookupClient, IpAnalysisRecord};

use crate::config::PacingConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{ScanProgress, ScanStep};

/// 步骤事件缓冲（一次扫描最多 4 个事件）
const STEP_CHANNEL_CAPACITY: usize = 16;

/// Drives one paced scan at a time.
pub struct ScanOrchestrator {
    geo: Arc<GeoLookupClient>,
    pacing: PacingConfig,
    busy: AtomicBool,
    progress: watch::Sender<ScanProgress>,
    steps: broadcast::Sender<ScanStep>,
}

/// Releases the busy flag, even if the scan future is dropped mid-flight.
struct ScanGuard<'a> {
    orchestrator: &'a ScanOrchestrator,
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.orchestrator
            .progress
            .send_modify(|p| p.is_scanning = false);
        self.orchestrator.busy.store(false, Ordering::Release);
    }
}

impl ScanOrchestrator {
    #[must_use]
    pub fn new(geo: Arc<GeoLookupClient>, pacing: PacingConfig) -> Self {
        let (progress, _) = watch::channel(ScanProgress::idle());
        let (steps, _) = broadcast::channel(STEP_CHANNEL_CAPACITY);
        Self {
            geo,
            pacing,
            busy: AtomicBool::new(false),
            progress,
            steps,
        }
    }

    /// Subscribe to progress updates.
    ///
    /// Receivers see the latest state only; intermediate states may be
    /// coalesced if the receiver falls behind.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScanProgress> {
        self.progress.subscribe()
    }

    /// Subscribe to step transitions.
    ///
    /// Every step entered after subscribing is delivered in order, even with
    /// zero pacing.
    #[must_use]
    pub fn subscribe_steps(&self) -> broadcast::Receiver<ScanStep> {
        self.steps.subscribe()
    }

    /// Current progress snapshot.
    #[must_use]
    pub fn progress(&self) -> ScanProgress {
        *self.progress.borrow()
    }

    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Runs one full scan and returns the resolved record.
    ///
    /// The geolocation step lasts at least `pacing.min_fetch`; a slower lookup
    /// is not padded further. Progress ends at [`ScanStep::Complete`] with
    /// `is_scanning == false` before the record is returned.
    ///
    /// # Errors
    /// * `CoreError::ScanInProgress` - another scan is running; it is left untouched
    pub async fn run_scan(&self) -> CoreResult<IpAnalysisRecord> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("Scan requested while another scan is in progress");
            return Err(CoreError::ScanInProgress);
        }
        let guard = ScanGuard { orchestrator: self };

        let started = Instant::now();
        self.progress.send_replace(ScanProgress {
            step: ScanStep::Idle,
            is_scanning: true,
        });

        self.enter(ScanStep::Initializing);
        sleep(self.pacing.initializing).await;

        self.enter(ScanStep::FetchingIp);
        let fetch_started = Instant::now();
        let record = self.geo.resolve().await;
        let remaining = self.pacing.min_fetch.saturating_sub(fetch_started.elapsed());
        if !remaining.is_zero() {
            sleep(remaining).await;
        }

        self.enter(ScanStep::AnalyzingAsn);
        sleep(self.pacing.analyzing).await;

        self.enter(ScanStep::Complete);
        sleep(self.pacing.complete).await;

        drop(guard);
        log::info!(
            "Scan finished in {} ms (success={}, ip={})",
            started.elapsed().as_millis(),
            record.success,
            record.ip
        );
        Ok(record)
    }

    fn enter(&self, step: ScanStep) {
        log::debug!("Scan step {}: {}", step.index(), step.status_message());
        self.progress.send_replace(ScanProgress {
            step,
            is_scanning: true,
        });
        // 没有订阅者时 send 返回 Err，可忽略
        self.steps.send(step).ok();
    }
}
