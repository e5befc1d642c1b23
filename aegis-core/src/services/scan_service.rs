//! 安全扫描服务（扫描 + 建议）

use std::sync::Arc;

use tokio::sync::{broadcast, watch};

use aegis_provider::IpAnalysisRecord;

use crate::error::CoreResult;
use crate::services::{AdvisoryService, ScanOrchestrator, ServiceContext};
use crate::types::{AdvisorySource, ScanProgress, ScanReport, ScanStep};

/// 地理查询失败时替代建议的固定文本
pub const UNREACHABLE_MESSAGE: &str = "Не удалось подключиться к серверам анализа. Проверьте соединение или отключите блокировщик рекламы (AdBlock), так как он может блокировать запросы к базам IP.";

/// 安全扫描服务
///
/// 先完成整个扫描状态机，再（仅在查询成功时）请求安全建议。
pub struct SecurityScanService {
    orchestrator: ScanOrchestrator,
    advisory: AdvisoryService,
}

impl SecurityScanService {
    /// 创建服务实例
    #[must_use]
    pub fn new(ctx: &Arc<ServiceContext>) -> Self {
        Self {
            orchestrator: ScanOrchestrator::new(ctx.geo.clone(), ctx.pacing),
            advisory: AdvisoryService::new(
                ctx.advisory_config.clone(),
                ctx.advisory_backend.clone(),
            ),
        }
    }

    /// 订阅扫描进度
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScanProgress> {
        self.orchestrator.subscribe()
    }

    /// 订阅步骤事件（逐条送达，不合并）
    #[must_use]
    pub fn subscribe_steps(&self) -> broadcast::Receiver<ScanStep> {
        self.orchestrator.subscribe_steps()
    }

    #[must_use]
    pub fn orchestrator(&self) -> &ScanOrchestrator {
        &self.orchestrator
    }

    /// 执行一次完整扫描并生成建议
    ///
    /// # Errors
    /// * `CoreError::ScanInProgress` - 已有扫描在进行
    pub async fn scan(&self) -> CoreResult<ScanReport> {
        let record = self.orchestrator.run_scan().await?;
        let (advisory, advisory_source) = self.advise(&record).await;
        Ok(ScanReport {
            record,
            advisory,
            advisory_source,
        })
    }

    /// 只执行扫描，不请求建议
    ///
    /// # Errors
    /// * `CoreError::ScanInProgress` - 已有扫描在进行
    pub async fn scan_without_advisory(&self) -> CoreResult<ScanReport> {
        let record = self.orchestrator.run_scan().await?;
        Ok(ScanReport {
            record,
            advisory: String::new(),
            advisory_source: AdvisorySource::Skipped,
        })
    }

    /// 为已有记录生成建议；失败记录不会调用后端
    pub async fn advise(&self, record: &IpAnalysisRecord) -> (String, AdvisorySource) {
        if record.success {
            self.advisory.explain_with_source(record).await
        } else {
            log::warn!("Geolocation failed, advisory not requested");
            (UNREACHABLE_MESSAGE.to_string(), AdvisorySource::Unreachable)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::{AdvisoryConfig, PacingConfig};
    use crate::error::CoreError;
    use crate::services::{BACKEND_FAILURE_MESSAGE, MISSING_KEY_MESSAGE};
    use crate::test_utils::{MockAdvisoryBackend, MockReply, geo_client_failing, geo_client_ok};

    fn service(
        geo: Arc<aegis_provider::GeoLookupClient>,
        backend: &Arc<MockAdvisoryBackend>,
        key: Option<&str>,
    ) -> SecurityScanService {
        let ctx = Arc::new(ServiceContext::new(
            geo,
            backend.clone(),
            Arc::new(AdvisoryConfig::with_api_key(key.map(ToString::to_string))),
            PacingConfig::default(),
        ));
        SecurityScanService::new(&ctx)
    }

    #[tokio::test(start_paused = true)]
    async fn successful_scan_requests_advisory() {
        let backend = MockAdvisoryBackend::new(MockReply::Text("Отчет".into()));
        let svc = service(geo_client_ok("192.0.2.10"), &backend, Some("key"));

        let report = svc.scan().await.unwrap();

        assert!(report.record.success);
        assert_eq!(report.advisory, "Отчет");
        assert_eq!(report.advisory_source, AdvisorySource::Generated);
        assert_eq!(backend.calls(), 1);
        assert!(backend.last_prompt().unwrap().contains("192.0.2.10"));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_lookup_never_calls_backend() {
        let backend = MockAdvisoryBackend::new(MockReply::Text("unused".into()));
        let svc = service(geo_client_failing(), &backend, Some("key"));

        let report = svc.scan().await.unwrap();

        assert!(!report.record.success);
        assert_eq!(report.advisory, UNREACHABLE_MESSAGE);
        assert_eq!(report.advisory_source, AdvisorySource::Unreachable);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn advisory_starts_after_scan_completes() {
        let backend = MockAdvisoryBackend::new(MockReply::Text("ok".into()));
        let svc = service(geo_client_ok("192.0.2.10"), &backend, Some("key"));
        let start = tokio::time::Instant::now();

        svc.scan().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(4100));
        let progress = svc.orchestrator().progress();
        assert_eq!(progress.step, ScanStep::Complete);
        assert!(!progress.is_scanning);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_key_message_is_reported_as_failed() {
        let backend = MockAdvisoryBackend::new(MockReply::Text("unused".into()));
        let svc = service(geo_client_ok("192.0.2.10"), &backend, None);

        let report = svc.scan().await.unwrap();

        assert_eq!(report.advisory, MISSING_KEY_MESSAGE);
        assert_eq!(report.advisory_source, AdvisorySource::Failed);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn backend_failure_is_reported_as_failed() {
        let backend = MockAdvisoryBackend::new(MockReply::Fail);
        let svc = service(geo_client_ok("192.0.2.10"), &backend, Some("key"));

        let report = svc.scan().await.unwrap();

        assert_eq!(report.advisory, BACKEND_FAILURE_MESSAGE);
        assert_eq!(report.advisory_source, AdvisorySource::Failed);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn step_subscription_sees_every_step() {
        let backend = MockAdvisoryBackend::new(MockReply::Text("ok".into()));
        let ctx = Arc::new(ServiceContext::new(
            geo_client_ok("192.0.2.10"),
            backend.clone(),
            Arc::new(AdvisoryConfig::with_api_key(Some("key".to_string()))),
            PacingConfig::none(),
        ));
        let svc = SecurityScanService::new(&ctx);
        let mut steps = svc.subscribe_steps();

        svc.scan().await.unwrap();

        let mut seen = Vec::new();
        while let Ok(step) = steps.try_recv() {
            seen.push(step);
        }
        assert_eq!(
            seen,
            vec![
                ScanStep::Initializing,
                ScanStep::FetchingIp,
                ScanStep::AnalyzingAsn,
                ScanStep::Complete,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn skip_advisory_leaves_text_empty() {
        let backend = MockAdvisoryBackend::new(MockReply::Text("unused".into()));
        let svc = service(geo_client_ok("192.0.2.10"), &backend, Some("key"));

        let report = svc.scan_without_advisory().await.unwrap();

        assert_eq!(report.advisory_source, AdvisorySource::Skipped);
        assert!(report.advisory.is_empty());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_scan_is_rejected() {
        let backend = MockAdvisoryBackend::new(MockReply::Text("ok".into()));
        let svc = Arc::new(service(geo_client_ok("192.0.2.10"), &backend, Some("key")));

        let first = tokio::spawn({
            let svc = svc.clone();
            async move { svc.scan().await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(matches!(svc.scan().await, Err(CoreError::ScanInProgress)));
        assert!(first.await.unwrap().is_ok());
        assert_eq!(backend.calls(), 1);
    }
}
