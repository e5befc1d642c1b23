//! 扫描状态机相关类型定义

use serde::{Deserialize, Serialize};

/// Discrete step of a scan, advanced strictly `Idle → Initializing → FetchingIp
/// → AnalyzingAsn → Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanStep {
    Idle,
    Initializing,
    FetchingIp,
    AnalyzingAsn,
    Complete,
}

impl ScanStep {
    /// Numeric step index (0..=4).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Initializing => 1,
            Self::FetchingIp => 2,
            Self::AnalyzingAsn => 3,
            Self::Complete => 4,
        }
    }

    /// Bilingual status line shown to the user.
    #[must_use]
    pub const fn status_message(self) -> &'static str {
        match self {
            Self::Idle => "Система готова / System Ready",
            Self::Initializing => "Инициализация протоколов... / Initializing",
            Self::FetchingIp => "Запрос внешнего IP... / Pinging External Node",
            Self::AnalyzingAsn => "Анализ заголовков и ASN... / Analyzing ASN",
            Self::Complete => "Сканирование завершено. / Scan Complete",
        }
    }
}

/// 扫描进度快照（通过 watch channel 发布）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanProgress {
    /// 当前步骤
    pub step: ScanStep,
    /// 是否仍在扫描
    pub is_scanning: bool,
}

impl ScanProgress {
    /// 空闲状态
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            step: ScanStep::Idle,
            is_scanning: false,
        }
    }

    /// 步骤索引
    #[must_use]
    pub const fn step_index(&self) -> u8 {
        self.step.index()
    }

    /// 状态文本
    #[must_use]
    pub const fn status_message(&self) -> &'static str {
        self.step.status_message()
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::idle()
    }
}
