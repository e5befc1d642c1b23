//! 时间格式化工具
//!
//! 由本地生成的 `currentTimeIso`（备用 provider 与失败记录）使用与浏览器
//! `Date.toISOString()` 相同的格式：UTC、毫秒精度、`Z` 后缀。

use chrono::{DateTime, SecondsFormat, Utc};

/// 格式化为 `2024-05-01T12:00:00.000Z`
pub fn format_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
