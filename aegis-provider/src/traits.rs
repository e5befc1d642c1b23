use async_trait::async_trait;

use crate::error::Result;
use crate::types::{IpAnalysisRecord, ProviderKind};

/// 地理位置 Provider Trait
///
/// 查询对象是调用方自身的出口 IP（由远端服务隐式观察），因此 `lookup` 不接收参数。
/// 实现方负责把各自的响应结构映射为规范的 [`IpAnalysisRecord`]，
/// 并把传输失败、非 2xx 状态、逻辑失败和解析失败统一报告为 [`ProviderError`](crate::ProviderError)。
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Provider 类型
    fn kind(&self) -> ProviderKind;

    /// 查询当前出口 IP 的地理信息（每次调用都发起新的网络请求，不做缓存）
    async fn lookup(&self) -> Result<IpAnalysisRecord>;
}
