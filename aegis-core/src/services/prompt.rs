//! 安全分析提示词构建

use aegis_provider::IpAnalysisRecord;

/// Builds the Russian security-analysis prompt for a resolved record.
///
/// Embeds `ip`, location (`city, region, country`), `isp`, `org`, `asn` and
/// the connection type verbatim.
#[must_use]
pub fn build_prompt(record: &IpAnalysisRecord) -> String {
    format!(
        "Проанализируй эти реальные сетевые данные пользователя и дай отчет по кибербезопасности на РУССКОМ языке.

Данные сканирования:
- IP: {ip}
- Локация: {location}
- Провайдер (ISP): {isp}
- Организация: {org}
- ASN: {asn}
- Тип соединения: {ip_type}

Твоя роль: Элитный ИИ-ассистент кибербезопасности \"Aegis\".

Задачи:
1. **Вердикт**: Насколько этот IP \"светится\"? Видно ли реальное местоположение? (Если это домашний провайдер — уровень риска выше, так как он привязан к физическому адресу).
2. **Анализ Провайдера**: Если это хостинг (DigitalOcean, AWS и т.д.) — отметь, что похоже на VPN. Если это Ростелеком/Beeline/Comcast и т.д. — предупреди, что сайты видят реального провайдера.
3. **Советы (Больше конкретики)**: Дай 3-4 мощных совета по защите (VPN, DNS-шифрование, WebRTC leak, Browser Fingerprinting).

Стиль: Технологичный, строгий, экспертный. Используй форматирование (жирный шрифт, списки).
",
        ip = record.ip,
        location = record.location(),
        isp = record.isp,
        org = record.org,
        asn = record.asn,
        ip_type = record.ip_type,
    )
}
