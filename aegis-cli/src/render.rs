//! Plain-text rendering of scan results.

use std::fmt::Write;

use aegis_core::{AdvisorySource, IpAnalysisRecord, ScanReport, ScanStep};

/// `[2/4] Запрос внешнего IP... / Pinging External Node`
pub fn progress_line(step: ScanStep) -> String {
    format!("[{}/4] {}", step.index(), step.status_message())
}

pub fn record_table(record: &IpAnalysisRecord) -> String {
    let rows = [
        ("IP", record.ip.clone()),
        ("Type", record.ip_type.clone()),
        ("Location", record.location()),
        ("Continent", record.continent.clone()),
        ("Country code", record.country_code.clone()),
        (
            "Coordinates",
            format!("{:.4}, {:.4}", record.latitude, record.longitude),
        ),
        ("ISP", record.isp.clone()),
        ("Organization", record.org.clone()),
        ("ASN", record.asn.clone()),
        (
            "Timezone",
            format!("{} ({})", record.timezone.id, record.timezone.current_time_iso),
        ),
    ];

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in rows {
        let _ = writeln!(out, "{key:<width$}  {value}");
    }
    out
}

pub fn report_text(report: &ScanReport) -> String {
    let mut out = record_table(&report.record);
    match report.advisory_source {
        AdvisorySource::Skipped => {}
        AdvisorySource::Generated | AdvisorySource::Failed | AdvisorySource::Unreachable => {
            let _ = write!(out, "\n== Advisory ==\n{}\n", report.advisory);
        }
    }
    out
}
