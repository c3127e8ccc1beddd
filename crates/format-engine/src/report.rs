//! Plain-text compliance reports.

use chrono::Local;
use shared_types::{DocumentInfo, RuleConfig, Severity, Violation};

use crate::severity_summary;

const RULE: &str = "================================================================";
const THIN_RULE: &str = "----------------------------------------------------------------";

/// Render the full compliance report for a validated document.
pub fn generate_report(
    config: &RuleConfig,
    info: &DocumentInfo,
    violations: &[Violation],
) -> String {
    let now = Local::now();
    let summary = severity_summary(violations);
    let mut out = Vec::new();

    out.push(RULE.to_string());
    out.push("LAPORAN KEPATUHAN DOKUMEN TESIS".to_string());
    out.push(config.university.name.to_uppercase());
    out.push(RULE.to_string());
    out.push(String::new());

    out.push("INFORMASI DOKUMEN".to_string());
    out.push(THIN_RULE.to_string());
    out.push(format!("Judul Dokumen        : {}", info.title));
    out.push(format!("Penulis              : {}", info.author));
    out.push(format!(
        "Tanggal Pemrosesan   : {}",
        now.format("%d-%m-%Y %H:%M:%S")
    ));
    out.push(format!("Jumlah Paragraf      : {}", info.paragraph_count));
    out.push(format!("Jumlah Tabel         : {}", info.table_count));
    out.push(format!(
        "Estimasi Jumlah Kata : {}",
        info.estimated_word_count
    ));
    out.push(String::new());

    out.push("RINGKASAN VALIDASI".to_string());
    out.push(THIN_RULE.to_string());
    out.push(format!("Error (Kesalahan Kritis) : {}", summary.error));
    out.push(format!("Warning (Peringatan)     : {}", summary.warning));
    out.push(format!("Suggestion (Saran)       : {}", summary.suggestion));
    out.push(format!("Total Pelanggaran        : {}", summary.total()));
    out.push(String::new());

    if violations.is_empty() {
        out.push("TIDAK ADA PELANGGARAN DITEMUKAN".to_string());
        out.push(format!(
            "Dokumen ini telah memenuhi semua aturan formatting {}.",
            config.university.name
        ));
    } else {
        out.push("DETAIL PELANGGARAN".to_string());
        out.push(THIN_RULE.to_string());
        append_group(&mut out, "KESALAHAN KRITIS (ERROR)", violations, Severity::Error);
        append_group(&mut out, "PERINGATAN (WARNING)", violations, Severity::Warning);
        append_group(
            &mut out,
            "SARAN PERBAIKAN (SUGGESTION)",
            violations,
            Severity::Suggestion,
        );
    }

    out.push(String::new());
    out.push("REFERENSI PEDOMAN".to_string());
    out.push(THIN_RULE.to_string());
    out.push("Validasi ini berdasarkan pedoman resmi:".to_string());
    out.push(format!("- {}", config.university.guidelines));
    out.push(format!(
        "- Universitas: {} ({})",
        config.university.name, config.university.abbreviation
    ));
    out.push(format!("- Tanggal validasi: {}", now.format("%d-%m-%Y")));
    out.push(String::new());
    out.push(format!(
        "Laporan ini dihasilkan secara otomatis oleh Sistem Formatting Tesis {}",
        config.university.abbreviation
    ));

    out.join("\n")
}

fn append_group(out: &mut Vec<String>, title: &str, violations: &[Violation], severity: Severity) {
    let group: Vec<&Violation> = violations
        .iter()
        .filter(|v| v.severity == severity)
        .collect();
    if group.is_empty() {
        return;
    }

    out.push(String::new());
    out.push(title.to_string());
    for (i, violation) in group.iter().enumerate() {
        let mut line = format!("{}. {}", i + 1, violation.message);
        if let Some(location) = &violation.location {
            line.push_str(&format!(" (Lokasi: {location})"));
        }
        out.push(line);
    }
}

/// Compact summary without document information, for log and API use.
pub fn generate_summary(violations: &[Violation]) -> String {
    let now = Local::now();
    let summary = severity_summary(violations);
    let mut out = Vec::new();

    out.push("=== RINGKASAN VALIDASI DOKUMEN ===".to_string());
    out.push(format!("Tanggal: {}", now.format("%d-%m-%Y %H:%M:%S")));
    out.push(String::new());
    out.push(format!("Total pelanggaran: {}", violations.len()));
    out.push(format!("- Error: {}", summary.error));
    out.push(format!("- Warning: {}", summary.warning));
    out.push(format!("- Suggestion: {}", summary.suggestion));
    out.push(String::new());

    if violations.is_empty() {
        out.push("Tidak ada pelanggaran ditemukan.".to_string());
    } else {
        out.push("=== DETAIL PELANGGARAN ===".to_string());
        for (i, violation) in violations.iter().enumerate() {
            let severity = match violation.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARNING",
                Severity::Suggestion => "SUGGESTION",
            };
            let location = violation.location.as_deref().unwrap_or("Tidak diketahui");
            out.push(format!(
                "{}. [{severity}] {} (Lokasi: {location})",
                i + 1,
                violation.message
            ));
        }
    }

    out.join("\n")
}
