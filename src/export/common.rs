//! Shared helpers for document export: date formatting, Typst escaping
//! and output filenames.

use chrono::{Datelike, Local};

/// Format current date in Indonesian format (e.g., "30 Desember 2025").
pub fn format_indonesian_date() -> String {
    let now = Local::now().date_naive();
    let months = [
        "Januari",
        "Februari",
        "Maret",
        "April",
        "Mei",
        "Juni",
        "Juli",
        "Agustus",
        "September",
        "Oktober",
        "November",
        "Desember",
    ];

    let day = now.day();
    let month = months[(now.month0() as usize).min(months.len() - 1)];
    let year = now.year();

    format!("{day} {month} {year}")
}

/// Escape special characters for Typst strings.
pub fn escape_typst_string(value: &str) -> String {
    value
        .replace('\\', r"\\")
        .replace('"', r#"\""#)
        .replace('\n', r"\n")
}

/// Build a `.pdf` filename from name parts. Whitespace runs and path
/// separators inside a part become single underscores, blank parts are
/// skipped.
pub fn pdf_filename(parts: &[&str]) -> String {
    let joined: Vec<String> = parts
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.replace(['/', '\\'], " ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
        })
        .collect();

    if joined.is_empty() {
        "dokumen.pdf".to_string()
    } else {
        format!("{}.pdf", joined.join("_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_filename_replaces_whitespace_with_underscores() {
        assert_eq!(
            pdf_filename(&["Sertifikat", "Rina Marlina", "Pelatihan Guru"]),
            "Sertifikat_Rina_Marlina_Pelatihan_Guru.pdf"
        );
    }

    #[test]
    fn pdf_filename_collapses_whitespace_runs() {
        assert_eq!(
            pdf_filename(&["Surat  Undangan \t Rapat"]),
            "Surat_Undangan_Rapat.pdf"
        );
    }

    #[test]
    fn pdf_filename_replaces_path_separators() {
        assert_eq!(
            pdf_filename(&["001/SU/HAFECS/2026"]),
            "001_SU_HAFECS_2026.pdf"
        );
    }

    #[test]
    fn pdf_filename_skips_blank_parts() {
        assert_eq!(pdf_filename(&["", "  ", "Surat"]), "Surat.pdf");
    }

    #[test]
    fn pdf_filename_falls_back_when_everything_is_blank() {
        assert_eq!(pdf_filename(&["", "   "]), "dokumen.pdf");
    }

    #[test]
    fn escape_handles_quotes_and_newlines() {
        assert_eq!(
            escape_typst_string("judul \"resmi\"\nbaris dua"),
            r#"judul \"resmi\"\nbaris dua"#
        );
    }

    #[test]
    fn indonesian_date_has_three_parts() {
        let date = format_indonesian_date();
        assert_eq!(date.split(' ').count(), 3);
    }
}
