//! Sequential batch export of certificates, one PDF per participant.
//!
//! Items are processed strictly in input order: rasterization is a
//! heavyweight, blocking operation, so batch items never run
//! concurrently, and a fixed delay separates consecutive renders. A
//! failure on any item aborts the remaining batch; nothing partial is
//! returned. Per-item scratch directories are owned by the render
//! surface and dropped whether the item succeeds or fails.

use std::io::{Cursor, Write};
use std::time::Duration;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use super::common::pdf_filename;
use super::engine::RenderSurface;
use super::page::PageLayout;
use super::pdf::export_single;
use super::sertifikat::render_sertifikat;
use super::{ExportError, ExportedArchive, ExportedPdf, PdfOptions};
use crate::document::models::Document;

/// Pause between consecutive batch items.
pub const BATCH_ITEM_DELAY: Duration = Duration::from_millis(500);

/// Export one certificate per participant and pack the results into a
/// single ZIP archive.
pub fn export_certificates(
    surface: &dyn RenderSurface,
    document: &Document,
    options: PdfOptions,
) -> Result<ExportedArchive, ExportError> {
    let participants = document.participants.clone().unwrap_or_default();
    if participants.is_empty() {
        return Err(ExportError::NoParticipants);
    }
    if participants.iter().any(|name| name.trim().is_empty()) {
        return Err(ExportError::BlankParticipant);
    }

    let page = PageLayout::new(options.format, options.orientation);
    let total = participants.len();
    let mut exported: Vec<ExportedPdf> = Vec::with_capacity(total);

    for (index, peserta) in participants.iter().enumerate() {
        log::info!("Ekspor sertifikat {}/{}: {}", index + 1, total, peserta);

        let source = render_sertifikat(document, peserta, page);
        let filename = pdf_filename(&["Sertifikat", peserta, &document.title]);
        exported.push(export_single(surface, &source, &filename, options)?);

        if index + 1 < total {
            std::thread::sleep(BATCH_ITEM_DELAY);
        }
    }

    let archive_name = pdf_filename(&["Sertifikat", &document.title]).replace(".pdf", ".zip");
    let bytes = pack_archive(&exported)?;

    Ok(ExportedArchive {
        filename: archive_name,
        bytes,
        documents: exported.len(),
    })
}

fn pack_archive(documents: &[ExportedPdf]) -> Result<Vec<u8>, ExportError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let file_options = SimpleFileOptions::default();

    for document in documents {
        writer
            .start_file(document.filename.as_str(), file_options)
            .map_err(ExportError::Zip)?;
        writer.write_all(&document.bytes).map_err(ExportError::ZipIo)?;
    }

    let cursor = writer.finish().map_err(ExportError::Zip)?;
    Ok(cursor.into_inner())
}
