//! PDF export pipeline.
//!
//! Three stages, each its own module:
//! - `engine` - rasterize a Typst source string into one continuous PNG
//!   bitmap at a fixed 2x oversampling (`RenderSurface` trait).
//! - `page` - page geometry and the pagination plan that splits the
//!   bitmap across pages.
//! - `pdf` - assemble the paginated bitmap into a PDF byte stream.
//!
//! `surat` and `sertifikat` hold the document templates, `batch` runs the
//! sequential per-participant certificate export, `handlers` exposes it
//! all over HTTP.

pub mod batch;
pub mod common;
pub mod engine;
pub mod handlers;
pub mod page;
pub mod pdf;
pub mod sertifikat;
pub mod surat;

pub use engine::{RenderSurface, TypstRenderSurface};
pub use page::{Orientation, PageFormat, PageLayout, PaginationPlan};
pub use pdf::export_single;

use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Errors that can occur during PDF export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nama file tidak boleh kosong")]
    EmptyFilename,
    #[error("daftar peserta kosong")]
    NoParticipants,
    #[error("semua nama peserta harus diisi")]
    BlankParticipant,
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to write render source: {0}")]
    WriteSource(#[source] std::io::Error),
    #[error("renderer execution failed: {0}")]
    RendererIo(#[source] std::io::Error),
    #[error("renderer exited with status {0}")]
    RendererExit(i32),
    #[error("failed to read rendered raster: {0}")]
    ReadRaster(#[source] std::io::Error),
    #[error("failed to decode raster: {0}")]
    DecodeRaster(#[source] printpdf::image_crate::ImageError),
    #[error("raster has no pixels")]
    EmptyRaster,
    #[error("failed to assemble PDF: {0}")]
    Pdf(#[source] printpdf::Error),
    #[error("failed to build archive: {0}")]
    Zip(#[source] zip::result::ZipError),
    #[error("failed to write archive: {0}")]
    ZipIo(#[source] std::io::Error),
}

impl ExportError {
    /// Validation errors are the caller's fault and map to 400; the rest
    /// are internal failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExportError::EmptyFilename
                | ExportError::NoParticipants
                | ExportError::BlankParticipant
        )
    }
}

/// Page options shared by single and batch export.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct PdfOptions {
    #[serde(default)]
    pub format: PageFormat,
    #[serde(default)]
    pub orientation: Orientation,
}

/// A successfully exported PDF.
#[derive(Debug)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// A ZIP archive of batch-exported PDFs.
#[derive(Debug)]
pub struct ExportedArchive {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub documents: usize,
}
