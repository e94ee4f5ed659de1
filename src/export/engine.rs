//! Raster stage of the export pipeline.
//!
//! Handles the low-level details of writing Typst source to temporary
//! files, invoking the compiler and reading back the bitmap. The source
//! sets `page(height: auto)`, so the output is one continuous PNG of the
//! full content height, which the pagination stage then splits.

use std::fs;
use std::process::Command;
use tempfile::tempdir;

use super::ExportError;

/// Base resolution of the rendered document.
pub const BASE_PPI: u32 = 72;
/// Fixed oversampling factor for export quality.
pub const OVERSAMPLE: u32 = 2;

/// Resolution used for rasterization.
pub fn raster_ppi() -> u32 {
    BASE_PPI * OVERSAMPLE
}

/// Turns a Typst source string into a single PNG bitmap.
///
/// Abstracted so the pipeline can be exercised without a `typst` binary;
/// tests substitute a mock surface.
pub trait RenderSurface: Send + Sync {
    fn rasterize(&self, source: &str, ppi: u32) -> Result<Vec<u8>, ExportError>;
}

/// Production surface: shells out to the `typst` CLI inside a temporary
/// directory. The directory is removed when the guard drops, on success
/// and on every failure path.
pub struct TypstRenderSurface;

impl RenderSurface for TypstRenderSurface {
    fn rasterize(&self, source: &str, ppi: u32) -> Result<Vec<u8>, ExportError> {
        let temp_dir = tempdir().map_err(ExportError::TempDir)?;
        let source_path = temp_dir.path().join("dokumen.typ");
        fs::write(&source_path, source).map_err(ExportError::WriteSource)?;

        let output_path = temp_dir.path().join("dokumen.png");
        let status = Command::new("typst")
            .arg("compile")
            .arg("--format")
            .arg("png")
            .arg("--ppi")
            .arg(ppi.to_string())
            .arg(&source_path)
            .arg(&output_path)
            .current_dir(temp_dir.path())
            .status()
            .map_err(ExportError::RendererIo)?;

        if !status.success() {
            let code = status.code().unwrap_or(-1);
            return Err(ExportError::RendererExit(code));
        }

        fs::read(&output_path).map_err(ExportError::ReadRaster)
    }
}
