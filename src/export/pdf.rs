//! Assembly stage: turn one continuous raster into a paginated PDF.
//!
//! The same bitmap is embedded on every page at successive negative
//! vertical offsets; the page boundary clips everything outside it. The
//! result is byte-for-byte one file, produced in memory, so a failure
//! anywhere leaves nothing half-written on disk.

use printpdf::{image_crate, Image, ImageTransform, Mm, PdfDocument};

use super::engine::{raster_ppi, RenderSurface};
use super::page::{PageLayout, PaginationPlan};
use super::{ExportError, ExportedPdf, PdfOptions};

const MM_PER_INCH: f32 = 25.4;

/// Assemble a PNG raster into a paginated PDF. Returns the bytes and the
/// number of pages produced.
pub fn assemble(raster_png: &[u8], page: PageLayout, title: &str) -> Result<(Vec<u8>, usize), ExportError> {
    let decoded = image_crate::load_from_memory(raster_png).map_err(ExportError::DecodeRaster)?;
    let plan = PaginationPlan::for_raster(decoded.width(), decoded.height(), page)?;

    // Embed resolution chosen so the raster width spans the page width.
    let dpi = decoded.width() as f32 * MM_PER_INCH / plan.image_width_mm;

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(page.width_mm), Mm(page.height_mm), "Halaman");

    let offsets = plan.offsets_mm();
    for (index, offset) in offsets.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(page.width_mm), Mm(page.height_mm), "Halaman");
            doc.get_page(page_index).get_layer(layer_index)
        };

        // printpdf positions from the bottom-left corner.
        let translate_y = page.height_mm - plan.image_height_mm - offset;
        let image = Image::from_dynamic_image(&decoded);
        image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(translate_y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    let bytes = doc.save_to_bytes().map_err(ExportError::Pdf)?;
    Ok((bytes, offsets.len()))
}

/// Single export contract: rasterize the source, paginate, assemble.
/// The filename must be non-empty; nothing is rendered otherwise.
pub fn export_single(
    surface: &dyn RenderSurface,
    source: &str,
    filename: &str,
    options: PdfOptions,
) -> Result<ExportedPdf, ExportError> {
    if filename.trim().is_empty() {
        return Err(ExportError::EmptyFilename);
    }

    let page = PageLayout::new(options.format, options.orientation);
    let raster = surface.rasterize(source, raster_ppi())?;
    let (bytes, pages) = assemble(&raster, page, filename)?;

    log::info!("Exported {} ({} pages, {} bytes)", filename, pages, bytes.len());

    Ok(ExportedPdf {
        filename: filename.to_string(),
        bytes,
        pages,
    })
}
