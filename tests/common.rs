#![allow(dead_code)]

use std::io::Cursor;

use parking_lot::Mutex;
use printpdf::image_crate::{DynamicImage, ImageFormat};

use hafecs_office_server::export::{ExportError, RenderSurface};

/// Render surface for tests: records every source it is asked to
/// rasterize and returns a solid PNG of a fixed size instead of invoking
/// the real renderer.
pub struct MockRenderSurface {
    raster_width: u32,
    raster_height: u32,
    fail_at: Option<usize>,
    sources: Mutex<Vec<String>>,
}

impl MockRenderSurface {
    pub fn new(raster_width: u32, raster_height: u32) -> Self {
        MockRenderSurface {
            raster_width,
            raster_height,
            fail_at: None,
            sources: Mutex::new(Vec::new()),
        }
    }

    /// Fail the n-th rasterization (zero-based) with a renderer error.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// All sources rasterized so far, in call order.
    pub fn rendered_sources(&self) -> Vec<String> {
        self.sources.lock().clone()
    }
}

impl RenderSurface for MockRenderSurface {
    fn rasterize(&self, source: &str, _ppi: u32) -> Result<Vec<u8>, ExportError> {
        let mut sources = self.sources.lock();
        let index = sources.len();
        sources.push(source.to_string());

        if self.fail_at == Some(index) {
            return Err(ExportError::RendererExit(1));
        }

        Ok(encode_png(self.raster_width, self.raster_height))
    }
}

/// A valid PNG of the given dimensions, all pixels black.
pub fn encode_png(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::new_rgb8(width, height);
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encoding an in-memory PNG should not fail");
    buffer.into_inner()
}
