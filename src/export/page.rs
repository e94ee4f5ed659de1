//! Page geometry and pagination.
//!
//! The raster is scaled to the full page width. If the scaled height
//! exceeds one page, the same bitmap is drawn on successive pages at
//! vertical offsets of one page height each; the page boundary clips the
//! rest. Each page consumes a full page height, so the loop is finite.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ExportError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    /// Width and height in millimeters, portrait.
    pub fn portrait_size_mm(self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (210.0, 297.0),
            PageFormat::Letter => (215.9, 279.4),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Output page dimensions for a chosen format and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageLayout {
    pub fn new(format: PageFormat, orientation: Orientation) -> Self {
        let (w, h) = format.portrait_size_mm();
        match orientation {
            Orientation::Portrait => PageLayout {
                width_mm: w,
                height_mm: h,
            },
            Orientation::Landscape => PageLayout {
                width_mm: h,
                height_mm: w,
            },
        }
    }
}

/// How a raster of known pixel size maps onto a sequence of pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationPlan {
    /// Raster width scaled to page width, in mm.
    pub image_width_mm: f32,
    /// Raster height under the same scale, in mm.
    pub image_height_mm: f32,
    pub page: PageLayout,
}

impl PaginationPlan {
    pub fn for_raster(
        pixel_width: u32,
        pixel_height: u32,
        page: PageLayout,
    ) -> Result<Self, ExportError> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(ExportError::EmptyRaster);
        }
        let image_width_mm = page.width_mm;
        let image_height_mm = pixel_height as f32 * page.width_mm / pixel_width as f32;
        Ok(PaginationPlan {
            image_width_mm,
            image_height_mm,
            page,
        })
    }

    /// Always at least one page, otherwise ceil(image height / page height).
    pub fn page_count(&self) -> usize {
        let pages = (self.image_height_mm / self.page.height_mm).ceil() as usize;
        pages.max(1)
    }

    /// Vertical offset of the bitmap's top edge on each page, in mm from
    /// the page top (0, -h, -2h, ...).
    pub fn offsets_mm(&self) -> Vec<f32> {
        (0..self.page_count())
            .map(|page_index| -(page_index as f32) * self.page.height_mm)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a4_portrait() -> PageLayout {
        PageLayout::new(PageFormat::A4, Orientation::Portrait)
    }

    #[test]
    fn a4_landscape_swaps_dimensions() {
        let layout = PageLayout::new(PageFormat::A4, Orientation::Landscape);
        assert_eq!(layout.width_mm, 297.0);
        assert_eq!(layout.height_mm, 210.0);
    }

    #[test]
    fn letter_portrait_dimensions() {
        let layout = PageLayout::new(PageFormat::Letter, Orientation::Portrait);
        assert_eq!(layout.width_mm, 215.9);
        assert_eq!(layout.height_mm, 279.4);
    }

    #[test]
    fn content_shorter_than_one_page_yields_one_page() {
        // 1000x500 px scaled to 210 mm wide -> 105 mm tall, well under 297.
        let plan = PaginationPlan::for_raster(1000, 500, a4_portrait()).unwrap();
        assert_eq!(plan.page_count(), 1);
        assert_eq!(plan.offsets_mm(), vec![0.0]);
    }

    #[test]
    fn content_height_equal_to_page_yields_one_page() {
        // 210 mm wide, exactly 297 mm tall at 10 px/mm.
        let plan = PaginationPlan::for_raster(2100, 2970, a4_portrait()).unwrap();
        assert_eq!(plan.page_count(), 1);
    }

    #[test]
    fn page_count_is_ceil_of_height_ratio() {
        // 2100x7000 px -> 700 mm tall on a 297 mm page: ceil(700/297) = 3.
        let plan = PaginationPlan::for_raster(2100, 7000, a4_portrait()).unwrap();
        assert_eq!(plan.page_count(), 3);

        let offsets = plan.offsets_mm();
        assert_eq!(offsets.len(), 3);
        assert_eq!(offsets[0], 0.0);
        assert_eq!(offsets[1], -297.0);
        assert_eq!(offsets[2], -594.0);
    }

    #[test]
    fn offsets_step_by_exactly_one_page_height() {
        let plan = PaginationPlan::for_raster(800, 9000, a4_portrait()).unwrap();
        let offsets = plan.offsets_mm();
        for pair in offsets.windows(2) {
            let step = pair[0] - pair[1];
            assert!((step - 297.0).abs() < f32::EPSILON * 297.0);
        }
    }

    #[test]
    fn zero_sized_raster_is_rejected() {
        assert!(matches!(
            PaginationPlan::for_raster(0, 100, a4_portrait()),
            Err(ExportError::EmptyRaster)
        ));
        assert!(matches!(
            PaginationPlan::for_raster(100, 0, a4_portrait()),
            Err(ExportError::EmptyRaster)
        ));
    }

    #[test]
    fn landscape_certificate_fits_one_page() {
        // A 2x-oversampled landscape A4 raster: 297x210 mm at ~5.7 px/mm.
        let layout = PageLayout::new(PageFormat::A4, Orientation::Landscape);
        let plan = PaginationPlan::for_raster(1684, 1190, layout).unwrap();
        assert_eq!(plan.page_count(), 1);
    }
}
