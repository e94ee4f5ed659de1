//! Typst template for formal letters (surat).

use super::common::{escape_typst_string, format_indonesian_date};
use super::page::PageLayout;
use crate::document::models::Document;

/// Render the letter body as Typst paragraphs.
fn content_markup(content: &str) -> String {
    content
        .split("\n\n")
        .filter(|paragraph| !paragraph.trim().is_empty())
        .map(|paragraph| format!("#par(text(\"{}\"))", escape_typst_string(paragraph.trim())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the complete Typst source for a letter. Page height is auto so
/// the raster carries the full content height.
pub fn render_surat(document: &Document, page: PageLayout) -> String {
    let tanggal = format_indonesian_date();
    let nomor = escape_typst_string(document.number.as_deref().unwrap_or("-"));
    let judul = escape_typst_string(&document.title);
    let penandatangan = escape_typst_string(
        document
            .approved_by_name
            .as_deref()
            .unwrap_or("................................."),
    );

    format!(
        r#"#set page(width: {width}mm, height: auto, margin: (x: 20mm, y: 18mm))
#set text(size: 11pt)

#align(center)[
  #text(16pt, weight: "bold")[YAYASAN HAFECS]
  #linebreak()
  Highly Functional Education Consulting Services
  #linebreak()
  #text(9pt)[Banjarmasin, Kalimantan Selatan]
]

#line(length: 100%, stroke: 1.5pt)
#v(6mm)

#align(center)[
  #text(13pt, weight: "bold")[#text("{judul}")]
  #linebreak()
  Nomor: #text("{nomor}")
]

#v(6mm)

{content}

#v(14mm)

#align(right)[
  Banjarmasin, {tanggal}
  #v(18mm)
  #text(weight: "bold")[#text("{penandatangan}")]
]
"#,
        width = page.width_mm,
        judul = judul,
        nomor = nomor,
        content = content_markup(&document.content),
        tanggal = tanggal,
        penandatangan = penandatangan,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::{CreateDocumentRequest, DocumentType};
    use crate::export::page::{Orientation, PageFormat};
    use uuid::Uuid;

    fn sample_document() -> Document {
        Document::new(
            CreateDocumentRequest {
                doc_type: DocumentType::Surat,
                title: "Surat Undangan \"Pelatihan\"".to_string(),
                code: None,
                number: Some("001/SU/HAFECS/2026".to_string()),
                content: "Paragraf satu.\n\nParagraf dua.".to_string(),
                participants: None,
            },
            Uuid::new_v4(),
            "Siti Nurhaliza".to_string(),
        )
    }

    #[test]
    fn source_uses_auto_page_height_and_layout_width() {
        let page = PageLayout::new(PageFormat::A4, Orientation::Portrait);
        let source = render_surat(&sample_document(), page);

        assert!(source.contains("width: 210mm"));
        assert!(source.contains("height: auto"));
    }

    #[test]
    fn title_quotes_are_escaped() {
        let page = PageLayout::new(PageFormat::A4, Orientation::Portrait);
        let source = render_surat(&sample_document(), page);

        assert!(source.contains(r#"Surat Undangan \"Pelatihan\""#));
    }

    #[test]
    fn paragraphs_become_separate_blocks() {
        let page = PageLayout::new(PageFormat::A4, Orientation::Portrait);
        let source = render_surat(&sample_document(), page);

        assert!(source.contains("Paragraf satu."));
        assert!(source.contains("Paragraf dua."));
        assert_eq!(source.matches("#par(").count(), 2);
    }
}
