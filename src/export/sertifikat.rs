//! Typst template for training certificates (sertifikat).
//!
//! One certificate per participant: the participant's name is a template
//! parameter, so every batch item renders its own independent source
//! instead of patching an already-rendered document.

use super::common::{escape_typst_string, format_indonesian_date};
use super::page::PageLayout;
use crate::document::models::Document;

/// Build the complete Typst source for one participant's certificate.
pub fn render_sertifikat(document: &Document, participant: &str, page: PageLayout) -> String {
    let tanggal = format_indonesian_date();
    let nomor = escape_typst_string(document.number.as_deref().unwrap_or("-"));
    let kegiatan = escape_typst_string(&document.title);
    let peserta = escape_typst_string(participant.trim());
    let keterangan = escape_typst_string(document.content.trim());
    let penandatangan = escape_typst_string(
        document
            .approved_by_name
            .as_deref()
            .unwrap_or(&document.created_by_name),
    );

    format!(
        r#"#set page(width: {width}mm, height: auto, margin: 15mm)
#set text(size: 12pt)

#align(center)[
  #v(8mm)
  #text(11pt)[YAYASAN HAFECS]
  #v(4mm)
  #text(28pt, weight: "bold", tracking: 2pt)[SERTIFIKAT]
  #linebreak()
  #text(10pt)[Nomor: #text("{nomor}")]
  #v(8mm)
  diberikan kepada
  #v(4mm)
  #text(24pt, weight: "bold")[#text("{peserta}")]
  #v(2mm)
  #line(length: 60%, stroke: 0.5pt)
  #v(4mm)
  atas partisipasinya dalam
  #linebreak()
  #text(14pt, weight: "bold")[#text("{kegiatan}")]
  #v(6mm)
  #text(10pt)[#text("{keterangan}")]
  #v(10mm)
  Banjarmasin, {tanggal}
  #v(14mm)
  #text(weight: "bold")[#text("{penandatangan}")]
]
"#,
        width = page.width_mm,
        nomor = nomor,
        peserta = peserta,
        kegiatan = kegiatan,
        keterangan = keterangan,
        tanggal = tanggal,
        penandatangan = penandatangan,
    )
}
