use actix_web::{web, HttpRequest, HttpResponse, Responder};
use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};
use uuid::Uuid;

use super::batch::export_certificates;
use super::common::pdf_filename;
use super::pdf::export_single;
use super::sertifikat::render_sertifikat;
use super::surat::render_surat;
use super::{ExportError, PageLayout, PdfOptions};
use crate::auth::middleware::require_actor;
use crate::document::models::DocumentType;
use crate::AppState;

lazy_static! {
    static ref EXPORTED_PDFS: IntCounter = register_int_counter!(
        "hafecs_exported_pdfs_total",
        "Total PDF documents exported"
    )
    .expect("Failed to register exported PDF counter");
}

const EXPORT_FAILED: &str = "Terjadi kesalahan saat membuat PDF. Silakan coba lagi.";

fn export_error_response(error: &ExportError) -> HttpResponse {
    if error.is_validation() {
        HttpResponse::BadRequest().json(crate::ErrorResponse::bad_request(&error.to_string()))
    } else {
        log::error!("PDF export failed: {:?}", error);
        HttpResponse::InternalServerError()
            .json(crate::ErrorResponse::internal_error(EXPORT_FAILED))
    }
}

fn attachment(filename: &str) -> (&'static str, String) {
    (
        "Content-Disposition",
        format!("attachment; filename=\"{}\"", filename),
    )
}

/// Export one document as a paginated PDF.
#[utoipa::path(
    context_path = "/api",
    tag = "Export",
    post,
    path = "/documents/{id}/export",
    request_body = PdfOptions,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "PDF file", content_type = "application/pdf"),
        (status = 400, description = "Invalid export request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn export_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    options: Option<web::Json<PdfOptions>>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let document = match state.get_document(&path.into_inner()) {
        Some(document) => document,
        None => {
            return HttpResponse::NotFound()
                .json(crate::ErrorResponse::not_found("Document not found"));
        }
    };

    let options = options.map(|json| json.into_inner()).unwrap_or_default();
    let page = PageLayout::new(options.format, options.orientation);

    let (source, filename) = match document.doc_type {
        DocumentType::Surat => {
            let name_part = document.number.as_deref().unwrap_or(&document.title);
            (
                render_surat(&document, page),
                pdf_filename(&[name_part]),
            )
        }
        DocumentType::Sertifikat => {
            let first = document
                .participants
                .as_ref()
                .and_then(|names| names.first())
                .cloned();
            let peserta = match first {
                Some(peserta) if !peserta.trim().is_empty() => peserta,
                _ => {
                    return export_error_response(&ExportError::NoParticipants);
                }
            };
            (
                render_sertifikat(&document, &peserta, page),
                pdf_filename(&["Sertifikat", &peserta, &document.title]),
            )
        }
    };

    let surface = state.render.clone();
    let result = web::block(move || export_single(surface.as_ref(), &source, &filename, options))
        .await;

    match result {
        Ok(Ok(exported)) => {
            EXPORTED_PDFS.inc();
            state.record_activity(
                actor.id,
                &actor.name,
                "Mengekspor PDF",
                &document.title,
                Some(exported.filename.clone()),
            );
            HttpResponse::Ok()
                .content_type("application/pdf")
                .insert_header(attachment(&exported.filename))
                .body(exported.bytes)
        }
        Ok(Err(e)) => export_error_response(&e),
        Err(e) => {
            log::error!("Export task failed to run: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error(EXPORT_FAILED))
        }
    }
}

/// Export a certificate for every participant, bundled as a ZIP archive.
#[utoipa::path(
    context_path = "/api",
    tag = "Export",
    post,
    path = "/documents/{id}/export/batch",
    request_body = PdfOptions,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "ZIP archive of PDFs", content_type = "application/zip"),
        (status = 400, description = "Invalid export request"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn export_document_batch(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    options: Option<web::Json<PdfOptions>>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let document = match state.get_document(&path.into_inner()) {
        Some(document) => document,
        None => {
            return HttpResponse::NotFound()
                .json(crate::ErrorResponse::not_found("Document not found"));
        }
    };

    if document.doc_type != DocumentType::Sertifikat {
        return HttpResponse::BadRequest().json(crate::ErrorResponse::bad_request(
            "Ekspor massal hanya tersedia untuk sertifikat",
        ));
    }

    let options = options.map(|json| json.into_inner()).unwrap_or_default();
    let surface = state.render.clone();
    let batch_document = document.clone();
    let result =
        web::block(move || export_certificates(surface.as_ref(), &batch_document, options)).await;

    match result {
        Ok(Ok(archive)) => {
            EXPORTED_PDFS.inc_by(archive.documents as u64);
            state.record_activity(
                actor.id,
                &actor.name,
                "Mengekspor PDF massal",
                &document.title,
                Some(format!("{} sertifikat", archive.documents)),
            );
            HttpResponse::Ok()
                .content_type("application/zip")
                .insert_header(attachment(&archive.filename))
                .body(archive.bytes)
        }
        Ok(Err(e)) => export_error_response(&e),
        Err(e) => {
            log::error!("Batch export task failed to run: {:?}", e);
            HttpResponse::InternalServerError()
                .json(crate::ErrorResponse::internal_error(EXPORT_FAILED))
        }
    }
}
