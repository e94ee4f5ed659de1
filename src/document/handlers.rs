use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use uuid::Uuid;

use super::models::{
    CreateDocumentRequest, Document, DocumentFilter, RejectRequest, UpdateDocumentRequest,
};
use super::workflow::{self, WorkflowError};
use crate::auth::middleware::require_actor;
use crate::user::models::Role;
use crate::AppState;

fn workflow_error_response(error: WorkflowError) -> HttpResponse {
    match error {
        WorkflowError::NotOwner | WorkflowError::NotReviewer => {
            HttpResponse::Forbidden().json(crate::ErrorResponse::forbidden(&error.to_string()))
        }
        WorkflowError::InvalidTransition { .. } | WorkflowError::EmptyReason => {
            HttpResponse::BadRequest().json(crate::ErrorResponse::bad_request(&error.to_string()))
        }
    }
}

/// List documents, optionally filtered by type, status, owner and a
/// title/number search term.
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    get,
    path = "/documents",
    params(DocumentFilter),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of documents", body = [Document]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_all_documents(
    req: HttpRequest,
    state: web::Data<AppState>,
    filter: web::Query<DocumentFilter>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let documents: Vec<Document> = state
        .get_all_documents()
        .into_iter()
        .filter(|document| filter.matches(document, actor.id))
        .collect();

    HttpResponse::Ok().json(documents)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    get,
    path = "/documents/{id}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Document found", body = Document),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn get_document_by_id(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    if let Err(e) = require_actor(&req) {
        return e.error_response();
    }

    match state.get_document(&path.into_inner()) {
        Some(document) => HttpResponse::Ok().json(document),
        None => HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Document not found")),
    }
}

/// Create a new draft document.
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    post,
    path = "/documents",
    request_body = CreateDocumentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Role may not create documents")
    )
)]
pub async fn create_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<CreateDocumentRequest>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    if actor.role == Role::Hode {
        return HttpResponse::Forbidden().json(crate::ErrorResponse::forbidden(
            "Kepala departemen tidak membuat dokumen",
        ));
    }

    let request = body.into_inner();
    if request.title.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(crate::ErrorResponse::bad_request("Judul tidak boleh kosong"));
    }

    let document = Document::new(request, actor.id, actor.name.clone());
    state.insert_document(document.clone());
    state.record_activity(
        actor.id,
        &actor.name,
        "Membuat dokumen",
        &document.title,
        Some(document.doc_type.to_string()),
    );

    HttpResponse::Created().json(document)
}

/// Update a draft document. Only the creator may edit, and only drafts.
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    put,
    path = "/documents/{id}",
    request_body = UpdateDocumentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Document updated", body = Document),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not editable by this user"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn update_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDocumentRequest>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let id = path.into_inner();
    let update = body.into_inner();

    let result = state.update_document(&id, |document| {
        if !workflow::can_edit(document, &actor) {
            return Err(());
        }
        if let Some(title) = &update.title {
            document.title = title.clone();
        }
        if let Some(code) = &update.code {
            document.code = Some(code.clone());
        }
        if let Some(number) = &update.number {
            document.number = Some(number.clone());
        }
        if let Some(content) = &update.content {
            document.content = content.clone();
        }
        if let Some(participants) = &update.participants {
            document.participants = Some(participants.clone());
        }
        document.updated_at = Utc::now();
        Ok(document.clone())
    });

    match result {
        Some(Ok(document)) => HttpResponse::Ok().json(document),
        Some(Err(())) => HttpResponse::Forbidden().json(crate::ErrorResponse::forbidden(
            "Hanya draft milik sendiri yang dapat diubah",
        )),
        None => HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Document not found")),
    }
}

/// Delete a document. Admins may delete any document; the creator may
/// delete only drafts.
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    delete,
    path = "/documents/{id}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not deletable by this user"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn delete_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let id = path.into_inner();
    let document = match state.get_document(&id) {
        Some(document) => document,
        None => {
            return HttpResponse::NotFound()
                .json(crate::ErrorResponse::not_found("Document not found"));
        }
    };

    if !workflow::can_delete(&document, &actor) {
        return HttpResponse::Forbidden().json(crate::ErrorResponse::forbidden(
            "Dokumen ini tidak dapat dihapus oleh Anda",
        ));
    }

    if !state.delete_document(&id) {
        return HttpResponse::NotFound()
            .json(crate::ErrorResponse::not_found("Document not found"));
    }

    state.record_activity(
        actor.id,
        &actor.name,
        "Menghapus dokumen",
        &document.title,
        None,
    );
    HttpResponse::Ok().finish()
}

/// Submit a draft for approval (draft -> pending).
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    post,
    path = "/documents/{id}/submit",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Submitted for approval", body = Document),
        (status = 400, description = "Invalid transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only the creator may submit"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn submit_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let result = state.update_document(&path.into_inner(), |document| {
        workflow::submit(document, &actor).map(|_| document.clone())
    });

    match result {
        Some(Ok(document)) => {
            state.record_activity(
                actor.id,
                &actor.name,
                "Mengajukan persetujuan",
                &document.title,
                None,
            );
            HttpResponse::Ok().json(document)
        }
        Some(Err(e)) => workflow_error_response(e),
        None => HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Document not found")),
    }
}

/// Approve a pending document (pending -> approved). Reviewer role only.
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    post,
    path = "/documents/{id}/approve",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Document approved", body = Document),
        (status = 400, description = "Invalid transition"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only a department head may approve"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn approve_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let result = state.update_document(&path.into_inner(), |document| {
        workflow::approve(document, &actor).map(|_| document.clone())
    });

    match result {
        Some(Ok(document)) => {
            state.record_activity(
                actor.id,
                &actor.name,
                "Menyetujui dokumen",
                &document.title,
                None,
            );
            HttpResponse::Ok().json(document)
        }
        Some(Err(e)) => workflow_error_response(e),
        None => HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Document not found")),
    }
}

/// Reject a pending document (pending -> rejected). Requires a non-blank
/// reason, which is stored on the document.
#[utoipa::path(
    context_path = "/api",
    tag = "Document Service",
    post,
    path = "/documents/{id}/reject",
    request_body = RejectRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Document rejected", body = Document),
        (status = 400, description = "Invalid transition or blank reason"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Only a department head may reject"),
        (status = 404, description = "Document not found")
    ),
    params(("id" = Uuid, Path, description = "Document ID"))
)]
pub async fn reject_document(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<RejectRequest>,
) -> impl Responder {
    let actor = match require_actor(&req) {
        Ok(actor) => actor,
        Err(e) => return e.error_response(),
    };

    let result = state.update_document(&path.into_inner(), |document| {
        workflow::reject(document, &actor, &body.reason).map(|_| document.clone())
    });

    match result {
        Some(Ok(document)) => {
            state.record_activity(
                actor.id,
                &actor.name,
                "Menolak dokumen",
                &document.title,
                document.rejection_reason.clone(),
            );
            HttpResponse::Ok().json(document)
        }
        Some(Err(e)) => workflow_error_response(e),
        None => HttpResponse::NotFound().json(crate::ErrorResponse::not_found("Document not found")),
    }
}

/// Configure document routes (including export endpoints).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/documents")
            .route(web::get().to(get_all_documents))
            .route(web::post().to(create_document)),
    )
    .service(
        web::resource("/documents/{id}")
            .route(web::get().to(get_document_by_id))
            .route(web::put().to(update_document))
            .route(web::delete().to(delete_document)),
    )
    .service(web::resource("/documents/{id}/submit").route(web::post().to(submit_document)))
    .service(web::resource("/documents/{id}/approve").route(web::post().to(approve_document)))
    .service(web::resource("/documents/{id}/reject").route(web::post().to(reject_document)))
    .service(
        web::resource("/documents/{id}/export")
            .route(web::post().to(crate::export::handlers::export_document)),
    )
    .service(
        web::resource("/documents/{id}/export/batch")
            .route(web::post().to(crate::export::handlers::export_document_batch)),
    );
}
