//! # fl-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the core
//! sharing services.

use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, ResponseError};
use fl_core::error::AppError;
use fl_core::models::FileInput;
use fl_core::services::{FileDownload, FileShareService, TextShareService};
use futures_util::StreamExt;
use serde::Deserialize;

use crate::error::ApiError;

/// Multipart part that carries the upload.
pub const FILE_FIELD: &str = "file";

/// State shared across all Actix-web workers.
#[derive(Clone)]
pub struct AppState {
    pub texts: TextShareService,
    pub files: FileShareService,
}

impl AppState {
    pub fn new(texts: TextShareService, files: FileShareService) -> Self {
        Self { texts, files }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextParams {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CodeParams {
    pub code: String,
}

/// Shares text given as `?text=` or as a urlencoded form field.
pub async fn save_text(
    data: web::Data<AppState>,
    query: Option<web::Query<TextParams>>,
    form: Option<web::Form<TextParams>>,
) -> Result<HttpResponse, ApiError> {
    let content = query
        .map(|q| q.into_inner().text)
        .or_else(|| form.map(|f| f.into_inner().text))
        .ok_or_else(|| AppError::ValidationError("missing `text` parameter".to_string()))?;

    let record = data.texts.save_text(content).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Legacy front-end binding: text always arrives in the query string.
pub async fn save_text_query(
    data: web::Data<AppState>,
    query: web::Query<TextParams>,
) -> Result<HttpResponse, ApiError> {
    let record = data.texts.save_text(query.into_inner().text).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn get_text(
    data: web::Data<AppState>,
    query: web::Query<CodeParams>,
) -> Result<HttpResponse, ApiError> {
    let record = data.texts.get_by_code(&query.code).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Accepts a multipart upload and returns the stored file's metadata.
pub async fn upload_file(
    data: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = read_file_part(payload).await?;
    let record = data.files.save_file(upload).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn get_file(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let record = data.files.get_by_code(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Streams the stored bytes back as a named attachment.
///
/// Unknown codes and missing bytes both answer with a bare 404 here, unlike
/// the metadata lookups which return a JSON error body.
pub async fn download_file(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let code = path.into_inner();

    match data.files.download_by_code(&code).await {
        Ok(FileDownload { record, body }) => {
            let content_type = record
                .content_type
                .as_deref()
                .and_then(|ct| ct.parse::<mime::Mime>().ok())
                .unwrap_or(mime::APPLICATION_OCTET_STREAM);

            HttpResponse::Ok()
                .content_type(content_type)
                .insert_header(ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(record.original_filename)],
                })
                .streaming(body)
        }
        Err(e) if e.is_not_found() => HttpResponse::NotFound().finish(),
        Err(e) => ApiError(e).error_response(),
    }
}

/// Pulls the `file` part out of the form, buffering its bytes.
async fn read_file_part(mut payload: Multipart) -> Result<FileInput, AppError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| AppError::ValidationError(e.to_string()))?;

        let disposition = field.content_disposition();
        if disposition.get_name() != Some(FILE_FIELD) {
            continue;
        }
        let original_filename = disposition.get_filename().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|m| m.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::ValidationError(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        return Ok(FileInput::new(original_filename, content_type, bytes));
    }

    Err(AppError::ValidationError(format!("missing `{}` part", FILE_FIELD)))
}
