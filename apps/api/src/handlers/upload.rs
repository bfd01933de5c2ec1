use axum::Json;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use dochost_core::AppError;
use dochost_domain::UploadAttemptResult;
use tracing::info;

use crate::dto::UploadResponse;
use crate::error::{ApiError, ApiResult};
use crate::request_context::RequestContext;
use crate::state::AppState;

/// Multipart field that carries the uploaded file.
const FILE_FIELD: &str = "file";

/// POST /upload - Store the `file` part and return its SHA-256.
///
/// Anything that is not a multipart body with a named `file` part is
/// answered as "no file".
pub async fn upload_handler(
    State(state): State<AppState>,
    context: RequestContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    if let Ok(mut multipart) = multipart {
        loop {
            match multipart.next_field().await {
                Ok(Some(field)) if is_file_part(&field) => {
                    return store_file_part(&state, context, field).await;
                }
                Ok(Some(_)) => continue,
                Ok(None) => break,
                Err(error) if error.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                    state
                        .upload_service
                        .reject(&context.metadata, UploadAttemptResult::TooLarge)
                        .await?;
                    return Err(too_large().into());
                }
                Err(_) => break,
            }
        }
    }

    state
        .upload_service
        .reject(&context.metadata, UploadAttemptResult::NoFile)
        .await?;

    Err(ApiError::from(AppError::Validation("no file".to_owned())))
}

async fn store_file_part(
    state: &AppState,
    context: RequestContext,
    mut field: Field<'_>,
) -> ApiResult<Json<UploadResponse>> {
    let client_filename = field.file_name().unwrap_or_default().to_owned();

    let mut session = state
        .upload_service
        .begin(context.metadata, &client_filename)
        .await?;

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                if let Err(error) = session.write_chunk(&chunk).await {
                    return Err(session.abort(error).await.into());
                }
            }
            Ok(None) => break,
            Err(error) => return Err(session.abort(stream_error(&error)).await.into()),
        }
    }

    let receipt = session.finish(context.content_length).await?;

    info!(
        filename = %receipt.filename,
        size_bytes = receipt.size_bytes,
        sha256 = %receipt.sha256,
        "upload stored"
    );

    Ok(Json(UploadResponse {
        ok: true,
        filename: receipt.filename.into(),
        sha256: receipt.sha256,
    }))
}

fn is_file_part(field: &Field<'_>) -> bool {
    field.name() == Some(FILE_FIELD) && field.file_name().is_some_and(|name| !name.is_empty())
}

fn stream_error(error: &MultipartError) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        AppError::Validation("incomplete upload".to_owned())
    }
}

fn too_large() -> AppError {
    AppError::PayloadTooLarge("upload too large".to_owned())
}
