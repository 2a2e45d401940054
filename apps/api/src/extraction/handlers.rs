//! Axum route handler for RFP uploads.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::{Bytes, BytesMut};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::service::extract;
use crate::extraction::validation::{check_extension, RfpFormat, MAX_UPLOAD_BYTES};
use crate::models::rfp::ExtractedFacts;
use crate::state::AppState;
use crate::uploads::upload_key;

struct UploadedFile {
    file_name: String,
    format: RfpFormat,
    bytes: Bytes,
}

/// Reads the `file` field. The extension is checked from the part headers
/// before the body is read, and reading stops as soon as the running size
/// passes `MAX_UPLOAD_BYTES`.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(String::from)
            .ok_or_else(|| AppError::Validation("Uploaded file has no file name".to_string()))?;
        let format = check_extension(&file_name)?;

        let mut buf = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?
        {
            if buf.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::PayloadTooLarge(format!(
                    "upload exceeds the {MAX_UPLOAD_BYTES} byte limit"
                )));
            }
            buf.extend_from_slice(&chunk);
        }

        return Ok(UploadedFile {
            file_name,
            format,
            bytes: buf.freeze(),
        });
    }

    Err(AppError::Validation("File field is required".to_string()))
}

/// POST /api/extract-rfp
///
/// Multipart upload with a `file` part. Returns the extracted facts and
/// records the raw upload together with what was extracted.
pub async fn handle_extract_rfp(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractedFacts>, AppError> {
    let upload = read_file_field(&mut multipart).await?;

    let facts = extract(state.llm.as_ref(), &upload.bytes, &upload.file_name).await?;

    let key = upload_key(Uuid::new_v4(), &upload.file_name);
    let file_path = state
        .uploads
        .put(&key, upload.bytes, upload.format.content_type())
        .await?;
    let record = match state
        .store
        .record_rfp_upload(&upload.file_name, &file_path, &facts)
        .await
    {
        Ok(record) => record,
        Err(e) => {
            // No row will point at the object; take it back out.
            if let Err(cleanup) = state.uploads.delete(&key).await {
                error!("Orphaned RFP upload left at {file_path}: {cleanup}");
            }
            return Err(e);
        }
    };

    info!(
        "Recorded RFP upload {} ({}) at {}",
        record.id, record.filename, record.file_path
    );

    Ok(Json(facts))
}
